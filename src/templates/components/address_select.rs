use crate::domain::address::AddressSelector;
use maud::{html, Markup};

/// Three dependent selects (city, district, ward). Changing a level
/// resubmits the form without saving, so the server can rebuild the
/// option lists below it; the save button carries its own marker field.
pub fn address_select(
    selector: &AddressSelector,
    error_for: impl Fn(&str) -> Option<String>,
) -> Markup {
    let selected_city = selector.city().map(|n| n.name.clone());
    let selected_district = selector.district().map(|n| n.name.clone());
    let selected_ward = selector.ward().map(|n| n.name.clone());

    html! {
        div class="form-field" {
            label for="city" { "City" }
            select id="city" name="city" onchange="this.form.submit()" {
                option value="" selected[selected_city.is_none()] { "-- Select city --" }
                @for node in selector.tree_cities() {
                    option value=(node.name)
                        selected[selected_city.as_deref() == Some(node.name.as_str())] {
                        (node.name)
                    }
                }
            }
            @if let Some(message) = error_for("city") {
                span class="field-error" { (message) }
            }
        }
        div class="form-field" {
            label for="district" { "District" }
            select id="district" name="district" onchange="this.form.submit()" {
                option value="" selected[selected_district.is_none()] { "-- Select district --" }
                @for node in selector.district_options() {
                    option value=(node.name)
                        selected[selected_district.as_deref() == Some(node.name.as_str())] {
                        (node.name)
                    }
                }
            }
            @if let Some(message) = error_for("district") {
                span class="field-error" { (message) }
            }
        }
        div class="form-field" {
            label for="ward" { "Ward" }
            select id="ward" name="ward" onchange="this.form.submit()" {
                option value="" selected[selected_ward.is_none()] { "-- Select ward --" }
                @for node in selector.ward_options() {
                    option value=(node.name)
                        selected[selected_ward.as_deref() == Some(node.name.as_str())] {
                        (node.name)
                    }
                }
            }
            @if let Some(message) = error_for("ward") {
                span class="field-error" { (message) }
            }
        }
        input type="hidden" name="address" value=(selector.address());
    }
}
