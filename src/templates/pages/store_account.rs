use crate::api::models::Invoice;
use crate::domain::address::AddressSelector;
use crate::templates::components::address_select;
use crate::templates::store_layout;
use maud::{html, Markup};
use std::collections::BTreeMap;

pub struct AccountVm<'a> {
    pub values: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
    pub selector: &'a AddressSelector<'a>,
    pub orders: Vec<Invoice>,
    pub flash: Option<String>,
}

impl AccountVm<'_> {
    fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }
}

pub fn account_page(vm: &AccountVm) -> Markup {
    let error_for = |name: &str| vm.errors.get(name).cloned();

    let field = |name: &str, label: &str| {
        html! {
            div class="form-field" {
                label for=(name) { (label) }
                input type="text" id=(name) name=(name) value=(vm.value(name));
                @if let Some(message) = vm.errors.get(name) {
                    span class="field-error" { (message) }
                }
            }
        }
    };

    store_layout(
        "Your Account",
        true,
        vm.flash.as_deref(),
        html! {
            main class="container" {
                h1 { "Your Account" }

                form action="/account" method="post" class="card" {
                    h3 { "Profile" }
                    (field("fullName", "Full Name"))
                    (field("phoneNumber", "Phone Number"))
                    (field("email", "Email"))
                    (address_select(vm.selector, error_for))
                    button type="submit" name="save" value="1" { "Save" }
                }

                div class="card" {
                    h3 { "Order History" }
                    @if vm.orders.is_empty() {
                        p { "No orders yet." }
                    } @else {
                        table {
                            thead {
                                tr {
                                    th { "Order" }
                                    th { "Placed" }
                                    th { "Total" }
                                    th { "Status" }
                                }
                            }
                            tbody {
                                @for order in &vm.orders {
                                    tr {
                                        td {
                                            a href=(format!("/orders/{}", order.id)) { (order.id) }
                                        }
                                        td {
                                            @match order.created_at {
                                                Some(ts) => { (ts.format("%Y-%m-%d %H:%M")) }
                                                None => { "-" }
                                            }
                                        }
                                        td { (order.total) " ₫" }
                                        td { (order.status.as_deref().unwrap_or("Pending")) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
