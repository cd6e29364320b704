use crate::admin::controller::{FormDraft, ValidationErrorMap};
use crate::admin::resources::ResourceSpec;
use crate::domain::address::AddressSelector;
use crate::domain::validate::FieldKind;
use crate::templates::admin_layout;
use crate::templates::components::{address_select, form_field};
use maud::{html, Markup};

pub struct FormVm<'a> {
    pub spec: &'static ResourceSpec,
    pub draft: &'a FormDraft,
    pub errors: &'a ValidationErrorMap,
    /// Present when the resource has an Address field.
    pub selector: Option<&'a AddressSelector<'a>>,
    pub flash: Option<String>,
}

pub fn admin_form_page(vm: &FormVm) -> Markup {
    let spec = vm.spec;
    let editing = vm.draft.id.is_some();
    let title = if editing {
        format!("Edit {}", spec.name)
    } else {
        format!("New {}", spec.name)
    };
    let has_upload = spec.fields.iter().any(|f| f.kind == FieldKind::Image);
    let enctype = if has_upload {
        "multipart/form-data"
    } else {
        "application/x-www-form-urlencoded"
    };

    admin_layout(
        &title,
        spec.key,
        vm.flash.as_deref(),
        html! {
            main {
                h1 { (title) }
                form action=(format!("/admin/{}/save", spec.key)) method="post"
                    enctype=(enctype) class="card narrow" {
                    @if let Some(id) = &vm.draft.id {
                        input type="hidden" name="id" value=(id);
                    }

                    @for field in spec.fields {
                        @if field.kind == FieldKind::Address {
                            @if let Some(selector) = vm.selector {
                                (address_select(selector, |name| vm.errors.get(name).cloned()))
                            }
                        } @else {
                            (form_field(
                                field,
                                vm.draft.values.get(field.name).map(String::as_str).unwrap_or(""),
                                vm.errors.get(field.name).map(String::as_str),
                            ))
                        }
                    }

                    div class="inline" {
                        button type="submit" name="save" value="1" { "Save" }
                        a href=(format!("/admin/{}", spec.key)) class="button secondary" { "Cancel" }
                    }
                }
            }
        },
    )
}
