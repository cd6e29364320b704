use crate::admin::resources::{DeleteMode, ResourceSpec};
use crate::templates::admin_layout;
use maud::{html, Markup};

pub struct DeleteVm {
    pub spec: &'static ResourceSpec,
    pub id: String,
    pub display_name: String,
}

/// Two-step delete: this confirmation page, then the POST.
pub fn admin_delete_page(vm: &DeleteVm) -> Markup {
    let spec = vm.spec;
    admin_layout(
        &format!("Delete {}", spec.name),
        spec.key,
        None,
        html! {
            main {
                h1 { "Delete " (spec.name) }
                div class="card narrow" {
                    p {
                        "Are you sure you want to delete "
                        strong { (vm.display_name) } "?"
                    }
                    @if spec.delete == DeleteMode::Soft {
                        p class="muted" { "The record is deactivated, not removed." }
                    } @else {
                        p class="muted" { "This cannot be undone." }
                    }
                    form action=(format!("/admin/{}/{}/delete", spec.key, vm.id)) method="post"
                        class="inline" {
                        button type="submit" class="danger" { "Delete" }
                        a href=(format!("/admin/{}", spec.key)) class="button secondary" { "Cancel" }
                    }
                }
            }
        },
    )
}
