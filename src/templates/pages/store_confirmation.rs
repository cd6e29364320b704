use crate::api::models::Invoice;
use crate::templates::store_layout;
use maud::{html, Markup};

pub struct ConfirmationVm {
    pub invoice: Invoice,
    pub logged_in: bool,
}

pub fn confirmation_page(vm: &ConfirmationVm) -> Markup {
    let invoice = &vm.invoice;
    store_layout(
        "Order Confirmed",
        vm.logged_in,
        None,
        html! {
            main class="container" {
                h1 { "Thank you for your order!" }
                div class="card" {
                    p { "Order " strong { (invoice.id) } " has been received." }
                    p { "Delivery to: " (invoice.address) " (" (invoice.phone_number) ")" }
                    @if let Some(note) = &invoice.note {
                        @if !note.is_empty() {
                            p { "Note: " (note) }
                        }
                    }
                    table {
                        tbody {
                            @for line in &invoice.lines {
                                tr {
                                    td { (line.name) " × " (line.quantity) }
                                    td { (line.price * line.quantity) " ₫" }
                                }
                            }
                            tr {
                                td { "Shipping" }
                                td { (invoice.shipping_fee) " ₫" }
                            }
                            tr {
                                td { strong { "Total" } }
                                td { strong { (invoice.total) " ₫" } }
                            }
                        }
                    }
                }
                a href="/" { "Continue shopping" }
            }
        },
    )
}
