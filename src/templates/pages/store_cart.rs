use crate::api::models::CartLine;
use crate::templates::store_layout;
use maud::{html, Markup};

pub struct CartVm {
    pub lines: Vec<CartLine>,
    pub subtotal: i64,
    pub can_checkout: bool,
    pub logged_in: bool,
    pub flash: Option<String>,
}

pub fn cart_page(vm: &CartVm) -> Markup {
    store_layout(
        "Your Cart",
        vm.logged_in,
        vm.flash.as_deref(),
        html! {
            main class="container" {
                h1 { "Your Cart" }

                @if vm.lines.is_empty() {
                    p { "Your cart is empty." }
                    a href="/" { "Continue shopping" }
                } @else {
                    table class="cart-table" {
                        thead {
                            tr {
                                th { "Product" }
                                th { "Price" }
                                th { "Quantity" }
                                th { "Line Total" }
                                th { "" }
                            }
                        }
                        tbody {
                            @for line in &vm.lines {
                                tr {
                                    td {
                                        @if let Some(image) = &line.image {
                                            img src=(image) alt=(line.name) class="thumb";
                                        }
                                        (line.name)
                                        @if line.quantity > line.quantity_available {
                                            span class="field-error" {
                                                "Only " (line.quantity_available) " left in stock"
                                            }
                                        }
                                    }
                                    td { (line.price) " ₫" }
                                    td {
                                        form action="/cart/update" method="post" class="inline" {
                                            input type="hidden" name="lineId" value=(line.id);
                                            input type="number" name="quantity"
                                                value=(line.quantity) min="1";
                                            button type="submit" { "Update" }
                                        }
                                    }
                                    td { (line.price * line.quantity) " ₫" }
                                    td {
                                        form action="/cart/remove" method="post" class="inline" {
                                            input type="hidden" name="lineId" value=(line.id);
                                            button type="submit" { "Remove" }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    div class="card totals" {
                        p { "Subtotal: " strong { (vm.subtotal) " ₫" } }
                        p class="muted" { "Shipping is added at checkout." }
                        @if vm.can_checkout {
                            a href="/checkout" class="button" { "Checkout" }
                        } @else {
                            p class="field-error" {
                                "Some items exceed available stock. Adjust quantities to continue."
                            }
                        }
                    }
                }
            }
        },
    )
}
