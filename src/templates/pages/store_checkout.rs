use crate::api::models::CartLine;
use crate::domain::address::AddressSelector;
use crate::domain::cart::SHIPPING_FEE;
use crate::templates::components::address_select;
use crate::templates::store_layout;
use maud::{html, Markup};
use std::collections::BTreeMap;

pub struct CheckoutVm<'a> {
    pub lines: &'a [CartLine],
    pub subtotal: i64,
    pub grand_total: i64,
    pub selector: &'a AddressSelector<'a>,
    pub phone: String,
    pub note: String,
    pub payment: String,
    pub errors: BTreeMap<String, String>,
    pub flash: Option<String>,
}

pub fn checkout_page(vm: &CheckoutVm) -> Markup {
    let error_for = |name: &str| vm.errors.get(name).cloned();

    store_layout(
        "Checkout",
        true,
        vm.flash.as_deref(),
        html! {
            main class="container" {
                h1 { "Checkout" }

                div class="card" {
                    h3 { "Order" }
                    table {
                        tbody {
                            @for line in vm.lines {
                                tr {
                                    td { (line.name) " × " (line.quantity) }
                                    td { (line.price * line.quantity) " ₫" }
                                }
                            }
                            tr {
                                td { "Shipping" }
                                td { (SHIPPING_FEE) " ₫" }
                            }
                            tr class="grand-total" {
                                td { strong { "Total" } }
                                td { strong { (vm.grand_total) " ₫" } }
                            }
                        }
                    }
                }

                form action="/checkout" method="post" class="card" {
                    h3 { "Delivery" }
                    (address_select(vm.selector, error_for))

                    div class="form-field" {
                        label for="phone" { "Phone Number" }
                        input type="text" id="phone" name="phone" value=(vm.phone);
                        @if let Some(message) = vm.errors.get("phone") {
                            span class="field-error" { (message) }
                        }
                    }

                    div class="form-field" {
                        label for="note" { "Note" }
                        textarea id="note" name="note" rows="3" { (vm.note) }
                    }

                    h3 { "Payment" }
                    div class="form-field payment-methods" {
                        label {
                            input type="radio" name="payment" value="cod"
                                checked[vm.payment == "cod"];
                            "Pay on delivery"
                        }
                        label {
                            input type="radio" name="payment" value="momo"
                                checked[vm.payment == "momo"];
                            "Momo wallet"
                        }
                        label {
                            input type="radio" name="payment" value="vnpay"
                                checked[vm.payment == "vnpay"];
                            "VNPay"
                        }
                        @if let Some(message) = vm.errors.get("payment") {
                            span class="field-error" { (message) }
                        }
                    }

                    button type="submit" name="save" value="1" { "Place Order" }
                }
            }
        },
    )
}
