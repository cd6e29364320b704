// src/domain/cart.rs
//
// Pure cart math shared by the cart page and the checkout handler so the
// two screens can never disagree about totals or eligibility.
use crate::api::models::CartLine;

/// Flat shipping fee added to every order.
pub const SHIPPING_FEE: i64 = 15_000;

pub fn subtotal(lines: &[CartLine]) -> i64 {
    lines.iter().map(|line| line.price * line.quantity).sum()
}

pub fn grand_total(lines: &[CartLine]) -> i64 {
    subtotal(lines) + SHIPPING_FEE
}

/// Checkout is blocked while any line asks for more than is in stock.
/// Both the cart view and the place-order handler gate on this.
pub fn can_proceed_to_checkout(lines: &[CartLine]) -> bool {
    !lines
        .iter()
        .any(|line| line.quantity > line.quantity_available)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Pay on delivery: order is created immediately.
    Cod,
    /// Wallet gateway: order is created immediately, same as COD.
    Momo,
    /// Redirect gateway: payment is initiated first and the order only
    /// exists after off-site confirmation. Deliberate asymmetry.
    VnPay,
}

impl PaymentMethod {
    pub fn from_form(value: &str) -> Option<Self> {
        match value {
            "cod" => Some(PaymentMethod::Cod),
            "momo" => Some(PaymentMethod::Momo),
            "vnpay" => Some(PaymentMethod::VnPay),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Momo => "momo",
            PaymentMethod::VnPay => "vnpay",
        }
    }

    /// Whether this method creates the order before any payment happens.
    pub fn creates_order_first(&self) -> bool {
        !matches!(self, PaymentMethod::VnPay)
    }
}
