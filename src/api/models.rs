use serde::Deserialize;

// Shapes mirrored from the REST backend; the portal never owns these,
// it only renders them.

/// Uniform response shape of every paged list endpoint.
/// `currentPage`/`pageSize` are request parameters, not response state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    pub image: Option<String>,
    pub description: Option<String>,
    pub brand_name: Option<String>,
    pub color_name: Option<String>,
    pub size_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub image: Option<String>,
    pub price: i64,
    pub quantity: i64,
    pub quantity_available: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub total: i64,
    pub shipping_fee: i64,
    pub payment_method: String,
    pub address: String,
    pub phone_number: String,
    pub note: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<chrono::NaiveDateTime>,
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub name: String,
    pub price: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub id: String,
    pub full_name: String,
    pub user_name: String,
    pub phone_number: String,
    pub email: String,
    pub address: Option<String>,
    pub avatar: Option<String>,
}

/// Response of the payment-initiation endpoint for the redirect-based
/// gateway: the browser is sent to this URL, the order is created only
/// after off-site confirmation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiation {
    pub pay_url: String,
}
