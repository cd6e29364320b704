pub mod admin_delete;
pub mod admin_form;
pub mod admin_list;
pub mod admin_login;
pub mod store_account;
pub mod store_cart;
pub mod store_checkout;
pub mod store_confirmation;
pub mod store_home;
pub mod store_login;
pub mod store_product;
