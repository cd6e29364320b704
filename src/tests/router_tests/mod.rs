mod admin_tests;
mod auth_tests;
mod checkout_tests;
mod store_tests;
