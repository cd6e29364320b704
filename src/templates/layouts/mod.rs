pub mod admin;
pub mod store;
