pub mod address;
pub mod cart;
pub mod validate;
