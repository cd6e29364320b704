pub mod portal;

pub use portal::{Portal, CART_COOKIE};
