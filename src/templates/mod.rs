pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{flash_banner, form_field, pager};
pub use layouts::admin::admin_layout;
pub use layouts::store::store_layout;
