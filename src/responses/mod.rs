pub mod errors;
pub mod html;
pub mod redirect;
pub mod xlsx;

pub use errors::html_error_response;
pub use html::html_response;
pub use redirect::{redirect, redirect_with_cookie};
pub use xlsx::xlsx_response;
