pub mod address_select;
pub mod flash;
pub mod form_field;
pub mod pagination;

pub use address_select::address_select;
pub use flash::flash_banner;
pub use form_field::form_field;
pub use pagination::pager;
