pub mod client;
pub mod error;
pub mod models;

pub use client::{Api, ApiBody, ApiRequest, ApiResponse, FilePart, Method, MultipartForm, Transport};
pub use error::ApiError;
pub use models::Paged;
