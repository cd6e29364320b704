pub mod controller;
pub mod resources;

pub use controller::{FormDraft, ResourceController, SubmitOutcome, ValidationErrorMap};
pub use resources::{resource_by_key, DeleteMode, FieldSpec, ResourceSpec, RESOURCES};
