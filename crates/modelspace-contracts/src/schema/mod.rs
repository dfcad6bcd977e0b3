mod descriptors;
mod validation;

pub use descriptors::{build_field_descriptors, FieldDescriptor, FieldKind, SchemaError};
pub use validation::{validate, MissingRequiredFields};
