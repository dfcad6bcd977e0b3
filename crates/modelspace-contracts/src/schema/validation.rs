use thiserror::Error;

use super::descriptors::FieldDescriptor;
use crate::invocation::InputValues;

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("missing required fields: {}", .names.join(", "))]
pub struct MissingRequiredFields {
    pub names: Vec<String>,
}

pub fn validate(
    descriptors: &[FieldDescriptor],
    values: &InputValues,
) -> Result<(), MissingRequiredFields> {
    let names: Vec<String> = descriptors
        .iter()
        .filter(|descriptor| descriptor.required)
        .filter(|descriptor| {
            !values
                .get(&descriptor.name)
                .map(|value| value.is_present())
                .unwrap_or(false)
        })
        .map(|descriptor| descriptor.name.clone())
        .collect();
    if names.is_empty() {
        return Ok(());
    }
    Err(MissingRequiredFields { names })
}
