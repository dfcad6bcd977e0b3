use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::{build_field_descriptors, FieldDescriptor, SchemaError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSpaceSummary {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSpace {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub inputs: Vec<FieldDescriptor>,
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogParseError {
    #[error("expected a JSON object for {what}")]
    NotAnObject { what: &'static str },
    #[error("expected a JSON array for {what}")]
    NotAnArray { what: &'static str },
    #[error("{what} is missing '{field}'")]
    MissingField {
        what: &'static str,
        field: &'static str,
    },
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

const KNOWN_DETAIL_KEYS: &[&str] = &["id", "name", "description", "avatar", "inputs"];

impl ModelSpaceSummary {
    pub fn from_value(value: &Value) -> Result<Self, CatalogParseError> {
        let what = "model space summary";
        let obj = value
            .as_object()
            .ok_or(CatalogParseError::NotAnObject { what })?;
        Ok(Self {
            id: id_field(obj, what)?,
            name: string_field(obj, "name").unwrap_or_default(),
            avatar: string_field(obj, "avatar"),
            description: string_field(obj, "description"),
        })
    }
}

impl ModelSpace {
    pub fn from_value(value: &Value) -> Result<Self, CatalogParseError> {
        let what = "model space";
        let obj = value
            .as_object()
            .ok_or(CatalogParseError::NotAnObject { what })?;
        let inputs = match obj.get("inputs") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => build_field_descriptors(entries)?,
            Some(_) => {
                return Err(CatalogParseError::NotAnArray {
                    what: "model space inputs",
                })
            }
        };
        let extra = obj
            .iter()
            .filter(|(key, _)| !KNOWN_DETAIL_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(Self {
            id: id_field(obj, what)?,
            name: string_field(obj, "name").unwrap_or_default(),
            description: string_field(obj, "description"),
            avatar: string_field(obj, "avatar"),
            inputs,
            extra,
        })
    }

    pub fn summary(&self) -> ModelSpaceSummary {
        ModelSpaceSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
            description: self.description.clone(),
        }
    }
}

pub fn parse_model_list(value: &Value) -> Result<Vec<ModelSpaceSummary>, CatalogParseError> {
    value
        .as_array()
        .ok_or(CatalogParseError::NotAnArray {
            what: "model space list",
        })?
        .iter()
        .map(ModelSpaceSummary::from_value)
        .collect()
}

fn id_field(obj: &Map<String, Value>, what: &'static str) -> Result<String, CatalogParseError> {
    match obj.get("id") {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        _ => Err(CatalogParseError::MissingField { what, field: "id" }),
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}
