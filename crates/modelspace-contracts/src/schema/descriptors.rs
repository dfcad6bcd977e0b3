use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::encoding::mime_for_path;

const IMAGE_ACCEPT: &[&str] = &["image/jpeg", "image/jpg", "image/png"];
const AUDIO_ACCEPT: &[&str] = &["audio/mpeg"];

/// How a field's value is acquired and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Number,
    FileImage,
    FileAudio,
}

impl FieldKind {
    pub fn from_schema(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "number" | "integer" | "float" => Self::Number,
            "image" | "file-image" => Self::FileImage,
            "audio" | "file-audio" => Self::FileAudio,
            _ => Self::Text,
        }
    }

    pub fn is_recognized(raw: &str) -> bool {
        matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "text"
                | "string"
                | "number"
                | "integer"
                | "float"
                | "image"
                | "file-image"
                | "audio"
                | "file-audio"
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::FileImage => "file-image",
            Self::FileAudio => "file-audio",
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::FileImage | Self::FileAudio)
    }

    pub fn accept_mime_types(&self) -> &'static [&'static str] {
        match self {
            Self::Text | Self::Number => &[],
            Self::FileImage => IMAGE_ACCEPT,
            Self::FileAudio => AUDIO_ACCEPT,
        }
    }

    pub fn accepts_path(&self, path: &Path) -> bool {
        if !self.is_file() {
            return false;
        }
        mime_for_path(path)
            .map(|mime| self.accept_mime_types().contains(&mime))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub raw_kind: String,
    pub label: String,
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            raw_kind: kind.as_str().to_string(),
            name,
            kind,
            required,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_fallback(&self) -> bool {
        !FieldKind::is_recognized(&self.raw_kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("input schema entry {index} is not an object")]
    NotAnObject { index: usize },
    #[error("input schema entry {index} has no name")]
    MissingName { index: usize },
    #[error("input schema declares '{name}' more than once")]
    DuplicateName { name: String },
}

pub fn build_field_descriptors(entries: &[Value]) -> Result<Vec<FieldDescriptor>, SchemaError> {
    let mut seen = HashSet::new();
    let mut descriptors = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let obj = entry
            .as_object()
            .ok_or(SchemaError::NotAnObject { index })?;
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SchemaError::MissingName { index })?
            .to_string();
        if !seen.insert(name.clone()) {
            return Err(SchemaError::DuplicateName { name });
        }

        let raw_kind = match obj.get("type").or_else(|| obj.get("kind")) {
            None | Some(Value::Null) => "text".to_string(),
            Some(Value::String(kind)) => kind.clone(),
            Some(other) => other.to_string(),
        };
        let label = obj
            .get("description")
            .or_else(|| obj.get("label"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| name.clone());
        let required = obj
            .get("required")
            .map(value_as_required)
            .unwrap_or(false);

        descriptors.push(FieldDescriptor {
            kind: FieldKind::from_schema(&raw_kind),
            raw_kind,
            name,
            label,
            required,
        });
    }
    Ok(descriptors)
}

fn value_as_required(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        ),
        Value::Number(number) => number.as_i64().map(|n| n != 0).unwrap_or(false),
        _ => false,
    }
}
