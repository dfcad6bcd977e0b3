use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::encoding::{decode, decoded_len, encode_bytes, strip_data_url_prefix};
use crate::schema::FieldDescriptor;

pub type InvocationResult = Map<String, Value>;

/// A file transcoded for the wire: bare base64, no data-URL header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    pub base64: String,
    pub byte_len: usize,
    pub source: Option<String>,
}

impl EncodedFile {
    pub fn from_bytes(bytes: &[u8], mime: Option<&str>) -> Self {
        Self {
            base64: encode_bytes(bytes, mime),
            byte_len: bytes.len(),
            source: None,
        }
    }

    pub fn from_encoded(text: &str) -> Result<Self, base64::DecodeError> {
        let base64: String = strip_data_url_prefix(text.trim())
            .chars()
            .filter(|ch| !ch.is_ascii_whitespace())
            .collect();
        let byte_len = decode(&base64)?.len();
        Ok(Self {
            base64,
            byte_len,
            source: None,
        })
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn decoded_len(&self) -> Option<usize> {
        decoded_len(&self.base64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    Text(String),
    Number(String),
    File(EncodedFile),
}

impl InputValue {
    pub fn is_present(&self) -> bool {
        match self {
            Self::Text(raw) | Self::Number(raw) => !raw.is_empty(),
            Self::File(file) => !file.base64.is_empty(),
        }
    }

    pub fn to_payload_value(&self) -> Value {
        match self {
            Self::Text(raw) | Self::Number(raw) => Value::String(raw.clone()),
            Self::File(file) => Value::String(file.base64.clone()),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputValues {
    values: IndexMap<String, InputValue>,
}

impl InputValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: InputValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<InputValue> {
        self.values.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &InputValue)> {
        self.values.iter()
    }

    pub fn to_payload(&self, descriptors: &[FieldDescriptor]) -> Map<String, Value> {
        let mut payload = Map::new();
        for descriptor in descriptors {
            if let Some(value) = self.values.get(&descriptor.name) {
                payload.insert(descriptor.name.clone(), value.to_payload_value());
            }
        }
        payload
    }
}
