use serde::Serialize;
use serde_json::Value;

use crate::invocation::InvocationResult;

const IMAGE_SCHEMES: &[&str] = &["http://", "https://"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputKind {
    Image { url: String },
    Data { formatted: String },
}

impl OutputKind {
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedOutput {
    pub key: String,
    #[serde(flatten)]
    pub kind: OutputKind,
}

pub fn is_image_url(text: &str) -> bool {
    IMAGE_SCHEMES.iter().any(|scheme| {
        text.get(..scheme.len())
            .map(|head| head.eq_ignore_ascii_case(scheme))
            .unwrap_or(false)
    })
}

pub fn classify_value(value: &Value) -> OutputKind {
    if let Value::String(text) = value {
        if is_image_url(text) {
            return OutputKind::Image { url: text.clone() };
        }
    }
    OutputKind::Data {
        formatted: format_data(value),
    }
}

pub fn classify_result(result: &InvocationResult) -> Vec<RenderedOutput> {
    result
        .iter()
        .map(|(key, value)| RenderedOutput {
            key: key.clone(),
            kind: classify_value(value),
        })
        .collect()
}

fn format_data(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
