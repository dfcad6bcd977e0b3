use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use super::values::{InputValue, InputValues, InvocationResult};
use crate::schema::FieldDescriptor;

pub const RECEIPT_SCHEMA_VERSION: u64 = 1;

const MAX_RESULT_STRING_CHARS: usize = 4096;

pub fn build_receipt(
    model_id: &str,
    descriptors: &[FieldDescriptor],
    values: &InputValues,
    result: Option<&InvocationResult>,
    error: Option<&str>,
) -> Value {
    let mut root = Map::new();
    root.insert(
        "schema_version".to_string(),
        Value::Number(RECEIPT_SCHEMA_VERSION.into()),
    );
    root.insert("model_id".to_string(), Value::String(model_id.to_string()));
    root.insert("ts".to_string(), Value::String(now_utc_iso()));

    let mut request = Map::new();
    for descriptor in descriptors {
        let Some(value) = values.get(&descriptor.name) else {
            continue;
        };
        let recorded = match value {
            InputValue::File(file) => {
                Value::String(format!("<omitted {} bytes>", file.byte_len))
            }
            other => other.to_payload_value(),
        };
        request.insert(descriptor.name.clone(), recorded);
    }
    root.insert("request".to_string(), Value::Object(request));

    root.insert(
        "fields".to_string(),
        Value::Array(
            descriptors
                .iter()
                .map(|descriptor| serde_json::to_value(descriptor).unwrap_or(Value::Null))
                .collect(),
        ),
    );
    root.insert(
        "result".to_string(),
        result
            .map(|row| sanitize_result(&Value::Object(row.clone())))
            .unwrap_or(Value::Null),
    );
    root.insert(
        "error".to_string(),
        error
            .map(|message| Value::String(message.to_string()))
            .unwrap_or(Value::Null),
    );
    Value::Object(root)
}

pub fn write_receipt(path: &Path, payload: &Value) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(payload)?)?;
    Ok(())
}

fn sanitize_result(value: &Value) -> Value {
    match value {
        Value::String(text) if text.chars().count() > MAX_RESULT_STRING_CHARS => {
            Value::String(format!("<omitted {} chars>", text.chars().count()))
        }
        Value::Array(rows) => Value::Array(rows.iter().map(sanitize_result).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, row)| (key.clone(), sanitize_result(row)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

fn now_utc_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}
