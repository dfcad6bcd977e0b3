use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use modelspace_contracts::catalog::{parse_model_list, ModelSpace, ModelSpaceSummary};
use modelspace_contracts::invocation::InvocationResult;
use reqwest::blocking::{Client as HttpClient, Response as HttpResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use url::Url;

use crate::config::ServiceConfig;
use crate::error::{Result, SpaceError};

const BODY_EXCERPT_CHARS: usize = 512;

/// Remote collaborators: the model catalog and the inference endpoint.
///
/// Implementations convert every failure into a [`SpaceError`]; nothing is
/// retried here.
pub trait ModelSpaceService: Send + Sync {
    fn list_models(&self) -> Result<Vec<ModelSpaceSummary>>;
    fn get_model(&self, id: &str) -> Result<ModelSpace>;
    fn predict(&self, id: &str, payload: &Map<String, Value>) -> Result<InvocationResult>;
}

pub struct HttpModelSpaceService {
    api_base: Url,
    http: HttpClient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Failure {
    status: Option<u16>,
    message: String,
}

impl Failure {
    fn into_catalog(self) -> SpaceError {
        SpaceError::CatalogFetch {
            status: self.status,
            message: self.message,
        }
    }

    fn into_predict(self) -> SpaceError {
        SpaceError::Predict {
            status: self.status,
            message: self.message,
        }
    }
}

impl HttpModelSpaceService {
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let api_base = Url::parse(&config.api_base)
            .with_context(|| format!("invalid model spaces API base ({})", config.api_base))?;
        if api_base.cannot_be_a_base() {
            bail!("model spaces API base must be hierarchical ({api_base})");
        }
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { api_base, http })
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_str()
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }

    fn fetch_data(&self, endpoint: &str) -> std::result::Result<Value, Failure> {
        let response = self
            .http
            .get(endpoint)
            .send()
            .map_err(|err| transport_failure("catalog", endpoint, err))?;
        read_response("catalog", response)
    }

    pub fn download_output(&self, key: &str, url: &str, dir: &Path) -> anyhow::Result<PathBuf> {
        let response = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("failed downloading output '{key}' ({url})"))?;
        if !response.status().is_success() {
            let code = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            bail!(
                "output download failed ({code}): {}",
                truncate_text(&body, BODY_EXCERPT_CHARS)
            );
        }
        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .with_context(|| format!("failed reading output '{key}' bytes"))?;

        let ext = output_extension(mime_type.as_deref(), url);
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(format!("{}.{ext}", safe_file_stem(key)));
        fs::write(&path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

impl ModelSpaceService for HttpModelSpaceService {
    fn list_models(&self) -> Result<Vec<ModelSpaceSummary>> {
        let endpoint = self.endpoint(&["model-spaces"]);
        let data = self.fetch_data(&endpoint).map_err(Failure::into_catalog)?;
        Ok(parse_model_list(&data)?)
    }

    fn get_model(&self, id: &str) -> Result<ModelSpace> {
        let endpoint = self.endpoint(&["model-spaces", id]);
        let data = self.fetch_data(&endpoint).map_err(Failure::into_catalog)?;
        Ok(ModelSpace::from_value(&data)?)
    }

    fn predict(&self, id: &str, payload: &Map<String, Value>) -> Result<InvocationResult> {
        let endpoint = self.endpoint(&["model-spaces", id, "predict"]);
        let response = self
            .http
            .post(&endpoint)
            .json(payload)
            .send()
            .map_err(|err| transport_failure("predict", &endpoint, err).into_predict())?;
        let data = read_response("predict", response).map_err(Failure::into_predict)?;
        match data {
            Value::Object(result) => Ok(result),
            other => Err(SpaceError::predict(format!(
                "predict returned {} instead of a result object",
                json_type_name(&other)
            ))),
        }
    }
}

fn read_response(label: &str, response: HttpResponse) -> std::result::Result<Value, Failure> {
    let status = response.status();
    let body = response.text().map_err(|err| Failure {
        status: Some(status.as_u16()),
        message: format!("{label} response body read failed: {err}"),
    })?;
    unwrap_data_envelope(label, status, &body)
}

fn unwrap_data_envelope(
    label: &str,
    status: StatusCode,
    body: &str,
) -> std::result::Result<Value, Failure> {
    let code = status.as_u16();
    if !status.is_success() {
        return Err(Failure {
            status: Some(code),
            message: format!(
                "{label} request failed ({code}): {}",
                truncate_text(body.trim(), BODY_EXCERPT_CHARS)
            ),
        });
    }
    let parsed: Value = serde_json::from_str(body).map_err(|err| Failure {
        status: Some(code),
        message: format!("{label} returned invalid JSON payload: {err}"),
    })?;
    match parsed {
        Value::Object(mut envelope) => envelope.remove("data").ok_or_else(|| Failure {
            status: Some(code),
            message: format!("{label} response is missing 'data'"),
        }),
        other => Err(Failure {
            status: Some(code),
            message: format!(
                "{label} returned {} instead of an envelope object",
                json_type_name(&other)
            ),
        }),
    }
}

fn transport_failure(label: &str, endpoint: &str, err: reqwest::Error) -> Failure {
    let mut message = format!("{label} request failed ({endpoint})");
    let detail = error_chain_text(&err);
    if !detail.is_empty() {
        message.push_str(": ");
        message.push_str(&detail);
    }
    Failure {
        status: err.status().map(|status| status.as_u16()),
        message,
    }
}

fn error_chain_text(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current = Some(err);
    while let Some(cause) = current {
        let text = cause.to_string();
        let trimmed = text.trim();
        if !trimmed.is_empty() && parts.last().map(|last| last != trimmed).unwrap_or(true) {
            parts.push(trimmed.to_string());
        }
        current = cause.source();
    }
    truncate_text(&parts.join(" | caused by: "), BODY_EXCERPT_CHARS)
}

fn truncate_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    value.chars().take(max_chars).collect::<String>() + "…"
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn output_extension(mime: Option<&str>, url: &str) -> String {
    let from_mime = mime
        .map(|value| value.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
        .and_then(|value| match value.as_str() {
            "image/png" => Some("png"),
            "image/jpeg" | "image/jpg" => Some("jpg"),
            "image/webp" => Some("webp"),
            "image/gif" => Some("gif"),
            "audio/mpeg" => Some("mp3"),
            _ => None,
        });
    if let Some(ext) = from_mime {
        return ext.to_string();
    }
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .and_then(|name| {
            Path::new(&name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_ascii_lowercase)
        })
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string())
}

fn safe_file_stem(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "output".to_string()
    } else {
        stem
    }
}
