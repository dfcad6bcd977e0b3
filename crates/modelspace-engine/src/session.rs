use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use modelspace_contracts::catalog::ModelSpace;
use modelspace_contracts::events::EventWriter;
use modelspace_contracts::invocation::{EncodedFile, InputValue, InputValues, InvocationResult};
use modelspace_contracts::output::{classify_result, RenderedOutput};
use modelspace_contracts::schema::{validate, FieldDescriptor, FieldKind};
use serde_json::{json, Map, Value};

use crate::acquire::{self, AcquiredFile};
use crate::error::{Result, SpaceError};
use crate::service::ModelSpaceService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl InvocationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedInvocation {
    pub model_id: String,
    pub payload: Map<String, Value>,
    attempt: u64,
    sent: InputValues,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub state: InvocationState,
    pub outputs: Vec<RenderedOutput>,
    pub stale: bool,
    pub error: Option<String>,
}

/// One model detail view: schema, working values and the last outcome.
///
/// At most one predict request is in flight. A successful attempt discards
/// the values it sent; anything edited while it was in flight is kept for the
/// next attempt. Abandoning discards everything, and a failed attempt keeps
/// all values so the user can retry.
pub struct InvocationSession {
    session_id: String,
    model: ModelSpace,
    values: InputValues,
    field_errors: BTreeMap<String, SpaceError>,
    state: InvocationState,
    attempt: u64,
    last_result: Option<InvocationResult>,
    last_error: Option<SpaceError>,
    events: Option<EventWriter>,
    warnings: Vec<String>,
}

impl InvocationSession {
    pub fn new(model: ModelSpace) -> Self {
        let mut warnings = Vec::new();
        for descriptor in model.inputs.iter().filter(|d| d.is_fallback()) {
            let message = format!(
                "field '{}' has unrecognized kind '{}'; using text entry",
                descriptor.name, descriptor.raw_kind
            );
            push_unique_warning(&mut warnings, message);
        }
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            model,
            values: InputValues::new(),
            field_errors: BTreeMap::new(),
            state: InvocationState::Idle,
            attempt: 0,
            last_result: None,
            last_error: None,
            events: None,
            warnings,
        }
    }

    pub fn load(
        service: &dyn ModelSpaceService,
        model_id: &str,
        events_path: Option<&Path>,
    ) -> Result<Self> {
        let model = service.get_model(model_id)?;
        let mut session = Self::new(model);
        if let Some(path) = events_path {
            session.attach_events(path);
        }
        Ok(session)
    }

    pub fn attach_events(&mut self, path: impl Into<PathBuf>) {
        self.events = Some(EventWriter::new(path, self.session_id.clone()));
        let fields: Vec<Value> = self
            .model
            .inputs
            .iter()
            .map(|descriptor| {
                json!({
                    "name": descriptor.name,
                    "kind": descriptor.kind.as_str(),
                    "required": descriptor.required,
                })
            })
            .collect();
        self.emit(
            "session_started",
            json!({
                "model_id": self.model.id,
                "fields": fields,
            }),
        );
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn model(&self) -> &ModelSpace {
        &self.model
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.model.inputs
    }

    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.model.inputs.iter().find(|descriptor| descriptor.name == name)
    }

    pub fn values(&self) -> &InputValues {
        &self.values
    }

    pub fn state(&self) -> InvocationState {
        self.state
    }

    pub fn last_result(&self) -> Option<&InvocationResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&SpaceError> {
        self.last_error.as_ref()
    }

    pub fn field_error(&self, name: &str) -> Option<&SpaceError> {
        self.field_errors.get(name)
    }

    pub fn field_errors(&self) -> impl Iterator<Item = (&String, &SpaceError)> {
        self.field_errors.iter()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn set_text(&mut self, name: &str, raw: &str) -> Result<()> {
        let kind = self.field_kind(name)?;
        let value = match kind {
            FieldKind::Text => InputValue::Text(raw.to_string()),
            FieldKind::Number => InputValue::Number(raw.to_string()),
            FieldKind::FileImage | FieldKind::FileAudio => match EncodedFile::from_encoded(raw) {
                Ok(file) => InputValue::File(file),
                Err(err) => {
                    return Err(self.record_field_error(name, format!("not valid base64: {err}")))
                }
            },
        };
        let present = value.is_present();
        self.values.set(name, value);
        self.field_errors.remove(name);
        self.emit(
            "field_value_set",
            json!({
                "field": name,
                "kind": kind.as_str(),
                "present": present,
            }),
        );
        Ok(())
    }

    pub fn set_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let kind = self.field_kind(name)?;
        match acquire::read_file(kind, path) {
            Ok(acquired) => {
                self.store_file(name, kind, acquired);
                Ok(())
            }
            Err(err) => Err(self.record_field_error(name, format!("{err:#}"))),
        }
    }

    pub fn set_file_bytes(
        &mut self,
        name: &str,
        bytes: &[u8],
        file_name: Option<&str>,
    ) -> Result<()> {
        let kind = self.field_kind(name)?;
        if !kind.is_file() {
            return Err(self.record_field_error(
                name,
                format!("{} fields do not take files", kind.as_str()),
            ));
        }
        let acquired = acquire::encode_bytes(kind, bytes, file_name);
        self.store_file(name, kind, acquired);
        Ok(())
    }

    pub fn clear_value(&mut self, name: &str) -> Option<InputValue> {
        self.field_errors.remove(name);
        self.values.remove(name)
    }

    pub fn begin_submit(&mut self) -> Result<PreparedInvocation> {
        if self.state == InvocationState::Submitting {
            return Err(SpaceError::SubmitInFlight);
        }
        let previous = self.state;
        self.state = InvocationState::Validating;
        if let Err(missing) = validate(&self.model.inputs, &self.values) {
            self.state = previous;
            self.emit(
                "validation_failed",
                json!({
                    "model_id": self.model.id,
                    "missing": missing.names,
                }),
            );
            return Err(SpaceError::Validation(missing));
        }

        self.attempt += 1;
        self.state = InvocationState::Submitting;
        let payload = self.values.to_payload(&self.model.inputs);
        self.emit(
            "predict_started",
            json!({
                "model_id": self.model.id,
                "attempt": self.attempt,
                "fields": payload.keys().cloned().collect::<Vec<String>>(),
            }),
        );
        Ok(PreparedInvocation {
            model_id: self.model.id.clone(),
            payload,
            attempt: self.attempt,
            sent: self.values.clone(),
        })
    }

    pub fn complete(
        &mut self,
        ticket: PreparedInvocation,
        outcome: Result<InvocationResult>,
    ) -> Result<&InvocationResult> {
        if ticket.attempt != self.attempt || self.state != InvocationState::Submitting {
            self.emit(
                "predict_discarded",
                json!({
                    "model_id": ticket.model_id,
                    "attempt": ticket.attempt,
                }),
            );
            return Err(SpaceError::Abandoned);
        }

        match outcome {
            Ok(result) => {
                let outputs = classify_result(&result);
                self.emit(
                    "predict_succeeded",
                    json!({
                        "model_id": self.model.id,
                        "attempt": ticket.attempt,
                        "keys": outputs.iter().map(|row| row.key.clone()).collect::<Vec<String>>(),
                        "image_outputs": outputs.iter().filter(|row| row.kind.is_image()).count(),
                    }),
                );
                self.state = InvocationState::Succeeded;
                self.last_error = None;
                self.discard_sent_values(&ticket.sent);
                Ok(&*self.last_result.insert(result))
            }
            Err(err) => {
                let err = match err {
                    SpaceError::Predict { .. } => err,
                    other => SpaceError::predict(other.to_string()),
                };
                self.emit(
                    "predict_failed",
                    json!({
                        "model_id": self.model.id,
                        "attempt": ticket.attempt,
                        "status": err.status(),
                        "message": err.to_string(),
                        "stale_result": self.last_result.is_some(),
                    }),
                );
                self.state = InvocationState::Failed;
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn submit(&mut self, service: &dyn ModelSpaceService) -> Result<&InvocationResult> {
        let ticket = self.begin_submit()?;
        let outcome = service.predict(&ticket.model_id, &ticket.payload);
        self.complete(ticket, outcome)
    }

    pub fn abandon(&mut self) {
        let pending = self.state == InvocationState::Submitting;
        if pending {
            self.attempt += 1;
        }
        self.values.clear();
        self.field_errors.clear();
        self.state = InvocationState::Idle;
        self.emit(
            "session_abandoned",
            json!({
                "model_id": self.model.id,
                "pending": pending,
            }),
        );
    }

    pub fn view(&self) -> ResultView {
        let outputs = self
            .last_result
            .as_ref()
            .map(classify_result)
            .unwrap_or_default();
        let failed = self.state == InvocationState::Failed;
        ResultView {
            state: self.state,
            stale: failed && self.last_result.is_some(),
            error: self
                .last_error
                .as_ref()
                .filter(|_| failed)
                .map(ToString::to_string),
            outputs,
        }
    }

    fn discard_sent_values(&mut self, sent: &InputValues) {
        let unchanged: Vec<String> = sent
            .iter()
            .filter(|(name, value)| self.values.get(name.as_str()) == Some(*value))
            .map(|(name, _)| name.clone())
            .collect();
        for name in unchanged {
            self.values.remove(&name);
            self.field_errors.remove(&name);
        }
    }

    fn field_kind(&self, name: &str) -> Result<FieldKind> {
        self.descriptor(name)
            .map(|descriptor| descriptor.kind)
            .ok_or_else(|| SpaceError::UnknownField(name.to_string()))
    }

    fn store_file(&mut self, name: &str, kind: FieldKind, acquired: AcquiredFile) {
        for warning in &acquired.warnings {
            push_unique_warning(&mut self.warnings, format!("{name}: {warning}"));
        }
        self.emit(
            "field_value_set",
            json!({
                "field": name,
                "kind": kind.as_str(),
                "present": !acquired.encoded.base64.is_empty(),
                "bytes": acquired.encoded.byte_len,
                "mime_type": acquired.mime_type,
                "sha256": acquired.sha256,
            }),
        );
        self.values.set(name, InputValue::File(acquired.encoded));
        self.field_errors.remove(name);
    }

    fn record_field_error(&mut self, name: &str, message: String) -> SpaceError {
        let err = SpaceError::Encoding {
            field: name.to_string(),
            message,
        };
        self.emit(
            "field_encoding_failed",
            json!({
                "field": name,
                "message": err.to_string(),
            }),
        );
        self.field_errors.insert(name.to_string(), err.clone());
        err
    }

    fn emit(&mut self, event_type: &str, payload: Value) {
        let Some(events) = &self.events else {
            return;
        };
        let payload = payload.as_object().cloned().unwrap_or_default();
        if let Err(err) = events.emit(event_type, payload) {
            let message = format!("event log write failed ({}): {err}", events.path().display());
            push_unique_warning(&mut self.warnings, message);
        }
    }
}

fn push_unique_warning(warnings: &mut Vec<String>, message: String) {
    if message.trim().is_empty() {
        return;
    }
    if warnings.iter().any(|existing| existing == &message) {
        return;
    }
    warnings.push(message);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use modelspace_contracts::catalog::{ModelSpace, ModelSpaceSummary};
    use modelspace_contracts::invocation::{InputValue, InvocationResult};
    use modelspace_contracts::output::OutputKind;
    use modelspace_contracts::schema::{FieldDescriptor, FieldKind};
    use serde_json::{json, Map, Value};

    use super::{InvocationSession, InvocationState};
    use crate::error::{Result, SpaceError};
    use crate::service::ModelSpaceService;

    struct ScriptedService {
        model: ModelSpace,
        outcomes: Mutex<Vec<Result<InvocationResult>>>,
        requests: Mutex<Vec<Map<String, Value>>>,
    }

    impl ScriptedService {
        fn new(model: ModelSpace, outcomes: Vec<Result<InvocationResult>>) -> Self {
            Self {
                model,
                outcomes: Mutex::new(outcomes),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().map(|rows| rows.len()).unwrap_or(0)
        }

        fn last_request(&self) -> Option<Map<String, Value>> {
            self.requests.lock().ok().and_then(|rows| rows.last().cloned())
        }
    }

    impl ModelSpaceService for ScriptedService {
        fn list_models(&self) -> Result<Vec<ModelSpaceSummary>> {
            Ok(vec![self.model.summary()])
        }

        fn get_model(&self, id: &str) -> Result<ModelSpace> {
            if id == self.model.id {
                return Ok(self.model.clone());
            }
            Err(SpaceError::CatalogFetch {
                status: Some(404),
                message: format!("catalog request failed (404): no model '{id}'"),
            })
        }

        fn predict(&self, _id: &str, payload: &Map<String, Value>) -> Result<InvocationResult> {
            if let Ok(mut rows) = self.requests.lock() {
                rows.push(payload.clone());
            }
            self.outcomes
                .lock()
                .ok()
                .and_then(|mut rows| (!rows.is_empty()).then(|| rows.remove(0)))
                .unwrap_or_else(|| Err(SpaceError::predict("no scripted outcome")))
        }
    }

    fn model(inputs: Vec<FieldDescriptor>) -> ModelSpace {
        ModelSpace {
            id: "sdxl".to_string(),
            name: "Stable Diffusion XL".to_string(),
            description: None,
            avatar: None,
            inputs,
            extra: Map::new(),
        }
    }

    fn result(value: Value) -> InvocationResult {
        value.as_object().cloned().unwrap_or_default()
    }

    fn server_error() -> SpaceError {
        SpaceError::Predict {
            status: Some(500),
            message: "predict request failed (500): boom".to_string(),
        }
    }

    #[test]
    fn missing_required_field_blocks_submission() {
        let service = ScriptedService::new(
            model(vec![FieldDescriptor::new("prompt", FieldKind::Text, true)]),
            vec![Ok(result(json!({"text": "hi"})))],
        );
        let mut session = InvocationSession::new(service.model.clone());

        let err = session.submit(&service).err();
        match err {
            Some(SpaceError::Validation(missing)) => assert_eq!(missing.names, vec!["prompt"]),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(service.request_count(), 0);
        assert_eq!(session.state(), InvocationState::Idle);
    }

    #[test]
    fn successful_submit_classifies_outputs_and_discards_values() -> anyhow::Result<()> {
        let service = ScriptedService::new(
            model(vec![
                FieldDescriptor::new("prompt", FieldKind::Text, true),
                FieldDescriptor::new("steps", FieldKind::Number, false),
            ]),
            vec![Ok(result(json!({"url": "https://x/y.png", "score": 0.87})))],
        );
        let mut session = InvocationSession::new(service.model.clone());
        session.set_text("prompt", "a red boat")?;
        session.set_text("steps", "30")?;

        let stored = session.submit(&service)?;
        assert_eq!(stored.len(), 2);
        assert_eq!(
            service.last_request(),
            Some(result(json!({"prompt": "a red boat", "steps": "30"})))
        );

        let view = session.view();
        assert_eq!(view.state, InvocationState::Succeeded);
        assert!(!view.stale);
        assert_eq!(view.error, None);
        assert_eq!(
            view.outputs[0].kind,
            OutputKind::Image {
                url: "https://x/y.png".to_string()
            }
        );
        assert_eq!(
            view.outputs[1].kind,
            OutputKind::Data {
                formatted: "0.87".to_string()
            }
        );
        assert!(session.values().is_empty());
        Ok(())
    }

    #[test]
    fn server_error_keeps_prior_result_marked_stale() -> anyhow::Result<()> {
        let service = ScriptedService::new(
            model(vec![FieldDescriptor::new("prompt", FieldKind::Text, true)]),
            vec![Ok(result(json!({"caption": "first"}))), Err(server_error())],
        );
        let mut session = InvocationSession::new(service.model.clone());
        session.set_text("prompt", "one")?;
        session.submit(&service)?;

        session.set_text("prompt", "two")?;
        let err = session.submit(&service).err();
        assert_eq!(err, Some(server_error()));

        let view = session.view();
        assert_eq!(view.state, InvocationState::Failed);
        assert!(view.stale);
        assert_eq!(
            view.error.as_deref(),
            Some("predict failed: predict request failed (500): boom")
        );
        assert_eq!(view.outputs.len(), 1);
        assert_eq!(view.outputs[0].key, "caption");
        assert_eq!(
            session.values().get("prompt"),
            Some(&InputValue::Text("two".to_string()))
        );
        Ok(())
    }

    #[test]
    fn failure_without_prior_result_is_not_stale() {
        let service = ScriptedService::new(model(Vec::new()), vec![Err(server_error())]);
        let mut session = InvocationSession::new(service.model.clone());
        assert!(session.submit(&service).is_err());
        assert_eq!(service.last_request(), Some(Map::new()));

        let view = session.view();
        assert!(!view.stale);
        assert!(view.outputs.is_empty());
        assert!(view.error.is_some());
    }

    #[test]
    fn second_submit_is_rejected_while_in_flight() -> anyhow::Result<()> {
        let mut session = InvocationSession::new(model(vec![FieldDescriptor::new(
            "prompt",
            FieldKind::Text,
            true,
        )]));
        session.set_text("prompt", "boat")?;

        let ticket = session.begin_submit()?;
        assert_eq!(session.state(), InvocationState::Submitting);
        assert_eq!(session.begin_submit().err(), Some(SpaceError::SubmitInFlight));

        session.complete(ticket, Ok(result(json!({"ok": true}))))?;
        assert_eq!(session.state(), InvocationState::Succeeded);
        Ok(())
    }

    #[test]
    fn edits_made_during_flight_survive_success() -> anyhow::Result<()> {
        let mut session = InvocationSession::new(model(vec![
            FieldDescriptor::new("prompt", FieldKind::Text, true),
            FieldDescriptor::new("steps", FieldKind::Number, false),
            FieldDescriptor::new("seed", FieldKind::Number, false),
        ]));
        session.set_text("prompt", "one")?;
        session.set_text("steps", "30")?;

        let ticket = session.begin_submit()?;
        assert_eq!(ticket.payload["prompt"], json!("one"));
        session.set_text("prompt", "typed-during-flight")?;
        session.set_text("seed", "7")?;

        session.complete(ticket, Ok(result(json!({}))))?;
        assert_eq!(session.state(), InvocationState::Succeeded);
        assert_eq!(
            session.values().get("prompt"),
            Some(&InputValue::Text("typed-during-flight".to_string()))
        );
        assert_eq!(
            session.values().get("seed"),
            Some(&InputValue::Number("7".to_string()))
        );
        assert_eq!(session.values().get("steps"), None);
        assert_eq!(session.values().len(), 2);
        Ok(())
    }

    #[test]
    fn abandoned_attempt_ignores_late_result() -> anyhow::Result<()> {
        let mut session = InvocationSession::new(model(Vec::new()));
        let ticket = session.begin_submit()?;
        session.abandon();
        assert_eq!(session.state(), InvocationState::Idle);

        let late = session.complete(ticket, Ok(result(json!({"late": 1})))).err();
        assert_eq!(late, Some(SpaceError::Abandoned));
        assert!(session.last_result().is_none());
        Ok(())
    }

    #[test]
    fn non_predict_errors_are_reported_as_predict_failures() -> anyhow::Result<()> {
        let mut session = InvocationSession::new(model(Vec::new()));
        let ticket = session.begin_submit()?;
        let err = session
            .complete(ticket, Err(SpaceError::catalog("socket closed")))
            .err();
        assert_eq!(err.map(|e| e.kind()), Some("predict"));
        Ok(())
    }

    #[test]
    fn file_fields_store_bare_base64() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("photo.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0])?;

        let mut session = InvocationSession::new(model(vec![FieldDescriptor::new(
            "image",
            FieldKind::FileImage,
            true,
        )]));
        session.set_file("image", &path)?;
        let Some(InputValue::File(file)) = session.values().get("image") else {
            panic!("image value missing");
        };
        assert_eq!(file.base64.len(), 16);
        assert!(!file.base64.starts_with("data:"));

        session.set_text("image", "data:image/png;base64,QUJD")?;
        let ticket = session.begin_submit()?;
        assert_eq!(ticket.payload["image"], json!("QUJD"));
        Ok(())
    }

    #[test]
    fn unreadable_file_is_attached_to_its_field() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let mut session = InvocationSession::new(model(vec![
            FieldDescriptor::new("audio", FieldKind::FileAudio, true),
            FieldDescriptor::new("prompt", FieldKind::Text, false),
        ]));

        let err = session.set_file("audio", &temp.path().join("missing.mp3")).err();
        assert_eq!(err.as_ref().and_then(|e| e.field()), Some("audio"));
        assert!(session.field_error("audio").is_some());
        assert_eq!(session.state(), InvocationState::Idle);
        assert!(session.last_error().is_none());

        session.set_file_bytes("audio", b"ID3\x03\x00data", Some("clip.mp3"))?;
        assert!(session.field_error("audio").is_none());

        let err = session.set_file_bytes("prompt", b"bytes", None).err();
        assert_eq!(err.map(|e| e.kind()), Some("encoding"));
        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut session = InvocationSession::new(model(Vec::new()));
        assert_eq!(
            session.set_text("stray", "x").err(),
            Some(SpaceError::UnknownField("stray".to_string()))
        );
    }

    #[test]
    fn load_surfaces_catalog_errors() {
        let service = ScriptedService::new(model(Vec::new()), Vec::new());
        let err = InvocationSession::load(&service, "missing", None).err();
        assert_eq!(err.as_ref().and_then(|e| e.status()), Some(404));
        assert_eq!(err.map(|e| e.kind()), Some("catalog_fetch"));
        assert!(InvocationSession::load(&service, "sdxl", None).is_ok());
    }

    #[test]
    fn events_trace_the_attempt_without_file_payloads() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let events_path = temp.path().join("events.jsonl");
        let service = ScriptedService::new(
            model(vec![
                FieldDescriptor::new("prompt", FieldKind::Text, true),
                FieldDescriptor::new("image", FieldKind::FileImage, false),
                FieldDescriptor {
                    name: "mask".to_string(),
                    kind: FieldKind::Text,
                    raw_kind: "video".to_string(),
                    label: "Mask".to_string(),
                    required: false,
                },
            ]),
            vec![Err(server_error())],
        );
        let mut session = InvocationSession::load(&service, "sdxl", Some(&events_path))?;
        assert_eq!(session.warnings().len(), 1);

        assert!(session.submit(&service).is_err());
        session.set_text("prompt", "boat")?;
        session.set_file_bytes("image", b"secret-bytes", Some("p.png"))?;
        assert!(session.submit(&service).is_err());

        let raw = std::fs::read_to_string(&events_path)?;
        assert!(!raw.contains("c2VjcmV0LWJ5dGVz"));
        let types: Vec<String> = raw
            .lines()
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .filter_map(|row| row.get("type").and_then(Value::as_str).map(str::to_string))
            .collect();
        assert_eq!(
            types,
            vec![
                "session_started",
                "validation_failed",
                "field_value_set",
                "field_value_set",
                "predict_started",
                "predict_failed",
            ]
        );
        Ok(())
    }
}
