use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use modelspace_contracts::encoding::mime_for_path;
use modelspace_contracts::invocation::EncodedFile;
use modelspace_contracts::schema::FieldKind;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct AcquiredFile {
    pub encoded: EncodedFile,
    pub mime_type: Option<String>,
    pub sha256: String,
    pub warnings: Vec<String>,
}

pub fn read_file(kind: FieldKind, path: &Path) -> Result<AcquiredFile> {
    if !kind.is_file() {
        bail!("{} fields do not take files", kind.as_str());
    }
    let bytes = fs::read(path).with_context(|| format!("failed reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|value| value.to_str())
        .map(str::to_string);
    Ok(encode_bytes(kind, &bytes, file_name.as_deref()))
}

pub fn encode_bytes(kind: FieldKind, bytes: &[u8], file_name: Option<&str>) -> AcquiredFile {
    let mime_type = detect_mime(kind, bytes, file_name);
    let mut warnings = Vec::new();
    let accepted = kind.accept_mime_types();
    let label = file_name.unwrap_or("selected file");
    match mime_type.as_deref() {
        Some(mime) if !accepted.is_empty() && !accepted.contains(&mime) => {
            warnings.push(format!(
                "{label} looks like {mime}; {} fields expect {}",
                kind.as_str(),
                accepted.join(", ")
            ));
        }
        None if !accepted.is_empty() => {
            warnings.push(format!(
                "could not tell the type of {label}; {} fields expect {}",
                kind.as_str(),
                accepted.join(", ")
            ));
        }
        _ => {}
    }

    let mut encoded = EncodedFile::from_bytes(bytes, mime_type.as_deref());
    if let Some(name) = file_name {
        encoded = encoded.with_source(name);
    }
    AcquiredFile {
        encoded,
        mime_type,
        sha256: hex::encode(Sha256::digest(bytes)),
        warnings,
    }
}

fn detect_mime(kind: FieldKind, bytes: &[u8], file_name: Option<&str>) -> Option<String> {
    if let Some(mime) = file_name.and_then(|name| mime_for_path(Path::new(name))) {
        return Some(mime.to_string());
    }
    match kind {
        FieldKind::FileImage => image::guess_format(bytes)
            .ok()
            .map(|format| format.to_mime_type().to_string()),
        FieldKind::FileAudio if looks_like_mpeg_audio(bytes) => Some("audio/mpeg".to_string()),
        _ => None,
    }
}

fn looks_like_mpeg_audio(bytes: &[u8]) -> bool {
    bytes.starts_with(b"ID3") || (bytes.len() >= 2 && bytes[0] == 0xff && bytes[1] & 0xe0 == 0xe0)
}
