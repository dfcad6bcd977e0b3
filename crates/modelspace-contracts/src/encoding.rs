use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

const DATA_URL_SCHEME: &str = "data:";

pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "mp3" | "mpga" | "mpeg" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "ogg" => Some("audio/ogg"),
        _ => None,
    }
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("{DATA_URL_SCHEME}{mime};base64,{}", BASE64.encode(bytes))
}

pub fn strip_data_url_prefix(text: &str) -> &str {
    let is_data_url = text
        .get(..DATA_URL_SCHEME.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(DATA_URL_SCHEME));
    if !is_data_url {
        return text;
    }
    match text.split_once(',') {
        Some((_, payload)) => payload,
        None => "",
    }
}

pub fn encode_bytes(bytes: &[u8], mime: Option<&str>) -> String {
    let preview = to_data_url(mime.unwrap_or("application/octet-stream"), bytes);
    strip_data_url_prefix(&preview).to_string()
}

pub fn decode(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64.decode(strip_data_url_prefix(payload).as_bytes())
}

pub fn decoded_len(payload: &str) -> Option<usize> {
    decode(payload).ok().map(|bytes| bytes.len())
}
