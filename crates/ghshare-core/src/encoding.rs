//! Base64 payload encoding for the Contents API.

use base64::Engine;

use crate::error::{ShareError, ShareResult};
use crate::models::{FileSource, PendingFile};

/// Encode raw bytes as standard, padded base64 with no data-URL prefix.
pub fn encode_payload(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// Remove a leading `data:<mime>;base64,` prefix, if any.
pub fn strip_data_url_prefix(value: &str) -> &str {
    if !value.starts_with("data:") {
        return value;
    }
    match value.split_once(',') {
        Some((header, payload)) if header.ends_with(";base64") => payload,
        _ => value,
    }
}

/// Read a pending file's bytes and encode them.
///
/// Read errors surface as `EncodingFailure` scoped to that file.
pub async fn read_and_encode(file: &PendingFile) -> ShareResult<String> {
    match &file.source {
        FileSource::Bytes(data) => Ok(encode_payload(data)),
        FileSource::Path(path) => {
            let data = tokio::fs::read(path)
                .await
                .map_err(|e| ShareError::EncodingFailure {
                    file: file.name.clone(),
                    message: e.to_string(),
                })?;
            Ok(encode_payload(&data))
        }
    }
}
