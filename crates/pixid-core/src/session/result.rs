//! Outcome records: the revealed identity and the error message.

use crate::error::{ErrorKind, FlowError};
use crate::persona::Persona;
use crate::wallet::TxHash;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Generated image, held as a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePayload(String);

impl ImagePayload {
    /// Wraps base64 inline data; a blank MIME type falls back to PNG.
    pub fn from_inline(mime_type: &str, base64_data: &str) -> Self {
        let mime_type = if mime_type.trim().is_empty() {
            DEFAULT_IMAGE_MIME
        } else {
            mime_type
        };
        Self(format!("data:{mime_type};base64,{base64_data}"))
    }

    pub fn as_data_url(&self) -> &str {
        &self.0
    }

    pub fn mime_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or(DEFAULT_IMAGE_MIME)
    }

    fn base64_data(&self) -> &str {
        self.0
            .split_once(";base64,")
            .map(|(_, data)| data)
            .unwrap_or_default()
    }

    /// Decodes the image bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64_STANDARD.decode(self.base64_data())
    }
}

/// The identity revealed for one successful interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(rename = "cryptoName")]
    pub persona_name: String,
    #[serde(rename = "trait")]
    pub tagline: String,
    #[serde(rename = "imageUrl")]
    pub image: ImagePayload,
    /// Transaction that earned this reveal, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<TxHash>,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn new(persona: &Persona, image: ImagePayload) -> Self {
        Self {
            persona_name: persona.name.to_string(),
            tagline: persona.tagline.to_string(),
            image,
            tx_hash: None,
            generated_at: Utc::now(),
        }
    }

    pub fn with_transaction(mut self, tx_hash: TxHash) -> Self {
        self.tx_hash = Some(tx_hash);
        self
    }
}

/// User-facing failure of the last attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&FlowError> for ErrorRecord {
    fn from(err: &FlowError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
