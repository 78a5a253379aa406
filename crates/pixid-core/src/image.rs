//! Generative image model port.

use async_trait::async_trait;
use thiserror::Error;

/// One prompt, one requested image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    /// Aspect ratio directive, e.g. `"1:1"`.
    pub aspect_ratio: String,
}

impl ImageRequest {
    pub fn square(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: "1:1".to_string(),
        }
    }
}

/// A single content part returned by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    InlineData { mime_type: String, data: String },
}

/// Model output in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResponse {
    pub parts: Vec<ContentPart>,
}

impl ImageResponse {
    pub fn new(parts: Vec<ContentPart>) -> Self {
        Self { parts }
    }

    /// The first part carrying non-empty inline data, as `(mime_type, data)`.
    pub fn first_image(&self) -> Option<(&str, &str)> {
        self.parts.iter().find_map(|part| match part {
            ContentPart::InlineData { mime_type, data } if !data.is_empty() => {
                Some((mime_type.as_str(), data.as_str()))
            }
            _ => None,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// An external service that turns a text prompt into image content.
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn generate_image(&self, request: &ImageRequest) -> Result<ImageResponse, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_image_skips_text_and_empty_parts() {
        let response = ImageResponse::new(vec![
            ContentPart::Text("here you go".to_string()),
            ContentPart::InlineData {
                mime_type: "image/png".to_string(),
                data: String::new(),
            },
            ContentPart::InlineData {
                mime_type: "image/webp".to_string(),
                data: "AAAA".to_string(),
            },
            ContentPart::InlineData {
                mime_type: "image/png".to_string(),
                data: "BBBB".to_string(),
            },
        ]);

        assert_eq!(response.first_image(), Some(("image/webp", "AAAA")));
    }

    #[test]
    fn test_text_only_response_has_no_image() {
        let response = ImageResponse::new(vec![ContentPart::Text("sorry".to_string())]);
        assert_eq!(response.first_image(), None);
        assert_eq!(ImageResponse::default().first_image(), None);
    }
}
