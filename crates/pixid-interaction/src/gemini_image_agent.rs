//! GeminiImageAgent - Direct REST API implementation for Gemini image output.
//!
//! Calls `models/<model>:generateContent` with an image response modality and
//! hands back the raw content parts; picking the image is the caller's job.

use async_trait::async_trait;
use pixid_core::config::GeminiModelConfig;
use pixid_core::image::{ContentPart, ImageModel, ImageRequest, ImageResponse, ModelError};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Image model backed by the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiImageAgent {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiImageAgent {
    /// Creates an agent from model settings and an optional key.
    ///
    /// A missing key is not an error here; every generation attempt fails
    /// with [`ModelError::MissingCredential`] instead.
    pub fn new(config: &GeminiModelConfig, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: config.model_name.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    async fn send_request(
        &self,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ModelError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| ModelError::Transport(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response
            .json()
            .await
            .map_err(|err| ModelError::Decode(format!("Failed to parse Gemini response: {err}")))
    }
}

#[async_trait]
impl ImageModel for GeminiImageAgent {
    async fn generate_image(&self, request: &ImageRequest) -> Result<ImageResponse, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingCredential)?;

        let body = GenerateContentRequest::image(request);
        debug!(model = %self.model, aspect_ratio = %request.aspect_ratio, "requesting Gemini image");

        let parsed = self.send_request(api_key, &body).await?;
        Ok(into_image_response(parsed))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn image(request: &ImageRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![TextPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: ImageConfig {
                    aspect_ratio: request.aspect_ratio.clone(),
                },
            },
        }
    }
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    image_config: ImageConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartResponse {
    text: Option<String>,
    inline_data: Option<InlineDataResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataResponse {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Flattens the first candidate's parts, keeping their order.
fn into_image_response(response: GenerateContentResponse) -> ImageResponse {
    let parts = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| match (part.inline_data, part.text) {
            (Some(inline), _) => Some(ContentPart::InlineData {
                mime_type: inline.mime_type,
                data: inline.data,
            }),
            (None, Some(text)) => Some(ContentPart::Text(text)),
            (None, None) => None,
        })
        .collect();

    ImageResponse::new(parts)
}

fn map_http_error(status: StatusCode, body: String) -> ModelError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    ModelError::Provider {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_asks_for_square_image() {
        let body = GenerateContentRequest::image(&ImageRequest::square("draw a coin"));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "draw a coin");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "IMAGE");
        assert_eq!(json["generationConfig"]["imageConfig"]["aspectRatio"], "1:1");
    }

    #[test]
    fn test_response_parts_keep_order() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "Here is your icon"},
                        {"inlineData": {"mimeType": "image/png", "data": "iVBORw0K"}}
                    ]
                }
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let response = into_image_response(parsed);

        assert_eq!(response.parts.len(), 2);
        assert_eq!(response.first_image(), Some(("image/png", "iVBORw0K")));
    }

    #[test]
    fn test_empty_candidates_yield_no_parts() {
        let parsed: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(into_image_response(parsed).parts.is_empty());

        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(into_image_response(parsed).parts.is_empty());
    }

    #[test]
    fn test_http_error_uses_error_envelope() {
        let body = r#"{"error":{"code":403,"message":"API key not valid.","status":"PERMISSION_DENIED"}}"#;
        let err = map_http_error(StatusCode::FORBIDDEN, body.to_string());

        assert_eq!(
            err,
            ModelError::Provider {
                status: 403,
                message: "PERMISSION_DENIED: API key not valid.".to_string(),
            }
        );
    }

    #[test]
    fn test_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(
            err,
            ModelError::Provider {
                status: 502,
                message: "upstream down".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        let agent = GeminiImageAgent::new(&GeminiModelConfig::default(), Some("   ".to_string()));
        assert!(!agent.has_credential());

        let err = agent
            .generate_image(&ImageRequest::square("anything"))
            .await
            .unwrap_err();
        assert_eq!(err, ModelError::MissingCredential);
    }
}
