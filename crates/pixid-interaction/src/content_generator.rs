//! Content generator.
//!
//! Picks a persona, renders the pixel-art prompt for it and asks the image
//! model for one square image. The persona is chosen here so the revealed
//! name always matches the prompt that was actually sent.

use pixid_core::FlowError;
use pixid_core::image::{ImageModel, ImageRequest, ModelError};
use pixid_core::persona::{Persona, PersonaCatalog};
use pixid_core::session::{GenerationResult, ImagePayload};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Builds the generation prompt for a persona.
pub fn build_prompt(persona: &Persona) -> String {
    format!(
        "Generate a high-quality, cute, vibrant 8-bit pixel art icon representing the cryptocurrency \"{name}\".\n\
         The style should be nostalgic, retro video game aesthetic.\n\
         The image should be square and centered on a solid dark background.\n\
         Do not include text in the image.\n\
         Make it look like a collectible trading card avatar.",
        name = persona.name
    )
}

pub struct ContentGenerator {
    model: Arc<dyn ImageModel>,
    catalog: PersonaCatalog,
    rng: Mutex<StdRng>,
}

impl ContentGenerator {
    pub fn new(model: Arc<dyn ImageModel>) -> Self {
        Self::with_rng(model, PersonaCatalog::default(), StdRng::from_entropy())
    }

    /// Uses the given catalog and random source (seed it for reproducible picks).
    pub fn with_rng(model: Arc<dyn ImageModel>, catalog: PersonaCatalog, rng: StdRng) -> Self {
        Self {
            model,
            catalog,
            rng: Mutex::new(rng),
        }
    }

    pub fn catalog(&self) -> &PersonaCatalog {
        &self.catalog
    }

    fn pick_persona(&self) -> Result<&'static Persona, FlowError> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.catalog
            .pick(&mut *rng)
            .ok_or_else(|| FlowError::GenerationFailed("persona catalog is empty".to_string()))
    }

    /// Generates one identity: persona, prompt, image.
    pub async fn generate_identity(&self) -> Result<GenerationResult, FlowError> {
        let persona = self.pick_persona()?;
        let request = ImageRequest::square(build_prompt(persona));
        info!(persona = persona.name, "generating identity");

        let response = self.model.generate_image(&request).await.map_err(|err| {
            warn!(persona = persona.name, error = %err, "image generation failed");
            match err {
                ModelError::MissingCredential => FlowError::MissingCredential,
                other => FlowError::GenerationFailed(other.to_string()),
            }
        })?;

        let (mime_type, data) = response.first_image().ok_or_else(|| {
            warn!(persona = persona.name, parts = response.parts.len(), "response carried no image");
            FlowError::NoImageReturned
        })?;

        Ok(GenerationResult::new(
            persona,
            ImagePayload::from_inline(mime_type, data),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixid_core::persona::CRYPTO_PERSONAS;

    #[test]
    fn test_prompt_embeds_name_and_style() {
        let prompt = build_prompt(&CRYPTO_PERSONAS[2]);
        assert!(prompt.contains("\"Celo\""));
        assert!(prompt.contains("8-bit pixel art"));
        assert!(prompt.contains("solid dark background"));
        assert!(prompt.contains("Do not include text"));
        assert!(prompt.contains("collectible trading card"));
    }
}
