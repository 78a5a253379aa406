//! Built-in persona presets.

use super::model::Persona;
use rand::Rng;
use rand::seq::SliceRandom;

/// The eight crypto personas, in display order.
pub static CRYPTO_PERSONAS: [Persona; 8] = [
    Persona {
        name: "Bitcoin",
        tagline: "The OG Leader",
    },
    Persona {
        name: "Ethereum",
        tagline: "The Smart Visionary",
    },
    Persona {
        name: "Celo",
        tagline: "The Eco-Friendly Builder",
    },
    Persona {
        name: "Solana",
        tagline: "The Speed Demon",
    },
    Persona {
        name: "Dogecoin",
        tagline: "The Fun Lover",
    },
    Persona {
        name: "Polygon",
        tagline: "The Scalable Strategist",
    },
    Persona {
        name: "Cardano",
        tagline: "The Academic Perfectionist",
    },
    Persona {
        name: "Avalanche",
        tagline: "The Rapid Innovator",
    },
];

/// Read-only view over a fixed persona list.
#[derive(Debug, Clone, Copy)]
pub struct PersonaCatalog {
    personas: &'static [Persona],
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::from_static(&CRYPTO_PERSONAS)
    }
}

impl PersonaCatalog {
    pub fn from_static(personas: &'static [Persona]) -> Self {
        Self { personas }
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Persona> {
        self.personas.iter()
    }

    /// Looks a persona up by its display name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&'static Persona> {
        self.personas
            .iter()
            .find(|persona| persona.name.eq_ignore_ascii_case(name))
    }

    /// Draws one persona uniformly at random, with replacement.
    ///
    /// Returns `None` only for an empty catalog.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'static Persona> {
        self.personas.choose(rng)
    }
}
