//! Persona domain model.

use serde::Serialize;

/// A named identity with a one-line descriptive trait.
///
/// Personas are immutable and live in static storage.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Persona {
    /// Display name, also embedded in the generation prompt
    pub name: &'static str,
    /// Short characterization shown under the name
    #[serde(rename = "trait")]
    pub tagline: &'static str,
}
