// Material value object
// The engine does not know the host's material table; it validates and
// normalizes the name and passes it through to the window host.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Material(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaterialError {
    #[error("material name is empty")]
    Empty,
    #[error("material name '{0}' contains invalid characters")]
    InvalidCharacters(String),
}

impl Material {
    /// Normalizes a human-written material name: trims, lowercases, and
    /// turns spaces and dashes into underscores ("Golden Apple" -> "golden_apple").
    pub fn parse(name: &str) -> Result<Self, MaterialError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(MaterialError::Empty);
        }
        let normalized: String = trimmed
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        if !normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == ':')
        {
            return Err(MaterialError::InvalidCharacters(trimmed.to_string()));
        }
        Ok(Material(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_air(&self) -> bool {
        self.0 == "air" || self.0 == "minecraft:air"
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
