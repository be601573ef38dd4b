// Sound value object, configured as "name", "name, pitch" or "name, pitch, volume"

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SoundError(String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundSpec {
    pub name: String,
    pub pitch: f32,
    pub volume: f32,
}

impl SoundSpec {
    pub fn parse(value: &str) -> Result<Self, SoundError> {
        let mut parts = value.split(',').map(str::trim);
        let name = parts
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| SoundError(format!("sound '{value}' has no name")))?
            .to_lowercase()
            .replace([' ', '-'], "_");

        let mut pitch = 1.0f32;
        let mut volume = 1.0f32;
        if let Some(raw) = parts.next() {
            pitch = raw
                .parse()
                .map_err(|_| SoundError(format!("sound pitch '{raw}' must be a number")))?;
        }
        if let Some(raw) = parts.next() {
            volume = raw
                .parse()
                .map_err(|_| SoundError(format!("sound volume '{raw}' must be a number")))?;
        }
        if parts.next().is_some() {
            return Err(SoundError(format!(
                "sound '{value}' has too many comma-separated values"
            )));
        }
        Ok(SoundSpec { name, pitch, volume })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fills_default_pitch_and_volume() {
        let sound = SoundSpec::parse("ui_button_click").expect("parse sound");
        assert_eq!(sound.name, "ui_button_click");
        assert_eq!(sound.pitch, 1.0);
        assert_eq!(sound.volume, 1.0);
    }

    #[test]
    fn parse_reads_pitch_and_volume() {
        let sound = SoundSpec::parse("note_pling, 2.0, 0.5").expect("parse sound");
        assert_eq!(sound.pitch, 2.0);
        assert_eq!(sound.volume, 0.5);
    }

    #[test]
    fn parse_rejects_malformed_values() {
        assert!(SoundSpec::parse("").is_err());
        assert!(SoundSpec::parse("click, loud").is_err());
        assert!(SoundSpec::parse("click, 1, 1, 1").is_err());
    }
}
