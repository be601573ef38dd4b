// Decorative appearance value objects
// Each is optional on an icon and opaque to everything but the window host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct AppearanceError(String);

/// RGB color, configured as "red, green, blue".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ItemColor {
    pub fn parse(value: &str) -> Result<Self, AppearanceError> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(AppearanceError(format!(
                "color '{value}' must have 3 comma-separated values"
            )));
        }
        let mut channels = [0u8; 3];
        for (index, part) in parts.iter().enumerate() {
            channels[index] = part.parse::<u8>().map_err(|_| {
                AppearanceError(format!("color channel '{part}' must be a number from 0 to 255"))
            })?;
        }
        Ok(ItemColor {
            red: channels[0],
            green: channels[1],
            blue: channels[2],
        })
    }
}

/// The 16 standard dye colors, used for banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DyeColor {
    White,
    Orange,
    Magenta,
    LightBlue,
    Yellow,
    Lime,
    Pink,
    Gray,
    LightGray,
    Cyan,
    Purple,
    Blue,
    Brown,
    Green,
    Red,
    Black,
}

impl DyeColor {
    pub fn parse(name: &str) -> Result<Self, AppearanceError> {
        let normalized = name.trim().to_lowercase().replace([' ', '-'], "_");
        let color = match normalized.as_str() {
            "white" => DyeColor::White,
            "orange" => DyeColor::Orange,
            "magenta" => DyeColor::Magenta,
            "light_blue" => DyeColor::LightBlue,
            "yellow" => DyeColor::Yellow,
            "lime" => DyeColor::Lime,
            "pink" => DyeColor::Pink,
            "gray" | "grey" => DyeColor::Gray,
            "light_gray" | "light_grey" => DyeColor::LightGray,
            "cyan" => DyeColor::Cyan,
            "purple" => DyeColor::Purple,
            "blue" => DyeColor::Blue,
            "brown" => DyeColor::Brown,
            "green" => DyeColor::Green,
            "red" => DyeColor::Red,
            "black" => DyeColor::Black,
            _ => return Err(AppearanceError(format!("unknown dye color '{name}'"))),
        };
        Ok(color)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DyeColor::White => "white",
            DyeColor::Orange => "orange",
            DyeColor::Magenta => "magenta",
            DyeColor::LightBlue => "light_blue",
            DyeColor::Yellow => "yellow",
            DyeColor::Lime => "lime",
            DyeColor::Pink => "pink",
            DyeColor::Gray => "gray",
            DyeColor::LightGray => "light_gray",
            DyeColor::Cyan => "cyan",
            DyeColor::Purple => "purple",
            DyeColor::Blue => "blue",
            DyeColor::Brown => "brown",
            DyeColor::Green => "green",
            DyeColor::Red => "red",
            DyeColor::Black => "black",
        }
    }
}

/// Enchantment-like display modifier, configured as "name" or "name, level".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnchantmentSpec {
    pub name: String,
    pub level: u32,
}

impl EnchantmentSpec {
    pub fn parse(value: &str) -> Result<Self, AppearanceError> {
        let (name_part, level_part) = match value.split_once(',') {
            Some((name, level)) => (name.trim(), Some(level.trim())),
            None => (value.trim(), None),
        };
        if name_part.is_empty() {
            return Err(AppearanceError(format!("enchantment '{value}' has no name")));
        }
        let level = match level_part {
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                AppearanceError(format!("enchantment level '{raw}' must be a positive number"))
            })?,
            None => 1,
        };
        if level == 0 {
            return Err(AppearanceError(format!(
                "enchantment level for '{name_part}' must be at least 1"
            )));
        }
        Ok(EnchantmentSpec {
            name: name_part.to_lowercase().replace([' ', '-'], "_"),
            level,
        })
    }
}

/// Banner layer, configured as "shape:color", e.g. "stripe_top:red".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BannerPatternSpec {
    pub shape: String,
    pub color: DyeColor,
}

impl BannerPatternSpec {
    pub fn parse(value: &str) -> Result<Self, AppearanceError> {
        let (shape, color) = value.split_once(':').ok_or_else(|| {
            AppearanceError(format!("banner pattern '{value}' must be in the form shape:color"))
        })?;
        let shape = shape.trim().to_lowercase().replace([' ', '-'], "_");
        if shape.is_empty() {
            return Err(AppearanceError(format!("banner pattern '{value}' has no shape")));
        }
        Ok(BannerPatternSpec {
            shape,
            color: DyeColor::parse(color)?,
        })
    }
}
