// Item snapshot entity
// A fully-resolved display snapshot of one grid cell, ready to hand to the
// window host. Produced by IconDefinition::render.

use serde::{Deserialize, Serialize};

use crate::value_objects::{
    BannerPatternSpec, DyeColor, EnchantmentSpec, ItemColor, Material,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub material: Material,
    pub amount: u8,
    pub durability: Option<u16>,
    pub name: Option<String>,
    pub lore: Vec<String>,
    pub enchantments: Vec<EnchantmentSpec>,
    pub leather_color: Option<ItemColor>,
    pub skull_owner: Option<String>,
    pub banner_color: Option<DyeColor>,
    pub banner_patterns: Vec<BannerPatternSpec>,
    /// Suppress the host's automatic detail lines (damage, enchantment text,
    /// potion effects). On by default unless the raw data configures flags
    /// itself.
    pub hide_details: bool,
    /// Opaque low-level data blob, passed through to the host untouched.
    pub raw_data: Option<serde_json::Value>,
}

impl ItemSnapshot {
    pub fn new(material: Material) -> Self {
        Self {
            material,
            amount: 1,
            durability: None,
            name: None,
            lore: Vec::new(),
            enchantments: Vec::new(),
            leather_color: None,
            skull_owner: None,
            banner_color: None,
            banner_patterns: Vec::new(),
            hide_details: true,
            raw_data: None,
        }
    }

    /// Applies the raw data blob. Raw data has the lowest precedence: it seeds
    /// the recognized display fields, and structured configuration applied
    /// afterwards overrides them on conflict. The blob itself is kept for the
    /// host.
    pub fn apply_raw_data(&mut self, raw: &serde_json::Value) {
        if let Some(object) = raw.as_object() {
            if let Some(name) = object.get("name").and_then(|v| v.as_str()) {
                self.name = Some(name.to_string());
            }
            if let Some(lore) = object.get("lore").and_then(|v| v.as_array()) {
                self.lore = lore
                    .iter()
                    .map(|line| line.as_str().unwrap_or_default().to_string())
                    .collect();
            }
            // Raw data that configures display flags wins over the default
            // suppression.
            if object.contains_key("flags") {
                self.hide_details = false;
            }
        }
        self.raw_data = Some(raw.clone());
    }
}
