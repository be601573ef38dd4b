// Icon entity
// One grid cell's configurable appearance and click behavior. Rendering is
// cached per icon through a fingerprint of the display state: any mutation
// changes the fingerprint and the stale snapshot is discarded on the next
// render, so no setter can forget to invalidate.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard};

use crate::actions::{Action, ActionContext, ClickResult};
use crate::entities::ItemSnapshot;
use crate::services::{PlaceholderRegistry, PlaceholderString, PlaceholderStringList};
use crate::utils::COLOR_CHAR;
use crate::value_objects::{
    BannerPatternSpec, DyeColor, EnchantmentSpec, ItemColor, Material,
};

/// Fallback display material for icons that failed to declare one.
pub fn default_material() -> Material {
    Material::parse("stone").unwrap_or_else(|_| unreachable!("'stone' is a valid material"))
}

#[derive(Debug, Clone, PartialEq)]
struct CachedRender {
    fingerprint: u64,
    snapshot: ItemSnapshot,
}

#[derive(Debug)]
pub struct IconDefinition {
    material: Material,
    amount: u8,
    durability: Option<u16>,
    raw_data: Option<serde_json::Value>,
    name: Option<PlaceholderString>,
    lore: Option<PlaceholderStringList>,
    enchantments: Vec<EnchantmentSpec>,
    leather_color: Option<ItemColor>,
    skull_owner: Option<PlaceholderString>,
    banner_color: Option<DyeColor>,
    banner_patterns: Vec<BannerPatternSpec>,
    placeholders_enabled: bool,
    blank: bool,
    click_actions: Vec<Action>,
    cache: Mutex<Option<CachedRender>>,
}

impl IconDefinition {
    pub fn new(material: Material) -> Self {
        Self {
            material,
            amount: 1,
            durability: None,
            raw_data: None,
            name: None,
            lore: None,
            enchantments: Vec::new(),
            leather_color: None,
            skull_owner: None,
            banner_color: None,
            banner_patterns: Vec::new(),
            placeholders_enabled: false,
            blank: false,
            click_actions: Vec::new(),
            cache: Mutex::new(None),
        }
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn amount(&self) -> u8 {
        self.amount
    }

    /// Stack size, clamped into 1..=127.
    pub fn set_amount(&mut self, amount: i64) {
        self.amount = amount.clamp(1, 127) as u8;
    }

    pub fn durability(&self) -> Option<u16> {
        self.durability
    }

    pub fn set_durability(&mut self, durability: Option<u16>) {
        self.durability = durability;
    }

    pub fn raw_data(&self) -> Option<&serde_json::Value> {
        self.raw_data.as_ref()
    }

    pub fn set_raw_data(&mut self, raw_data: Option<serde_json::Value>) {
        self.raw_data = raw_data;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().map(PlaceholderString::original)
    }

    pub fn set_name(&mut self, name: Option<&str>) {
        self.name = name.map(PlaceholderString::parse);
    }

    pub fn lore(&self) -> Option<Vec<&str>> {
        self.lore.as_ref().map(PlaceholderStringList::originals)
    }

    pub fn set_lore(&mut self, lore: Option<Vec<String>>) {
        self.lore = lore.map(|lines| PlaceholderStringList::parse(&lines));
    }

    pub fn set_enchantments(&mut self, enchantments: Vec<EnchantmentSpec>) {
        self.enchantments = enchantments;
    }

    pub fn set_leather_color(&mut self, color: Option<ItemColor>) {
        self.leather_color = color;
    }

    pub fn skull_owner(&self) -> Option<&str> {
        self.skull_owner.as_ref().map(PlaceholderString::original)
    }

    pub fn set_skull_owner(&mut self, owner: Option<&str>) {
        self.skull_owner = owner.map(PlaceholderString::parse);
    }

    pub fn set_banner_color(&mut self, color: Option<DyeColor>) {
        self.banner_color = color;
    }

    pub fn set_banner_patterns(&mut self, patterns: Vec<BannerPatternSpec>) {
        self.banner_patterns = patterns;
    }

    pub fn placeholders_enabled(&self) -> bool {
        self.placeholders_enabled
    }

    pub fn set_placeholders_enabled(&mut self, enabled: bool) {
        self.placeholders_enabled = enabled;
    }

    pub fn is_blank(&self) -> bool {
        self.blank
    }

    pub fn set_blank(&mut self, blank: bool) {
        self.blank = blank;
    }

    pub fn click_actions(&self) -> &[Action] {
        &self.click_actions
    }

    pub fn set_click_actions(&mut self, actions: Vec<Action>) {
        self.click_actions = actions;
    }

    /// Caching is permitted unless the icon depends on the viewer: that is,
    /// placeholders are enabled and at least one of name, lore or skull owner
    /// has a dynamic placeholder under the current registry.
    pub fn is_dynamic(&self, registry: &PlaceholderRegistry) -> bool {
        if !self.placeholders_enabled {
            return false;
        }
        self.name
            .as_ref()
            .is_some_and(|name| name.has_dynamic_placeholders(registry))
            || self
                .lore
                .as_ref()
                .is_some_and(|lore| lore.has_dynamic_placeholders(registry))
            || self
                .skull_owner
                .as_ref()
                .is_some_and(|owner| owner.has_dynamic_placeholders(registry))
    }

    /// Renders the display snapshot for one viewer. Returns None for blank
    /// icons, which intentionally leave their cell visually empty.
    pub fn render(
        &self,
        registry: &PlaceholderRegistry,
        viewer: &dyn crate::ports::Viewer,
    ) -> Option<ItemSnapshot> {
        if self.blank {
            return None;
        }

        let cacheable = !self.is_dynamic(registry);
        let fingerprint = self.display_fingerprint();

        if cacheable {
            if let Some(cached) = self.cache_guard().as_ref() {
                if cached.fingerprint == fingerprint {
                    return Some(cached.snapshot.clone());
                }
            }
        }

        let snapshot = self.render_fresh(registry, viewer);
        if cacheable {
            *self.cache_guard() = Some(CachedRender {
                fingerprint,
                snapshot: snapshot.clone(),
            });
        }
        Some(snapshot)
    }

    fn render_fresh(
        &self,
        registry: &PlaceholderRegistry,
        viewer: &dyn crate::ports::Viewer,
    ) -> ItemSnapshot {
        let mut snapshot = ItemSnapshot::new(self.material.clone());
        snapshot.amount = self.amount;
        snapshot.durability = self.durability;

        // Raw data first; structured fields below override it on conflict.
        if let Some(raw) = &self.raw_data {
            snapshot.apply_raw_data(raw);
        }

        if let Some(name) = self.render_name(registry, viewer) {
            snapshot.name = Some(name);
        }
        if let Some(lore) = &self.lore {
            snapshot.lore = if self.placeholders_enabled {
                lore.resolve(registry, viewer)
            } else {
                lore.originals().into_iter().map(str::to_string).collect()
            };
        }
        if let Some(owner) = &self.skull_owner {
            snapshot.skull_owner = Some(if self.placeholders_enabled {
                owner.resolve(registry, viewer)
            } else {
                owner.original().to_string()
            });
        }
        snapshot.enchantments = self.enchantments.clone();
        snapshot.leather_color = self.leather_color;
        snapshot.banner_color = self.banner_color;
        snapshot.banner_patterns = self.banner_patterns.clone();

        snapshot
    }

    fn render_name(
        &self,
        registry: &PlaceholderRegistry,
        viewer: &dyn crate::ports::Viewer,
    ) -> Option<String> {
        let name = self.name.as_ref()?;
        if !self.placeholders_enabled {
            return Some(name.original().to_string());
        }
        let resolved = name.resolve(registry, viewer);
        if resolved.is_empty() {
            // A named-but-blank slot must stay visually distinguishable from
            // an unnamed one; a lone color code displays as an empty name.
            Some(format!("{COLOR_CHAR}f"))
        } else {
            Some(resolved)
        }
    }

    /// Dispatches one click: every bound action runs in declaration order,
    /// and an explicitly closing action short-circuits the rest.
    pub fn on_click(&self, ctx: &mut ActionContext<'_>) -> ClickResult {
        for action in &self.click_actions {
            if action.execute(ctx) == ClickResult::Close {
                return ClickResult::Close;
            }
        }
        ClickResult::KeepOpen
    }

    fn display_fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.material.hash(&mut hasher);
        self.amount.hash(&mut hasher);
        self.durability.hash(&mut hasher);
        if let Some(raw) = &self.raw_data {
            raw.to_string().hash(&mut hasher);
        }
        self.name.hash(&mut hasher);
        self.lore.hash(&mut hasher);
        self.enchantments.hash(&mut hasher);
        self.leather_color.hash(&mut hasher);
        self.skull_owner.hash(&mut hasher);
        self.banner_color.hash(&mut hasher);
        self.banner_patterns.hash(&mut hasher);
        self.placeholders_enabled.hash(&mut hasher);
        hasher.finish()
    }

    fn cache_guard(&self) -> MutexGuard<'_, Option<CachedRender>> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[cfg(test)]
    fn has_cached_render(&self) -> bool {
        self.cache_guard().is_some()
    }
}
