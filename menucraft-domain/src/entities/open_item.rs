// Item-based menu open trigger

use serde::{Deserialize, Serialize};

use crate::value_objects::{Material, MenuOpenClick, MouseClick};

/// Opens a menu when the viewer clicks with a matching item in hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuOpenItem {
    pub material: Material,
    pub click: MenuOpenClick,
    /// When set, only items with exactly this durability trigger the menu.
    pub restrictive_durability: Option<u16>,
}

impl MenuOpenItem {
    pub fn new(material: Material, click: MenuOpenClick) -> Self {
        Self {
            material,
            click,
            restrictive_durability: None,
        }
    }

    pub fn matches(&self, material: &Material, durability: Option<u16>, click: MouseClick) -> bool {
        if !self.click.accepts(click) {
            return false;
        }
        if self.material != *material {
            return false;
        }
        match self.restrictive_durability {
            None => true,
            Some(required) => durability == Some(required),
        }
    }
}
