// Identifier value objects

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewerId(pub Uuid);

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Handle of one open inventory window, assigned by the window host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// Source identity of a menu: the configuration file name, e.g. "shop.yml".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuFileName(pub String);

impl MenuFileName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends ".yml" when the name carries no YAML extension, so that
    /// "shop" and "shop.yml" refer to the same menu.
    pub fn with_yaml_extension(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".yml") || lower.ends_with(".yaml") {
            MenuFileName(name.to_string())
        } else {
            MenuFileName(format!("{name}.yml"))
        }
    }
}

impl fmt::Display for MenuFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
