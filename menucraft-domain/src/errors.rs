// Load-time error collection
// Non-fatal parse errors accumulate in an ErrorCollector scoped to one
// load/reload; the caller inspects it and decides what to do. The kinds are a
// flat enumeration carried by the error itself, so printing never has to
// inspect a cause chain.

use std::fmt;

use thiserror::Error;

use crate::value_objects::MenuFileName;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadErrorKind {
    // Structural: missing or invalid required fields, recovered with defaults
    #[error("missing 'menu-settings' section")]
    MissingSettingsSection,
    #[error("missing required setting '{setting}'")]
    MissingSetting { setting: &'static str },
    #[error("invalid setting '{setting}': {reason}")]
    InvalidSetting { setting: &'static str, reason: String },
    #[error("invalid element '{element}' in setting '{setting}': {reason}")]
    InvalidSettingListElement {
        setting: &'static str,
        element: String,
        reason: String,
    },

    // Referential: bad positions, duplicate registrations
    #[error("missing attribute '{attribute}'")]
    MissingAttribute { attribute: &'static str },
    #[error("invalid attribute '{attribute}': {reason}")]
    InvalidAttribute { attribute: &'static str, reason: String },
    #[error("unknown attribute '{attribute}'")]
    UnknownAttribute { attribute: String },
    #[error("icon at row {row}, column {column} overrides a previously declared icon")]
    IconOverridesAnother { row: u8, column: u8 },
    #[error("a menu with the same file name is already registered as '{other}'")]
    DuplicateMenuFile { other: String },
    #[error("open command '{command}' is already used by menu '{other}'")]
    DuplicateOpenCommand { command: String, other: String },

    // Syntax: whole files that could not be read or parsed
    #[error("cannot read menu file: {reason}")]
    MenuFileRead { reason: String },
    #[error("invalid menu file syntax: {reason}")]
    MenuFileSyntax { reason: String },
}

/// One collected error, with enough provenance to point the operator at the
/// offending file and section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub menu: Option<MenuFileName>,
    pub icon: Option<String>,
    pub kind: LoadErrorKind,
}

impl LoadError {
    pub fn menu(menu: &MenuFileName, kind: LoadErrorKind) -> Self {
        Self {
            menu: Some(menu.clone()),
            icon: None,
            kind,
        }
    }

    pub fn icon(menu: &MenuFileName, icon: &str, kind: LoadErrorKind) -> Self {
        Self {
            menu: Some(menu.clone()),
            icon: Some(icon.to_string()),
            kind,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.menu, &self.icon) {
            (Some(menu), Some(icon)) => write!(f, "menu '{menu}', icon '{icon}': {}", self.kind),
            (Some(menu), None) => write!(f, "menu '{menu}': {}", self.kind),
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// Accumulates recoverable errors during one load operation. Never thrown:
/// parsing always completes best-effort and the collector is inspected
/// afterwards.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<LoadError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadError> {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collected_errors_keep_provenance() {
        let mut collector = ErrorCollector::new();
        let menu = MenuFileName("shop.yml".to_string());
        collector.add(LoadError::icon(
            &menu,
            "diamond-button",
            LoadErrorKind::MissingAttribute {
                attribute: "position-x",
            },
        ));

        assert!(collector.has_errors());
        assert_eq!(collector.len(), 1);
        let rendered = collector.iter().next().expect("one error").to_string();
        assert!(rendered.contains("shop.yml"));
        assert!(rendered.contains("diamond-button"));
        assert!(rendered.contains("position-x"));
    }
}
