// Configuration section: an ordered key/value mapping
// Declaration order matters (later icon sections override earlier ones on
// position collisions), so entries are kept in insertion order.

use crate::config::{ConfigValue, ConfigValueError};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigSection {
    entries: Vec<(String, ConfigValue)>,
}

impl ConfigSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value. Sections are small; linear scans are fine.
    pub fn set(&mut self, key: impl Into<String>, value: ConfigValue) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Looks up a value; a dotted path ("open-with-item.material") traverses
    /// nested sections.
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        match path.split_once('.') {
            None => self.get_flat(path),
            Some((head, rest)) => match self.get_flat(head) {
                Some(ConfigValue::Section(section)) => section.get(rest),
                _ => None,
            },
        }
    }

    fn get_flat(&self, key: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(ConfigValue::as_string)
    }

    pub fn get_integer(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(ConfigValue::as_integer)
    }

    pub fn get_float(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(ConfigValue::as_float)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(ConfigValue::as_bool)
    }

    pub fn get_section(&self, path: &str) -> Option<&ConfigSection> {
        match self.get(path) {
            Some(ConfigValue::Section(section)) => Some(section),
            _ => None,
        }
    }

    /// A list of scalars, each coerced to a string. A single scalar is
    /// accepted as a one-element list.
    pub fn get_string_list(&self, path: &str) -> Option<Vec<String>> {
        match self.get(path)? {
            ConfigValue::List(values) => Some(
                values
                    .iter()
                    .map(|value| value.as_string().unwrap_or_default())
                    .collect(),
            ),
            value => value.as_string().map(|single| vec![single]),
        }
    }

    pub fn get_required_string(&self, path: &str) -> Result<String, ConfigValueError> {
        match self.get(path) {
            None => Err(ConfigValueError::Missing),
            Some(value) => value
                .as_string()
                .ok_or(ConfigValueError::WrongType { expected: "string" }),
        }
    }

    pub fn get_required_integer(&self, path: &str) -> Result<i64, ConfigValueError> {
        match self.get(path) {
            None => Err(ConfigValueError::Missing),
            Some(value) => value
                .as_integer()
                .ok_or(ConfigValueError::WrongType { expected: "integer" }),
        }
    }

    pub fn get_required_float(&self, path: &str) -> Result<f64, ConfigValueError> {
        match self.get(path) {
            None => Err(ConfigValueError::Missing),
            Some(value) => value
                .as_float()
                .ok_or(ConfigValueError::WrongType { expected: "number" }),
        }
    }
}
