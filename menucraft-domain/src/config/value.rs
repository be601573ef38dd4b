// Configuration scalar and composite values

use thiserror::Error;

use crate::config::ConfigSection;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<ConfigValue>),
    Section(ConfigSection),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValueError {
    #[error("value is missing")]
    Missing,
    #[error("wrong value type, expected {expected}")]
    WrongType { expected: &'static str },
}

impl ConfigValue {
    /// Scalars coerce to their textual form; operators routinely write
    /// unquoted numbers where a string is expected.
    pub fn as_string(&self) -> Option<String> {
        match self {
            ConfigValue::String(value) => Some(value.clone()),
            ConfigValue::Integer(value) => Some(value.to_string()),
            ConfigValue::Float(value) => Some(value.to_string()),
            ConfigValue::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Integer(value) => Some(*value as f64),
            ConfigValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}
