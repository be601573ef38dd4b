// Menu definition parsing
// Converts the neutral configuration tree into validated menu definitions,
// collecting recoverable errors instead of failing fast.

pub mod attributes;
pub mod icon_settings;
pub mod menu_parser;

pub use attributes::AttributeName;
pub use icon_settings::{load_icon, ParsedIcon, ParserSettings};
pub use menu_parser::parse_menu;
