// Icon section loader
// Walks one icon section attribute by attribute against the closed schema,
// validating each value independently so one bad attribute never takes the
// rest of the icon down with it.

use menucraft_domain::config::ConfigSection;
use menucraft_domain::entities::icon::default_material;
use menucraft_domain::utils::{colorize, starts_with_color_code};
use menucraft_domain::{
    Action, BannerPatternSpec, DyeColor, EnchantmentSpec, IconDefinition, ItemColor, LoadError,
    LoadErrorKind, Material, MenuFileName,
};

use crate::parsing::attributes::AttributeName;

/// Operator-tunable parsing defaults, sourced from the application config.
#[derive(Debug, Clone)]
pub struct ParserSettings {
    default_name_color: String,
    default_lore_color: String,
}

impl ParserSettings {
    /// Color prefixes are written '&'-style in the config and translated here
    /// once.
    pub fn new(default_name_color: &str, default_lore_color: &str) -> Self {
        Self {
            default_name_color: colorize(default_name_color),
            default_lore_color: colorize(default_lore_color),
        }
    }

    fn apply_name_color(&self, text: &str) -> String {
        Self::apply_color(&self.default_name_color, text)
    }

    fn apply_lore_color(&self, text: &str) -> String {
        Self::apply_color(&self.default_lore_color, text)
    }

    fn apply_color(prefix: &str, text: &str) -> String {
        if starts_with_color_code(text) {
            text.to_string()
        } else {
            format!("{prefix}{text}")
        }
    }
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self::new("&f", "&7")
    }
}

/// One icon as loaded from its section: the definition plus its raw,
/// still-unvalidated grid coordinates (1-based in configuration).
#[derive(Debug)]
pub struct ParsedIcon {
    pub icon: IconDefinition,
    pub position_x: Option<i64>,
    pub position_y: Option<i64>,
}

pub fn load_icon(
    menu: &MenuFileName,
    icon_key: &str,
    section: &ConfigSection,
    settings: &ParserSettings,
    errors: &mut menucraft_domain::ErrorCollector,
) -> ParsedIcon {
    let mut icon = IconDefinition::new(default_material());
    let mut position_x = None;
    let mut position_y = None;
    let mut has_material = false;

    let keys: Vec<String> = section.keys().map(str::to_string).collect();
    for key in &keys {
        let Some(attribute) = AttributeName::from_key(key) else {
            errors.add(LoadError::icon(
                menu,
                icon_key,
                LoadErrorKind::UnknownAttribute {
                    attribute: key.clone(),
                },
            ));
            continue;
        };

        let mut invalid = |reason: String, errors: &mut menucraft_domain::ErrorCollector| {
            errors.add(LoadError::icon(
                menu,
                icon_key,
                LoadErrorKind::InvalidAttribute {
                    attribute: attribute.key(),
                    reason,
                },
            ));
        };

        match attribute {
            AttributeName::PositionX => match section.get_integer(key) {
                Some(value) => position_x = Some(value),
                None => invalid("must be a whole number".to_string(), errors),
            },
            AttributeName::PositionY => match section.get_integer(key) {
                Some(value) => position_y = Some(value),
                None => invalid("must be a whole number".to_string(), errors),
            },
            AttributeName::Material => match section.get_string(key) {
                Some(value) => match Material::parse(&value) {
                    Ok(material) => {
                        icon.set_material(material);
                        has_material = true;
                    }
                    Err(err) => invalid(err.to_string(), errors),
                },
                None => invalid("must be a material name".to_string(), errors),
            },
            AttributeName::Amount => match section.get_integer(key) {
                Some(value) => icon.set_amount(value),
                None => invalid("must be a whole number".to_string(), errors),
            },
            AttributeName::Durability => match section.get_integer(key) {
                Some(value) if (0..=i64::from(u16::MAX)).contains(&value) => {
                    icon.set_durability(Some(value as u16));
                }
                Some(_) => invalid("is out of range".to_string(), errors),
                None => invalid("must be a whole number".to_string(), errors),
            },
            AttributeName::Data => match section.get_string(key) {
                Some(value) => match serde_json::from_str(&value) {
                    Ok(data) => icon.set_raw_data(Some(data)),
                    Err(err) => invalid(format!("is not well-formed: {err}"), errors),
                },
                None => invalid("must be a string".to_string(), errors),
            },
            AttributeName::Name => match section.get_string(key) {
                Some(value) => {
                    icon.set_name(Some(&settings.apply_name_color(&colorize(&value))));
                }
                None => invalid("must be a string".to_string(), errors),
            },
            AttributeName::Lore => match section.get_string_list(key) {
                Some(lines) => {
                    let lines = lines
                        .iter()
                        .map(|line| settings.apply_lore_color(&colorize(line)))
                        .collect();
                    icon.set_lore(Some(lines));
                }
                None => invalid("must be a list of lines".to_string(), errors),
            },
            AttributeName::Enchantments => match section.get_string_list(key) {
                Some(entries) => {
                    let mut enchantments = Vec::with_capacity(entries.len());
                    for entry in &entries {
                        match EnchantmentSpec::parse(entry) {
                            Ok(enchantment) => enchantments.push(enchantment),
                            Err(err) => invalid(err.to_string(), errors),
                        }
                    }
                    icon.set_enchantments(enchantments);
                }
                None => invalid("must be a list".to_string(), errors),
            },
            AttributeName::Color => match section.get_string(key) {
                Some(value) => match ItemColor::parse(&value) {
                    Ok(color) => icon.set_leather_color(Some(color)),
                    Err(err) => invalid(err.to_string(), errors),
                },
                None => invalid("must be a string".to_string(), errors),
            },
            AttributeName::SkullOwner => match section.get_string(key) {
                Some(value) => icon.set_skull_owner(Some(value.trim())),
                None => invalid("must be a string".to_string(), errors),
            },
            AttributeName::BannerColor => match section.get_string(key) {
                Some(value) => match DyeColor::parse(&value) {
                    Ok(color) => icon.set_banner_color(Some(color)),
                    Err(err) => invalid(err.to_string(), errors),
                },
                None => invalid("must be a string".to_string(), errors),
            },
            AttributeName::BannerPatterns => match section.get_string_list(key) {
                Some(entries) => {
                    let mut patterns = Vec::with_capacity(entries.len());
                    for entry in &entries {
                        match BannerPatternSpec::parse(entry) {
                            Ok(pattern) => patterns.push(pattern),
                            Err(err) => invalid(err.to_string(), errors),
                        }
                    }
                    icon.set_banner_patterns(patterns);
                }
                None => invalid("must be a list".to_string(), errors),
            },
            AttributeName::Placeholders => match section.get_bool(key) {
                Some(value) => icon.set_placeholders_enabled(value),
                None => invalid("must be true or false".to_string(), errors),
            },
            AttributeName::Blank => match section.get_bool(key) {
                Some(value) => icon.set_blank(value),
                None => invalid("must be true or false".to_string(), errors),
            },
            AttributeName::Actions => match section.get_string_list(key) {
                Some(entries) => {
                    let mut actions = Vec::with_capacity(entries.len());
                    for entry in &entries {
                        match Action::parse(entry) {
                            Ok(action) => actions.push(action),
                            Err(err) => {
                                invalid(err.to_string(), errors);
                                actions.push(Action::disabled(entry));
                            }
                        }
                    }
                    icon.set_click_actions(actions);
                }
                None => invalid("must be a list".to_string(), errors),
            },
        }
    }

    // An icon that looks blank without saying so is almost always a mistake.
    if !has_material && !icon.is_blank() {
        errors.add(LoadError::icon(
            menu,
            icon_key,
            LoadErrorKind::MissingAttribute {
                attribute: AttributeName::Material.key(),
            },
        ));
    }

    ParsedIcon {
        icon,
        position_x,
        position_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menucraft_domain::config::ConfigValue;
    use menucraft_domain::ErrorCollector;

    fn menu() -> MenuFileName {
        MenuFileName("shop.yml".to_string())
    }

    fn load(section: ConfigSection) -> (ParsedIcon, ErrorCollector) {
        let mut errors = ErrorCollector::new();
        let parsed = load_icon(
            &menu(),
            "test-icon",
            &section,
            &ParserSettings::default(),
            &mut errors,
        );
        (parsed, errors)
    }

    #[test]
    fn recognized_attributes_populate_the_icon() {
        let mut section = ConfigSection::new();
        section.set("position-x", ConfigValue::Integer(3));
        section.set("position-y", ConfigValue::Integer(2));
        section.set("material", ConfigValue::String("diamond sword".to_string()));
        section.set("amount", ConfigValue::Integer(5));
        section.set("name", ConfigValue::String("&bExcalibur".to_string()));
        section.set(
            "actions",
            ConfigValue::List(vec![ConfigValue::String("tell: &aEnjoy!".to_string())]),
        );

        let (parsed, errors) = load(section);
        assert!(errors.is_empty(), "{:?}", errors.iter().collect::<Vec<_>>());
        assert_eq!(parsed.position_x, Some(3));
        assert_eq!(parsed.position_y, Some(2));
        assert_eq!(parsed.icon.material().as_str(), "diamond_sword");
        assert_eq!(parsed.icon.amount(), 5);
        assert_eq!(parsed.icon.name(), Some("\u{00A7}bExcalibur"));
        assert_eq!(parsed.icon.click_actions().len(), 1);
    }

    #[test]
    fn unknown_attributes_are_collected() {
        let mut section = ConfigSection::new();
        section.set("material", ConfigValue::String("stone".to_string()));
        section.set("sparkles", ConfigValue::Bool(true));

        let (_, errors) = load(section);
        assert_eq!(errors.len(), 1);
        let rendered = errors.iter().next().expect("one error").to_string();
        assert!(rendered.contains("sparkles"));
    }

    #[test]
    fn missing_material_without_blank_flag_is_one_error() {
        let mut section = ConfigSection::new();
        section.set("name", ConfigValue::String("Mystery".to_string()));

        let (parsed, errors) = load(section);
        assert_eq!(errors.len(), 1);
        // The icon still loads with the fallback display material.
        assert_eq!(parsed.icon.material().as_str(), "stone");
    }

    #[test]
    fn blank_flag_excuses_the_missing_material() {
        let mut section = ConfigSection::new();
        section.set("blank", ConfigValue::Bool(true));

        let (parsed, errors) = load(section);
        assert!(errors.is_empty());
        assert!(parsed.icon.is_blank());
    }

    #[test]
    fn default_colors_prefix_uncolored_text() {
        let mut section = ConfigSection::new();
        section.set("material", ConfigValue::String("paper".to_string()));
        section.set("name", ConfigValue::String("Plain".to_string()));
        section.set(
            "lore",
            ConfigValue::List(vec![
                ConfigValue::String("first line".to_string()),
                ConfigValue::String("&asecond line".to_string()),
            ]),
        );

        let (parsed, errors) = load(section);
        assert!(errors.is_empty());
        assert_eq!(parsed.icon.name(), Some("\u{00A7}fPlain"));
        assert_eq!(
            parsed.icon.lore(),
            Some(vec!["\u{00A7}7first line", "\u{00A7}asecond line"])
        );
    }

    #[test]
    fn malformed_actions_become_disabled_stand_ins() {
        let mut section = ConfigSection::new();
        section.set("material", ConfigValue::String("lever".to_string()));
        section.set(
            "actions",
            ConfigValue::List(vec![
                ConfigValue::String("opeen: shop".to_string()),
                ConfigValue::String("close".to_string()),
            ]),
        );

        let (parsed, errors) = load(section);
        assert_eq!(errors.len(), 1);
        assert_eq!(parsed.icon.click_actions().len(), 2);
        assert!(matches!(
            parsed.icon.click_actions()[0],
            Action::Disabled { .. }
        ));
        assert!(matches!(parsed.icon.click_actions()[1], Action::CloseMenu));
    }

    #[test]
    fn one_bad_attribute_does_not_block_the_rest() {
        let mut section = ConfigSection::new();
        section.set("material", ConfigValue::String("st?ne".to_string()));
        section.set("amount", ConfigValue::Integer(10));

        let (parsed, errors) = load(section);
        assert_eq!(errors.len(), 2); // invalid material + missing material
        assert_eq!(parsed.icon.amount(), 10);
        assert_eq!(parsed.icon.material().as_str(), "stone");
    }
}
