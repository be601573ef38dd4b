// Menu file parser
// Single-pass validation pipeline over one configuration tree. Never aborts
// on a bad field: every error is collected and the best-effort definition is
// returned regardless, so one typo cannot take a whole menu down.

use menucraft_domain::config::{ConfigSection, ConfigValue, ConfigValueError, RawMenuFile};
use menucraft_domain::entities::menu::MAX_MENU_ROWS;
use menucraft_domain::utils::colorize;
use menucraft_domain::{
    Action, ErrorCollector, LoadError, LoadErrorKind, Material, MenuDefinition, MenuOpenClick,
    MenuOpenItem, PlaceholderString, SlotPosition, Ticks,
};

use crate::parsing::icon_settings::{load_icon, ParserSettings};

const SETTINGS_KEY: &str = "menu-settings";
const FALLBACK_TITLE: &str = "&4No name set";
const MAX_TITLE_CHARS: usize = 32;
const DEFAULT_ROWS: i64 = 6;

pub fn parse_menu(
    raw: &RawMenuFile,
    settings: &ParserSettings,
    errors: &mut ErrorCollector,
) -> MenuDefinition {
    let empty = ConfigSection::new();
    let menu_settings = match raw.root.get_section(SETTINGS_KEY) {
        Some(section) => section,
        None => {
            errors.add(LoadError::menu(
                &raw.file_name,
                LoadErrorKind::MissingSettingsSection,
            ));
            &empty
        }
    };

    let title = parse_title(raw, menu_settings, errors);
    let rows = parse_rows(raw, menu_settings, errors);
    let mut menu = MenuDefinition::new(title, rows, raw.file_name.clone());

    parse_optional_settings(raw, menu_settings, &mut menu, errors);
    parse_icons(raw, settings, &mut menu, errors);

    menu
}

fn parse_title(
    raw: &RawMenuFile,
    menu_settings: &ConfigSection,
    errors: &mut ErrorCollector,
) -> PlaceholderString {
    let text = match menu_settings.get_required_string("name") {
        Ok(name) => name,
        Err(ConfigValueError::Missing) => {
            errors.add(LoadError::menu(
                &raw.file_name,
                LoadErrorKind::MissingSetting { setting: "name" },
            ));
            FALLBACK_TITLE.to_string()
        }
        Err(ConfigValueError::WrongType { expected }) => {
            errors.add(LoadError::menu(
                &raw.file_name,
                LoadErrorKind::InvalidSetting {
                    setting: "name",
                    reason: format!("must be a {expected}"),
                },
            ));
            FALLBACK_TITLE.to_string()
        }
    };
    // Window titles have a hard display limit.
    let title: String = colorize(&text).chars().take(MAX_TITLE_CHARS).collect();
    PlaceholderString::parse(&title)
}

fn parse_rows(
    raw: &RawMenuFile,
    menu_settings: &ConfigSection,
    errors: &mut ErrorCollector,
) -> u8 {
    let rows = match menu_settings.get_required_integer("rows") {
        Ok(rows) => rows,
        Err(ConfigValueError::Missing) => {
            errors.add(LoadError::menu(
                &raw.file_name,
                LoadErrorKind::MissingSetting { setting: "rows" },
            ));
            DEFAULT_ROWS
        }
        Err(ConfigValueError::WrongType { .. }) => {
            errors.add(LoadError::menu(
                &raw.file_name,
                LoadErrorKind::InvalidSetting {
                    setting: "rows",
                    reason: "must be a whole number".to_string(),
                },
            ));
            DEFAULT_ROWS
        }
    };
    if rows < 1 {
        errors.add(LoadError::menu(
            &raw.file_name,
            LoadErrorKind::InvalidSetting {
                setting: "rows",
                reason: "must be at least 1".to_string(),
            },
        ));
        return 1;
    }
    if rows > i64::from(MAX_MENU_ROWS) {
        errors.add(LoadError::menu(
            &raw.file_name,
            LoadErrorKind::InvalidSetting {
                setting: "rows",
                reason: format!("must be at most {MAX_MENU_ROWS}"),
            },
        ));
        return MAX_MENU_ROWS;
    }
    rows as u8
}

fn parse_optional_settings(
    raw: &RawMenuFile,
    menu_settings: &ConfigSection,
    menu: &mut MenuDefinition,
    errors: &mut ErrorCollector,
) {
    if let Some(commands) = menu_settings.get_string_list("commands") {
        let commands = commands
            .iter()
            .map(|command| command.trim().trim_start_matches('/').to_lowercase())
            .filter(|command| !command.is_empty())
            .collect();
        menu.set_open_commands(commands);
    }

    if let Some(serialized) = menu_settings.get_string_list("open-actions") {
        let mut actions = Vec::with_capacity(serialized.len());
        for entry in &serialized {
            match Action::parse(entry) {
                Ok(action) => actions.push(action),
                Err(err) => {
                    errors.add(LoadError::menu(
                        &raw.file_name,
                        LoadErrorKind::InvalidSettingListElement {
                            setting: "open-actions",
                            element: entry.clone(),
                            reason: err.reason,
                        },
                    ));
                    actions.push(Action::disabled(entry));
                }
            }
        }
        menu.set_open_actions(actions);
    }

    menu.set_refresh_ticks(parse_seconds(raw, menu_settings, "auto-refresh", errors));
    menu.set_auto_close_ticks(parse_seconds(raw, menu_settings, "auto-close", errors));

    if let Some(auto_reopen) = menu_settings.get_bool("auto-reopen") {
        menu.set_auto_reopen(auto_reopen);
    }

    if menu_settings.contains("open-with-item") {
        menu.set_open_item(parse_open_item(raw, menu_settings, errors));
    }
}

fn parse_seconds(
    raw: &RawMenuFile,
    menu_settings: &ConfigSection,
    setting: &'static str,
    errors: &mut ErrorCollector,
) -> Option<Ticks> {
    if !menu_settings.contains(setting) {
        return None;
    }
    match menu_settings.get_float(setting) {
        Some(seconds) => Some(Ticks::from_seconds(seconds)),
        None => {
            errors.add(LoadError::menu(
                &raw.file_name,
                LoadErrorKind::InvalidSetting {
                    setting,
                    reason: "must be a number of seconds".to_string(),
                },
            ));
            None
        }
    }
}

fn parse_open_item(
    raw: &RawMenuFile,
    menu_settings: &ConfigSection,
    errors: &mut ErrorCollector,
) -> Option<MenuOpenItem> {
    let serialized = match menu_settings.get_string("open-with-item.material") {
        Some(material) => material,
        None => {
            errors.add(LoadError::menu(
                &raw.file_name,
                LoadErrorKind::MissingSetting {
                    setting: "open-with-item.material",
                },
            ));
            return None;
        }
    };

    // A numeric suffix after a colon restricts the trigger to one durability
    // value ("wooden_hoe:2"); anything else is part of the material name.
    let (material_part, durability) = match serialized.rsplit_once(':') {
        Some((material, suffix)) => match suffix.trim().parse::<u16>() {
            Ok(durability) => (material, Some(durability)),
            Err(_) => (serialized.as_str(), None),
        },
        None => (serialized.as_str(), None),
    };

    let material = match Material::parse(material_part) {
        Ok(material) => material,
        Err(err) => {
            errors.add(LoadError::menu(
                &raw.file_name,
                LoadErrorKind::InvalidSetting {
                    setting: "open-with-item.material",
                    reason: err.to_string(),
                },
            ));
            return None;
        }
    };

    let left_click = menu_settings
        .get_bool("open-with-item.left-click")
        .unwrap_or(true);
    let right_click = menu_settings
        .get_bool("open-with-item.right-click")
        .unwrap_or(true);
    let click = match MenuOpenClick::from_options(left_click, right_click) {
        Some(click) => click,
        None => {
            errors.add(LoadError::menu(
                &raw.file_name,
                LoadErrorKind::InvalidSetting {
                    setting: "open-with-item",
                    reason: "both clicks are disabled".to_string(),
                },
            ));
            return None;
        }
    };

    let mut open_item = MenuOpenItem::new(material, click);
    open_item.restrictive_durability = durability;
    Some(open_item)
}

fn parse_icons(
    raw: &RawMenuFile,
    settings: &ParserSettings,
    menu: &mut MenuDefinition,
    errors: &mut ErrorCollector,
) {
    let keys: Vec<String> = raw
        .root
        .keys()
        .filter(|key| *key != SETTINGS_KEY)
        .map(str::to_string)
        .collect();

    for key in &keys {
        let section = match raw.root.get(key) {
            Some(ConfigValue::Section(section)) => section,
            _ => {
                errors.add(LoadError::icon(
                    &raw.file_name,
                    key,
                    LoadErrorKind::MenuFileSyntax {
                        reason: "icon entry must be a section of attributes".to_string(),
                    },
                ));
                continue;
            }
        };

        let parsed = load_icon(&raw.file_name, key, section, settings, errors);

        let mut missing = |attribute: &'static str, errors: &mut ErrorCollector| {
            errors.add(LoadError::icon(
                &raw.file_name,
                key,
                LoadErrorKind::MissingAttribute { attribute },
            ));
        };
        let (x, y) = match (parsed.position_x, parsed.position_y) {
            (Some(x), Some(y)) => (x, y),
            (x, y) => {
                if x.is_none() {
                    missing("position-x", errors);
                }
                if y.is_none() {
                    missing("position-y", errors);
                }
                continue;
            }
        };

        // Configuration coordinates are 1-based.
        let column_range = 1..=i64::from(menu.column_count());
        let row_range = 1..=i64::from(menu.row_count());
        if !column_range.contains(&x) || !row_range.contains(&y) {
            errors.add(LoadError::icon(
                &raw.file_name,
                key,
                LoadErrorKind::InvalidAttribute {
                    attribute: "position",
                    reason: format!(
                        "({x}, {y}) is outside the {}x{} grid",
                        menu.column_count(),
                        menu.row_count()
                    ),
                },
            ));
            continue;
        }

        let position = SlotPosition::new((y - 1) as u8, (x - 1) as u8);
        if menu.set_icon(position, parsed.icon).is_some() {
            // Last declaration wins; the collision is still reported.
            errors.add(LoadError::icon(
                &raw.file_name,
                key,
                LoadErrorKind::IconOverridesAnother {
                    row: y as u8,
                    column: x as u8,
                },
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menucraft_domain::MenuFileName;

    fn icon_section(x: i64, y: i64, material: &str) -> ConfigValue {
        let mut section = ConfigSection::new();
        section.set("position-x", ConfigValue::Integer(x));
        section.set("position-y", ConfigValue::Integer(y));
        section.set("material", ConfigValue::String(material.to_string()));
        ConfigValue::Section(section)
    }

    fn raw_file(build: impl FnOnce(&mut ConfigSection)) -> RawMenuFile {
        let mut root = ConfigSection::new();
        build(&mut root);
        RawMenuFile {
            file_name: MenuFileName("shop.yml".to_string()),
            root,
        }
    }

    fn settings_section(build: impl FnOnce(&mut ConfigSection)) -> ConfigValue {
        let mut section = ConfigSection::new();
        section.set("name", ConfigValue::String("&aShop".to_string()));
        section.set("rows", ConfigValue::Integer(3));
        build(&mut section);
        ConfigValue::Section(section)
    }

    fn parse(raw: &RawMenuFile) -> (MenuDefinition, ErrorCollector) {
        let mut errors = ErrorCollector::new();
        let menu = parse_menu(raw, &ParserSettings::default(), &mut errors);
        (menu, errors)
    }

    #[test]
    fn a_complete_file_parses_without_errors() {
        let raw = raw_file(|root| {
            root.set(
                "menu-settings",
                settings_section(|settings| {
                    settings.set("commands", ConfigValue::String("/Shop".to_string()));
                    settings.set("auto-refresh", ConfigValue::Float(0.5));
                }),
            );
            root.set("sword", icon_section(1, 1, "diamond_sword"));
        });

        let (menu, errors) = parse(&raw);
        assert!(errors.is_empty(), "{:?}", errors.iter().collect::<Vec<_>>());
        assert_eq!(menu.title().original(), "\u{00A7}aShop");
        assert_eq!(menu.row_count(), 3);
        assert_eq!(menu.open_commands(), ["shop"]);
        assert_eq!(menu.refresh_ticks(), Some(Ticks(10)));
        assert!(menu.icon_at(SlotPosition::new(0, 0)).is_some());
    }

    #[test]
    fn missing_settings_section_falls_back_but_is_reported() {
        let raw = raw_file(|root| {
            root.set("sword", icon_section(1, 1, "diamond_sword"));
        });

        let (menu, errors) = parse(&raw);
        // Missing section, missing name, missing rows.
        assert_eq!(errors.len(), 3);
        assert_eq!(menu.title().original(), "\u{00A7}4No name set");
        assert_eq!(menu.row_count(), 6);
        assert!(menu.icon_at(SlotPosition::new(0, 0)).is_some());
    }

    #[test]
    fn zero_rows_is_an_error_and_yields_one_row() {
        let raw = raw_file(|root| {
            root.set(
                "menu-settings",
                settings_section(|settings| {
                    settings.set("rows", ConfigValue::Integer(0));
                }),
            );
        });

        let (menu, errors) = parse(&raw);
        assert_eq!(menu.row_count(), 1);
        assert_eq!(errors.len(), 1);
        let rendered = errors.iter().next().expect("one error").to_string();
        assert!(rendered.contains("rows"));
    }

    #[test]
    fn oversized_rows_are_clamped_with_an_error() {
        let raw = raw_file(|root| {
            root.set(
                "menu-settings",
                settings_section(|settings| {
                    settings.set("rows", ConfigValue::Integer(9));
                }),
            );
        });

        let (menu, errors) = parse(&raw);
        assert_eq!(menu.row_count(), 6);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn long_titles_are_truncated() {
        let raw = raw_file(|root| {
            root.set(
                "menu-settings",
                settings_section(|settings| {
                    settings.set(
                        "name",
                        ConfigValue::String("An exceedingly long menu title indeed".to_string()),
                    );
                }),
            );
        });

        let (menu, _) = parse(&raw);
        assert_eq!(menu.title().original().chars().count(), 32);
    }

    #[test]
    fn position_collision_keeps_the_later_icon_and_reports_once() {
        let raw = raw_file(|root| {
            root.set("menu-settings", settings_section(|_| {}));
            root.set("first", icon_section(1, 1, "stone"));
            root.set("second", icon_section(1, 1, "diamond"));
        });

        let (menu, errors) = parse(&raw);
        assert_eq!(errors.len(), 1);
        let icon = menu
            .icon_at(SlotPosition::new(0, 0))
            .expect("cell is occupied");
        assert_eq!(icon.material().as_str(), "diamond");
        let rendered = errors.iter().next().expect("one error").to_string();
        assert!(rendered.contains("second"));
    }

    #[test]
    fn missing_coordinates_skip_the_icon() {
        let raw = raw_file(|root| {
            root.set("menu-settings", settings_section(|_| {}));
            let mut icon = ConfigSection::new();
            icon.set("material", ConfigValue::String("stone".to_string()));
            icon.set("position-x", ConfigValue::Integer(1));
            root.set("floating", ConfigValue::Section(icon));
        });

        let (menu, errors) = parse(&raw);
        assert_eq!(errors.len(), 1);
        assert_eq!(menu.icons().count(), 0);
    }

    #[test]
    fn out_of_bounds_positions_skip_the_icon() {
        let raw = raw_file(|root| {
            root.set("menu-settings", settings_section(|_| {}));
            root.set("below", icon_section(1, 4, "stone")); // rows = 3
        });

        let (menu, errors) = parse(&raw);
        assert_eq!(errors.len(), 1);
        assert_eq!(menu.icons().count(), 0);
    }

    #[test]
    fn open_item_trigger_parses_with_durability_suffix() {
        let raw = raw_file(|root| {
            root.set(
                "menu-settings",
                settings_section(|settings| {
                    let mut item = ConfigSection::new();
                    item.set("material", ConfigValue::String("wooden_hoe:2".to_string()));
                    item.set("right-click", ConfigValue::Bool(false));
                    settings.set("open-with-item", ConfigValue::Section(item));
                }),
            );
        });

        let (menu, errors) = parse(&raw);
        assert!(errors.is_empty());
        let trigger = menu.open_item().expect("trigger present");
        assert_eq!(trigger.material.as_str(), "wooden_hoe");
        assert_eq!(trigger.restrictive_durability, Some(2));
        assert_eq!(trigger.click, MenuOpenClick::LeftClick);
    }

    #[test]
    fn malformed_open_actions_become_disabled_stand_ins() {
        let raw = raw_file(|root| {
            root.set(
                "menu-settings",
                settings_section(|settings| {
                    settings.set(
                        "open-actions",
                        ConfigValue::List(vec![
                            ConfigValue::String("sound: ding".to_string()),
                            ConfigValue::String("brodcast: hi".to_string()),
                        ]),
                    );
                }),
            );
        });

        let (menu, errors) = parse(&raw);
        assert_eq!(errors.len(), 1);
        assert_eq!(menu.open_actions().len(), 2);
        assert!(matches!(menu.open_actions()[1], Action::Disabled { .. }));
    }

    #[test]
    fn auto_close_of_a_fraction_of_a_second_is_one_tick() {
        let raw = raw_file(|root| {
            root.set(
                "menu-settings",
                settings_section(|settings| {
                    settings.set("auto-close", ConfigValue::Float(0.04));
                }),
            );
        });

        let (menu, errors) = parse(&raw);
        assert!(errors.is_empty());
        assert_eq!(menu.auto_close_ticks(), Some(Ticks(1)));
    }
}
