// YAML menu-file repository
// Reads every *.yml / *.yaml file in the menus directory and converts it to
// the neutral config tree. A file that cannot be read or parsed becomes a
// collected error; only a directory that cannot be created aborts the load.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs;
use tracing::{info, warn};

use menucraft_domain::config::{ConfigSection, ConfigValue, RawMenuFile};
use menucraft_domain::{ErrorCollector, LoadError, LoadErrorKind, MenuFileName, MenuSourceRepository};

const EXAMPLE_FILE_NAME: &str = "example.yml";

const EXAMPLE_MENU: &str = r#"menu-settings:
  name: '&9Example Menu'
  rows: 3
  commands:
    - example

information:
  position-x: 5
  position-y: 1
  material: book
  name: '&bExample Icon'
  lore:
    - '&7Edit this file to get started,'
    - '&7or create more .yml files here.'
  actions:
    - 'tell: &eYou clicked the example icon.'

exit:
  position-x: 5
  position-y: 3
  material: barrier
  name: '&cClose'
  actions:
    - close
"#;

pub struct MenuFileRepository {
    menus_dir: PathBuf,
}

impl MenuFileRepository {
    pub fn new(menus_dir: impl Into<PathBuf>) -> Self {
        Self {
            menus_dir: menus_dir.into(),
        }
    }

    async fn ensure_menus_dir(&self) -> anyhow::Result<()> {
        if self.menus_dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.menus_dir)
            .await
            .with_context(|| format!("cannot create menus directory {:?}", self.menus_dir))?;
        // A fresh install gets a working menu to start from.
        let example = self.menus_dir.join(EXAMPLE_FILE_NAME);
        match fs::write(&example, EXAMPLE_MENU).await {
            Ok(()) => info!(path = %example.display(), "created example menu"),
            Err(err) => warn!(%err, "could not write the example menu"),
        }
        Ok(())
    }

    async fn menu_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        let mut entries = fs::read_dir(&self.menus_dir)
            .await
            .with_context(|| format!("cannot read menus directory {:?}", self.menus_dir))?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_menu = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));
            if is_menu {
                paths.push(path);
            }
        }
        // Directory iteration order is platform-dependent; keep loads stable.
        paths.sort();
        Ok(paths)
    }
}

#[async_trait]
impl MenuSourceRepository for MenuFileRepository {
    async fn load_menu_sources(
        &self,
        errors: &mut ErrorCollector,
    ) -> anyhow::Result<Vec<RawMenuFile>> {
        self.ensure_menus_dir().await?;

        let mut sources = Vec::new();
        for path in self.menu_paths().await? {
            let file_name = MenuFileName(
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
            let content = match fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(err) => {
                    errors.add(LoadError::menu(
                        &file_name,
                        LoadErrorKind::MenuFileRead {
                            reason: err.to_string(),
                        },
                    ));
                    continue;
                }
            };
            let document: serde_yaml::Value = match serde_yaml::from_str(&content) {
                Ok(document) => document,
                Err(err) => {
                    errors.add(LoadError::menu(
                        &file_name,
                        LoadErrorKind::MenuFileSyntax {
                            reason: err.to_string(),
                        },
                    ));
                    continue;
                }
            };
            match convert_root(&document) {
                Some(root) => sources.push(RawMenuFile { file_name, root }),
                None => errors.add(LoadError::menu(
                    &file_name,
                    LoadErrorKind::MenuFileSyntax {
                        reason: "the file root must be a mapping of sections".to_string(),
                    },
                )),
            }
        }
        Ok(sources)
    }
}

fn convert_root(document: &serde_yaml::Value) -> Option<ConfigSection> {
    match untag(document) {
        serde_yaml::Value::Mapping(mapping) => Some(convert_mapping(mapping)),
        _ => None,
    }
}

fn convert_mapping(mapping: &serde_yaml::Mapping) -> ConfigSection {
    let mut section = ConfigSection::new();
    for (key, value) in mapping {
        let Some(key) = scalar_key(key) else {
            continue;
        };
        if let Some(value) = convert_value(value) {
            section.set(key, value);
        }
    }
    section
}

fn convert_value(value: &serde_yaml::Value) -> Option<ConfigValue> {
    match untag(value) {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::Bool(value) => Some(ConfigValue::Bool(*value)),
        serde_yaml::Value::Number(number) => {
            if let Some(value) = number.as_i64() {
                Some(ConfigValue::Integer(value))
            } else {
                number.as_f64().map(ConfigValue::Float)
            }
        }
        serde_yaml::Value::String(value) => Some(ConfigValue::String(value.clone())),
        serde_yaml::Value::Sequence(values) => Some(ConfigValue::List(
            values.iter().filter_map(convert_value).collect(),
        )),
        serde_yaml::Value::Mapping(mapping) => {
            Some(ConfigValue::Section(convert_mapping(mapping)))
        }
        serde_yaml::Value::Tagged(_) => None,
    }
}

fn untag(value: &serde_yaml::Value) -> &serde_yaml::Value {
    match value {
        serde_yaml::Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn scalar_key(key: &serde_yaml::Value) -> Option<String> {
    match untag(key) {
        serde_yaml::Value::String(key) => Some(key.clone()),
        serde_yaml::Value::Number(key) => Some(key.to_string()),
        serde_yaml::Value::Bool(key) => Some(key.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menucraft_application::parsing::{parse_menu, ParserSettings};

    async fn load(
        repository: &MenuFileRepository,
    ) -> (Vec<RawMenuFile>, ErrorCollector) {
        let mut errors = ErrorCollector::new();
        let sources = repository
            .load_menu_sources(&mut errors)
            .await
            .expect("load sources");
        (sources, errors)
    }

    #[tokio::test]
    async fn fresh_install_creates_a_working_example_menu() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let repository = MenuFileRepository::new(dir.path().join("menus"));

        let (sources, errors) = load(&repository).await;
        assert!(errors.is_empty(), "{:?}", errors.iter().collect::<Vec<_>>());
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].file_name.as_str(), EXAMPLE_FILE_NAME);

        // The shipped example must itself parse cleanly.
        let mut parse_errors = ErrorCollector::new();
        let menu = parse_menu(&sources[0], &ParserSettings::default(), &mut parse_errors);
        assert!(parse_errors.is_empty());
        assert_eq!(menu.row_count(), 3);
        assert_eq!(menu.open_commands(), ["example"]);
        assert_eq!(menu.icons().count(), 2);
    }

    #[tokio::test]
    async fn unreadable_and_invalid_files_do_not_abort_the_load() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(
            dir.path().join("good.yml"),
            "menu-settings:\n  name: Good\n  rows: 1\n",
        )
        .expect("write menu");
        std::fs::write(dir.path().join("broken.yml"), "menu-settings: [unclosed")
            .expect("write menu");
        std::fs::write(dir.path().join("scalar.yaml"), "just a string")
            .expect("write menu");
        std::fs::write(dir.path().join("notes.txt"), "ignored").expect("write file");

        let repository = MenuFileRepository::new(dir.path());
        let (sources, errors) = load(&repository).await;

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].file_name.as_str(), "good.yml");
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn nested_sections_and_lists_convert_faithfully() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(
            dir.path().join("menu.yml"),
            concat!(
                "menu-settings:\n",
                "  name: Shop\n",
                "  rows: 2\n",
                "  auto-refresh: 0.5\n",
                "  open-with-item:\n",
                "    material: compass\n",
                "    left-click: true\n",
                "icon:\n",
                "  position-x: 1\n",
                "  position-y: 1\n",
                "  material: stone\n",
                "  lore:\n",
                "    - one\n",
                "    - 2\n",
            ),
        )
        .expect("write menu");

        let repository = MenuFileRepository::new(dir.path());
        let (sources, errors) = load(&repository).await;
        assert!(errors.is_empty());

        let root = &sources[0].root;
        assert_eq!(root.get_float("menu-settings.auto-refresh"), Some(0.5));
        assert_eq!(
            root.get_string("menu-settings.open-with-item.material"),
            Some("compass".to_string())
        );
        assert_eq!(
            root.get_string_list("icon.lore"),
            Some(vec!["one".to_string(), "2".to_string()])
        );
    }

    #[tokio::test]
    async fn storage_that_cannot_be_created_is_fatal() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let file = dir.path().join("occupied");
        std::fs::write(&file, "not a directory").expect("write file");

        let repository = MenuFileRepository::new(file.join("menus"));
        let mut errors = ErrorCollector::new();
        let result = repository.load_menu_sources(&mut errors).await;
        assert!(result.is_err());
        assert!(errors.is_empty());
    }
}
