// Load orchestration
// One load/reload: pull raw menu files from the repository, parse each into
// a definition, build a fresh registry. Everything recoverable lands in the
// returned collector; only a storage-level failure aborts.

use std::sync::Arc;

use menucraft_domain::{ErrorCollector, MenuSourceRepository};
use tracing::{error, info, warn};

use crate::metrics::Metrics;
use crate::parsing::{parse_menu, ParserSettings};
use crate::registry::MenuRegistry;

pub async fn load_menus(
    repository: &dyn MenuSourceRepository,
    settings: &ParserSettings,
    metrics: &Metrics,
) -> anyhow::Result<(MenuRegistry, ErrorCollector)> {
    let mut errors = ErrorCollector::new();
    let sources = repository.load_menu_sources(&mut errors).await?;

    let mut registry = MenuRegistry::new();
    for raw in &sources {
        let menu = parse_menu(raw, settings, &mut errors);
        registry.register_menu(Arc::new(menu), &mut errors);
    }

    metrics.record_load(registry.len());
    info!(menus = registry.len(), errors = errors.len(), "menus loaded");
    Ok((registry, errors))
}

/// Prints the collector to the operator log, numbered so individual entries
/// can be referred to.
pub fn log_errors(errors: &ErrorCollector) {
    if errors.is_empty() {
        return;
    }
    warn!(
        count = errors.len(),
        "menu configuration contains errors; affected menus still load best-effort"
    );
    for (index, entry) in errors.iter().enumerate() {
        error!("{}) {entry}", index + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use menucraft_domain::config::{ConfigSection, ConfigValue, RawMenuFile};
    use menucraft_domain::{LoadError, LoadErrorKind, MenuFileName};

    struct StaticRepository {
        sources: Vec<RawMenuFile>,
        file_error: Option<LoadError>,
    }

    #[async_trait]
    impl MenuSourceRepository for StaticRepository {
        async fn load_menu_sources(
            &self,
            errors: &mut ErrorCollector,
        ) -> anyhow::Result<Vec<RawMenuFile>> {
            if let Some(error) = &self.file_error {
                errors.add(error.clone());
            }
            Ok(self.sources.clone())
        }
    }

    struct BrokenStorage;

    #[async_trait]
    impl MenuSourceRepository for BrokenStorage {
        async fn load_menu_sources(
            &self,
            _errors: &mut ErrorCollector,
        ) -> anyhow::Result<Vec<RawMenuFile>> {
            anyhow::bail!("cannot create menu directory")
        }
    }

    fn shop_file(file_name: &str) -> RawMenuFile {
        let mut settings = ConfigSection::new();
        settings.set("name", ConfigValue::String("Shop".to_string()));
        settings.set("rows", ConfigValue::Integer(1));
        let mut root = ConfigSection::new();
        root.set("menu-settings", ConfigValue::Section(settings));
        RawMenuFile {
            file_name: MenuFileName(file_name.to_string()),
            root,
        }
    }

    #[tokio::test]
    async fn parses_and_registers_every_source() {
        let repository = StaticRepository {
            sources: vec![shop_file("a.yml"), shop_file("b.yml")],
            file_error: None,
        };
        let metrics = Metrics::default();

        let (registry, errors) = load_menus(&repository, &ParserSettings::default(), &metrics)
            .await
            .expect("load menus");
        assert_eq!(registry.len(), 2);
        assert!(errors.is_empty());
        assert_eq!(metrics.menus_loaded(), 2);
    }

    #[tokio::test]
    async fn repository_file_errors_join_the_parse_errors() {
        let repository = StaticRepository {
            sources: vec![shop_file("a.yml"), shop_file("A.yml")],
            file_error: Some(LoadError::menu(
                &MenuFileName("broken.yml".to_string()),
                LoadErrorKind::MenuFileSyntax {
                    reason: "bad indentation".to_string(),
                },
            )),
        };

        let (registry, errors) = load_menus(
            &repository,
            &ParserSettings::default(),
            &Metrics::default(),
        )
        .await
        .expect("load menus");
        // The duplicate file name error plus the repository's syntax error.
        assert_eq!(registry.len(), 1);
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn storage_failure_aborts_the_load() {
        let result = load_menus(
            &BrokenStorage,
            &ParserSettings::default(),
            &Metrics::default(),
        )
        .await;
        assert!(result.is_err());
    }
}
