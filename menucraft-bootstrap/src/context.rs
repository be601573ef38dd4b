use std::sync::Arc;

use anyhow::Result;

use menucraft_application::loading::{load_menus, log_errors};
use menucraft_application::{MenuRegistry, Metrics};
use menucraft_domain::ErrorCollector;
use menucraft_infrastructure::{AppConfig, MenuFileRepository};

/// Everything constructed at startup, passed down explicitly instead of
/// living in ambient statics.
pub struct AppContext {
    pub config: AppConfig,
    pub repository: Arc<MenuFileRepository>,
    pub registry: Arc<MenuRegistry>,
    /// The last load's collected errors, kept for on-demand inspection.
    pub last_errors: ErrorCollector,
    pub metrics: Arc<Metrics>,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let repository = Arc::new(MenuFileRepository::new(config.menus_dir.clone()));
        let metrics = Arc::new(Metrics::default());

        let (registry, errors) =
            load_menus(repository.as_ref(), &config.parser_settings(), &metrics).await?;
        log_errors(&errors);

        Ok(Self {
            config,
            repository,
            registry: Arc::new(registry),
            last_errors: errors,
            metrics,
        })
    }

    /// Rebuilds the registry wholesale from the menu files. Long-running
    /// hosts call this, then hand the new registry to the engine via
    /// `replace_registry`.
    pub async fn reload(&mut self) -> Result<()> {
        let (registry, errors) = load_menus(
            self.repository.as_ref(),
            &self.config.parser_settings(),
            &self.metrics,
        )
        .await?;
        log_errors(&errors);
        self.registry = Arc::new(registry);
        self.last_errors = errors;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::fs;

    #[tokio::test]
    async fn reload_picks_up_newly_added_menu_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("config.toml"), "menus_dir = \"menus\"\n")
            .await
            .expect("write config");
        std::env::set_var("MENUCRAFT_CONFIG", dir.path().join("config.toml"));

        let mut context = AppContext::new().await.expect("build context");
        // Fresh install writes the example menu
        assert_eq!(context.registry.len(), 1);

        fs::write(
            dir.path().join("menus").join("shop.yml"),
            "menu-settings:\n  name: Shop\n  rows: 1\n",
        )
        .await
        .expect("write menu");

        context.reload().await.expect("reload");
        assert_eq!(context.registry.len(), 2);
        assert!(context.registry.lookup_by_file_name("shop.yml").is_some());
        assert!(context.last_errors.is_empty());
    }
}
