// Repository ports

use async_trait::async_trait;

use crate::config::RawMenuFile;
use crate::errors::ErrorCollector;

/// Provides the raw menu configuration trees. File I/O and the YAML layer
/// live behind this port.
///
/// Per-file problems (unreadable file, syntax error) are collected and the
/// file skipped; only failures that invalidate the whole load, such as not
/// being able to create the menu storage location, surface as an Err.
#[async_trait]
pub trait MenuSourceRepository: Send + Sync {
    async fn load_menu_sources(
        &self,
        errors: &mut ErrorCollector,
    ) -> anyhow::Result<Vec<RawMenuFile>>;
}
