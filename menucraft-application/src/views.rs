// Open menu views
// One MenuView per open window, tracking the viewer, the menu being shown and
// any scheduled refresh/close tasks so they can be cancelled when the window
// goes away.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use menucraft_domain::{MenuDefinition, TaskHandle, ViewerId, WindowId};

#[derive(Debug)]
pub struct MenuView {
    pub window: WindowId,
    pub menu: Arc<MenuDefinition>,
    pub viewer: ViewerId,
    pub opened_at: DateTime<Utc>,
    pub refresh_task: Option<TaskHandle>,
    pub close_task: Option<TaskHandle>,
}

impl MenuView {
    pub fn new(window: WindowId, menu: Arc<MenuDefinition>, viewer: ViewerId) -> Self {
        Self {
            window,
            menu,
            viewer,
            opened_at: Utc::now(),
            refresh_task: None,
            close_task: None,
        }
    }

    pub fn scheduled_tasks(&self) -> impl Iterator<Item = TaskHandle> + '_ {
        self.refresh_task.iter().chain(self.close_task.iter()).copied()
    }
}
