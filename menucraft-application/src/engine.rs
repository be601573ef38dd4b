// Menu interaction engine
// Owns the open views and drives every menu lifecycle transition: open,
// click, refresh, auto-close, auto-reopen, disconnect. All mutation happens
// on the host's single logical tick stream; deferred work goes through the
// scheduler port and comes back in via `execute_task`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use menucraft_domain::utils::{colorize, current_millis};
use menucraft_domain::{
    ActionContext, ClickResult, GameServer, Material, MenuDefinition, MouseClick,
    PlaceholderRegistry, ScheduledTask, Scheduler, SlotPosition, Viewer, ViewerDirectory,
    ViewerId, WindowHost, WindowId,
};
use tracing::{debug, warn};

use crate::click_guard::ClickGuard;
use crate::error::AppError;
use crate::metrics::Metrics;
use crate::registry::MenuRegistry;
use crate::views::MenuView;

pub struct MenuEngine {
    registry: Arc<MenuRegistry>,
    placeholders: PlaceholderRegistry,
    viewers: Arc<dyn ViewerDirectory>,
    server: Arc<dyn GameServer>,
    host: Arc<dyn WindowHost>,
    scheduler: Arc<dyn Scheduler>,
    metrics: Arc<Metrics>,
    click_guard: ClickGuard,
    views: HashMap<WindowId, MenuView>,
    // Set just before an action-triggered close, consumed on the next close
    // event for that viewer. Distinguishes intentional closes from ones that
    // should trigger auto-reopen.
    suppress_reopen: HashSet<ViewerId>,
}

impl MenuEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: Arc<MenuRegistry>,
        placeholders: PlaceholderRegistry,
        viewers: Arc<dyn ViewerDirectory>,
        server: Arc<dyn GameServer>,
        host: Arc<dyn WindowHost>,
        scheduler: Arc<dyn Scheduler>,
        metrics: Arc<Metrics>,
        anti_click_spam_delay_ms: i64,
    ) -> Self {
        Self {
            registry,
            placeholders,
            viewers,
            server,
            host,
            scheduler,
            metrics,
            click_guard: ClickGuard::new(anti_click_spam_delay_ms),
            views: HashMap::new(),
            suppress_reopen: HashSet::new(),
        }
    }

    pub fn registry(&self) -> &Arc<MenuRegistry> {
        &self.registry
    }

    pub fn placeholders_mut(&mut self) -> &mut PlaceholderRegistry {
        &mut self.placeholders
    }

    pub fn open_view_count(&self) -> usize {
        self.views.len()
    }

    /// Opens a menu for a viewer. Returns Ok(None) when the open was refused
    /// without being an error: permission denied, or an open action closed or
    /// navigated away before the window appeared.
    pub fn open_menu(
        &mut self,
        viewer: &Arc<dyn Viewer>,
        menu: Arc<MenuDefinition>,
    ) -> Result<Option<WindowId>, AppError> {
        if !viewer.has_permission(&menu.open_permission()) {
            viewer.send_message(&colorize(
                "&cYou don't have permission to open this menu.",
            ));
            return Ok(None);
        }

        // A viewer holds at most one open view; an explicit open replaces it.
        self.close_views_of(viewer.id());

        let mut ctx = ActionContext::new(viewer.as_ref(), self.server.as_ref(), &self.placeholders);
        for action in menu.open_actions() {
            if action.execute(&mut ctx) == ClickResult::Close {
                return Ok(None);
            }
        }
        if let Some(target) = ctx.navigation {
            self.scheduler.schedule_next(ScheduledTask::OpenMenu {
                viewer: viewer.id(),
                menu: target,
            });
            return Ok(None);
        }

        let items = menu.render_for(&self.placeholders, viewer.as_ref());
        let title = menu.title().resolve(&self.placeholders, viewer.as_ref());
        let window = self
            .host
            .open_window(viewer.id(), &title, menu.row_count(), &items)?;

        let mut view = MenuView::new(window, Arc::clone(&menu), viewer.id());
        if let Some(interval) = menu.refresh_ticks() {
            view.refresh_task = Some(
                self.scheduler
                    .schedule_repeating(interval, ScheduledTask::RefreshView(window)),
            );
        }
        if let Some(delay) = menu.auto_close_ticks() {
            view.close_task = Some(
                self.scheduler
                    .schedule_after(delay, ScheduledTask::CloseView(window)),
            );
        }
        self.views.insert(window, view);
        self.metrics.record_open();
        debug!(menu = %menu.file_name(), viewer = %viewer.name(), "opened menu");
        Ok(Some(window))
    }

    pub fn open_menu_by_name(
        &mut self,
        viewer: ViewerId,
        file_name: &str,
    ) -> Result<Option<WindowId>, AppError> {
        let viewer = self
            .viewers
            .viewer(viewer)
            .ok_or_else(|| AppError::ViewerOffline(viewer.to_string()))?;
        let menu = self
            .registry
            .lookup_by_file_name(file_name)
            .ok_or_else(|| AppError::MenuNotFound(file_name.to_string()))?;
        self.open_menu(&viewer, menu)
    }

    /// Matches a typed command against registered open commands. Returns
    /// false when no menu is bound, so the host can fall through to its own
    /// command handling.
    pub fn handle_command(&mut self, viewer: ViewerId, command: &str) -> Result<bool, AppError> {
        let Some(menu) = self
            .registry
            .lookup_by_command(command.trim().trim_start_matches('/'))
        else {
            return Ok(false);
        };
        let Some(viewer) = self.viewers.viewer(viewer) else {
            return Ok(false);
        };
        self.open_menu(&viewer, menu)?;
        Ok(true)
    }

    /// Matches an item interaction against open-with-item triggers.
    pub fn handle_item_use(
        &mut self,
        viewer: ViewerId,
        material: &Material,
        durability: Option<u16>,
        click: MouseClick,
    ) -> Result<bool, AppError> {
        let Some(menu) = self.registry.lookup_by_item(material, durability, click) else {
            return Ok(false);
        };
        let Some(viewer) = self.viewers.viewer(viewer) else {
            return Ok(false);
        };
        self.open_menu(&viewer, menu)?;
        Ok(true)
    }

    /// Click intake. Never handles the click inline: accepted clicks are
    /// dispatched on the next tick, after the triggering interaction has
    /// fully resolved.
    pub fn handle_click(&mut self, window: WindowId, slot: SlotPosition, viewer: ViewerId) {
        let Some(view) = self.views.get(&window) else {
            return;
        };
        if view.viewer != viewer {
            return;
        }
        // Empty cells are a silent no-op and do not consume the cooldown.
        if view.menu.icon_at(slot).is_none() {
            return;
        }
        if !self.click_guard.try_acquire(viewer, current_millis()) {
            self.metrics.record_dropped_click();
            return;
        }
        self.metrics.record_click();
        self.scheduler.schedule_next(ScheduledTask::DispatchClick {
            window,
            slot,
            viewer,
        });
    }

    /// Runs one deferred task. Tasks referring to windows or viewers that
    /// disappeared in the meantime are dropped without error.
    pub fn execute_task(&mut self, task: ScheduledTask) -> Result<(), AppError> {
        match task {
            ScheduledTask::DispatchClick {
                window,
                slot,
                viewer,
            } => self.dispatch_click(window, slot, viewer),
            ScheduledTask::RefreshView(window) => self.refresh_view(window),
            ScheduledTask::CloseView(window) => {
                if self.views.contains_key(&window) {
                    self.host.close_window(window);
                }
                Ok(())
            }
            ScheduledTask::OpenMenu { viewer, menu } => {
                let Some(viewer) = self.viewers.viewer(viewer) else {
                    return Ok(());
                };
                // The menu may have been removed by a reload since this task
                // was scheduled.
                let Some(menu) = self.registry.lookup_by_file_name(menu.as_str()) else {
                    return Ok(());
                };
                self.open_menu(&viewer, menu)?;
                Ok(())
            }
        }
    }

    fn dispatch_click(
        &mut self,
        window: WindowId,
        slot: SlotPosition,
        viewer_id: ViewerId,
    ) -> Result<(), AppError> {
        let menu = match self.views.get(&window) {
            Some(view) if view.viewer == viewer_id => Arc::clone(&view.menu),
            _ => return Ok(()),
        };
        let Some(viewer) = self.viewers.viewer(viewer_id) else {
            return Ok(());
        };
        let Some(icon) = menu.icon_at(slot) else {
            return Ok(());
        };

        let mut ctx = ActionContext::new(viewer.as_ref(), self.server.as_ref(), &self.placeholders);
        let result = icon.on_click(&mut ctx);
        let navigation = ctx.navigation;

        if result == ClickResult::Close || navigation.is_some() {
            self.suppress_reopen.insert(viewer_id);
            self.host.close_window(window);
        }
        if let Some(target) = navigation {
            self.scheduler.schedule_next(ScheduledTask::OpenMenu {
                viewer: viewer_id,
                menu: target,
            });
        }
        Ok(())
    }

    fn refresh_view(&mut self, window: WindowId) -> Result<(), AppError> {
        let Some(view) = self.views.get(&window) else {
            return Ok(());
        };
        let Some(viewer) = self.viewers.viewer(view.viewer) else {
            return Ok(());
        };
        let items = view.menu.render_for(&self.placeholders, viewer.as_ref());
        self.host.update_window(window, &items)?;
        Ok(())
    }

    /// The host reports every window closure here, whether viewer-initiated
    /// or requested through `close_window`.
    pub fn handle_window_closed(&mut self, window: WindowId) {
        let Some(view) = self.views.remove(&window) else {
            return;
        };
        for handle in view.scheduled_tasks() {
            self.scheduler.cancel(handle);
        }
        // Consumed on every close so the flag never leaks into a later,
        // unrelated open.
        let suppressed = self.suppress_reopen.remove(&view.viewer);
        if view.menu.auto_reopen() && !suppressed {
            self.scheduler.schedule_next(ScheduledTask::OpenMenu {
                viewer: view.viewer,
                menu: view.menu.file_name().clone(),
            });
        }
    }

    pub fn handle_viewer_disconnect(&mut self, viewer: ViewerId) {
        let windows: Vec<WindowId> = self
            .views
            .iter()
            .filter(|(_, view)| view.viewer == viewer)
            .map(|(window, _)| *window)
            .collect();
        for window in windows {
            if let Some(view) = self.views.remove(&window) {
                for handle in view.scheduled_tasks() {
                    self.scheduler.cancel(handle);
                }
            }
        }
        self.click_guard.evict(viewer);
        self.suppress_reopen.remove(&viewer);
    }

    fn close_views_of(&mut self, viewer: ViewerId) {
        let windows: Vec<WindowId> = self
            .views
            .iter()
            .filter(|(_, view)| view.viewer == viewer)
            .map(|(window, _)| *window)
            .collect();
        for window in windows {
            self.suppress_reopen.insert(viewer);
            self.host.close_window(window);
        }
    }

    /// Force-closes every open view without triggering auto-reopen. Used
    /// before a registry swap so no view outlives its definition.
    pub fn close_all_views(&mut self) {
        let open: Vec<(WindowId, ViewerId)> = self
            .views
            .iter()
            .map(|(window, view)| (*window, view.viewer))
            .collect();
        for (window, viewer) in open {
            self.suppress_reopen.insert(viewer);
            self.host.close_window(window);
        }
    }

    /// Swaps in a freshly built registry. Open views are closed first; their
    /// definitions belong to the outgoing registry.
    pub fn replace_registry(&mut self, registry: Arc<MenuRegistry>) {
        if !self.views.is_empty() {
            warn!(open_views = self.views.len(), "closing open menus for reload");
            self.close_all_views();
        }
        self.registry = registry;
    }
}
