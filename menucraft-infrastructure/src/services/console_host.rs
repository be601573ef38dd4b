// Console host
// Stand-in implementations of the host-environment ports, enough to open and
// inspect menus from the command line without a live game server. Server
// effects are logged instead of executed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;
use uuid::Uuid;

use menucraft_domain::utils::COLOR_CHAR;
use menucraft_domain::{
    GameServer, ItemSnapshot, SoundSpec, Viewer, ViewerDirectory, ViewerId, WindowHost, WindowId,
};

/// Strips section-sign color codes for plain-terminal output.
pub fn strip_colors(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == COLOR_CHAR {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

pub struct ConsoleViewer {
    id: ViewerId,
    name: String,
    placeholders: HashMap<String, String>,
}

impl ConsoleViewer {
    pub fn new(name: &str) -> Self {
        Self {
            id: ViewerId(Uuid::new_v4()),
            name: name.to_string(),
            placeholders: HashMap::new(),
        }
    }

    pub fn with_placeholder(mut self, name: &str, value: &str) -> Self {
        self.placeholders.insert(name.to_string(), value.to_string());
        self
    }
}

impl Viewer for ConsoleViewer {
    fn id(&self) -> ViewerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, _node: &str) -> bool {
        true
    }

    fn send_message(&self, message: &str) {
        println!("[{}] {}", self.name, strip_colors(message));
    }

    fn placeholder(&self, name: &str, _argument: Option<&str>) -> Option<String> {
        if name == "player" {
            return Some(self.name.clone());
        }
        self.placeholders.get(name).cloned()
    }
}

#[derive(Default)]
pub struct ConsoleViewerDirectory {
    viewers: Mutex<HashMap<ViewerId, Arc<dyn Viewer>>>,
}

impl ConsoleViewerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, viewer: Arc<dyn Viewer>) {
        self.lock_viewers().insert(viewer.id(), viewer);
    }

    fn lock_viewers(&self) -> MutexGuard<'_, HashMap<ViewerId, Arc<dyn Viewer>>> {
        match self.viewers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ViewerDirectory for ConsoleViewerDirectory {
    fn viewer(&self, id: ViewerId) -> Option<Arc<dyn Viewer>> {
        self.lock_viewers().get(&id).cloned()
    }
}

/// Logs every effect instead of performing it.
#[derive(Debug, Default)]
pub struct ConsoleServer;

impl ConsoleServer {
    pub fn new() -> Self {
        Self
    }
}

impl GameServer for ConsoleServer {
    fn dispatch_player_command(&self, viewer: ViewerId, command: &str) {
        info!(%viewer, command, "player command");
    }

    fn dispatch_console_command(&self, command: &str) {
        info!(command, "console command");
    }

    fn broadcast(&self, message: &str) {
        info!(message = %strip_colors(message), "broadcast");
    }

    fn play_sound(&self, viewer: ViewerId, sound: &SoundSpec) {
        info!(%viewer, sound = %sound.name, "sound");
    }

    fn give_item(&self, viewer: ViewerId, item: &ItemSnapshot) {
        info!(%viewer, material = %item.material, amount = item.amount, "give item");
    }

    fn give_money(&self, viewer: ViewerId, amount: f64) {
        info!(%viewer, amount, "give money");
    }

    fn connect_server(&self, viewer: ViewerId, server: &str) {
        info!(%viewer, server, "connect to server");
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleWindow {
    pub viewer: ViewerId,
    pub title: String,
    pub rows: u8,
    pub items: Vec<Option<ItemSnapshot>>,
}

/// Keeps opened windows in memory so the command line can print them.
#[derive(Default)]
pub struct ConsoleWindowHost {
    next_id: AtomicU64,
    windows: Mutex<HashMap<WindowId, ConsoleWindow>>,
    closed: Mutex<Vec<WindowId>>,
}

impl ConsoleWindowHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(&self, window: WindowId) -> Option<ConsoleWindow> {
        self.lock_windows().get(&window).cloned()
    }

    /// Close requests the engine has issued and not yet been told about.
    /// The caller reports each back through the engine's close handler.
    pub fn take_close_requests(&self) -> Vec<WindowId> {
        let mut closed = match self.closed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let drained = closed.clone();
        closed.clear();
        let mut windows = self.lock_windows();
        for window in &drained {
            windows.remove(window);
        }
        drained
    }

    fn lock_windows(&self) -> MutexGuard<'_, HashMap<WindowId, ConsoleWindow>> {
        match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl WindowHost for ConsoleWindowHost {
    fn open_window(
        &self,
        viewer: ViewerId,
        title: &str,
        rows: u8,
        items: &[Option<ItemSnapshot>],
    ) -> anyhow::Result<WindowId> {
        let window = WindowId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.lock_windows().insert(
            window,
            ConsoleWindow {
                viewer,
                title: title.to_string(),
                rows,
                items: items.to_vec(),
            },
        );
        Ok(window)
    }

    fn update_window(&self, window: WindowId, items: &[Option<ItemSnapshot>]) -> anyhow::Result<()> {
        let mut windows = self.lock_windows();
        match windows.get_mut(&window) {
            Some(open) => {
                open.items = items.to_vec();
                Ok(())
            }
            None => anyhow::bail!("window {window:?} is not open"),
        }
    }

    fn close_window(&self, window: WindowId) {
        match self.closed.lock() {
            Ok(mut guard) => guard.push(window),
            Err(poisoned) => poisoned.into_inner().push(window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_colors_removes_section_codes() {
        assert_eq!(strip_colors("\u{00A7}aShop \u{00A7}lDeals"), "Shop Deals");
        assert_eq!(strip_colors("plain"), "plain");
    }

    #[test]
    fn console_viewer_resolves_its_own_name() {
        let viewer = ConsoleViewer::new("Console").with_placeholder("points", "3");
        assert_eq!(viewer.placeholder("player", None), Some("Console".to_string()));
        assert_eq!(viewer.placeholder("points", None), Some("3".to_string()));
        assert_eq!(viewer.placeholder("missing", None), None);
    }

    #[test]
    fn window_host_tracks_open_and_close() {
        let host = ConsoleWindowHost::new();
        let window = host
            .open_window(ViewerId(Uuid::nil()), "Shop", 1, &[None])
            .expect("open window");
        assert!(host.window(window).is_some());

        host.close_window(window);
        assert_eq!(host.take_close_requests(), vec![window]);
        assert!(host.window(window).is_none());
    }
}
