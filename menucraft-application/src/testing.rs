// Shipped test doubles for the host-environment ports
// Deterministic in-memory implementations used by the engine tests and by
// downstream hosts that want to test their menu configuration without a live
// server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use menucraft_domain::{
    ItemSnapshot, ScheduledTask, Scheduler, SoundSpec, TaskHandle, Viewer, ViewerDirectory,
    ViewerId, WindowHost, WindowId,
};
use uuid::Uuid;

pub struct TestViewer {
    id: ViewerId,
    name: String,
    denied_permissions: Mutex<Vec<String>>,
    messages: Mutex<Vec<String>>,
    placeholders: Mutex<HashMap<String, String>>,
}

impl TestViewer {
    pub fn new(name: &str) -> Self {
        Self {
            id: ViewerId(Uuid::new_v4()),
            name: name.to_string(),
            denied_permissions: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            placeholders: Mutex::new(HashMap::new()),
        }
    }

    /// Permissions are granted by default; deny specific nodes to test the
    /// denial path.
    pub fn deny_permission(&self, node: &str) {
        self.denied_permissions
            .lock()
            .expect("lock denied permissions")
            .push(node.to_string());
    }

    pub fn set_placeholder(&self, name: &str, value: &str) {
        self.placeholders
            .lock()
            .expect("lock placeholders")
            .insert(name.to_string(), value.to_string());
    }

    pub fn received_messages(&self) -> Vec<String> {
        self.messages.lock().expect("lock messages").clone()
    }
}

impl Viewer for TestViewer {
    fn id(&self) -> ViewerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, node: &str) -> bool {
        !self
            .denied_permissions
            .lock()
            .expect("lock denied permissions")
            .iter()
            .any(|denied| denied == node)
    }

    fn send_message(&self, message: &str) {
        self.messages
            .lock()
            .expect("lock messages")
            .push(message.to_string());
    }

    fn placeholder(&self, name: &str, _argument: Option<&str>) -> Option<String> {
        if name == "player" {
            return Some(self.name.clone());
        }
        self.placeholders
            .lock()
            .expect("lock placeholders")
            .get(name)
            .cloned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    PlayerCommand(ViewerId, String),
    ConsoleCommand(String),
    Broadcast(String),
    Sound(ViewerId, String),
    GiveItem(ViewerId, String, u8),
    GiveMoney(ViewerId, f64),
    ConnectServer(ViewerId, String),
}

#[derive(Default)]
pub struct RecordingServer {
    events: Mutex<Vec<ServerEvent>>,
}

impl RecordingServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ServerEvent> {
        self.events.lock().expect("lock events").clone()
    }

    fn record(&self, event: ServerEvent) {
        self.events.lock().expect("lock events").push(event);
    }
}

impl menucraft_domain::GameServer for RecordingServer {
    fn dispatch_player_command(&self, viewer: ViewerId, command: &str) {
        self.record(ServerEvent::PlayerCommand(viewer, command.to_string()));
    }

    fn dispatch_console_command(&self, command: &str) {
        self.record(ServerEvent::ConsoleCommand(command.to_string()));
    }

    fn broadcast(&self, message: &str) {
        self.record(ServerEvent::Broadcast(message.to_string()));
    }

    fn play_sound(&self, viewer: ViewerId, sound: &SoundSpec) {
        self.record(ServerEvent::Sound(viewer, sound.name.clone()));
    }

    fn give_item(&self, viewer: ViewerId, item: &ItemSnapshot) {
        self.record(ServerEvent::GiveItem(
            viewer,
            item.material.as_str().to_string(),
            item.amount,
        ));
    }

    fn give_money(&self, viewer: ViewerId, amount: f64) {
        self.record(ServerEvent::GiveMoney(viewer, amount));
    }

    fn connect_server(&self, viewer: ViewerId, server: &str) {
        self.record(ServerEvent::ConnectServer(viewer, server.to_string()));
    }
}

#[derive(Debug, Clone)]
pub struct OpenWindow {
    pub viewer: ViewerId,
    pub title: String,
    pub rows: u8,
    pub items: Vec<Option<ItemSnapshot>>,
}

#[derive(Default)]
pub struct TestWindowHost {
    next_id: AtomicU64,
    windows: Mutex<HashMap<WindowId, OpenWindow>>,
    close_requests: Mutex<Vec<WindowId>>,
}

impl TestWindowHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(&self, window: WindowId) -> Option<OpenWindow> {
        self.windows.lock().expect("lock windows").get(&window).cloned()
    }

    pub fn open_count(&self) -> usize {
        self.windows.lock().expect("lock windows").len()
    }

    /// Windows the engine asked to close. The test driver forwards each to
    /// the engine's close handler, playing the host's part of the contract.
    pub fn take_close_requests(&self) -> Vec<WindowId> {
        let mut requests = self.close_requests.lock().expect("lock close requests");
        let drained = requests.clone();
        requests.clear();
        for window in &drained {
            self.windows.lock().expect("lock windows").remove(window);
        }
        drained
    }

    /// Simulates a viewer closing the window themselves.
    pub fn viewer_closed(&self, window: WindowId) {
        self.windows.lock().expect("lock windows").remove(&window);
    }
}

impl WindowHost for TestWindowHost {
    fn open_window(
        &self,
        viewer: ViewerId,
        title: &str,
        rows: u8,
        items: &[Option<ItemSnapshot>],
    ) -> anyhow::Result<WindowId> {
        let window = WindowId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.windows.lock().expect("lock windows").insert(
            window,
            OpenWindow {
                viewer,
                title: title.to_string(),
                rows,
                items: items.to_vec(),
            },
        );
        Ok(window)
    }

    fn update_window(&self, window: WindowId, items: &[Option<ItemSnapshot>]) -> anyhow::Result<()> {
        let mut windows = self.windows.lock().expect("lock windows");
        match windows.get_mut(&window) {
            Some(open) => {
                open.items = items.to_vec();
                Ok(())
            }
            None => anyhow::bail!("window {window:?} is not open"),
        }
    }

    fn close_window(&self, window: WindowId) {
        self.close_requests
            .lock()
            .expect("lock close requests")
            .push(window);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    Next,
    After(u32),
    Repeating(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEntry {
    pub handle: TaskHandle,
    pub kind: ScheduleKind,
    pub task: ScheduledTask,
}

/// A scheduler that runs nothing by itself: tests drain and execute tasks
/// explicitly, making every deferred step visible.
#[derive(Default)]
pub struct ManualScheduler {
    next_handle: AtomicU64,
    entries: Mutex<Vec<ScheduledEntry>>,
    cancelled: Mutex<Vec<TaskHandle>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, kind: ScheduleKind, task: ScheduledTask) -> TaskHandle {
        let handle = TaskHandle(self.next_handle.fetch_add(1, Ordering::Relaxed) + 1);
        self.entries.lock().expect("lock entries").push(ScheduledEntry {
            handle,
            kind,
            task,
        });
        handle
    }

    /// Removes and returns the tasks scheduled for the next tick, in order.
    pub fn drain_next(&self) -> Vec<ScheduledTask> {
        let mut entries = self.entries.lock().expect("lock entries");
        let cancelled = self.cancelled.lock().expect("lock cancelled").clone();
        let mut due = Vec::new();
        entries.retain(|entry| {
            if entry.kind == ScheduleKind::Next && !cancelled.contains(&entry.handle) {
                due.push(entry.task.clone());
                false
            } else {
                true
            }
        });
        due
    }

    pub fn entries(&self) -> Vec<ScheduledEntry> {
        let cancelled = self.cancelled.lock().expect("lock cancelled").clone();
        self.entries
            .lock()
            .expect("lock entries")
            .iter()
            .filter(|entry| !cancelled.contains(&entry.handle))
            .cloned()
            .collect()
    }

    pub fn cancelled(&self) -> Vec<TaskHandle> {
        self.cancelled.lock().expect("lock cancelled").clone()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_next(&self, task: ScheduledTask) -> TaskHandle {
        self.push(ScheduleKind::Next, task)
    }

    fn schedule_after(&self, delay: menucraft_domain::Ticks, task: ScheduledTask) -> TaskHandle {
        self.push(ScheduleKind::After(delay.0), task)
    }

    fn schedule_repeating(
        &self,
        interval: menucraft_domain::Ticks,
        task: ScheduledTask,
    ) -> TaskHandle {
        self.push(ScheduleKind::Repeating(interval.0), task)
    }

    fn cancel(&self, handle: TaskHandle) {
        self.cancelled.lock().expect("lock cancelled").push(handle);
    }
}

#[derive(Default)]
pub struct TestViewerDirectory {
    viewers: Mutex<HashMap<ViewerId, Arc<dyn Viewer>>>,
}

impl TestViewerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self, viewer: Arc<dyn Viewer>) {
        self.viewers
            .lock()
            .expect("lock viewers")
            .insert(viewer.id(), viewer);
    }

    pub fn disconnect(&self, id: ViewerId) {
        self.viewers.lock().expect("lock viewers").remove(&id);
    }
}

impl ViewerDirectory for TestViewerDirectory {
    fn viewer(&self, id: ViewerId) -> Option<Arc<dyn Viewer>> {
        self.viewers.lock().expect("lock viewers").get(&id).cloned()
    }
}
