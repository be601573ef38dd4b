// Host environment ports: viewers, server effects, inventory windows

use std::sync::Arc;

use crate::entities::ItemSnapshot;
use crate::value_objects::{SoundSpec, ViewerId, WindowId};

/// One connected viewer. Implemented by the host; the engine never creates
/// viewers itself.
pub trait Viewer: Send + Sync {
    fn id(&self) -> ViewerId;

    fn name(&self) -> &str;

    fn has_permission(&self, node: &str) -> bool;

    fn send_message(&self, message: &str);

    /// Resolves a dynamic placeholder for this viewer. Returning None means
    /// the host does not know the placeholder.
    fn placeholder(&self, name: &str, argument: Option<&str>) -> Option<String>;
}

/// Resolves viewer identities back to live viewers. Deferred tasks carry only
/// a ViewerId; a viewer who disconnected in the meantime resolves to None and
/// the task is dropped.
pub trait ViewerDirectory: Send + Sync {
    fn viewer(&self, id: ViewerId) -> Option<Arc<dyn Viewer>>;
}

/// Server-side effects triggered by actions. Failures are the host's concern;
/// the engine treats these as fire-and-forget.
pub trait GameServer: Send + Sync {
    fn dispatch_player_command(&self, viewer: ViewerId, command: &str);

    fn dispatch_console_command(&self, command: &str);

    fn broadcast(&self, message: &str);

    fn play_sound(&self, viewer: ViewerId, sound: &SoundSpec);

    fn give_item(&self, viewer: ViewerId, item: &ItemSnapshot);

    fn give_money(&self, viewer: ViewerId, amount: f64);

    fn connect_server(&self, viewer: ViewerId, server: &str);
}

/// Inventory window primitives. The host owns the windows; the engine only
/// refers to them through the returned handles.
///
/// Contract: `close_window` must cause the host to report the closure back
/// through the engine's close handler, exactly as a viewer-initiated close
/// would. The callback may be synchronous.
pub trait WindowHost: Send + Sync {
    fn open_window(
        &self,
        viewer: ViewerId,
        title: &str,
        rows: u8,
        items: &[Option<ItemSnapshot>],
    ) -> anyhow::Result<WindowId>;

    fn update_window(&self, window: WindowId, items: &[Option<ItemSnapshot>]) -> anyhow::Result<()>;

    fn close_window(&self, window: WindowId);
}
