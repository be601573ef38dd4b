// Scheduler port
// All deferred work runs back on the single logical tick stream; the host's
// scheduler implementation guarantees that. Tasks are plain data so they can
// be queued, inspected and cancelled.

use serde::{Deserialize, Serialize};

use crate::value_objects::{MenuFileName, SlotPosition, Ticks, ViewerId, WindowId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledTask {
    /// Click handling deferred to the step after the triggering event.
    DispatchClick {
        window: WindowId,
        slot: SlotPosition,
        viewer: ViewerId,
    },
    /// Periodic re-render of an open view.
    RefreshView(WindowId),
    /// Auto-close timer expiry.
    CloseView(WindowId),
    /// Open (or reopen) a menu for a viewer.
    OpenMenu {
        viewer: ViewerId,
        menu: MenuFileName,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(pub u64);

pub trait Scheduler: Send + Sync {
    /// Runs the task on the next tick, after the current step has fully
    /// resolved.
    fn schedule_next(&self, task: ScheduledTask) -> TaskHandle;

    fn schedule_after(&self, delay: Ticks, task: ScheduledTask) -> TaskHandle;

    fn schedule_repeating(&self, interval: Ticks, task: ScheduledTask) -> TaskHandle;

    /// Cancelling an already-fired or unknown handle is a no-op.
    fn cancel(&self, handle: TaskHandle);
}
