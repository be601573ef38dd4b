// Deterministic tick scheduler
// A due-tick priority queue drained by the host's tick loop. Everything the
// engine defers comes back out of `advance`, on the same logical stream that
// put it in.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::sync::Mutex;

use menucraft_domain::{ScheduledTask, Scheduler, TaskHandle, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueuedTask {
    due_tick: u64,
    // Tie-breaker: tasks scheduled for the same tick run in scheduling order.
    sequence: u64,
    handle: TaskHandle,
    repeat_interval: Option<u32>,
    task: ScheduledTask,
}

impl Ord for QueuedTask {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due_tick, self.sequence).cmp(&(other.due_tick, other.sequence))
    }
}

impl PartialOrd for QueuedTask {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
struct SchedulerState {
    current_tick: u64,
    next_sequence: u64,
    next_handle: u64,
    queue: BinaryHeap<Reverse<QueuedTask>>,
    cancelled: HashSet<TaskHandle>,
}

#[derive(Debug, Default)]
pub struct TickScheduler {
    state: Mutex<SchedulerState>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tick(&self) -> u64 {
        self.lock_state().current_tick
    }

    pub fn pending_tasks(&self) -> usize {
        let state = self.lock_state();
        state
            .queue
            .iter()
            .filter(|Reverse(queued)| !state.cancelled.contains(&queued.handle))
            .count()
    }

    /// Moves the clock one tick forward and returns the tasks that came due,
    /// in scheduling order. Repeating tasks are requeued under the same
    /// handle so a later cancel still reaches them.
    pub fn advance(&self) -> Vec<ScheduledTask> {
        let mut state = self.lock_state();
        state.current_tick += 1;

        let mut due = Vec::new();
        while let Some(Reverse(queued)) = state.queue.peek() {
            if queued.due_tick > state.current_tick {
                break;
            }
            let Some(Reverse(queued)) = state.queue.pop() else {
                break;
            };
            if state.cancelled.remove(&queued.handle) {
                continue;
            }
            due.push(queued.task.clone());
            if let Some(interval) = queued.repeat_interval {
                let due_tick = state.current_tick + u64::from(interval.max(1));
                let sequence = state.next_sequence;
                state.next_sequence += 1;
                state.queue.push(Reverse(QueuedTask {
                    due_tick,
                    sequence,
                    ..queued
                }));
            }
        }
        due
    }

    fn enqueue(
        &self,
        delay_ticks: u64,
        repeat_interval: Option<u32>,
        task: ScheduledTask,
    ) -> TaskHandle {
        let mut state = self.lock_state();
        state.next_handle += 1;
        let handle = TaskHandle(state.next_handle);
        let due_tick = state.current_tick + delay_ticks.max(1);
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.queue.push(Reverse(QueuedTask {
            due_tick,
            sequence,
            handle,
            repeat_interval,
            task,
        }));
        handle
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SchedulerState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Scheduler for TickScheduler {
    fn schedule_next(&self, task: ScheduledTask) -> TaskHandle {
        self.enqueue(1, None, task)
    }

    fn schedule_after(&self, delay: Ticks, task: ScheduledTask) -> TaskHandle {
        self.enqueue(u64::from(delay.0), None, task)
    }

    fn schedule_repeating(&self, interval: Ticks, task: ScheduledTask) -> TaskHandle {
        self.enqueue(u64::from(interval.0), Some(interval.0), task)
    }

    fn cancel(&self, handle: TaskHandle) {
        let mut state = self.lock_state();
        let queued = state
            .queue
            .iter()
            .any(|Reverse(queued)| queued.handle == handle);
        if queued {
            state.cancelled.insert(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menucraft_domain::WindowId;

    fn close(window: u64) -> ScheduledTask {
        ScheduledTask::CloseView(WindowId(window))
    }

    #[test]
    fn next_tick_tasks_run_on_the_following_advance() {
        let scheduler = TickScheduler::new();
        scheduler.schedule_next(close(1));
        scheduler.schedule_next(close(2));

        assert_eq!(scheduler.advance(), vec![close(1), close(2)]);
        assert!(scheduler.advance().is_empty());
    }

    #[test]
    fn delayed_tasks_wait_their_full_delay() {
        let scheduler = TickScheduler::new();
        scheduler.schedule_after(Ticks(3), close(1));

        assert!(scheduler.advance().is_empty());
        assert!(scheduler.advance().is_empty());
        assert_eq!(scheduler.advance(), vec![close(1)]);
    }

    #[test]
    fn repeating_tasks_fire_every_interval() {
        let scheduler = TickScheduler::new();
        scheduler.schedule_repeating(Ticks(2), close(1));

        assert!(scheduler.advance().is_empty());
        assert_eq!(scheduler.advance(), vec![close(1)]);
        assert!(scheduler.advance().is_empty());
        assert_eq!(scheduler.advance(), vec![close(1)]);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let scheduler = TickScheduler::new();
        let handle = scheduler.schedule_repeating(Ticks(1), close(1));
        assert_eq!(scheduler.advance(), vec![close(1)]);

        scheduler.cancel(handle);
        assert!(scheduler.advance().is_empty());
        assert_eq!(scheduler.pending_tasks(), 0);
    }

    #[test]
    fn cancelling_an_unknown_handle_is_a_no_op() {
        let scheduler = TickScheduler::new();
        scheduler.cancel(TaskHandle(99));
        scheduler.schedule_next(close(1));
        assert_eq!(scheduler.advance(), vec![close(1)]);
    }
}
