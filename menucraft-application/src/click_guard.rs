// Anti-click-spam guard
// A per-viewer cooldown window: clicks arriving before the cooldown expires
// are silently dropped while the menu stays open. Entries are evicted
// explicitly on disconnect, plus an opportunistic sweep of expired entries
// when the map grows, so the guard never retains viewers who left.

use std::collections::HashMap;

use menucraft_domain::ViewerId;

const SWEEP_THRESHOLD: usize = 256;

#[derive(Debug)]
pub struct ClickGuard {
    min_delay_ms: i64,
    cooldown_until: HashMap<ViewerId, i64>,
}

impl ClickGuard {
    pub fn new(min_delay_ms: i64) -> Self {
        Self {
            min_delay_ms,
            cooldown_until: HashMap::new(),
        }
    }

    /// Returns true when the click may be handled, and starts the next
    /// cooldown window. A non-positive delay disables the guard.
    pub fn try_acquire(&mut self, viewer: ViewerId, now_ms: i64) -> bool {
        if self.min_delay_ms <= 0 {
            return true;
        }
        if let Some(&until) = self.cooldown_until.get(&viewer) {
            if until > now_ms {
                return false;
            }
        }
        if self.cooldown_until.len() >= SWEEP_THRESHOLD {
            self.sweep(now_ms);
        }
        self.cooldown_until.insert(viewer, now_ms + self.min_delay_ms);
        true
    }

    pub fn evict(&mut self, viewer: ViewerId) {
        self.cooldown_until.remove(&viewer);
    }

    fn sweep(&mut self, now_ms: i64) {
        self.cooldown_until.retain(|_, until| *until > now_ms);
    }

    #[cfg(test)]
    fn tracked_viewers(&self) -> usize {
        self.cooldown_until.len()
    }
}
