use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    menus_loaded: AtomicU64,
    menus_opened: AtomicU64,
    clicks_handled: AtomicU64,
    clicks_dropped: AtomicU64,
}

impl Metrics {
    pub fn record_load(&self, menu_count: usize) {
        self.menus_loaded.store(menu_count as u64, Ordering::Relaxed);
    }

    pub fn record_open(&self) {
        self.menus_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_click(&self) {
        self.clicks_handled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_click(&self) {
        self.clicks_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn menus_loaded(&self) -> u64 {
        self.menus_loaded.load(Ordering::Relaxed)
    }

    pub fn menus_opened(&self) -> u64 {
        self.menus_opened.load(Ordering::Relaxed)
    }

    pub fn clicks_handled(&self) -> u64 {
        self.clicks_handled.load(Ordering::Relaxed)
    }

    pub fn clicks_dropped(&self) -> u64 {
        self.clicks_dropped.load(Ordering::Relaxed)
    }
}
