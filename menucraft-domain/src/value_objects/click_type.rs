// Click type value objects for item-based menu triggers

use serde::{Deserialize, Serialize};

/// A physical mouse click reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseClick {
    Left,
    Right,
}

/// Which clicks an open-with-item trigger reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuOpenClick {
    LeftClick,
    RightClick,
    BothClicks,
}

impl MenuOpenClick {
    /// Returns None when neither click is enabled, which disables the trigger.
    pub fn from_options(left_click: bool, right_click: bool) -> Option<Self> {
        match (left_click, right_click) {
            (true, true) => Some(MenuOpenClick::BothClicks),
            (true, false) => Some(MenuOpenClick::LeftClick),
            (false, true) => Some(MenuOpenClick::RightClick),
            (false, false) => None,
        }
    }

    pub fn accepts(&self, click: MouseClick) -> bool {
        match self {
            MenuOpenClick::LeftClick => click == MouseClick::Left,
            MenuOpenClick::RightClick => click == MouseClick::Right,
            MenuOpenClick::BothClicks => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_options_requires_at_least_one_click() {
        assert_eq!(MenuOpenClick::from_options(false, false), None);
        assert_eq!(
            MenuOpenClick::from_options(true, true),
            Some(MenuOpenClick::BothClicks)
        );
    }

    #[test]
    fn accepts_matches_the_enabled_side() {
        assert!(MenuOpenClick::LeftClick.accepts(MouseClick::Left));
        assert!(!MenuOpenClick::LeftClick.accepts(MouseClick::Right));
        assert!(MenuOpenClick::BothClicks.accepts(MouseClick::Right));
    }
}
