// Grid slot value object

use serde::{Deserialize, Serialize};

/// Fixed column count of every menu grid.
pub const MENU_COLUMNS: u8 = 9;

/// Zero-based cell coordinates inside a menu grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotPosition {
    pub row: u8,
    pub column: u8,
}

impl SlotPosition {
    pub fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Flat slot index used by inventory windows (row-major, 9 columns).
    pub fn slot_index(&self) -> usize {
        self.row as usize * MENU_COLUMNS as usize + self.column as usize
    }

    pub fn from_slot_index(index: usize) -> Self {
        Self {
            row: (index / MENU_COLUMNS as usize) as u8,
            column: (index % MENU_COLUMNS as usize) as u8,
        }
    }
}
