// Menu engine entities

pub mod icon;
pub mod item;
pub mod menu;
pub mod open_item;

pub use icon::*;
pub use item::*;
pub use menu::*;
pub use open_item::*;
