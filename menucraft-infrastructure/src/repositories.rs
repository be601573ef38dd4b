pub mod menu_files;

pub use menu_files::*;
