// Menucraft Domain Layer

pub mod actions;
pub mod config;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod utils;
pub mod value_objects;

pub use actions::*;
pub use entities::*;
pub use errors::*;
pub use ports::*;
pub use services::*;
pub use value_objects::*;
