// Port traits (interfaces)
// Define what the menu engine needs from the host environment

pub mod host;
pub mod repositories;
pub mod scheduler;

pub use host::*;
pub use repositories::*;
pub use scheduler::*;
