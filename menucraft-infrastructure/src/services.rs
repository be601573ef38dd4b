pub mod console_host;
pub mod tick_scheduler;

pub use console_host::*;
pub use tick_scheduler::*;
