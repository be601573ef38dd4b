// Menucraft Application Layer

pub mod click_guard;
pub mod engine;
pub mod error;
pub mod loading;
pub mod metrics;
pub mod parsing;
pub mod registry;
pub mod testing;
pub mod views;

pub use click_guard::ClickGuard;
pub use engine::MenuEngine;
pub use error::AppError;
pub use metrics::Metrics;
pub use registry::MenuRegistry;
pub use views::MenuView;
