// Value objects shared across the menu engine

pub mod appearance;
pub mod click_type;
pub mod identifiers;
pub mod material;
pub mod slot;
pub mod sound;
pub mod ticks;

pub use appearance::*;
pub use click_type::*;
pub use identifiers::*;
pub use material::*;
pub use slot::*;
pub use sound::*;
pub use ticks::*;
