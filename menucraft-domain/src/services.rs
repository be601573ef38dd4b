// Domain services

pub mod placeholders;

pub use placeholders::*;
