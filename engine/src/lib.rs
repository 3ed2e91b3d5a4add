pub mod controller;
pub mod engine;

pub use crate::controller::*;
pub use crate::engine::*;
