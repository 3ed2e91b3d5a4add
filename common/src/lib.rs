pub mod bits;
pub mod bounded_cache;
pub mod config;

pub use bits::*;
pub use bounded_cache::*;
pub use config::*;
