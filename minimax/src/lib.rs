pub mod bot;
pub mod difficulty;
pub mod evaluate;
pub mod move_ordering;
pub mod options;
pub mod search;

pub use bot::*;
pub use difficulty::*;
pub use evaluate::*;
pub use move_ordering::*;
pub use options::*;
pub use search::*;
