pub mod action;
pub mod constants;
pub mod edge;
pub mod engine;
pub mod game;
pub mod game_state;
pub mod legality;
pub mod options;
pub mod path_finder;
pub mod player;
pub mod position;
pub mod wall;

mod display;

pub use crate::engine::*;
pub use action::*;
pub use edge::*;
pub use game::*;
pub use game_state::*;
pub use options::*;
pub use path_finder::*;
pub use player::*;
pub use position::*;
pub use wall::*;
