use serde::{Deserialize, Serialize};
use std::fmt::{self};
use std::str::FromStr;

use super::{Position, Wall};

/// A turn. Serializes as `{"kind": "move" | "wall" | "skip", "payload": ...}`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Action {
    Move(Position),
    Wall(Wall),
    Skip,
}

impl Action {
    pub fn is_pawn_move(&self) -> bool {
        matches!(self, Action::Move(_))
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Action::Wall(_))
    }
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("skip") {
            Ok(Action::Skip)
        } else if s.ends_with(['h', 'v']) {
            Ok(Action::Wall(s.parse()?))
        } else {
            Ok(Action::Move(s.parse()?))
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::Move(position) => write!(f, "{}", position),
            Action::Wall(wall) => write!(f, "{}", wall),
            Action::Skip => write!(f, "skip"),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}
