use serde::{Deserialize, Serialize};
use std::fmt::{self};

use super::constants::NUM_WALLS_PER_PLAYER;
use super::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    A,
    B,
}

impl Color {
    pub fn opponent(&self) -> Color {
        match self {
            Color::A => Color::B,
            Color::B => Color::A,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Color::A => 0,
            Color::B => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::A => write!(f, "A"),
            Color::B => write!(f, "B"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Player {
    pub position: Position,
    pub goal_col: usize,
    pub color: Color,
    pub remaining_walls: usize,
}

impl Player {
    pub fn new(color: Color, position: Position, goal_col: usize, remaining_walls: usize) -> Self {
        Self {
            position,
            goal_col,
            color,
            remaining_walls,
        }
    }

    /// Starting seat: A on the middle row of the left edge racing right, B mirrored on the right edge.
    pub fn starting(color: Color, grid_size: usize) -> Self {
        Self::starting_with_walls(color, grid_size, NUM_WALLS_PER_PLAYER)
    }

    pub fn starting_with_walls(color: Color, grid_size: usize, walls: usize) -> Self {
        let row = grid_size / 2;
        let last = grid_size - 1;

        match color {
            Color::A => Self::new(color, Position::new(row, 0), last, walls),
            Color::B => Self::new(color, Position::new(row, last), 0, walls),
        }
    }

    pub fn has_reached_goal(&self) -> bool {
        self.position.col == self.goal_col
    }
}
