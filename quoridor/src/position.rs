use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::fmt::{self};
use std::str::FromStr;

/// A cell on the board, or a grid-line intersection when describing a wall endpoint.
///
/// Rows grow downward and columns grow to the right, both starting at 0 in the upper left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self, grid_size: usize) -> bool {
        self.row < grid_size && self.col < grid_size
    }

    /// Moves `distance` cells in `direction`, returning `None` when that would leave the board.
    pub fn step(&self, direction: Direction, distance: usize, grid_size: usize) -> Option<Self> {
        let (row, col) = match direction {
            Direction::Up => (self.row.checked_sub(distance)?, self.col),
            Direction::Down => (self.row + distance, self.col),
            Direction::Left => (self.row, self.col.checked_sub(distance)?),
            Direction::Right => (self.row, self.col + distance),
        };

        let position = Self::new(row, col);
        position.is_on_board(grid_size).then_some(position)
    }

    /// On-board orthogonal neighbors in Up, Down, Left, Right order.
    pub fn neighbors(&self, grid_size: usize) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.step(direction, 1, grid_size))
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| anyhow!("Expected a position in the form 'row,col' but found '{}'", s))?;

        let row = row
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Invalid row in '{}'", s))?;
        let col = col
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Invalid column in '{}'", s))?;

        Ok(Self::new(row, col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self)
    }
}

/// Pawn step directions. The derived ordering is the generation order of pawn moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(anyhow!("Unknown direction '{}'", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };

        write!(f, "{}", name)
    }
}
