use anyhow::{anyhow, bail};
use serde::{Deserialize, Serialize};
use std::fmt::{self};
use std::str::FromStr;

use super::{Edge, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A two unit barrier laid along the grid lines.
///
/// Endpoints are grid-line intersections, so each coordinate ranges over `0..=grid_size`. The
/// endpoints are always stored smaller first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawWall")]
pub struct Wall {
    start: Position,
    end: Position,
}

#[derive(Deserialize)]
struct RawWall {
    start: Position,
    end: Position,
}

impl TryFrom<RawWall> for Wall {
    type Error = anyhow::Error;

    fn try_from(raw: RawWall) -> Result<Self, Self::Error> {
        Wall::new(raw.start, raw.end)
            .ok_or_else(|| anyhow!("{:?} to {:?} is not a wall", raw.start, raw.end))
    }
}

impl Wall {
    /// Endpoints must be exactly two apart along a row or a column. Either order is accepted.
    pub fn new(start: Position, end: Position) -> Option<Self> {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };

        let horizontal = start.row == end.row && end.col - start.col == 2;
        let vertical = start.col == end.col && end.row - start.row == 2;

        (horizontal || vertical).then_some(Self { start, end })
    }

    pub fn horizontal(row: usize, col: usize) -> Self {
        Self {
            start: Position::new(row, col),
            end: Position::new(row, col + 2),
        }
    }

    pub fn vertical(row: usize, col: usize) -> Self {
        Self {
            start: Position::new(row, col),
            end: Position::new(row + 2, col),
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn orientation(&self) -> Orientation {
        if self.start.row == self.end.row {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    pub fn midpoint(&self) -> Position {
        Position::new(
            (self.start.row + self.end.row) / 2,
            (self.start.col + self.end.col) / 2,
        )
    }

    /// Start, midpoint and end.
    pub fn points(&self) -> [Position; 3] {
        [self.start, self.midpoint(), self.end]
    }

    pub fn is_within_bounds(&self, grid_size: usize) -> bool {
        self.end.row <= grid_size && self.end.col <= grid_size
    }

    /// Whether the wall runs along the outer edge of the board, where it would block nothing.
    pub fn is_along_border(&self, grid_size: usize) -> bool {
        match self.orientation() {
            Orientation::Horizontal => self.start.row == 0 || self.start.row == grid_size,
            Orientation::Vertical => self.start.col == 0 || self.start.col == grid_size,
        }
    }

    pub fn touches_border(&self, grid_size: usize) -> bool {
        self.points().iter().any(|point| {
            point.row == 0 || point.row == grid_size || point.col == 0 || point.col == grid_size
        })
    }

    /// Two walls cross at their centers, or overlap so that the end of one sits on the center of the other.
    pub fn intersects(&self, other: &Wall) -> bool {
        Self::overlaps_from(self, other) || Self::overlaps_from(other, self)
    }

    fn overlaps_from(a: &Wall, b: &Wall) -> bool {
        let a_mid = a.midpoint();
        let b_mid = b.midpoint();
        let a_mid_on_b_end = a_mid == b.start || a_mid == b.end;

        a_mid == b_mid || ((a.start == b_mid || a.end == b_mid) && a_mid_on_b_end)
    }

    /// Whether any point of this wall coincides with any point of the other.
    pub fn shares_point_with(&self, other: &Wall) -> bool {
        let points = other.points();
        self.points().iter().any(|point| points.contains(point))
    }

    /// The two roads this wall cuts. A wall along the border cuts nothing.
    pub fn blocked_edges(&self) -> impl Iterator<Item = Edge> {
        let Position { row, col } = self.start;

        let edges = match self.orientation() {
            Orientation::Horizontal => row.checked_sub(1).map(|above| {
                [
                    Edge::new(Position::new(above, col), Position::new(row, col)),
                    Edge::new(Position::new(above, col + 1), Position::new(row, col + 1)),
                ]
            }),
            Orientation::Vertical => col.checked_sub(1).map(|left| {
                [
                    Edge::new(Position::new(row, left), Position::new(row, col)),
                    Edge::new(Position::new(row + 1, left), Position::new(row + 1, col)),
                ]
            }),
        };

        edges.into_iter().flatten().flatten()
    }

    /// Whether this wall cuts a step taken along the path.
    pub fn blocks_path(&self, path: &[Position]) -> bool {
        let edges = self.blocked_edges().collect::<Vec<_>>();

        path.windows(2)
            .filter_map(|step| Edge::new(step[0], step[1]))
            .any(|step| edges.contains(&step))
    }

    /// Every wall that fits on the board and does not lie along the border, row by row, with the
    /// horizontal wall at each intersection listed before the vertical one.
    pub fn candidates(grid_size: usize) -> impl Iterator<Item = Wall> {
        (0..grid_size)
            .flat_map(move |row| (0..grid_size).map(move |col| (row, col)))
            .flat_map(|(row, col)| [Wall::horizontal(row, col), Wall::vertical(row, col)])
            .filter(move |wall| wall.is_within_bounds(grid_size) && !wall.is_along_border(grid_size))
    }
}

impl FromStr for Wall {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (start, orientation) = match s.char_indices().last() {
            Some((idx, 'h')) => (&s[..idx], Orientation::Horizontal),
            Some((idx, 'v')) => (&s[..idx], Orientation::Vertical),
            _ => bail!("A wall must end with 'h' or 'v' but found '{}'", s),
        };

        let start = start.parse::<Position>()?;
        let end = match orientation {
            Orientation::Horizontal => start
                .col
                .checked_add(2)
                .map(|col| Position::new(start.row, col)),
            Orientation::Vertical => start
                .row
                .checked_add(2)
                .map(|row| Position::new(row, start.col)),
        };

        match end.and_then(|end| Wall::new(start, end)) {
            Some(wall) => Ok(wall),
            None => bail!("Wall '{}' does not fit on any board", s),
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let orientation = match self.orientation() {
            Orientation::Horizontal => "h",
            Orientation::Vertical => "v",
        };

        write!(f, "{}{}", self.start, orientation)
    }
}

impl fmt::Debug for Wall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.start, self.end)
    }
}
