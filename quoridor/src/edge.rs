use common::bits::bit_indexes;
use std::fmt::{self};

use super::constants::MAX_GRID_SIZE;
use super::Position;

/// The road between two orthogonally adjacent cells. Stored with the smaller cell first so that
/// an edge and its reverse compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    a: Position,
    b: Position,
}

impl Edge {
    pub fn new(a: Position, b: Position) -> Option<Self> {
        if !a.is_adjacent(&b) {
            return None;
        }

        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        Some(Self { a, b })
    }

    pub fn cells(&self) -> (Position, Position) {
        (self.a, self.b)
    }

    fn crosses_rows(&self) -> bool {
        self.a.col == self.b.col
    }

    fn bit(&self) -> u128 {
        debug_assert!(self.b.row < MAX_GRID_SIZE && self.b.col < MAX_GRID_SIZE);
        1 << (self.a.row * MAX_GRID_SIZE + self.a.col)
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}|{:?}", self.a, self.b)
    }
}

/// Set of blocked edges.
///
/// Edges crossing between two rows and edges crossing between two columns live on separate boards,
/// each indexed by the upper left cell of the edge. Equal sets always have equal bits, so the set
/// doubles as a cache key.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EdgeSet {
    across_rows: u128,
    across_cols: u128,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.board(edge) & edge.bit() != 0
    }

    /// Whether movement between two adjacent cells is blocked. Non-adjacent cells are never blocked.
    pub fn is_blocked(&self, a: Position, b: Position) -> bool {
        Edge::new(a, b).map_or(false, |edge| self.contains(&edge))
    }

    pub fn insert(&mut self, edge: Edge) {
        let bit = edge.bit();
        if edge.crosses_rows() {
            self.across_rows |= bit;
        } else {
            self.across_cols |= bit;
        }
    }

    /// A copy of this set with the additional edges blocked.
    pub fn with(&self, edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut edge_set = *self;
        edge_set.extend(edges);
        edge_set
    }

    pub fn len(&self) -> usize {
        (self.across_rows.count_ones() + self.across_cols.count_ones()) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.across_rows == 0 && self.across_cols == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Edge> {
        let cell = |index: usize| Position::new(index / MAX_GRID_SIZE, index % MAX_GRID_SIZE);

        let across_rows = bit_indexes(self.across_rows).map(move |index| {
            let a = cell(index);
            Edge {
                a,
                b: Position::new(a.row + 1, a.col),
            }
        });

        let across_cols = bit_indexes(self.across_cols).map(move |index| {
            let a = cell(index);
            Edge {
                a,
                b: Position::new(a.row, a.col + 1),
            }
        });

        across_rows.chain(across_cols)
    }

    fn board(&self, edge: &Edge) -> u128 {
        if edge.crosses_rows() {
            self.across_rows
        } else {
            self.across_cols
        }
    }
}

impl Extend<Edge> for EdgeSet {
    fn extend<T: IntoIterator<Item = Edge>>(&mut self, iter: T) {
        for edge in iter {
            self.insert(edge);
        }
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        let mut edge_set = Self::new();
        edge_set.extend(iter);
        edge_set
    }
}

impl fmt::Debug for EdgeSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
