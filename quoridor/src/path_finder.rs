use common::BoundedCache;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::constants::DEFAULT_PATH_CACHE_CAPACITY;
use super::{Direction, EdgeSet, Position};

/// Expansion order for goal-column searches. Decides which route wins among equally short ones.
const ROUTE_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct PathKey {
    start: Position,
    goal_col: usize,
    grid_size: usize,
    blocked: EdgeSet,
}

/// Route queries over the board with memoization.
///
/// A goal is a whole column: any cell in it ends the search. Results are cached by the start, the goal
/// column and the full set of blocked edges, so a cached entry is never stale.
pub struct PathFinder {
    shortest_paths: Mutex<BoundedCache<PathKey, Option<Vec<Position>>>>,
    reachable: Mutex<BoundedCache<PathKey, bool>>,
    searches: AtomicUsize,
}

impl PathFinder {
    pub fn new(capacity: usize) -> Self {
        Self {
            shortest_paths: Mutex::new(BoundedCache::with_capacity(capacity)),
            reachable: Mutex::new(BoundedCache::with_capacity(capacity)),
            searches: AtomicUsize::new(0),
        }
    }

    /// Breadth first search from `start` to the nearest cell of `goal_col`. The path includes both ends.
    pub fn shortest_path(
        &self,
        start: Position,
        goal_col: usize,
        grid_size: usize,
        blocked: &EdgeSet,
    ) -> Option<Vec<Position>> {
        let key = PathKey {
            start,
            goal_col,
            grid_size,
            blocked: *blocked,
        };

        if let Some(path) = self.shortest_paths.lock().get(&key) {
            return path;
        }

        self.searches.fetch_add(1, Ordering::Relaxed);
        let path = bfs(start, |cell| cell.col == goal_col, &ROUTE_ORDER, grid_size, blocked);
        self.shortest_paths.lock().insert(key, path.clone());

        path
    }

    /// Number of cells on the shortest path, counting the start.
    pub fn shortest_path_len(
        &self,
        start: Position,
        goal_col: usize,
        grid_size: usize,
        blocked: &EdgeSet,
    ) -> Option<usize> {
        self.shortest_path(start, goal_col, grid_size, blocked)
            .map(|path| path.len())
    }

    /// Whether any route to `goal_col` exists. Cheaper than `shortest_path` when the route itself is not needed.
    pub fn exists_path(
        &self,
        start: Position,
        goal_col: usize,
        grid_size: usize,
        blocked: &EdgeSet,
    ) -> bool {
        let key = PathKey {
            start,
            goal_col,
            grid_size,
            blocked: *blocked,
        };

        if let Some(exists) = self.reachable.lock().get(&key) {
            return exists;
        }

        self.searches.fetch_add(1, Ordering::Relaxed);
        let exists = dfs(start, goal_col, grid_size, blocked);
        self.reachable.lock().insert(key, exists);

        exists
    }

    /// Whether `to` can be reached from `from`. Not cached.
    pub fn cells_connected(
        &self,
        from: Position,
        to: Position,
        grid_size: usize,
        blocked: &EdgeSet,
    ) -> bool {
        self.searches.fetch_add(1, Ordering::Relaxed);
        bfs(from, |cell| cell == to, &Direction::ALL, grid_size, blocked).is_some()
    }

    /// Searches that were not answered from a cache.
    pub fn searches_performed(&self) -> usize {
        self.searches.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.shortest_paths.lock().clear();
        self.reachable.lock().clear();
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new(DEFAULT_PATH_CACHE_CAPACITY)
    }
}

fn bfs(
    start: Position,
    is_goal: impl Fn(Position) -> bool,
    order: &[Direction],
    grid_size: usize,
    blocked: &EdgeSet,
) -> Option<Vec<Position>> {
    let index = |cell: Position| cell.row * grid_size + cell.col;
    let mut came_from: Vec<Option<Position>> = vec![None; grid_size * grid_size];
    let mut visited = vec![false; grid_size * grid_size];
    let mut queue = VecDeque::new();

    visited[index(start)] = true;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if is_goal(cell) {
            let mut path = vec![cell];
            let mut current = cell;
            while let Some(previous) = came_from[index(current)] {
                path.push(previous);
                current = previous;
            }
            path.reverse();
            return Some(path);
        }

        let neighbors = order
            .iter()
            .filter_map(|direction| cell.step(*direction, 1, grid_size));

        for next in neighbors {
            if visited[index(next)] || blocked.is_blocked(cell, next) {
                continue;
            }

            visited[index(next)] = true;
            came_from[index(next)] = Some(cell);
            queue.push_back(next);
        }
    }

    None
}

fn dfs(start: Position, goal_col: usize, grid_size: usize, blocked: &EdgeSet) -> bool {
    let index = |cell: Position| cell.row * grid_size + cell.col;
    let mut visited = vec![false; grid_size * grid_size];
    let mut stack = vec![start];
    visited[index(start)] = true;

    while let Some(cell) = stack.pop() {
        if cell.col == goal_col {
            return true;
        }

        for next in cell.neighbors(grid_size) {
            if !visited[index(next)] && !blocked.is_blocked(cell, next) {
                visited[index(next)] = true;
                stack.push(next);
            }
        }
    }

    false
}
