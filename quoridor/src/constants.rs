pub const DEFAULT_GRID_SIZE: usize = 9;
pub const MIN_GRID_SIZE: usize = 3;
/// Edge bitboards use this as their row stride, which caps the playable grid.
pub const MAX_GRID_SIZE: usize = 11;
pub const NUM_WALLS_PER_PLAYER: usize = 10;

/// Number of trailing actions inspected when looking for a repeated cycle.
pub const REPETITION_WINDOW: usize = 12;

pub const DEFAULT_PATH_CACHE_CAPACITY: usize = 200_000;
pub const DEFAULT_FORBIDDEN_WALLS_CACHE_CAPACITY: usize = 20_000;
