use common::BoundedCache;
use engine::{GameEngine, ValidActions};
use log::debug;
use parking_lot::Mutex;
use std::collections::BTreeSet;

use super::legality::find_forbidden_walls;
use super::{Action, Color, EdgeSet, EngineOptions, GameState, PathFinder, Player, Position, Wall};

#[derive(Clone, PartialEq, Eq, Hash)]
struct ForbiddenWallsKey {
    grid_size: usize,
    placed_walls: Vec<Wall>,
    blocked: EdgeSet,
    positions: [Position; 2],
    goal_cols: [usize; 2],
}

/// Rules context shared by everything that inspects or advances a game.
///
/// Owns the memo tables for route queries and forbidden walls. Share it between the turn owner and a
/// background search through an `Arc`; the tables are locked internally.
pub struct Engine {
    path_finder: PathFinder,
    forbidden_walls: Mutex<BoundedCache<ForbiddenWallsKey, BTreeSet<Wall>>>,
}

impl Engine {
    pub fn new(options: &EngineOptions) -> Self {
        Self {
            path_finder: PathFinder::new(options.path_cache_capacity),
            forbidden_walls: Mutex::new(BoundedCache::with_capacity(
                options.forbidden_walls_cache_capacity,
            )),
        }
    }

    pub fn path_finder(&self) -> &PathFinder {
        &self.path_finder
    }

    /// Drops every memoized result.
    pub fn new_game(&self) {
        self.path_finder.clear();
        self.forbidden_walls.lock().clear();
        debug!("Cleared engine caches for a new game");
    }

    pub fn forbidden_walls(
        &self,
        grid_size: usize,
        placed_walls: &[Wall],
        blocked: &EdgeSet,
        players: &[Player; 2],
    ) -> BTreeSet<Wall> {
        let key = ForbiddenWallsKey {
            grid_size,
            placed_walls: placed_walls.to_vec(),
            blocked: *blocked,
            positions: players.map(|player| player.position),
            goal_cols: players.map(|player| player.goal_col),
        };

        if let Some(forbidden) = self.forbidden_walls.lock().get(&key) {
            return forbidden;
        }

        let forbidden =
            find_forbidden_walls(&self.path_finder, grid_size, placed_walls, blocked, players);
        self.forbidden_walls.lock().insert(key, forbidden.clone());

        forbidden
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(&EngineOptions::default())
    }
}

impl GameEngine for Engine {
    type Action = Action;
    type State = GameState;
    type Player = Color;
    type Terminal = Color;

    fn take_action(&self, game_state: &Self::State, action: &Self::Action, player: Color) -> Self::State {
        game_state.transition(action, player, self)
    }

    fn terminal_state(&self, game_state: &Self::State) -> Option<Self::Terminal> {
        game_state.winner()
    }
}

impl ValidActions for Engine {
    type Action = Action;
    type State = GameState;
    type Player = Color;

    fn valid_actions(&self, game_state: &Self::State, player: Color) -> Vec<Self::Action> {
        game_state.valid_actions(player)
    }
}
