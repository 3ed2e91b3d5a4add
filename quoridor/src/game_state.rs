use anyhow::{bail, Result};
use std::collections::{BTreeMap, BTreeSet};

use super::constants::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};
use super::legality::{self, is_valid_wall_placement};
use super::{Action, Color, Direction, EdgeSet, Engine, GameOptions, Player, Position, Wall};

/// Snapshot of the board.
///
/// A value type: `Clone` is a full copy and `transition` always returns a new state, so a search can hold
/// onto any number of hypothetical children without affecting the live game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    grid_size: usize,
    players: [Player; 2],
    placed_walls: Vec<Wall>,
    blocked_edges: EdgeSet,
    forbidden_walls: BTreeSet<Wall>,
    legal_walls: Vec<Wall>,
}

impl GameState {
    /// The standard 9x9 opening with ten walls a side.
    pub fn standard(engine: &Engine) -> Self {
        let players = [
            Player::starting(Color::A, DEFAULT_GRID_SIZE),
            Player::starting(Color::B, DEFAULT_GRID_SIZE),
        ];

        let mut game_state = Self {
            grid_size: DEFAULT_GRID_SIZE,
            players,
            placed_walls: Vec::new(),
            blocked_edges: EdgeSet::new(),
            forbidden_walls: BTreeSet::new(),
            legal_walls: Vec::new(),
        };

        game_state.recompute_wall_sets(engine);
        game_state
    }

    pub fn new(grid_size: usize, players: [Player; 2], engine: &Engine) -> Result<Self> {
        Self::from_board(grid_size, players, &[], engine)
    }

    pub fn from_options(options: &GameOptions, engine: &Engine) -> Result<Self> {
        check_grid_size(options.grid_size)?;

        let players = [Color::A, Color::B].map(|color| {
            Player::starting_with_walls(color, options.grid_size, options.walls_per_player)
        });

        Self::new(options.grid_size, players, engine)
    }

    /// Builds a state from a description of a live board, validating the walls one at a time in the order given.
    pub fn from_board(
        grid_size: usize,
        players: [Player; 2],
        placed_walls: &[Wall],
        engine: &Engine,
    ) -> Result<Self> {
        check_grid_size(grid_size)?;

        if players[0].color != Color::A || players[1].color != Color::B {
            bail!("Players must be listed as A then B");
        }

        for player in &players {
            if !player.position.is_on_board(grid_size) || player.goal_col >= grid_size {
                bail!("Player {} is not on a {}x{} board", player.color, grid_size, grid_size);
            }
        }

        if players[0].position == players[1].position {
            bail!("Both pawns are on {}", players[0].position);
        }

        let mut walls = Vec::with_capacity(placed_walls.len());
        let mut blocked_edges = EdgeSet::new();
        for wall in placed_walls {
            if !is_valid_wall_placement(wall.start(), wall.end(), grid_size, &walls, &BTreeSet::new()) {
                bail!("Wall {} cannot be placed on this board", wall);
            }

            walls.push(*wall);
            blocked_edges.extend(wall.blocked_edges());
        }

        let mut game_state = Self {
            grid_size,
            players,
            placed_walls: walls,
            blocked_edges,
            forbidden_walls: BTreeSet::new(),
            legal_walls: Vec::new(),
        };

        for color in [Color::A, Color::B] {
            if game_state.shortest_path(color, engine).is_none() {
                bail!("Player {} has no path to its goal", color);
            }
        }

        game_state.recompute_wall_sets(engine);
        Ok(game_state)
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    pub fn placed_walls(&self) -> &[Wall] {
        &self.placed_walls
    }

    pub fn blocked_edges(&self) -> &EdgeSet {
        &self.blocked_edges
    }

    pub fn forbidden_walls(&self) -> &BTreeSet<Wall> {
        &self.forbidden_walls
    }

    /// Walls that may currently be placed, in generation order.
    pub fn legal_walls(&self) -> &[Wall] {
        &self.legal_walls
    }

    pub fn is_legal_wall(&self, wall: &Wall) -> bool {
        self.legal_walls.contains(wall)
    }

    pub fn valid_moves(&self, color: Color) -> BTreeMap<Direction, Position> {
        legality::valid_moves(
            self.player(color).position,
            self.player(color.opponent()).position,
            self.grid_size,
            &self.blocked_edges,
        )
    }

    /// Every action the player may take: pawn moves, then walls while any remain. A player with no pawn
    /// move may skip.
    pub fn valid_actions(&self, color: Color) -> Vec<Action> {
        let mut actions = self
            .valid_moves(color)
            .into_values()
            .map(Action::Move)
            .collect::<Vec<_>>();

        let can_move = !actions.is_empty();

        if self.player(color).remaining_walls > 0 {
            actions.extend(self.legal_walls.iter().copied().map(Action::Wall));
        }

        if !can_move {
            actions.push(Action::Skip);
        }

        actions
    }

    /// Applies an action for `color` to a copy of this state.
    ///
    /// The action is trusted. It must come from `valid_actions`; anything else yields an unspecified state.
    pub fn transition(&self, action: &Action, color: Color, engine: &Engine) -> Self {
        let mut game_state = self.clone();

        match action {
            Action::Move(position) => {
                game_state.players[color.index()].position = *position;
            }
            Action::Wall(wall) => {
                game_state.placed_walls.push(*wall);
                game_state.blocked_edges.extend(wall.blocked_edges());
                let player = &mut game_state.players[color.index()];
                player.remaining_walls = player.remaining_walls.saturating_sub(1);
                game_state.recompute_wall_sets(engine);
            }
            Action::Skip => {}
        }

        game_state
    }

    /// Refreshes the forbidden and legal wall sets against the current board.
    pub fn recompute_wall_sets(&mut self, engine: &Engine) {
        self.forbidden_walls = engine.forbidden_walls(
            self.grid_size,
            &self.placed_walls,
            &self.blocked_edges,
            &self.players,
        );

        self.legal_walls =
            legality::find_valid_walls(self.grid_size, &self.placed_walls, &self.forbidden_walls);
    }

    pub fn shortest_path(&self, color: Color, engine: &Engine) -> Option<Vec<Position>> {
        let player = self.player(color);

        engine.path_finder().shortest_path(
            player.position,
            player.goal_col,
            self.grid_size,
            &self.blocked_edges,
        )
    }

    pub fn shortest_path_len(&self, color: Color, engine: &Engine) -> Option<usize> {
        let player = self.player(color);

        engine.path_finder().shortest_path_len(
            player.position,
            player.goal_col,
            self.grid_size,
            &self.blocked_edges,
        )
    }

    pub fn has_reached_goal(&self, color: Color) -> bool {
        self.player(color).has_reached_goal()
    }

    pub fn winner(&self) -> Option<Color> {
        [Color::A, Color::B]
            .into_iter()
            .find(|color| self.has_reached_goal(*color))
    }
}

fn check_grid_size(grid_size: usize) -> Result<()> {
    if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
        bail!(
            "Grid size {} is not within {}..={}",
            grid_size,
            MIN_GRID_SIZE,
            MAX_GRID_SIZE
        );
    }

    Ok(())
}
