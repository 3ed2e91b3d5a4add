use anyhow::{anyhow, bail, Result};
use engine::{GameEngine, ValidActions};
use itertools::Itertools;
use log::{info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::constants::REPETITION_WINDOW;
use super::{Action, Color, Direction, Engine, GameState, Position, Wall};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Won(Color),
    Drawn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue { to_move: Color },
    Over(GameOutcome),
}

/// Owns the live game: whose turn it is, the action history and the result.
///
/// Every action is checked against the current legal set before it is applied, so an illegal request
/// is reported as an error and leaves the game untouched.
pub struct Game {
    engine: Arc<Engine>,
    game_state: GameState,
    to_move: Color,
    history: Vec<Action>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Starts a new game from `game_state` with A to move. Engine caches from earlier games are dropped.
    pub fn new(engine: Arc<Engine>, mut game_state: GameState) -> Self {
        engine.new_game();
        game_state.recompute_wall_sets(&engine);

        Self {
            engine,
            game_state,
            to_move: Color::A,
            history: Vec::new(),
            outcome: None,
        }
    }

    pub fn standard(engine: Arc<Engine>) -> Self {
        let game_state = GameState::standard(&engine);
        Self::new(engine, game_state)
    }

    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn valid_moves(&self, color: Color) -> BTreeMap<Direction, Position> {
        self.game_state.valid_moves(color)
    }

    pub fn valid_actions(&self) -> Vec<Action> {
        self.engine.valid_actions(&self.game_state, self.to_move)
    }

    pub fn move_player(&mut self, row: usize, col: usize) -> Result<TurnOutcome> {
        self.apply(Action::Move(Position::new(row, col)))
    }

    pub fn place_wall(&mut self, start: Position, end: Position) -> Result<TurnOutcome> {
        let wall = Wall::new(start, end)
            .ok_or_else(|| anyhow!("{} to {} is not a wall", start, end))?;

        self.apply(Action::Wall(wall))
    }

    pub fn skip(&mut self) -> Result<TurnOutcome> {
        self.apply(Action::Skip)
    }

    pub fn apply(&mut self, action: Action) -> Result<TurnOutcome> {
        if let Some(outcome) = self.outcome {
            bail!("The game is already over: {:?}", outcome);
        }

        if !self.is_legal(&action) {
            warn!("Rejected illegal action {} for {}", action, self.to_move);
            bail!("{} is not a legal action for {}", action, self.to_move);
        }

        let color = self.to_move;
        self.game_state = self.engine.take_action(&self.game_state, &action, color);
        self.history.push(action);

        info!("{} played {}", color, action);

        if self.game_state.has_reached_goal(color) {
            return Ok(self.finish(GameOutcome::Won(color)));
        }

        if self.is_repeating() {
            return Ok(self.finish(GameOutcome::Drawn));
        }

        self.to_move = color.opponent();
        self.game_state.recompute_wall_sets(&self.engine);

        Ok(TurnOutcome::Continue {
            to_move: self.to_move,
        })
    }

    fn is_legal(&self, action: &Action) -> bool {
        let moves = self.game_state.valid_moves(self.to_move);

        match action {
            Action::Move(position) => moves.values().any(|destination| destination == position),
            Action::Wall(wall) => {
                self.game_state.player(self.to_move).remaining_walls > 0
                    && self.game_state.is_legal_wall(wall)
            }
            Action::Skip => moves.is_empty(),
        }
    }

    /// The last twelve actions are the same four action cycle played three times over.
    fn is_repeating(&self) -> bool {
        if self.history.len() < REPETITION_WINDOW {
            return false;
        }

        let pairs = self.history[self.history.len() - REPETITION_WINDOW..]
            .chunks(2)
            .collect_vec();

        pairs.iter().step_by(2).all_equal() && pairs.iter().skip(1).step_by(2).all_equal()
    }

    fn finish(&mut self, outcome: GameOutcome) -> TurnOutcome {
        info!("Game over after {} actions: {:?}", self.history.len(), outcome);
        self.outcome = Some(outcome);
        TurnOutcome::Over(outcome)
    }
}
