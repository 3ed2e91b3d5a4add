use engine::GameEngine;
use quoridor::{Action, Color, Engine, GameState};

use super::{evaluate, moves_by_difficulty, BotOptions, Difficulty};

/// Depth limited minimax with alpha-beta pruning over the candidates of a difficulty tier.
///
/// One `Search` covers a single root decision. `root_depth` is the depth of the bot's own move, so a node
/// searched with `depth` remaining sits `root_depth - depth` plies below the root.
pub struct Search<'a> {
    engine: &'a Engine,
    options: &'a BotOptions,
    difficulty: Difficulty,
    root_depth: usize,
    nodes: usize,
}

impl<'a> Search<'a> {
    pub fn new(engine: &'a Engine, options: &'a BotOptions) -> Self {
        Self {
            engine,
            options,
            difficulty: options.difficulty,
            root_depth: options.depth(),
            nodes: 0,
        }
    }

    pub fn root_depth(&self) -> usize {
        self.root_depth
    }

    /// Nodes visited so far, leaves included.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Best score reachable from `game_state` for `maximizing`, along with the line that reaches it.
    ///
    /// Ties keep the first candidate in generation order, which also fixes the line when every candidate scores
    /// the same infinite value. A node with no candidates is a dead line and scores negative infinity for either side.
    pub fn minimax(
        &mut self,
        game_state: &GameState,
        depth: usize,
        mut alpha: f32,
        mut beta: f32,
        maximizing: Color,
        to_move: Color,
    ) -> (f32, Vec<Action>) {
        self.nodes += 1;

        if depth == 0 || self.engine.terminal_state(game_state).is_some() {
            return (
                evaluate(self.engine, game_state, maximizing, depth),
                Vec::new(),
            );
        }

        let ply = self.root_depth.saturating_sub(depth);
        let candidates = moves_by_difficulty(
            self.engine,
            game_state,
            to_move,
            ply,
            self.difficulty,
            self.options,
        );

        if candidates.is_empty() {
            return (f32::NEG_INFINITY, Vec::new());
        }

        let is_maximizing = to_move == maximizing;
        let mut best_score = if is_maximizing {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };
        let mut best_line = Vec::new();

        for action in candidates {
            let child = self.engine.take_action(game_state, &action, to_move);
            let (score, line) =
                self.minimax(&child, depth - 1, alpha, beta, maximizing, to_move.opponent());

            if is_maximizing {
                if score > best_score || best_line.is_empty() {
                    best_score = score;
                    best_line = prepend(action, line);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score || best_line.is_empty() {
                    best_score = score;
                    best_line = prepend(action, line);
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        (best_score, best_line)
    }
}

fn prepend(action: Action, mut line: Vec<Action>) -> Vec<Action> {
    line.insert(0, action);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use quoridor::{Player, Position, Wall};

    fn options(difficulty: Difficulty, depth: usize) -> BotOptions {
        BotOptions {
            search_depth: Some(depth),
            ..BotOptions::with_difficulty(difficulty)
        }
    }

    #[test]
    fn test_depth_zero_is_static_evaluation() {
        let engine = Engine::default();
        let game_state = GameState::standard(&engine);
        let options = options(Difficulty::Easy, 1);
        let mut search = Search::new(&engine, &options);

        let (score, line) =
            search.minimax(&game_state, 0, f32::NEG_INFINITY, f32::INFINITY, Color::A, Color::B);

        assert_approx_eq!(score, evaluate(&engine, &game_state, Color::A, 0));
        assert!(line.is_empty());
        assert_eq!(search.nodes(), 1);
    }

    #[test]
    fn test_minimizer_picks_its_best_reply() {
        let engine = Engine::default();
        let game_state = GameState::standard(&engine);
        let options = options(Difficulty::Easy, 2);
        let mut search = Search::new(&engine, &options);

        let (score, line) =
            search.minimax(&game_state, 1, f32::NEG_INFINITY, f32::INFINITY, Color::A, Color::B);

        // B stepping left shortens its route to eight cells.
        assert_eq!(line, vec![Action::Move(Position::new(4, 7))]);
        assert_approx_eq!(score, 8.0 - 9.0 + 0.3 / 9.0);
    }

    #[test]
    fn test_finds_winning_line() {
        let engine = Engine::default();
        let players = [
            Player::new(Color::A, Position::new(2, 6), 8, 0),
            Player::new(Color::B, Position::new(6, 6), 0, 0),
        ];
        let game_state = GameState::new(9, players, &engine).unwrap();
        let options = options(Difficulty::Medium, 3);
        let mut search = Search::new(&engine, &options);

        let (score, line) =
            search.minimax(&game_state, 3, f32::NEG_INFINITY, f32::INFINITY, Color::A, Color::A);

        assert_eq!(score, f32::INFINITY);
        assert_eq!(line[0], Action::Move(Position::new(2, 7)));
        assert_eq!(line.last(), Some(&Action::Move(Position::new(2, 8))));
    }

    #[test]
    fn test_search_is_deterministic() {
        let engine = Engine::default();
        let game_state = GameState::standard(&engine);
        let options = options(Difficulty::Impossible, 3);

        let run = || {
            let mut search = Search::new(&engine, &options);
            let result = search.minimax(
                &game_state,
                3,
                f32::NEG_INFINITY,
                f32::INFINITY,
                Color::A,
                Color::A,
            );
            (result, search.nodes())
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_dead_line_scores_negative_infinity() {
        let engine = Engine::default();
        // A cannot step and still holds walls, so a pawn only tier has nothing for it.
        let players = [
            Player::new(Color::A, Position::new(4, 3), 8, 2),
            Player::new(Color::B, Position::new(4, 4), 0, 10),
        ];
        let walls = [
            Wall::horizontal(4, 2),
            Wall::horizontal(5, 3),
            Wall::vertical(4, 3),
            Wall::vertical(3, 5),
        ];
        let game_state = GameState::from_board(9, players, &walls, &engine).unwrap();
        let options = options(Difficulty::Easy, 3);
        let mut search = Search::new(&engine, &options);

        let (score, line) =
            search.minimax(&game_state, 2, f32::NEG_INFINITY, f32::INFINITY, Color::B, Color::A);

        assert_eq!(score, f32::NEG_INFINITY);
        assert!(line.is_empty());
    }
}
