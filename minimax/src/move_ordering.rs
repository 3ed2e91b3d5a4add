use itertools::{Either, Itertools};
use quoridor::{Action, Color, Engine, GameState};

use super::{BotOptions, Difficulty};

/// Candidate actions split by whether they advance the mover or obstruct the opponent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifiedMoves {
    pub intelligent: Vec<Action>,
    pub other: Vec<Action>,
}

impl ClassifiedMoves {
    pub fn is_empty(&self) -> bool {
        self.intelligent.is_empty() && self.other.is_empty()
    }

    /// Intelligent moves first, each list keeping pawn moves ahead of walls.
    pub fn into_ordered(self) -> Vec<Action> {
        self.intelligent.into_iter().chain(self.other).collect()
    }
}

/// Splits the mover's options into intelligent and other moves.
///
/// A pawn move is intelligent when it lands on the mover's current shortest route. A wall is intelligent when
/// it cuts a step of the opponent's current shortest route. Walls are only listed while the mover has some in
/// hand. Returns `None` when either player has no route.
pub fn classify_moves(engine: &Engine, game_state: &GameState, color: Color) -> Option<ClassifiedMoves> {
    let moves = game_state.valid_moves(color);
    let has_walls = game_state.player(color).remaining_walls > 0;

    if moves.is_empty() && !has_walls {
        return Some(ClassifiedMoves {
            intelligent: vec![Action::Skip],
            other: Vec::new(),
        });
    }

    let own_path = game_state.shortest_path(color, engine)?;
    let opponent_path = game_state.shortest_path(color.opponent(), engine)?;

    let (mut intelligent, mut other): (Vec<_>, Vec<_>) = moves
        .into_values()
        .partition_map(|destination| {
            let action = Action::Move(destination);
            if own_path.contains(&destination) {
                Either::Left(action)
            } else {
                Either::Right(action)
            }
        });

    if has_walls {
        for wall in game_state.legal_walls() {
            if wall.blocks_path(&opponent_path) {
                intelligent.push(Action::Wall(*wall));
            } else {
                other.push(Action::Wall(*wall));
            }
        }
    }

    Some(ClassifiedMoves { intelligent, other })
}

/// Candidate actions for `color` at `ply` levels below the root of a search.
///
/// The easy and medium tiers only ever consider pawn moves. The hard tier adds every legal wall at the root,
/// intelligent ones first. The impossible tier samples the other moves at the root and also looks at a few
/// walls one ply down. An empty list means the position has no playable line.
pub fn moves_by_difficulty(
    engine: &Engine,
    game_state: &GameState,
    color: Color,
    ply: usize,
    difficulty: Difficulty,
    options: &BotOptions,
) -> Vec<Action> {
    match (difficulty, ply) {
        (Difficulty::Hard, 0) => classify_moves(engine, game_state, color)
            .map(ClassifiedMoves::into_ordered)
            .unwrap_or_default(),
        (Difficulty::Impossible, 0) => classify_moves(engine, game_state, color)
            .map(|moves| {
                moves
                    .intelligent
                    .into_iter()
                    .chain(moves.other.into_iter().take(options.other_wall_sample))
                    .collect()
            })
            .unwrap_or_default(),
        (Difficulty::Impossible, 1) => classify_moves(engine, game_state, color)
            .map(|moves| {
                moves
                    .intelligent
                    .into_iter()
                    .take(options.second_ply_intelligent)
                    .chain(moves.other.into_iter().take(options.second_ply_other))
                    .collect()
            })
            .unwrap_or_default(),
        _ => pawn_moves(game_state, color),
    }
}

/// Pawn moves in direction order, or a skip when the mover can neither step nor place a wall.
pub fn pawn_moves(game_state: &GameState, color: Color) -> Vec<Action> {
    let moves = game_state
        .valid_moves(color)
        .into_values()
        .map(Action::Move)
        .collect_vec();

    if moves.is_empty() && game_state.player(color).remaining_walls == 0 {
        vec![Action::Skip]
    } else {
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quoridor::{Player, Position, Wall};

    fn pawn(row: usize, col: usize) -> Action {
        Action::Move(Position::new(row, col))
    }

    /// A boxed in at (4,3) with B directly to its right and a wall behind B.
    fn boxed_in(engine: &Engine, walls_in_hand: usize) -> GameState {
        let players = [
            Player::new(Color::A, Position::new(4, 3), 8, walls_in_hand),
            Player::new(Color::B, Position::new(4, 4), 0, 10),
        ];
        let walls = [
            Wall::horizontal(4, 2),
            Wall::horizontal(5, 3),
            Wall::vertical(4, 3),
            Wall::vertical(3, 5),
        ];

        GameState::from_board(9, players, &walls, engine).unwrap()
    }

    #[test]
    fn test_easy_opening_is_pawn_moves_only() {
        let engine = Engine::default();
        let game_state = GameState::standard(&engine);
        let options = BotOptions::default();

        for ply in 0..5 {
            assert_eq!(
                moves_by_difficulty(&engine, &game_state, Color::A, ply, Difficulty::Easy, &options),
                vec![pawn(3, 0), pawn(5, 0), pawn(4, 1)]
            );
        }
    }

    #[test]
    fn test_classify_opening() {
        let engine = Engine::default();
        let game_state = GameState::standard(&engine);
        let moves = classify_moves(&engine, &game_state, Color::A).unwrap();

        assert_eq!(moves.intelligent.len(), 17);
        assert_eq!(moves.intelligent[0], pawn(4, 1));
        assert_eq!(moves.intelligent[1], Action::Wall(Wall::vertical(3, 1)));
        assert!(moves.intelligent[1..].iter().all(|action| action.is_wall()));

        assert_eq!(moves.other.len(), 114);
        assert_eq!(&moves.other[..2], &[pawn(3, 0), pawn(5, 0)]);
    }

    #[test]
    fn test_classify_without_walls_in_hand() {
        let engine = Engine::default();
        let players = [
            Player::new(Color::A, Position::new(4, 0), 8, 0),
            Player::starting(Color::B, 9),
        ];
        let game_state = GameState::new(9, players, &engine).unwrap();
        let moves = classify_moves(&engine, &game_state, Color::A).unwrap();

        assert_eq!(moves.intelligent, vec![pawn(4, 1)]);
        assert_eq!(moves.other, vec![pawn(3, 0), pawn(5, 0)]);
    }

    #[test]
    fn test_classify_skip_when_stuck_without_walls() {
        let engine = Engine::default();
        let game_state = boxed_in(&engine, 0);
        let moves = classify_moves(&engine, &game_state, Color::A).unwrap();

        assert_eq!(moves.into_ordered(), vec![Action::Skip]);
        assert_eq!(pawn_moves(&game_state, Color::A), vec![Action::Skip]);
    }

    #[test]
    fn test_stuck_with_walls_in_hand_has_no_pawn_candidates() {
        let engine = Engine::default();
        let game_state = boxed_in(&engine, 3);

        assert!(pawn_moves(&game_state, Color::A).is_empty());

        let moves = classify_moves(&engine, &game_state, Color::A).unwrap();
        assert!(!moves.is_empty());
        assert!(moves.into_ordered().iter().all(|action| action.is_wall()));
    }

    #[test]
    fn test_tiers_at_root() {
        let engine = Engine::default();
        let game_state = GameState::standard(&engine);
        let options = BotOptions::default();
        let candidates = |difficulty, ply| {
            moves_by_difficulty(&engine, &game_state, Color::A, ply, difficulty, &options)
        };

        assert_eq!(candidates(Difficulty::Medium, 0).len(), 3);
        assert_eq!(candidates(Difficulty::Hard, 0).len(), 131);
        assert_eq!(candidates(Difficulty::Hard, 0)[0], pawn(4, 1));
        assert_eq!(candidates(Difficulty::Hard, 1).len(), 3);
        assert_eq!(
            candidates(Difficulty::Impossible, 0).len(),
            17 + options.other_wall_sample
        );
        assert_eq!(
            candidates(Difficulty::Impossible, 1).len(),
            options.second_ply_intelligent + options.second_ply_other
        );
        assert_eq!(candidates(Difficulty::Impossible, 2).len(), 3);
    }
}
