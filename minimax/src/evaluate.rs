use quoridor::{Color, Engine, GameState};

/// Subtracted from a position in which the opponent has already won.
pub const LOSS_PENALTY: f32 = 1000.0;
/// Added to the loss penalty for every ply of search still remaining, so later losses rank above sooner ones.
pub const LOSS_DEPTH_PENALTY: f32 = 50.0;
const PROXIMITY_WEIGHT: f32 = 0.3;

/// Static score of `game_state` from the point of view of `maximizing`.
///
/// Route lengths count cells, start included. The base score is the opponent's route minus our own plus
/// the difference in walls in hand, with a small bonus that grows as our own route shortens.
pub fn evaluate(engine: &Engine, game_state: &GameState, maximizing: Color, depth: usize) -> f32 {
    let minimizing = maximizing.opponent();

    let (Some(own), Some(opponent)) = (
        game_state.shortest_path_len(maximizing, engine),
        game_state.shortest_path_len(minimizing, engine),
    ) else {
        return f32::NEG_INFINITY;
    };

    if game_state.has_reached_goal(maximizing) {
        return f32::INFINITY;
    }

    let walls_advantage = game_state.player(maximizing).remaining_walls as f32
        - game_state.player(minimizing).remaining_walls as f32;
    let score =
        opponent as f32 - own as f32 + walls_advantage + PROXIMITY_WEIGHT / own as f32;

    if game_state.has_reached_goal(minimizing) {
        score - LOSS_PENALTY - LOSS_DEPTH_PENALTY * depth as f32
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use quoridor::{Action, Player, Position, Wall};

    #[test]
    fn test_evaluate_opening() {
        let engine = Engine::default();
        let game_state = GameState::standard(&engine);

        assert_approx_eq!(evaluate(&engine, &game_state, Color::A, 3), 0.3 / 9.0);
        assert_approx_eq!(evaluate(&engine, &game_state, Color::B, 3), 0.3 / 9.0);
    }

    #[test]
    fn test_evaluate_counts_walls_and_routes() {
        let engine = Engine::default();
        let game_state = GameState::standard(&engine)
            .transition(&Action::Wall(Wall::vertical(3, 1)), Color::B, &engine);

        // A now needs ten cells and B has one wall fewer.
        assert_approx_eq!(
            evaluate(&engine, &game_state, Color::A, 0),
            9.0 - 10.0 + 1.0 + 0.3 / 10.0
        );
        assert_approx_eq!(
            evaluate(&engine, &game_state, Color::B, 0),
            10.0 - 9.0 - 1.0 + 0.3 / 9.0
        );
    }

    #[test]
    fn test_evaluate_win_and_loss() {
        let engine = Engine::default();
        let players = [
            Player::new(Color::A, Position::new(4, 8), 8, 10),
            Player::new(Color::B, Position::new(0, 5), 0, 10),
        ];
        let game_state = GameState::new(9, players, &engine).unwrap();

        assert_eq!(evaluate(&engine, &game_state, Color::A, 2), f32::INFINITY);
        assert_approx_eq!(
            evaluate(&engine, &game_state, Color::B, 2),
            1.0 - 6.0 + 0.0 + 0.3 / 6.0 - 1000.0 - 100.0
        );
    }

    #[test]
    fn test_evaluate_unreachable_goal() {
        let engine = Engine::default();
        let players = [
            Player::new(Color::A, Position::new(0, 0), 8, 10),
            Player::starting(Color::B, 9),
        ];
        let game_state = GameState::new(9, players, &engine)
            .unwrap()
            .transition(&Action::Wall(Wall::vertical(0, 1)), Color::B, &engine)
            .transition(&Action::Wall(Wall::horizontal(2, 0)), Color::B, &engine);

        assert_eq!(evaluate(&engine, &game_state, Color::A, 1), f32::NEG_INFINITY);
        assert_eq!(evaluate(&engine, &game_state, Color::B, 1), f32::NEG_INFINITY);
    }
}
