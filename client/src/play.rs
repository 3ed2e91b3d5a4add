use anyhow::{anyhow, Result};
use engine::Controller;
use log::{info, warn};
use quoridor::{Action, Game, GameOutcome, GameState, TurnOutcome};

pub type Seat = Box<dyn Controller<Action = Action, State = GameState>>;

/// Runs the turn loop until the game ends or `max_turns` actions have been played.
///
/// Returns `None` when the turn limit is reached first. A seat that gives up on its turn ends the loop with an
/// error.
pub fn run_game(
    game: &mut Game,
    seats: &mut [Seat; 2],
    max_turns: Option<usize>,
    show_board: bool,
) -> Result<Option<GameOutcome>> {
    loop {
        if max_turns.map_or(false, |max_turns| game.history().len() >= max_turns) {
            info!("Stopping after {} turns without a result", game.history().len());
            return Ok(None);
        }

        if show_board {
            println!("{}", game.game_state());
        }

        let color = game.to_move();
        let seat = &mut seats[color.index()];
        let action = seat
            .on_turn(game.game_state())
            .recv()
            .map_err(|_| anyhow!("{} gave up the turn", color))?;
        seat.on_end_turn();

        match game.apply(action) {
            Ok(TurnOutcome::Continue { .. }) => {}
            Ok(TurnOutcome::Over(outcome)) => {
                if show_board {
                    println!("{}", game.game_state());
                }
                return Ok(Some(outcome));
            }
            Err(err) => warn!("{}", err),
        }
    }
}

pub fn describe(outcome: Option<GameOutcome>) -> String {
    match outcome {
        Some(GameOutcome::Won(color)) => format!("{} wins", color),
        Some(GameOutcome::Drawn) => "Draw by repetition".to_string(),
        None => "No result within the turn limit".to_string(),
    }
}
