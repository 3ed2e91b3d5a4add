use anyhow::{bail, Result};
use crossbeam::channel::{bounded, Receiver};
use engine::Controller;
use log::warn;
use quoridor::{Action, Color, Direction, GameState};
use std::io::BufRead;

/// A seat played from the terminal.
///
/// Reads one line per attempt and asks again until the line names a legal action. A player that can neither
/// step nor place a wall skips without being asked.
pub struct HumanController<R> {
    color: Color,
    input: R,
}

impl<R: BufRead> HumanController<R> {
    pub fn new(color: Color, input: R) -> Self {
        Self { color, input }
    }

    fn read_action(&mut self, game_state: &GameState) -> Option<Action> {
        let valid_actions = game_state.valid_actions(self.color);
        if valid_actions == [Action::Skip] {
            println!("{}", skip_notice(self.color));
            return Some(Action::Skip);
        }

        loop {
            println!("{} to move (help for notation):", self.color);

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => {
                    warn!("Failed to read input: {}", err);
                    return None;
                }
            }

            let line = line.trim();
            if line.eq_ignore_ascii_case("help") {
                print_help();
                continue;
            }

            match parse_action(line, game_state, self.color) {
                Ok(action) => return Some(action),
                Err(err) => println!("{}", err),
            }
        }
    }
}

impl<R: BufRead> Controller for HumanController<R> {
    type Action = Action;
    type State = GameState;

    fn on_turn(&mut self, game_state: &GameState) -> Receiver<Action> {
        let (sender, receiver) = bounded(1);

        // End of input drops the sender, which the game loop treats as the seat giving up.
        if let Some(action) = self.read_action(game_state) {
            let _ = sender.send(action);
        }

        receiver
    }
}

/// Parses a line of input into one of `color`'s legal actions.
pub fn parse_action(input: &str, game_state: &GameState, color: Color) -> Result<Action> {
    let action = match input.parse::<Direction>() {
        Ok(direction) => match game_state.valid_moves(color).get(&direction) {
            Some(destination) => Action::Move(*destination),
            None => bail!("{} cannot move {}", color, direction),
        },
        Err(_) => input.parse::<Action>()?,
    };

    if !game_state.valid_actions(color).contains(&action) {
        bail!("{} is not a legal action for {}", action, color);
    }

    Ok(action)
}

fn skip_notice(color: Color) -> String {
    format!("{} cannot move and has no legal wall, skipping.", color)
}

fn print_help() {
    println!("  r,c        move the pawn to row r, column c");
    println!("  up|down|left|right");
    println!("             step the pawn, jumping an adjacent opponent");
    println!("  r,ch       wall from intersection (r,c) two units to the right");
    println!("  r,cv       wall from intersection (r,c) two units down");
    println!("  skip       pass, only when the pawn cannot move");
}
