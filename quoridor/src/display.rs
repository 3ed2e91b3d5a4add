use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

use crate::{Color, GameState, Orientation, Position};

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let grid_size = self.grid_size();
        let blocked = self.blocked_edges();
        let pawn_a = self.player(Color::A).position;
        let pawn_b = self.player(Color::B).position;

        let wall_centers = self
            .placed_walls()
            .iter()
            .map(|wall| (wall.midpoint(), wall.orientation()))
            .collect::<HashMap<_, _>>();

        writeln!(f)?;

        write!(f, "   ")?;
        for col in 0..grid_size {
            write!(f, "{:^4}", col)?;
        }
        writeln!(f)?;

        write!(f, "   +")?;
        for _ in 0..grid_size {
            write!(f, "---+")?;
        }
        writeln!(f)?;

        for row in 0..grid_size {
            write!(f, "{:>2} |", row)?;
            for col in 0..grid_size {
                let cell = Position::new(row, col);
                let p = if cell == pawn_a {
                    "A"
                } else if cell == pawn_b {
                    "B"
                } else {
                    " "
                };
                let w = if col + 1 < grid_size && blocked.is_blocked(cell, Position::new(row, col + 1)) {
                    "█"
                } else {
                    "|"
                };
                write!(f, " {} {}", p, w)?;
            }
            writeln!(f)?;

            write!(f, "   +")?;
            for col in 0..grid_size {
                let cell = Position::new(row, col);
                let w = if row + 1 < grid_size && blocked.is_blocked(cell, Position::new(row + 1, col)) {
                    "■■■"
                } else {
                    "---"
                };
                let c = match wall_centers.get(&Position::new(row + 1, col + 1)) {
                    Some(Orientation::Horizontal) => "■",
                    Some(Orientation::Vertical) => "█",
                    None => "+",
                };
                write!(f, "{}{}", w, c)?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "  A: {} walls  B: {} walls",
            self.player(Color::A).remaining_walls,
            self.player(Color::B).remaining_walls
        )?;

        Ok(())
    }
}
