use std::collections::{BTreeMap, BTreeSet};

use super::{Direction, EdgeSet, PathFinder, Player, Position, Wall};

/// Pawn destinations keyed by direction.
///
/// Stepping onto the opponent becomes a straight jump over it. When a wall sits between the pawns or
/// directly behind the opponent that direction is dropped entirely; there is no diagonal side-step.
pub fn valid_moves(
    player: Position,
    opponent: Position,
    grid_size: usize,
    blocked: &EdgeSet,
) -> BTreeMap<Direction, Position> {
    let mut moves = BTreeMap::new();

    for direction in Direction::ALL {
        let Some(next) = player.step(direction, 1, grid_size) else {
            continue;
        };

        if blocked.is_blocked(player, next) {
            continue;
        }

        if next != opponent {
            moves.insert(direction, next);
            continue;
        }

        if let Some(landing) = next.step(direction, 1, grid_size) {
            if !blocked.is_blocked(next, landing) {
                moves.insert(direction, landing);
            }
        }
    }

    moves
}

/// Geometric legality of a wall with the given endpoints, in either order.
pub fn is_valid_wall_placement(
    start: Position,
    end: Position,
    grid_size: usize,
    placed_walls: &[Wall],
    forbidden_walls: &BTreeSet<Wall>,
) -> bool {
    let Some(wall) = Wall::new(start, end) else {
        return false;
    };

    wall.is_within_bounds(grid_size)
        && !wall.is_along_border(grid_size)
        && !placed_walls.contains(&wall)
        && !placed_walls.iter().any(|placed| placed.intersects(&wall))
        && !forbidden_walls.contains(&wall)
}

/// Walls that would leave a player with no route to its goal column.
///
/// Only candidates that join up with two existing barriers can close off a region, where the board edge
/// counts as a barrier, so everything else is skipped. A surviving candidate that cuts a player's current
/// shortest path is first checked for a local detour around each cut road, and only when that fails is
/// the full reachability question asked.
pub fn find_forbidden_walls(
    path_finder: &PathFinder,
    grid_size: usize,
    placed_walls: &[Wall],
    blocked: &EdgeSet,
    players: &[Player; 2],
) -> BTreeSet<Wall> {
    let paths = players.map(|player| {
        path_finder.shortest_path(player.position, player.goal_col, grid_size, blocked)
    });

    Wall::candidates(grid_size)
        .filter(|candidate| !placed_walls.contains(candidate))
        .filter(|candidate| joins_two_barriers(candidate, placed_walls, grid_size))
        .filter(|candidate| {
            let cut = candidate.blocked_edges().collect::<Vec<_>>();
            let blocked_with_candidate = blocked.with(cut.iter().copied());

            players.iter().zip(paths.iter()).any(|(player, path)| {
                let Some(path) = path else {
                    return false;
                };

                if !candidate.blocks_path(path) {
                    return false;
                }

                let detour_exists = cut.iter().all(|edge| {
                    let (a, b) = edge.cells();
                    path_finder.cells_connected(a, b, grid_size, &blocked_with_candidate)
                });

                !detour_exists
                    && !path_finder.exists_path(
                        player.position,
                        player.goal_col,
                        grid_size,
                        &blocked_with_candidate,
                    )
            })
        })
        .collect()
}

/// Candidates in generation order that pass `is_valid_wall_placement`.
pub fn find_valid_walls(
    grid_size: usize,
    placed_walls: &[Wall],
    forbidden_walls: &BTreeSet<Wall>,
) -> Vec<Wall> {
    Wall::candidates(grid_size)
        .filter(|wall| {
            is_valid_wall_placement(
                wall.start(),
                wall.end(),
                grid_size,
                placed_walls,
                forbidden_walls,
            )
        })
        .collect()
}

fn joins_two_barriers(candidate: &Wall, placed_walls: &[Wall], grid_size: usize) -> bool {
    let touching = placed_walls
        .iter()
        .filter(|placed| placed.shares_point_with(candidate))
        .take(2)
        .count();

    touching == 2 || (touching == 1 && candidate.touches_border(grid_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn blocked_by(walls: &[Wall]) -> EdgeSet {
        walls.iter().flat_map(|wall| wall.blocked_edges()).collect()
    }

    fn standard_players() -> [Player; 2] {
        [Player::starting(Color::A, 9), Player::starting(Color::B, 9)]
    }

    #[test]
    fn test_valid_moves_open_board() {
        let moves = valid_moves(Position::new(4, 4), Position::new(0, 0), 9, &EdgeSet::new());

        assert_eq!(
            moves.into_iter().collect::<Vec<_>>(),
            vec![
                (Direction::Up, Position::new(3, 4)),
                (Direction::Down, Position::new(5, 4)),
                (Direction::Left, Position::new(4, 3)),
                (Direction::Right, Position::new(4, 5)),
            ]
        );
    }

    #[test]
    fn test_valid_moves_on_edge() {
        let moves = valid_moves(Position::new(4, 0), Position::new(4, 8), 9, &EdgeSet::new());

        assert_eq!(moves.len(), 3);
        assert!(!moves.contains_key(&Direction::Left));
    }

    #[test]
    fn test_valid_moves_respects_walls() {
        let blocked = blocked_by(&[Wall::vertical(3, 1)]);
        let moves = valid_moves(Position::new(4, 0), Position::new(4, 8), 9, &blocked);

        assert_eq!(
            moves.values().copied().collect::<Vec<_>>(),
            vec![Position::new(3, 0), Position::new(5, 0)]
        );
    }

    #[test]
    fn test_jump_over_adjacent_opponent() {
        let moves = valid_moves(Position::new(4, 3), Position::new(4, 4), 9, &EdgeSet::new());

        assert_eq!(moves[&Direction::Right], Position::new(4, 5));
        assert_eq!(moves[&Direction::Up], Position::new(3, 3));
        assert_eq!(moves[&Direction::Down], Position::new(5, 3));
        assert_eq!(moves[&Direction::Left], Position::new(4, 2));
        assert!(!moves.values().any(|position| *position == Position::new(4, 4)));
    }

    #[test]
    fn test_jump_blocked_behind_opponent_has_no_diagonal() {
        let blocked = blocked_by(&[Wall::vertical(4, 5)]);
        let moves = valid_moves(Position::new(4, 3), Position::new(4, 4), 9, &blocked);

        assert!(!moves.contains_key(&Direction::Right));
        assert_eq!(moves.len(), 3);
        assert!(!moves.values().any(|p| *p == Position::new(3, 4) || *p == Position::new(5, 4)));
    }

    #[test]
    fn test_jump_blocked_between_pawns() {
        let blocked = blocked_by(&[Wall::vertical(4, 4)]);
        let moves = valid_moves(Position::new(4, 3), Position::new(4, 4), 9, &blocked);

        assert!(!moves.contains_key(&Direction::Right));
    }

    #[test]
    fn test_jump_off_board_is_dropped() {
        let moves = valid_moves(Position::new(4, 7), Position::new(4, 8), 9, &EdgeSet::new());

        assert!(!moves.contains_key(&Direction::Right));
    }

    #[test]
    fn test_is_valid_wall_placement() {
        let placed = vec![Wall::horizontal(3, 2)];
        let forbidden = BTreeSet::from([Wall::vertical(5, 5)]);
        let valid = |start: (usize, usize), end: (usize, usize)| {
            is_valid_wall_placement(
                Position::new(start.0, start.1),
                Position::new(end.0, end.1),
                9,
                &placed,
                &forbidden,
            )
        };

        assert!(valid((6, 6), (6, 8)));
        assert!(valid((6, 8), (6, 6)));
        assert!(valid((3, 4), (3, 6)));
        assert!(!valid((3, 2), (3, 4)), "duplicate");
        assert!(!valid((3, 3), (3, 5)), "overlap");
        assert!(!valid((2, 3), (4, 3)), "cross");
        assert!(!valid((7, 5), (5, 5)), "forbidden in either order");
        assert!(!valid((0, 2), (0, 4)), "along the top border");
        assert!(!valid((2, 9), (4, 9)), "along the right border");
        assert!(!valid((8, 8), (8, 10)), "out of bounds");
        assert!(!valid((1, 1), (1, 2)), "too short");
    }

    #[test]
    fn test_no_forbidden_walls_on_empty_board() {
        let forbidden =
            find_forbidden_walls(&PathFinder::default(), 9, &[], &EdgeSet::new(), &standard_players());

        assert!(forbidden.is_empty());
        assert_eq!(find_valid_walls(9, &[], &forbidden).len(), 128);
    }

    #[test]
    fn test_wall_with_detour_is_not_forbidden() {
        // Open pocket to the right of A's start, the candidate closes its left side.
        let placed = vec![Wall::horizontal(3, 1), Wall::horizontal(5, 1)];
        let blocked = blocked_by(&placed);
        let candidate = Wall::vertical(3, 1);
        let path_finder = PathFinder::default();
        let players = standard_players();

        let path = path_finder
            .shortest_path(players[0].position, players[0].goal_col, 9, &blocked)
            .unwrap();
        assert!(candidate.blocks_path(&path));

        let forbidden = find_forbidden_walls(&path_finder, 9, &placed, &blocked, &players);

        assert!(!forbidden.contains(&candidate));
        assert!(find_valid_walls(9, &placed, &forbidden).contains(&candidate));
    }

    #[test]
    fn test_wall_closing_dead_end_corridor_is_forbidden() {
        let placed = vec![Wall::vertical(0, 1), Wall::vertical(2, 1), Wall::vertical(4, 1)];
        let blocked = blocked_by(&placed);
        let players = [
            Player::new(Color::A, Position::new(0, 0), 8, 10),
            Player::starting(Color::B, 9),
        ];
        let candidate = Wall::horizontal(6, 0);

        let forbidden =
            find_forbidden_walls(&PathFinder::default(), 9, &placed, &blocked, &players);

        assert!(forbidden.contains(&candidate));
        assert!(!find_valid_walls(9, &placed, &forbidden).contains(&candidate));
        assert!(is_valid_wall_placement(
            candidate.start(),
            candidate.end(),
            9,
            &placed,
            &BTreeSet::new()
        ));
    }

    #[test]
    fn test_forbidden_walls_keep_every_player_connected() {
        let placed = vec![Wall::vertical(0, 1), Wall::vertical(2, 1), Wall::vertical(4, 1)];
        let blocked = blocked_by(&placed);
        let players = [
            Player::new(Color::A, Position::new(0, 0), 8, 10),
            Player::starting(Color::B, 9),
        ];
        let path_finder = PathFinder::default();
        let forbidden = find_forbidden_walls(&path_finder, 9, &placed, &blocked, &players);

        for wall in find_valid_walls(9, &placed, &forbidden) {
            let with_wall = blocked.with(wall.blocked_edges());
            for player in &players {
                assert!(
                    path_finder.exists_path(player.position, player.goal_col, 9, &with_wall),
                    "{:?} cuts off {:?}",
                    wall,
                    player.color
                );
            }
        }

        for wall in &forbidden {
            let with_wall = blocked.with(wall.blocked_edges());
            assert!(players.iter().any(|player| {
                !path_finder.exists_path(player.position, player.goal_col, 9, &with_wall)
            }));
        }
    }

    #[test]
    fn test_joins_two_barriers() {
        let placed = vec![Wall::vertical(0, 1)];

        assert!(joins_two_barriers(&Wall::horizontal(2, 0), &placed, 9));
        assert!(!joins_two_barriers(&Wall::horizontal(2, 1), &placed, 9));
        assert!(!joins_two_barriers(&Wall::horizontal(4, 4), &placed, 9));
    }
}
