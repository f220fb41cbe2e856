//! Plain-text rendering of the ledger.
use std::fmt::Write;

use game_core::{BoardDimensions, GameState, PlayerData};

/// Marker drawn for the `index`-th player in ledger order.
fn marker(index: usize, player: &PlayerData) -> char {
    let letter = u8::try_from(index)
        .ok()
        .filter(|&i| i < 26)
        .map_or('*', |i| char::from(b'A' + i));
    if player.is_alive() {
        letter
    } else {
        letter.to_ascii_lowercase()
    }
}

/// Draws the board with one marker per player.
///
/// Dead players are lowercase, shared cells show `+`, empty cells `.`.
/// Players outside the board are left out.
pub fn render_board(state: &GameState, board: BoardDimensions) -> String {
    let width = board.width as usize;
    let height = board.height as usize;
    let mut cells = vec!['.'; width * height];

    for (index, player) in state.players.values().enumerate() {
        if !board.contains(player.position) {
            continue;
        }
        let cell = &mut cells[player.position.y as usize * width + player.position.x as usize];
        *cell = if *cell == '.' {
            marker(index, player)
        } else {
            '+'
        };
    }

    let mut out = String::new();
    for row in cells.chunks(width.max(1)) {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}

/// One line per player: marker, name, position and balances.
pub fn render_table(state: &GameState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<3} {:<44} {:>8} {:>6} {:>6} {:>6}",
        "", "player", "at", "points", "range", "hearts"
    );
    for (index, player) in state.players.values().enumerate() {
        let _ = writeln!(
            out,
            "{:<3} {:<44} {:>8} {:>6} {:>6} {:>6}",
            marker(index, player),
            player.name.as_str(),
            player.position.to_string(),
            player.points,
            player.range,
            player.hearts,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use game_core::{Coordinates, PlayerId, SpawnStats};

    use super::*;

    fn state(players: &[(&str, i32, i32, i64)]) -> GameState {
        let mut state = GameState::default();
        for &(name, x, y, hearts) in players {
            let mut data = PlayerData::spawned(
                PlayerId::from(name),
                "",
                Coordinates::new(x, y),
                SpawnStats::default(),
            );
            data.hearts = hearts;
            state.players.insert(data.name.clone(), data);
        }
        state
    }

    #[test]
    fn board_marks_players_by_ledger_order() {
        let state = state(&[("a", 0, 0, 3), ("b", 2, 1, 0), ("c", 2, 1, 3), ("d", 9, 9, 3)]);
        let board = render_board(&state, BoardDimensions::new(3, 2));

        assert_eq!(board, "A..\n..+\n");
    }

    #[test]
    fn dead_players_are_lowercase() {
        let state = state(&[("a", 0, 0, 3), ("b", 1, 0, 0)]);
        assert_eq!(render_board(&state, BoardDimensions::new(2, 1)), "Ab\n");
    }

    #[test]
    fn table_lists_every_player() {
        let state = state(&[("alice", 1, 2, 3), ("bob", -4, 0, 1)]);
        let table = render_table(&state);

        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("alice"));
        assert!(table.contains("[-4,0]"));
    }
}
