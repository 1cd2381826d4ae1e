use std::fmt::Write;

use shutbox_core::*;

const ROW_LABELS: [char; ROWS as usize] = ['F', 'M', 'B'];

pub fn row_label(row: Row) -> char {
    ROW_LABELS[usize::from(row)]
}

/// Board drawn back row first, the way it sits on the table.
pub fn board_view(engine: &PlayEngine) -> String {
    let board = engine.board();
    let mut view = String::from("    ");
    for col in 0..COLS {
        let _ = write!(view, " {:^3}", col + 1);
    }
    view.push('\n');

    for row in (0..ROWS).rev() {
        let _ = write!(view, "  {} ", row_label(row));
        for tile in board.tiles_by_row(row) {
            let _ = write!(view, " {}", tile_cell(engine, tile));
        }
        view.push('\n');
    }

    view
}

fn tile_cell(engine: &PlayEngine, tile: Tile) -> String {
    if tile.is_shut() {
        " - ".to_owned()
    } else if engine.selection().contains(tile.pos()) {
        format!("[{}]", tile.value)
    } else if engine.can_select(tile.pos()) {
        format!(" {} ", tile.value)
    } else {
        format!("({})", tile.value)
    }
}

pub fn dice_line(roll: DiceRoll) -> String {
    match roll.second {
        Some(second) => format!("Dice: {} + {} = {}", roll.first, second, roll.sum()),
        None => format!("Die: {}", roll.first),
    }
}

pub fn status_line(engine: &PlayEngine) -> String {
    match engine.status() {
        GameStatus::Start => "Roll the dice to start!".to_owned(),
        GameStatus::Won => "Congratulations! You shut the box!".to_owned(),
        GameStatus::Lost => format!(
            "Game Over! No moves available. Score: {}",
            engine.final_score().unwrap_or_default()
        ),
        GameStatus::Playing => match engine.target() {
            Some(target) => format!("Selected: {} / {}", engine.selected_sum(), target),
            None if engine.can_roll_one_die() => {
                format!("Roll again! ({} dice, type 1 or 2 to switch)", dice_count(engine))
            }
            None => "Roll again!".to_owned(),
        },
    }
}

fn dice_count(engine: &PlayEngine) -> u8 {
    match engine.dice_count() {
        DiceCount::One => 1,
        DiceCount::Two => 2,
    }
}

pub const HELP: &str = "\
Commands:
  r         roll the dice (starts a new game once finished)
  1 / 2     roll one or two dice (one die needs rows F and M shut, no tile above 6)
  f3 m7 b1  select or deselect a tile by row (Front, Middle, Back) and column
  c         shut the selected tiles
  h         suggest tiles for the current roll
  n         new game
  ?         this help
  q         quit

Tiles: [5] selected, 5 selectable, (5) blocked, - shut";
