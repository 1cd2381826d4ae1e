use std::io::{BufRead, Write};
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use shutbox_core::*;

use crate::render;
use crate::storage::FileStore;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Roll,
    Dice(DiceCount),
    Toggle(TilePos),
    Confirm,
    Hint,
    NewGame,
    Help,
    Quit,
}

impl FromStr for Input {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        Ok(match s.as_str() {
            "r" | "roll" => Self::Roll,
            "1" => Self::Dice(DiceCount::One),
            "2" => Self::Dice(DiceCount::Two),
            "c" | "confirm" | "s" | "shut" => Self::Confirm,
            "h" | "hint" => Self::Hint,
            "n" | "new" => Self::NewGame,
            "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => Self::Toggle(parse_tile(other)?),
        })
    }
}

/// Parses `f3`, `m7`, `b1`: row letter then column `1..=9`.
fn parse_tile(s: &str) -> Result<TilePos> {
    let mut chars = s.chars();
    let row = match chars.next() {
        Some('f') => FRONT_ROW,
        Some('m') => MIDDLE_ROW,
        Some('b') => BACK_ROW,
        _ => bail!("unknown command `{}`, type ? for help", s),
    };
    let col: Col = chars
        .as_str()
        .parse()
        .map_err(|_| anyhow!("expected a column 1-9 after the row in `{}`", s))?;
    if !(1..=COLS).contains(&col) {
        bail!("column {} is off the board, use 1-9", col);
    }
    Ok((row, col - 1))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive game bound to a die source, statistics and an output stream.
pub struct Session<D> {
    engine: PlayEngine,
    dice: D,
    stats: PlayStats,
    store: Option<FileStore>,
    roll_delay: Duration,
}

impl<D: DiceSource> Session<D> {
    pub fn new(
        config: GameConfig,
        dice: D,
        store: Option<FileStore>,
        roll_delay: Duration,
    ) -> Self {
        let stats = store
            .as_ref()
            .map(FileStore::load_or_default)
            .unwrap_or_default();
        Self {
            engine: PlayEngine::new(config),
            dice,
            stats,
            store,
            roll_delay,
        }
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn stats(&self) -> &PlayStats {
        &self.stats
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        writeln!(out, "{}", render::HELP)?;
        self.draw(&mut out)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let flow = match line.parse::<Input>() {
                Ok(input) => self.apply(input, &mut out)?,
                Err(err) => {
                    writeln!(out, "{err}")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
            self.draw(&mut out)?;
        }

        Ok(())
    }

    fn apply<W: Write>(&mut self, input: Input, out: &mut W) -> Result<Flow> {
        log::trace!("Input: {:?}", input);
        match input {
            Input::Roll => self.roll(out)?,
            Input::Dice(count) => {
                if let Err(err) = self.engine.set_dice_count(count) {
                    writeln!(out, "{err}")?;
                }
            }
            Input::Toggle(pos) => {
                if let Err(err) = self.engine.toggle(pos) {
                    writeln!(out, "{}{}: {}", render::row_label(pos.0), pos.1 + 1, err)?;
                }
            }
            Input::Confirm => match self.engine.confirm() {
                Ok(ConfirmOutcome::Rejected { selected, target }) => {
                    writeln!(out, "Selected tiles add up to {selected}, need {target}")?;
                }
                Ok(ConfirmOutcome::Ignored) => writeln!(out, "Roll first")?,
                Ok(_) => self.record_if_finished(),
                Err(err) => writeln!(out, "{err}")?,
            },
            Input::Hint => self.hint(out)?,
            Input::NewGame => self.engine.reset(),
            Input::Help => writeln!(out, "{}", render::HELP)?,
            Input::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn roll<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.engine.is_finished() {
            self.engine.reset();
        }

        match self.engine.start_roll() {
            Ok(RollOutcome::Rolling) => {}
            Ok(_) => return Ok(()),
            Err(err) => {
                writeln!(out, "{err}")?;
                return Ok(());
            }
        }

        writeln!(out, "Rolling...")?;
        out.flush()?;
        if !self.roll_delay.is_zero() {
            thread::sleep(self.roll_delay);
        }

        match self.engine.finish_roll(&mut self.dice)? {
            RollOutcome::Ready(roll) | RollOutcome::Lost(roll) => {
                writeln!(out, "{}", render::dice_line(roll))?;
            }
            _ => {}
        }
        self.record_if_finished();
        Ok(())
    }

    fn hint<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(target) = self.engine.target() else {
            writeln!(out, "Roll first")?;
            return Ok(());
        };

        match suggest_selection(target, self.engine.board(), self.engine.config().rules) {
            Some(selection) => {
                let tiles: Vec<String> = selection
                    .iter()
                    .map(|(row, col)| format!("{}{}", render::row_label(row), col + 1))
                    .collect();
                writeln!(out, "Try {}", tiles.join(" "))?;
            }
            None => writeln!(out, "Nothing reaches {target}")?,
        }
        Ok(())
    }

    fn record_if_finished(&mut self) {
        let Some(summary) = self.engine.summary() else {
            return;
        };

        self.stats.record(&summary);
        log::info!(
            "Game over, won: {}, score: {}, games played: {}",
            summary.won,
            summary.score,
            self.stats.games_played
        );
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.stats) {
                log::error!("Could not save stats to {}: {:#}", store.path().display(), err);
            }
        }
    }

    fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out)?;
        write!(out, "{}", render::board_view(&self.engine))?;
        writeln!(out, "{}", render::status_line(&self.engine))?;
        write!(out, "> ")?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn session(faces: &[DieFace]) -> Session<ScriptedDice> {
        Session::new(
            GameConfig::default(),
            ScriptedDice::new(faces.to_vec()).unwrap(),
            None,
            Duration::ZERO,
        )
    }

    fn play(session: &mut Session<ScriptedDice>, script: &str) -> String {
        let mut out = Vec::new();
        session.run(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!("r".parse::<Input>().unwrap(), Input::Roll);
        assert_eq!(" C ".parse::<Input>().unwrap(), Input::Confirm);
        assert_eq!("1".parse::<Input>().unwrap(), Input::Dice(DiceCount::One));
        assert_eq!("f3".parse::<Input>().unwrap(), Input::Toggle((FRONT_ROW, 2)));
        assert_eq!("B9".parse::<Input>().unwrap(), Input::Toggle((BACK_ROW, 8)));
        assert_eq!("q".parse::<Input>().unwrap(), Input::Quit);
    }

    #[test]
    fn rejects_bad_commands() {
        assert!("x".parse::<Input>().is_err());
        assert!("f0".parse::<Input>().is_err());
        assert!("m10".parse::<Input>().is_err());
        assert!("b".parse::<Input>().is_err());
    }

    #[test]
    fn scripted_turn_shuts_chain() {
        let mut session = session(&[4, 6]);

        let output = play(&mut session, "r\nf1\nm1\nc\nq\n");

        assert!(output.contains("Dice: 4 + 6 = 10"));
        assert!(session.engine().board().tile_at((0, 0)).is_shut());
        assert!(session.engine().board().tile_at((1, 0)).is_shut());
        assert_eq!(session.engine().phase(), TurnPhase::Roll);
    }

    #[test]
    fn blocked_tile_reports_error() {
        let mut session = session(&[6, 6]);

        let output = play(&mut session, "r\nm4\nq\n");

        assert!(output.contains("M4: Tile is not available"));
        assert!(session.engine().selection().is_empty());
    }

    #[test]
    fn mismatched_confirm_is_explained() {
        let mut session = session(&[1, 2]);

        let output = play(&mut session, "r\nf1\nc\nq\n");

        assert!(output.contains("Selected tiles add up to 1, need 3"));
        assert_eq!(session.engine().board(), &Board::new());
    }

    #[test]
    fn hint_names_tiles() {
        let mut session = session(&[1, 1]);

        let output = play(&mut session, "r\nh\nq\n");

        assert!(output.contains("Try F2"));
    }

    #[test]
    fn loss_is_recorded() {
        let board_engine = {
            let open = [(2, 8)];
            let shut: Vec<TilePos> = positions().filter(|pos| !open.contains(pos)).collect();
            let board = Board::from_shut_positions(&shut).unwrap();
            PlayEngine::with_board(GameConfig::default(), board).unwrap()
        };
        let mut session = session(&[1, 1]);
        session.engine = board_engine;

        let output = play(&mut session, "r\nq\n");

        assert!(output.contains("Game Over! No moves available. Score: 9"));
        assert_eq!(session.stats().games_played, 1);
        assert_eq!(session.stats().best_score, Some(9));
    }
}
