use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Start -> Playing (first roll)
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Start (reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Start,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_start(self) -> bool {
        matches!(self, Self::Start)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Start
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Roll,
    Select,
}

impl Default for TurnPhase {
    fn default() -> Self {
        Self::Roll
    }
}

/// Turn sequencing for one game: roll, select, confirm, until the board is shut or a roll
/// cannot be matched.
///
/// Every move replaces the board and selection with fresh values instead of editing them, and
/// the engine itself is `Clone`, so a copy taken between calls is a complete snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    config: GameConfig,
    board: Board,
    selection: Selection,
    status: GameStatus,
    phase: TurnPhase,
    dice_count: DiceCount,
    last_roll: Option<DiceRoll>,
    rolling: bool,
    final_score: Option<Score>,
}

impl PlayEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            board: Board::new(),
            selection: Selection::new(),
            status: Default::default(),
            phase: Default::default(),
            dice_count: Default::default(),
            last_roll: None,
            rolling: false,
            final_score: None,
        }
    }

    /// Engine starting from an arbitrary board, used to resume or to set up positions.
    pub fn with_board(config: GameConfig, board: Board) -> Result<Self> {
        board.validate()?;
        Ok(Self {
            board,
            ..Self::new(config)
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    pub fn dice_count(&self) -> DiceCount {
        self.dice_count
    }

    pub fn last_roll(&self) -> Option<DiceRoll> {
        self.last_roll
    }

    /// Sum the selection has to match, only set while selecting.
    pub fn target(&self) -> Option<Sum> {
        match (self.phase, self.rolling) {
            (TurnPhase::Select, false) => self.last_roll.map(DiceRoll::sum),
            _ => None,
        }
    }

    pub fn selected_sum(&self) -> Sum {
        self.selection.value_sum()
    }

    /// Score fixed when the game ended, `0` for a win.
    pub fn final_score(&self) -> Option<Score> {
        self.final_score
    }

    pub fn summary(&self) -> Option<GameSummary> {
        match self.status {
            GameStatus::Won => Some(GameSummary::from_board(&self.board, true)),
            GameStatus::Lost => Some(GameSummary::from_board(&self.board, false)),
            _ => None,
        }
    }

    /// Whether clicking `pos` right now would add it to the selection.
    pub fn can_select(&self, pos: TilePos) -> bool {
        if Board::validate_pos(pos).is_err() || !self.accepts_selection() {
            return false;
        }
        !self.selection.contains(pos)
            && self
                .config
                .rules
                .is_available(self.board.tile_at(pos), &self.board, &self.selection)
    }

    /// A single die is only offered once the front and middle rows are shut and nothing left
    /// open is higher than a die can show.
    pub fn can_roll_one_die(&self) -> bool {
        !self.status.is_finished()
            && self.board.is_row_shut(FRONT_ROW)
            && self.board.is_row_shut(MIDDLE_ROW)
            && self.board.max_open_value().is_none_or(|max| max <= MAX_FACE)
    }

    pub fn set_dice_count(&mut self, count: DiceCount) -> Result<ChangeOutcome> {
        self.check_not_finished()?;
        if self.rolling {
            return Ok(ChangeOutcome::NoChange);
        }
        self.check_roll_phase()?;

        if matches!(count, DiceCount::One) && !self.can_roll_one_die() {
            return Err(GameError::OneDieNotAllowed);
        }

        if self.dice_count == count {
            Ok(ChangeOutcome::NoChange)
        } else {
            log::debug!("Dice count set to {:?}", count);
            self.dice_count = count;
            Ok(ChangeOutcome::Changed)
        }
    }

    /// Rolls and resolves in one go, for callers without a reveal delay.
    pub fn roll<D: DiceSource + ?Sized>(&mut self, dice: &mut D) -> Result<RollOutcome> {
        match self.start_roll()? {
            RollOutcome::Rolling => self.finish_roll(dice),
            outcome => Ok(outcome),
        }
    }

    /// Opens the roll window; until [`finish_roll`](Self::finish_roll) every other input is
    /// ignored.
    pub fn start_roll(&mut self) -> Result<RollOutcome> {
        self.check_not_finished()?;
        if self.rolling {
            log::debug!("Roll already in flight, ignoring");
            return Ok(RollOutcome::Ignored);
        }
        self.check_roll_phase()?;

        if matches!(self.dice_count, DiceCount::One) && !self.can_roll_one_die() {
            log::warn!("Single die no longer allowed, rolling two");
            self.dice_count = DiceCount::Two;
        }

        self.rolling = true;
        self.mark_started();
        Ok(RollOutcome::Rolling)
    }

    /// Draws the dice and decides whether the game goes on.
    pub fn finish_roll<D: DiceSource + ?Sized>(&mut self, dice: &mut D) -> Result<RollOutcome> {
        self.check_not_finished()?;
        if !self.rolling {
            return Ok(RollOutcome::Ignored);
        }

        let roll = dice.roll(self.dice_count);
        let target = roll.sum();
        self.rolling = false;
        self.last_roll = Some(roll);

        if self.config.rules.can_make_sum(target, &self.board) {
            log::debug!("Rolled {:?}, select tiles for {}", roll, target);
            self.phase = TurnPhase::Select;
            Ok(RollOutcome::Ready(roll))
        } else {
            log::debug!("Rolled {:?}, no selection reaches {}", roll, target);
            self.end_game(false);
            Ok(RollOutcome::Lost(roll))
        }
    }

    /// Adds `pos` to the selection, or removes it along with anything that depended on it.
    pub fn toggle(&mut self, pos: TilePos) -> Result<SelectOutcome> {
        let pos = Board::validate_pos(pos)?;
        self.check_not_finished()?;
        if !self.accepts_selection() {
            return Ok(SelectOutcome::Ignored);
        }

        let rules = self.config.rules;
        if self.selection.contains(pos) {
            let next = self.selection.remove_with_dependents(pos, &self.board, rules);
            let removed = self.selection.len() - next.len();
            self.selection = next;
            Ok(SelectOutcome::Deselected { removed })
        } else if rules.is_available(self.board.tile_at(pos), &self.board, &self.selection) {
            self.selection = self.selection.with(pos);
            Ok(SelectOutcome::Selected)
        } else {
            Err(GameError::TileUnavailable)
        }
    }

    /// Shuts the selected tiles if they add up to the roll.
    pub fn confirm(&mut self) -> Result<ConfirmOutcome> {
        self.check_not_finished()?;
        let Some(target) = self.target() else {
            return Ok(ConfirmOutcome::Ignored);
        };

        let selected = self.selected_sum();
        if selected != target {
            log::debug!("Selection sums to {}, roll was {}", selected, target);
            return Ok(ConfirmOutcome::Rejected { selected, target });
        }

        self.board = self.board.with_shut(&self.selection);
        self.selection = Selection::new();
        self.phase = TurnPhase::Roll;

        if self.board.is_fully_shut() {
            self.end_game(true);
            Ok(ConfirmOutcome::Won)
        } else {
            Ok(ConfirmOutcome::Shut)
        }
    }

    /// Throws the current game away and starts over on a fresh board.
    pub fn reset(&mut self) {
        log::debug!("Resetting game");
        *self = Self::new(self.config);
    }

    fn accepts_selection(&self) -> bool {
        matches!(self.status, GameStatus::Playing)
            && matches!(self.phase, TurnPhase::Select)
            && !self.rolling
    }

    fn mark_started(&mut self) {
        if self.status.is_start() {
            self.status = GameStatus::Playing;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        let score = if won { 0 } else { score(&self.board) };
        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        self.final_score = Some(score);
        log::debug!("Game ended, won: {}, score: {}", won, score);
    }

    fn check_roll_phase(&self) -> Result<()> {
        if matches!(self.phase, TurnPhase::Roll) {
            Ok(())
        } else {
            Err(GameError::NotRollPhase)
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl Default for PlayEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
