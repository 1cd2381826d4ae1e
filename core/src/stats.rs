use serde::{Deserialize, Serialize};

use crate::*;

/// What a finished game leaves behind for bookkeeping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub won: bool,
    pub score: Score,
    pub front_row_shut: bool,
    pub middle_row_shut: bool,
}

impl GameSummary {
    pub fn from_board(board: &Board, won: bool) -> Self {
        Self {
            won,
            score: if won { 0 } else { score(board) },
            front_row_shut: board.is_row_shut(FRONT_ROW),
            middle_row_shut: board.is_row_shut(MIDDLE_ROW),
        }
    }
}

/// Running totals across games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayStats {
    pub games_played: u32,
    pub wins: u32,
    pub total_score: u64,
    pub best_score: Option<Score>,
    /// Games that ended with the whole front row shut.
    pub front_row_cleared: u32,
    /// Games that ended with only back-row tiles left open, or won.
    pub back_row_reached: u32,
}

impl PlayStats {
    pub fn record(&mut self, summary: &GameSummary) {
        self.games_played += 1;
        self.total_score += u64::from(summary.score);
        self.best_score = Some(
            self.best_score
                .map_or(summary.score, |best| best.min(summary.score)),
        );

        if summary.won {
            self.wins += 1;
        }
        if summary.front_row_shut {
            self.front_row_cleared += 1;
            if summary.middle_row_shut {
                self.back_row_reached += 1;
            }
        }
    }

    pub fn losses(&self) -> u32 {
        self.games_played - self.wins
    }

    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_score as f64 / f64::from(self.games_played)
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games_played)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loss(score: Score, front_row_shut: bool, middle_row_shut: bool) -> GameSummary {
        GameSummary {
            won: false,
            score,
            front_row_shut,
            middle_row_shut,
        }
    }

    #[test]
    fn empty_stats_are_zero() {
        let stats = PlayStats::default();

        assert_eq!(stats.games_played, 0);
        assert_eq!(stats.best_score, None);
        assert_eq!(stats.average_score(), 0.0);
        assert_eq!(stats.win_rate(), 0.0);
    }

    #[test]
    fn record_tracks_counts_and_best() {
        let mut stats = PlayStats::default();

        stats.record(&loss(40, false, false));
        stats.record(&loss(12, true, true));
        let shut = Board::from_shut_positions(&all_positions()).unwrap();
        stats.record(&GameSummary::from_board(&shut, true));

        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses(), 2);
        assert_eq!(stats.total_score, 52);
        assert_eq!(stats.best_score, Some(0));
        assert_eq!(stats.front_row_cleared, 2);
        assert_eq!(stats.back_row_reached, 2);
        assert_eq!(stats.average_score(), 52.0 / 3.0);
    }

    #[test]
    fn summary_of_lost_board_uses_row_weights() {
        let summary = GameSummary::from_board(&Board::new(), false);

        assert_eq!(summary.score, 270);
        assert!(!summary.front_row_shut);
    }

    #[test]
    fn missing_fields_deserialize_to_zero() {
        let stats: PlayStats = serde_json::from_str(r#"{"games_played":4}"#).unwrap();

        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.best_score, None);
    }

    fn all_positions() -> alloc::vec::Vec<TilePos> {
        positions().collect()
    }
}
