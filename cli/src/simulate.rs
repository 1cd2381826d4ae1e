use anyhow::{Context, Result, bail};
use shutbox_core::*;

/// Plays one game to the end, taking the first selection the solver suggests each turn and a
/// single die whenever it is allowed.
pub fn play_game<D: DiceSource + ?Sized>(config: GameConfig, dice: &mut D) -> Result<GameSummary> {
    let mut engine = PlayEngine::new(config);

    loop {
        if engine.can_roll_one_die() {
            engine.set_dice_count(DiceCount::One)?;
        }

        let roll = match engine.roll(dice)? {
            RollOutcome::Ready(roll) => roll,
            RollOutcome::Lost(_) => break,
            other => bail!("unexpected roll outcome {:?}", other),
        };

        let selection = suggest_selection(roll.sum(), engine.board(), config.rules)
            .context("roll was feasible but no selection was found")?;
        for pos in selection.iter() {
            engine.toggle(pos)?;
        }

        match engine.confirm()? {
            ConfirmOutcome::Won => break,
            ConfirmOutcome::Shut => {}
            other => bail!("suggested selection was not accepted: {:?}", other),
        }
    }

    engine.summary().context("game loop ended before the game did")
}

pub fn run(config: GameConfig, seed: u64, games: u32) -> Result<PlayStats> {
    let mut dice = SeededDice::new(seed);
    let mut stats = PlayStats::default();

    for game in 0..games {
        let summary = play_game(config, &mut dice)?;
        log::debug!("Game {}: won: {}, score: {}", game + 1, summary.won, summary.score);
        stats.record(&summary);
    }

    log::info!(
        "Simulated {} games with seed {}, {} won",
        stats.games_played,
        seed,
        stats.wins
    );
    Ok(stats)
}
