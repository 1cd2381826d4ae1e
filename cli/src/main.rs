use std::io;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use shutbox_core::{GameConfig, GameStatus, PlayStats, RuleSet, SeededDice};

use crate::storage::{FileStore, StorageKey};

mod play;
mod render;
mod simulate;
mod storage;

#[derive(Parser)]
#[command(name = "shutbox", about = "Three-row shut the box in the terminal", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Seed for the dice, taken from the clock when omitted
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Which tiles may be picked together and how dead ends are detected
    #[arg(long, global = true, value_enum, default_value_t = Rules::Chain)]
    rules: Rules,

    /// Statistics file, defaults to shutbox-stats.json in the working directory
    #[arg(long, global = true)]
    stats_file: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
enum Command {
    /// Play interactively (default)
    Play {
        /// Pause between rolling and showing the dice
        #[arg(long, default_value_t = 600)]
        roll_delay_ms: u64,
    },
    /// Let the hint solver play a batch of games, without touching saved statistics
    Simulate {
        #[arg(short = 'n', long, default_value_t = 1000)]
        games: u32,
    },
    /// Print saved statistics
    Stats,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Rules {
    /// A selected tile unblocks the tile behind it in the same turn
    Chain,
    /// Only shut tiles unblock the tile behind them
    Legacy,
}

impl From<Rules> for RuleSet {
    fn from(rules: Rules) -> Self {
        match rules {
            Rules::Chain => RuleSet::Chain,
            Rules::Legacy => RuleSet::Legacy,
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn print_stats(stats: &PlayStats) {
    println!("Games played:       {}", stats.games_played);
    println!("Wins:               {}", stats.wins);
    println!("Win rate:           {:.1}%", stats.win_rate() * 100.0);
    println!("Average score:      {:.1}", stats.average_score());
    match stats.best_score {
        Some(best) => println!("Best score:         {}", best),
        None => println!("Best score:         -"),
    }
    println!("Front row cleared:  {}", stats.front_row_cleared);
    println!("Back row reached:   {}", stats.back_row_reached);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let config = GameConfig {
        rules: cli.rules.into(),
    };
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let store = cli
        .stats_file
        .map(FileStore::new)
        .unwrap_or_else(FileStore::for_key::<PlayStats>);
    log::debug!("Rules: {:?}, seed: {}, stats: {}", config.rules, seed, store.path().display());

    match cli.command.unwrap_or(Command::Play { roll_delay_ms: 600 }) {
        Command::Play { roll_delay_ms } => {
            let mut session = play::Session::new(
                config,
                SeededDice::new(seed),
                Some(store),
                Duration::from_millis(roll_delay_ms),
            );
            session.run(io::stdin().lock(), io::stdout())?;
            if session.engine().status() == GameStatus::Playing {
                log::info!("Left a game in progress, it is not counted");
            }
            println!();
            print_stats(session.stats());
        }
        Command::Simulate { games } => {
            let stats = simulate::run(config, seed, games)?;
            print_stats(&stats);
        }
        Command::Stats => {
            println!("{} ({})", PlayStats::KEY, store.path().display());
            print_stats(&store.load_or_default());
        }
    }

    Ok(())
}
