use std::{path::PathBuf, time::Instant};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::bail;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};

use handsolve::{
    campaign::{self, write_json},
    compress::compress,
    deck::{self, target_num, targets, to_hand},
    hand::{describe, parse_hand, parse_num},
    params::{HAND_SIZE, TARGET_DIGITS},
    render, solve, Num,
};

#[derive(Parser)]
#[command(name = "handsolve")]
#[command(about = "Combine a hand of cards with + - * / to reach a target")]
struct Args {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve one hand for one target
    Solve {
        target: String,
        #[arg(required = true)]
        cards: Vec<String>,
        /// Only report whether a solution exists
        #[arg(short, long)]
        quiet: bool,
    },
    /// Deal a random game and solve it
    Deal {
        #[arg(long, default_value_t = HAND_SIZE)]
        cards: usize,
        #[arg(long, default_value_t = TARGET_DIGITS)]
        digits: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Sweep targets over every legal hand and record which hands solve them
    Campaign {
        #[arg(short, long, default_value = "solvable.json")]
        output: PathBuf,
        /// Per-target statistics
        #[arg(long)]
        report: Option<PathBuf>,
        /// Targets to sweep; defaults to every three-digit target without zeros
        #[arg(short, long)]
        target: Vec<u32>,
        #[arg(long, default_value_t = HAND_SIZE)]
        cards: usize,
    },
    /// Pack a solvable map into the compact lookup format
    Compress {
        #[arg(default_value = "solvable.json")]
        input: PathBuf,
        #[arg(default_value = "compressed_solvable.json")]
        output: PathBuf,
    },
}

fn print_solution(hand: &[Num], target: Num, quiet: bool) -> color_eyre::Result<bool> {
    let result = solve(hand, target)?;
    if !result.success {
        println!("No Solution Found");
    } else if quiet {
        println!("Solution Found");
    } else {
        println!("{} = {target}", render(&result.trace, hand)?);
    }
    info!(
        "Explored {} hands ({} memo hits)",
        result.stats.nodes, result.stats.memo_hits
    );
    Ok(result.success)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    match args.command {
        Command::Solve {
            target,
            cards,
            quiet,
        } => {
            let hand = parse_hand(cards.as_slice())?;
            print_solution(&hand, parse_num(&target)?, quiet)?;
        }
        Command::Deal {
            cards,
            digits,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let Some(game) = deck::deal(&mut rng, cards, digits) else {
                bail!("a deck cannot deal {cards} cards and {digits} digits");
            };
            let hand = to_hand(&game.cards);
            println!("Hand: {}", describe(&hand));
            println!("Target: {}", game.target);
            print_solution(&hand, target_num(game.target), false)?;
        }
        Command::Campaign {
            output,
            report,
            target,
            cards,
        } => {
            let targets = if target.is_empty() { targets() } else { target };
            println!("Sweeping {} targets with {cards}-card hands...", targets.len());
            let start = Instant::now();
            let progress = ProgressBar::new(targets.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{prefix} [{bar:40.cyan/dim}] {pos}/{len} ({eta})")?
                    .progress_chars("=> "),
            );
            progress.set_prefix("targets");

            let outcome = campaign::run(&targets, cards, &progress)?;
            let solved: usize = outcome.reports.iter().map(|r| r.solved).sum();
            let total: usize = outcome.reports.iter().map(|r| r.total).sum();
            println!(
                "Solved {solved} of {total} (hand, target) pairs in {:?}",
                start.elapsed()
            );
            println!("{} distinct solvable hands", outcome.solvable.len());

            write_json(&output, &outcome.solvable)?;
            println!("Wrote {}", output.display());
            if let Some(report) = report {
                write_json(&report, &outcome.reports)?;
                println!("Wrote {}", report.display());
            }
        }
        Command::Compress { input, output } => {
            let solvable = campaign::read_solvable(&input)?;
            let compressed = compress(&solvable, &targets())?;
            write_json(&output, &compressed)?;
            let original = std::fs::metadata(&input)?.len();
            let packed = std::fs::metadata(&output)?.len();
            println!(
                "Compressed {} hands: {original} -> {packed} bytes ({:.2}%)",
                compressed.len(),
                (1.0 - packed as f64 / original.max(1) as f64) * 100.0
            );
        }
    }
    Ok(())
}
