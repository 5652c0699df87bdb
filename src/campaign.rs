use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
    time::{Duration, Instant},
};

use indicatif::ProgressBar;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    deck::{hands, target_num, to_hand, Card, Limits},
    search::{search, Memo},
    Result,
};

/// Hand description (`"[1, 2, 3, 4, 5, 6, 7]"`) to the targets it reaches.
pub type Solvable = BTreeMap<String, Vec<u32>>;

#[derive(Clone, Debug, Serialize)]
pub struct TargetReport {
    pub target: u32,
    pub solved: usize,
    pub total: usize,
    pub time_solved: Duration,
    pub time_failed: Duration,
    pub memo_size: usize,
}

impl TargetReport {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.solved as f64 / self.total as f64
        }
    }
}

pub struct Outcome {
    pub reports: Vec<TargetReport>,
    pub solvable: Solvable,
}

pub fn describe_cards(cards: &[Card]) -> String {
    let items: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Tries every legal hand against one target, sharing a single memo.
pub fn run_target(target: u32, hand_size: usize) -> Result<(TargetReport, Vec<Vec<Card>>)> {
    let goal = target_num(target);
    let mut memo = Memo::new();
    let mut solved_hands = Vec::new();
    let mut report = TargetReport {
        target,
        solved: 0,
        total: 0,
        time_solved: Duration::ZERO,
        time_failed: Duration::ZERO,
        memo_size: 0,
    };

    for cards in hands(&Limits::for_target(target), hand_size) {
        report.total += 1;
        let start = Instant::now();
        let result = search(&to_hand(&cards), goal, &mut memo)?;
        let elapsed = start.elapsed();
        if result.success {
            report.solved += 1;
            report.time_solved += elapsed;
            solved_hands.push(cards);
        } else {
            report.time_failed += elapsed;
        }
    }
    report.memo_size = memo.len();

    Ok((report, solved_hands))
}

/// Sweeps `targets` in parallel. Every target runs with its own memo.
pub fn run(targets: &[u32], hand_size: usize, progress: &ProgressBar) -> Result<Outcome> {
    let results: Vec<(TargetReport, Vec<Vec<Card>>)> = targets
        .par_iter()
        .map(|&target| {
            let result = run_target(target, hand_size)?;
            let report = &result.0;
            info!(
                "Completed {target}: {:.4}, {:?}",
                report.ratio(),
                report.time_solved + report.time_failed
            );
            progress.inc(1);
            Ok(result)
        })
        .collect::<Result<_>>()?;
    progress.finish_and_clear();

    let mut reports = Vec::with_capacity(results.len());
    let mut solvable = Solvable::new();
    for (report, solved_hands) in results {
        for cards in solved_hands {
            solvable
                .entry(describe_cards(&cards))
                .or_default()
                .push(report.target);
        }
        reports.push(report);
    }
    for targets in solvable.values_mut() {
        targets.sort_unstable();
    }

    Ok(Outcome { reports, solvable })
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

pub fn read_solvable(path: &Path) -> Result<Solvable> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
