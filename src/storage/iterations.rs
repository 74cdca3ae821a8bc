//! Strategy iteration storage

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;
use crate::types::IterationStats;

pub const ITERATIONS_DIR: &str = "output/iterations";

#[derive(Serialize)]
struct IterationRecord<'a> {
    iteration: u64,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    stats: &'a IterationStats,
}

pub fn save_iteration_stats(iteration: u64, stats: &IterationStats) -> Result<()> {
    let filename = format!("{}/iterations_{}.jsonl", ITERATIONS_DIR, Utc::now().format("%Y-%m-%d"));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&filename)?;

    let record = IterationRecord {
        iteration,
        timestamp: Utc::now(),
        stats,
    };
    writeln!(file, "{}", serde_json::to_string(&record)?)?;

    debug!(iteration, opened = stats.trades_opened, closed = stats.trades_closed, "Saved iteration stats");

    Ok(())
}
