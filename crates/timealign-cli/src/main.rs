//! `timealign` CLI — compute group meeting-time suggestions from a snapshot.
//!
//! A snapshot is a JSON document holding a group's membership and each
//! member's already-normalized UTC busy intervals:
//!
//! ```json
//! {
//!   "group": {
//!     "id": "study-group",
//!     "owner_id": "alice",
//!     "members": [
//!       { "id": "alice", "name": "Alice" },
//!       { "id": "bob", "name": "Bob" }
//!     ]
//!   },
//!   "busy": {
//!     "alice": [
//!       { "start": "2026-03-16T10:00:00Z", "end": "2026-03-16T11:00:00Z" }
//!     ]
//!   }
//! }
//! ```
//!
//! ## Usage
//!
//! ```sh
//! # Ranked suggestions for a 30-minute meeting, sampled every 15 minutes
//! timealign suggest -i snapshot.json \
//!     --range-start 2026-03-16T09:00:00Z --range-end 2026-03-16T17:00:00Z \
//!     --duration 30 --granularity 15 --min-coverage 0.5
//!
//! # Same, as JSON on stdout (snapshot from stdin)
//! cat snapshot.json | timealign suggest \
//!     --range-start 2026-03-16T09:00:00Z --range-end 2026-03-16T17:00:00Z --json
//!
//! # Per-member busy summary
//! timealign inspect -i snapshot.json
//! ```

mod logger;
mod snapshot;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use snapshot::Snapshot;
use std::io::{self, Read};
use timealign_engine::{ServiceOptions, SuggestionRequest, SuggestionResponse, SuggestionService};

#[derive(Parser)]
#[command(
    name = "timealign",
    version,
    about = "Group meeting-time suggestions from calendar snapshots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute ranked meeting-time suggestions for the snapshot's group
    Suggest {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Start of the candidate range, RFC 3339 UTC
        #[arg(long)]
        range_start: DateTime<Utc>,
        /// End of the candidate range, RFC 3339 UTC
        #[arg(long)]
        range_end: DateTime<Utc>,
        /// Meeting duration in minutes
        #[arg(long, default_value_t = 60)]
        duration: u32,
        /// Sampling step in minutes
        #[arg(long, default_value_t = 15)]
        granularity: u32,
        /// Minimum fraction of members that must be free, in (0, 1]
        #[arg(long, default_value_t = 0.8)]
        min_coverage: f64,
        /// Maximum number of suggestions to return
        #[arg(long, default_value_t = timealign_engine::DEFAULT_MAX_SUGGESTIONS)]
        limit: usize,
        /// Fail instead of degrading a member whose busy data is unreadable
        #[arg(long)]
        strict: bool,
        /// Emit the response as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Summarize each member's busy intervals in the snapshot
    Inspect {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest {
            input,
            range_start,
            range_end,
            duration,
            granularity,
            min_coverage,
            limit,
            strict,
            json,
        } => {
            let snapshot = load_snapshot(input.as_deref())?;
            let request = SuggestionRequest {
                group_id: snapshot.group.id.clone(),
                range_start,
                range_end,
                duration_mins: duration,
                granularity_mins: granularity,
                min_coverage,
            };
            let options = ServiceOptions {
                strict_calendar: strict,
                max_suggestions: limit,
            };
            let service = SuggestionService::with_options(snapshot.clone(), snapshot, options);
            let response = service
                .suggest(&request)
                .context("suggestion computation failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_table(&response);
            }
        }
        Commands::Inspect { input } => {
            let snapshot = load_snapshot(input.as_deref())?;
            print_inspection(&snapshot);
        }
    }

    Ok(())
}

fn load_snapshot(path: Option<&str>) -> Result<Snapshot> {
    let raw = read_input(path)?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).context("Failed to parse snapshot JSON")?;
    snapshot.check()?;
    Ok(snapshot)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn print_table(response: &SuggestionResponse) {
    if response.suggestions.is_empty() {
        println!(
            "No qualifying slot for {} member(s); relax duration or coverage and retry.",
            response.total_members
        );
        return;
    }

    println!(
        "{} suggestion(s) for {} member(s):",
        response.suggestions.len(),
        response.total_members
    );
    for s in &response.suggestions {
        println!(
            "#{:<3} {} – {}  {:>5.1}% free ({}/{})",
            s.rank,
            s.start.format("%Y-%m-%d %H:%M"),
            s.end.format("%H:%M UTC"),
            s.coverage_ratio * 100.0,
            s.available_members,
            s.total_members
        );
    }
}

fn print_inspection(snapshot: &Snapshot) {
    let ids = snapshot.group.member_ids();
    println!(
        "group {} ({} member(s), owner {})",
        snapshot.group.id,
        ids.len(),
        snapshot.group.owner_id
    );
    for id in ids {
        let display = snapshot
            .group
            .members
            .iter()
            .find(|m| m.id == id)
            .map_or(id, |m| m.name.as_str());
        let intervals = snapshot.busy_for(id);
        let total_minutes: i64 = intervals
            .iter()
            .map(|iv| (iv.end - iv.start).num_minutes())
            .sum();
        println!(
            "  {:<20} {:>3} busy interval(s), {} busy minute(s)",
            display,
            intervals.len(),
            total_minutes
        );
    }
}
