//! Replay command implementation.
//!
//! Feeds a recorded capture through the progress tracker without a running
//! game client. Captures are JSON lines, one server message per line:
//!
//! ```text
//! {"at_ms": 0, "zone": 561, "opcode": 512, "payload": "6D000000 61EA0000 01"}
//! {"at_ms": 95000, "zone": 561, "opcode": 353, "payload": "...", "floor_label": 2}
//! ```
//!
//! `floor_label` and `passage_part` carry map-widget readings observed at
//! that point; a missing field keeps the previous reading and
//! `"passage_part": null` records the passage icon disappearing. The tracker
//! is ticked once per elapsed second of capture time.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use delve_core::{
    Direction, DungeonMapReader, NetworkMessage, OpcodeTable, ProgressTracker, RunEvent,
    RunSummary, decode_signal,
};
use owo_colors::OwoColorize;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use super::hex_utils::parse_hex_bytes;
use super::load_opcode_table;

const TICK_MS: i64 = 1000;

fn zone_down() -> Direction {
    Direction::ZoneDown
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing field (`None`)
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// One line of a capture file
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureRecord {
    /// Milliseconds since the start of the capture
    pub at_ms: i64,
    /// Territory the player stood in
    pub zone: u16,
    pub opcode: u16,
    #[serde(default = "zone_down")]
    pub direction: Direction,
    /// Hex-encoded payload
    pub payload: String,
    #[serde(default)]
    pub floor_label: Option<u32>,
    #[serde(default, deserialize_with = "present")]
    pub passage_part: Option<Option<u16>>,
}

/// Map readings as last seen in the capture
#[derive(Debug, Default)]
struct CapturedMap {
    floor_label: Option<u32>,
    passage_part: Option<u16>,
}

impl DungeonMapReader for CapturedMap {
    fn floor_label(&self) -> Option<u32> {
        self.floor_label
    }

    fn passage_part(&self) -> Option<u16> {
        self.passage_part
    }
}

pub struct ReplayOutcome {
    pub events: Vec<RunEvent>,
    /// Summary of the run in progress, or of the last finished run
    pub summary: RunSummary,
    pub messages: usize,
    pub dropped: usize,
}

/// Parse a JSON-lines capture; blank lines and `#` comments are skipped
pub fn parse_capture(content: &str) -> Result<Vec<CaptureRecord>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid capture line {}", i + 1))
        })
        .collect()
}

fn timestamp(at_ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(at_ms)
        .with_context(|| format!("Capture time out of range: {}ms", at_ms))
}

/// Drive a tracker through the capture
pub fn replay(records: &[CaptureRecord], opcodes: &OpcodeTable) -> Result<ReplayOutcome> {
    let mut tracker = ProgressTracker::new();
    let mut map = CapturedMap::default();
    let mut events = Vec::new();
    let mut last_summary = None;
    let mut dropped = 0;

    let mut zone = records.first().map(|r| r.zone).unwrap_or_default();
    let mut next_tick = records.first().map(|r| r.at_ms).unwrap_or_default() + TICK_MS;

    for record in records {
        while record.at_ms >= next_tick {
            events.extend(tracker.tick(zone, &map, timestamp(next_tick)?));
            next_tick += TICK_MS;
        }

        zone = record.zone;
        if record.floor_label.is_some() {
            map.floor_label = record.floor_label;
        }
        if let Some(passage_part) = record.passage_part {
            map.passage_part = passage_part;
        }

        let payload = parse_hex_bytes(&record.payload)
            .with_context(|| format!("Invalid payload at {}ms", record.at_ms))?;
        let msg = NetworkMessage {
            payload: &payload,
            opcode: record.opcode,
            source_actor: 0,
            target_actor: 0,
            direction: record.direction,
        };

        match decode_signal(&msg, opcodes) {
            Ok(Some(signal)) => {
                debug!("{}ms: {:?}", record.at_ms, signal);
                events.extend(tracker.handle_signal(signal, zone, timestamp(record.at_ms)?));
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Dropping message at {}ms: {}", record.at_ms, e);
                dropped += 1;
            }
        }
    }

    for event in &events {
        if let RunEvent::Exited { summary, .. } = event {
            last_summary = Some(summary.clone());
        }
    }

    let summary = match last_summary {
        Some(summary) if !tracker.is_ready() => summary,
        _ => tracker.summary(),
    };

    Ok(ReplayOutcome {
        events,
        summary,
        messages: records.len(),
        dropped,
    })
}

fn format_duration(secs: i64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn print_summary(outcome: &ReplayOutcome) {
    let summary = &outcome.summary;

    for event in &outcome.events {
        match event {
            RunEvent::Entered {
                content_id,
                dungeon,
                floor,
            } => println!(
                "{} {} (content {}) on floor {}",
                "Entered".green().bold(),
                dungeon,
                content_id,
                floor
            ),
            RunEvent::Exited { reason, .. } => {
                println!("{} ({:?})", "Exited".yellow().bold(), reason)
            }
            RunEvent::FloorCorrected { tracked, observed } => println!(
                "{} floor {} -> {}",
                "Corrected".cyan(),
                tracked,
                observed
            ),
            _ => {}
        }
    }
    println!();

    match summary.dungeon {
        Some(dungeon) => println!("{} - content {}", dungeon.bold(), summary.content_id),
        None => println!("{}", "No dungeon run in capture".dimmed()),
    }

    for (floor, secs) in &summary.floor_times {
        let line = format!("  Floor {:>3}  {}", floor, format_duration(*secs));
        if *floor == summary.current_floor {
            println!("{}", line.green().bold());
        } else if *floor < summary.current_floor {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }

    println!();
    println!("  Total       {}", format_duration(summary.total_secs()));
    println!("  Traps       {}", summary.trap_status);
    if !summary.floor_effects.is_empty() {
        let effects: Vec<String> = summary.floor_effects.iter().map(|p| p.to_string()).collect();
        println!("  Effects     {}", effects.join(", "));
    }
    if summary.passage_progress >= 0 {
        println!("  Passage     {}/10", summary.passage_progress);
    }
    println!();
    println!(
        "{} messages, {} dropped",
        outcome.messages, outcome.dropped
    );
}

/// Run the replay command
pub fn run(capture: &Path, opcodes: Option<&Path>, json: Option<&Path>) -> Result<()> {
    let table = load_opcode_table(opcodes)?;
    let content = fs::read_to_string(capture)
        .with_context(|| format!("Failed to read capture {}", capture.display()))?;
    let records = parse_capture(&content)?;
    info!("Replaying {} messages from {}", records.len(), capture.display());

    let outcome = replay(&records, &table)?;
    print_summary(&outcome);

    if let Some(path) = json {
        let out = serde_json::to_string_pretty(&outcome.summary)?;
        fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote run summary to {}", path.display());
    }

    Ok(())
}
