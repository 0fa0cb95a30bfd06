//! Tracked time intervals
//!
//! An interval is a named span of tracked time belonging to a user. An open
//! interval (no end time) is the user's currently running tracker; stopping it
//! sets the end time. Intervals can be exported to CSV for reporting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tracked interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interval {
    /// Database ID (None for new intervals not yet saved)
    #[serde(skip)]
    pub id: Option<i64>,
    pub user_id: i64,
    pub project_id: Option<i64>,
    pub name: String,
    pub start_time: DateTime<Utc>,
    /// None while the interval is still running
    pub end_time: Option<DateTime<Utc>>,
}

impl Interval {
    /// Duration in hours, zero while still running
    pub fn hours(&self) -> f64 {
        match self.end_time {
            Some(end) => (end - self.start_time).num_seconds().max(0) as f64 / 3600.0,
            None => 0.0,
        }
    }
}

/// Human-readable timestamp for profile responses, e.g.
/// "Friday 29 August 2025 13:45:12 UTC"
pub fn format_display(ts: &DateTime<Utc>) -> String {
    ts.format("%A %d %B %Y %H:%M:%S %Z").to_string()
}

/// Total completed hours across intervals
pub fn total_tracked_hours(intervals: &[Interval]) -> f64 {
    intervals.iter().map(Interval::hours).sum()
}

/// Export intervals to CSV (for reports)
pub fn export_to_csv(intervals: &[Interval], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for interval in intervals {
        wtr.serialize(interval)?;
    }
    wtr.flush()?;
    Ok(())
}
