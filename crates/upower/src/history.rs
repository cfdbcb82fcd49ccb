//! Report-level parsing: history sections and the line fold.
//!
//! A report may carry sections such as
//!
//! ```text
//! History (charge):
//!   1609459200	89.000	discharging
//!   1609458900	90.000	discharging
//! ```
//!
//! Each tab-separated row becomes a [`History`] sample tagged with the type
//! of the most recent header.

use batinfo_schema::{BatteryInfo, History};
use chrono::DateTime;

use crate::decode::decode_line;

/// Returns the type tag of a history header line, e.g. `"charge"` for
/// `"History (charge):"`. A header without a parenthesized tag yields `""`.
pub fn history_kind(line: &str) -> Option<&str> {
    if !line.starts_with("History") {
        return None;
    }
    let kind = line
        .split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .map_or("", |(kind, _)| kind);
    Some(kind)
}

/// Splits a history row into its epoch seconds and status.
///
/// The row must have exactly three tab-separated parts; the middle value is
/// not kept. An unreadable epoch yields `0`.
pub fn history_row(line: &str) -> Option<(i64, &str)> {
    let mut parts = line.split('\t');
    let (epoch, _value, status) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    Some((epoch.trim().parse().unwrap_or(0), status))
}

/// Parser state threaded through the lines of one report.
#[derive(Debug, Clone, Default)]
pub struct ParseState {
    kind: String,
    info: BatteryInfo,
}

impl ParseState {
    /// Consumes one line of the report.
    pub fn step(mut self, line: &str) -> Self {
        let line = line.trim();

        if let Some(kind) = history_kind(line) {
            self.kind = kind.to_string();
        } else if line.contains(':') {
            decode_line(&mut self.info, line);
        } else if let Some((secs, status)) = history_row(line) {
            self.info.history.push(History {
                kind: self.kind.clone(),
                status: status.to_string(),
                time: DateTime::from_timestamp(secs, 0).unwrap_or_default(),
            });
        }

        self
    }

    /// Type tag of the history section currently being read.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn finish(self) -> BatteryInfo {
        self.info
    }
}

/// Parses a full report. Never fails: unreadable fields stay zero-valued.
pub fn parse_report<I, S>(lines: I) -> BatteryInfo
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .fold(ParseState::default(), |state, line| state.step(line.as_ref()))
        .finish()
}
