//! Battery reports from `upower`.
//!
//! This crate turns the human-readable output of `upower -i <device>` into a
//! typed [`BatteryInfo`] snapshot. Parsing is best-effort: a field the decoder
//! cannot read keeps its zero value and the rest of the report still comes
//! through. Only the query layer ([`BatteryQuery`]) returns errors, and only
//! for failures of the tool itself.
//!
//! # Example
//!
//! ```no_run
//! use batinfo_upower::BatteryQuery;
//!
//! let query = BatteryQuery::new();
//! query.probe_version()?;
//!
//! let info = query.build_default()?;
//! println!("{} is at {}", info.device, info.battery.energy.percentage);
//!
//! let info = query.refresh(&info)?;
//! println!("now {}", info.battery.energy.percentage);
//! # Ok::<(), batinfo_upower::QueryError>(())
//! ```

mod decode;
mod error;
mod history;
mod query;
mod source;

pub use batinfo_schema::{
    Battery, BatteryInfo, ChargeState, Energy, History, Percentage, Volt, Watt, WattHour,
};
pub use decode::{decode_line, lookup, parse_duration_expr, parse_updated, Decoder, FIELD_TABLE};
pub use error::{CommandError, CommandFailure, QueryError, Result};
pub use history::{history_kind, history_row, parse_report, ParseState};
pub use query::{
    find_matching, BatteryQuery, DEFAULT_DEVICE_PATTERN, INVALID_DEVICE_SENTINEL, VERSION_PREFIX,
};
pub use source::{ReportSource, UpowerCli, UPOWER_PROGRAM};
