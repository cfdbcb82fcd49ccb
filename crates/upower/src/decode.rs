//! Field decoding for `upower -i` report lines.
//!
//! The tool prints right-aligned values with a unit suffix and no stable
//! grammar, so every decoder anchors on the last space of the line rather than
//! on the colon. A value that cannot be read leaves its slot at the zero value;
//! decoding never fails.

use std::fmt;
use std::time::Duration;

use batinfo_schema::BatteryInfo;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use tracing::trace;

/// Layout of the `updated:` timestamp, minus the trailing zone abbreviation.
const UPDATED_FORMAT: &str = "%a %d %b %Y %I:%M:%S %p";

/// Zone abbreviations read as UTC. Anything else is host-local wall-clock time.
const UTC_ZONES: &[&str] = &["UTC", "GMT", "Z"];

type Slot<T> = fn(&mut BatteryInfo) -> &mut T;

/// How a field's value is extracted, and where it is stored.
#[derive(Clone, Copy)]
pub enum Decoder {
    /// Last token, verbatim.
    Text(Slot<String>),
    /// Last token with surrounding `'` removed.
    Quoted(Slot<String>),
    /// `yes` is true, anything else false.
    Flag(Slot<bool>),
    /// Last token as `u64`.
    Serial(Slot<u64>),
    /// Number followed by a unit word (`Wh`, `W`, `V`).
    Measure(Slot<f32>),
    /// Number followed by `%`.
    Percent(Slot<f32>),
    /// Number followed by a unit word whose first letter is the unit (`hours`, `minutes`).
    Duration(Slot<Duration>),
    /// Local timestamp followed by a `(... ago)` annotation.
    Timestamp(Slot<DateTime<Utc>>),
}

impl Decoder {
    pub fn name(&self) -> &'static str {
        match self {
            Decoder::Text(_) => "text",
            Decoder::Quoted(_) => "quoted",
            Decoder::Flag(_) => "flag",
            Decoder::Serial(_) => "serial",
            Decoder::Measure(_) => "measure",
            Decoder::Percent(_) => "percent",
            Decoder::Duration(_) => "duration",
            Decoder::Timestamp(_) => "timestamp",
        }
    }

    /// Decodes `line` and writes the result into its slot of `info`.
    pub fn apply(self, info: &mut BatteryInfo, line: &str) {
        match self {
            Decoder::Text(slot) => *slot(info) = last_token(line).to_string(),
            Decoder::Quoted(slot) => *slot(info) = last_token(line).trim_matches('\'').to_string(),
            Decoder::Flag(slot) => *slot(info) = last_token(line) == "yes",
            Decoder::Serial(slot) => *slot(info) = decode_serial(line),
            Decoder::Measure(slot) => *slot(info) = decode_measure(line),
            Decoder::Percent(slot) => *slot(info) = decode_percent(line),
            Decoder::Duration(slot) => *slot(info) = decode_duration(line),
            Decoder::Timestamp(slot) => *slot(info) = decode_updated(line),
        }
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decoder::{}", self.name())
    }
}

/// Every field key the decoder understands.
pub static FIELD_TABLE: &[(&str, Decoder)] = &[
    ("native-path", Decoder::Text(|i| &mut i.native_path)),
    ("vendor", Decoder::Text(|i| &mut i.vendor)),
    ("model", Decoder::Text(|i| &mut i.model)),
    ("serial", Decoder::Serial(|i| &mut i.serial)),
    ("power supply", Decoder::Flag(|i| &mut i.power_supply)),
    ("updated", Decoder::Timestamp(|i| &mut i.updated)),
    ("has history", Decoder::Flag(|i| &mut i.has_history)),
    ("has statistics", Decoder::Flag(|i| &mut i.has_statistics)),
    ("present", Decoder::Flag(|i| &mut i.battery.present)),
    ("rechargeable", Decoder::Flag(|i| &mut i.battery.rechargeable)),
    ("state", Decoder::Text(|i| &mut i.battery.state)),
    ("warning-level", Decoder::Text(|i| &mut i.battery.warning_level)),
    ("energy", Decoder::Measure(|i| &mut i.battery.energy.current.0)),
    ("energy-empty", Decoder::Measure(|i| &mut i.battery.energy.empty.0)),
    ("energy-full", Decoder::Measure(|i| &mut i.battery.energy.full.0)),
    ("energy-full-design", Decoder::Measure(|i| &mut i.battery.energy.full_design.0)),
    ("energy-rate", Decoder::Measure(|i| &mut i.battery.energy_rate.0)),
    ("voltage", Decoder::Measure(|i| &mut i.battery.voltage.0)),
    ("charge-cycles", Decoder::Text(|i| &mut i.battery.charge_cycles)),
    ("time to empty", Decoder::Duration(|i| &mut i.battery.time_to_empty)),
    ("time to full", Decoder::Duration(|i| &mut i.battery.time_to_full)),
    ("percentage", Decoder::Percent(|i| &mut i.battery.energy.percentage.0)),
    ("capacity", Decoder::Percent(|i| &mut i.battery.energy.capacity.0)),
    ("technology", Decoder::Text(|i| &mut i.battery.technology)),
    ("icon-name", Decoder::Quoted(|i| &mut i.battery.icon_name)),
];

/// Looks up the decoder for an exact, case-sensitive field key.
pub fn lookup(key: &str) -> Option<Decoder> {
    FIELD_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, decoder)| *decoder)
}

/// Decodes one trimmed `field: value` line into `info`.
///
/// Returns whether the field key was recognized. Lines without a colon and
/// unknown keys leave `info` untouched.
pub fn decode_line(info: &mut BatteryInfo, line: &str) -> bool {
    let Some((key, _)) = line.split_once(':') else {
        return false;
    };

    match lookup(key) {
        Some(decoder) => {
            decoder.apply(info, line);
            true
        }
        None => {
            trace!(key, "Ignoring unknown report field");
            false
        }
    }
}

/// Parses a compound duration such as `"2.5h"`: a decimal amount followed by a
/// single unit character (`s`, `m`, `h` or `d`).
pub fn parse_duration_expr(expr: &str) -> Option<Duration> {
    let unit = expr.chars().last()?;
    let amount: f64 = expr[..expr.len() - unit.len_utf8()].parse().ok()?;
    let scale = match unit {
        's' => 1.0,
        'm' => 60.0,
        'h' => 60.0 * 60.0,
        'd' => 24.0 * 60.0 * 60.0,
        _ => return None,
    };
    Duration::try_from_secs_f64(amount * scale).ok()
}

/// Parses the `updated:` timestamp, e.g. `"Fri 01 Jan 2021 10:42:56 AM UTC"`.
pub fn parse_updated(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, UPDATED_FORMAT) {
        return local_to_utc(naive);
    }

    let (stamp, zone) = value.rsplit_once(' ')?;
    let naive = NaiveDateTime::parse_from_str(stamp.trim_end(), UPDATED_FORMAT).ok()?;
    if UTC_ZONES.contains(&zone) {
        Some(naive.and_utc())
    } else {
        local_to_utc(naive)
    }
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn last_token(s: &str) -> &str {
    s.rsplit_once(' ').map_or(s, |(_, token)| token)
}

fn parse_float(line: &str) -> f32 {
    let token = last_token(line);
    token.parse().unwrap_or_else(|_| {
        trace!(line, token, "Unreadable number, leaving zero");
        0.0
    })
}

fn decode_serial(line: &str) -> u64 {
    let token = last_token(line);
    token.parse().unwrap_or_else(|_| {
        trace!(line, token, "Unreadable serial, leaving zero");
        0
    })
}

fn decode_measure(line: &str) -> f32 {
    let without_unit = line.rsplit_once(' ').map_or("", |(head, _)| head.trim_end());
    decode_percent(without_unit)
}

fn decode_percent(line: &str) -> f32 {
    parse_float(line.trim_end_matches('%'))
}

fn decode_duration(line: &str) -> Duration {
    let parsed = line.rsplit_once(' ').and_then(|(head, unit_word)| {
        let unit = unit_word.chars().next()?;
        let amount = last_token(head.trim_end());
        parse_duration_expr(&format!("{}{}", amount, unit))
    });

    parsed.unwrap_or_else(|| {
        trace!(line, "Unreadable duration, leaving zero");
        Duration::ZERO
    })
}

fn decode_updated(line: &str) -> DateTime<Utc> {
    let line = match line.rfind('(') {
        Some(i) => line[..i].trim_end(),
        None => line,
    };
    let value = match line.rfind("  ") {
        Some(i) => &line[i + 2..],
        None => line.split_once(':').map_or(line, |(_, value)| value),
    };

    parse_updated(value).unwrap_or_else(|| {
        trace!(value, "Unreadable timestamp, leaving epoch");
        DateTime::default()
    })
}
