//! Battery snapshot records.
//!
//! All values represent the device state at the time the report was read.
//! A field the report did not carry, or carried in an unreadable shape, keeps
//! its zero value: empty string, `false`, `0`, [`Duration::ZERO`] or the Unix
//! epoch for timestamps.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::ChargeState;
use crate::units::{Percentage, Volt, Watt, WattHour};

/// Substring that marks a device identifier as a battery.
pub const BATTERY_MARKER: &str = "BAT";

/// Energy readings of a battery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Energy {
    /// Energy currently stored.
    pub current: WattHour,

    /// Energy at which the battery is considered empty.
    pub empty: WattHour,

    /// Energy when fully charged (current full charge capacity).
    pub full: WattHour,

    /// Energy when fully charged, as designed by the manufacturer.
    pub full_design: WattHour,

    /// State of charge.
    pub percentage: Percentage,

    /// Full capacity relative to design capacity.
    pub capacity: Percentage,
}

/// Battery section of a device report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    pub present: bool,
    pub rechargeable: bool,

    /// Free-text state, e.g. `"discharging"` or `"fully-charged"`.
    pub state: String,

    /// Free-text warning level, e.g. `"none"` or `"low"`.
    pub warning_level: String,

    pub energy: Energy,

    /// Instantaneous power draw.
    pub energy_rate: Watt,

    pub voltage: Volt,

    /// Charge cycle count as printed by the tool (may be `"N/A"`).
    pub charge_cycles: String,

    pub time_to_empty: Duration,
    pub time_to_full: Duration,

    /// Battery chemistry, e.g. `"lithium-ion"`.
    pub technology: String,

    /// Icon identifier with surrounding quotes removed.
    pub icon_name: String,
}

impl Battery {
    /// Typed view over [`Battery::state`].
    pub fn charge_state(&self) -> ChargeState {
        ChargeState::from_report(&self.state)
    }

    /// Get the time remaining (to full or empty depending on state).
    ///
    /// Returns `None` when the state has no matching estimate or the estimate is zero.
    pub fn time_remaining(&self) -> Option<Duration> {
        let remaining = match self.charge_state() {
            ChargeState::Charging => self.time_to_full,
            ChargeState::Discharging => self.time_to_empty,
            _ => return None,
        };
        (!remaining.is_zero()).then_some(remaining)
    }
}

/// One sample from a report's history section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    /// Type tag of the section the sample came from, e.g. `"charge"` or `"rate"`.
    /// Empty for samples that appeared before any section header.
    pub kind: String,

    pub status: String,

    pub time: DateTime<Utc>,
}

/// Full snapshot of one power device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryInfo {
    /// Identifier the snapshot was queried with.
    pub device: String,

    pub native_path: String,
    pub vendor: String,
    pub model: String,
    pub serial: u64,
    pub power_supply: bool,
    pub updated: DateTime<Utc>,
    pub has_history: bool,
    pub has_statistics: bool,
    pub battery: Battery,

    /// History samples in report order.
    pub history: Vec<History>,
}

impl BatteryInfo {
    /// Returns true if the device identifier names a battery.
    pub fn is_battery(&self) -> bool {
        self.device.contains(BATTERY_MARKER)
    }

    /// Iterates the history samples tagged with `kind`, in report order.
    pub fn history_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a History> + 'a {
        self.history.iter().filter(move |h| h.kind == kind)
    }
}
