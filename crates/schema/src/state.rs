//! Typed view over the free-text battery state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Battery charging state as reported in the `state:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeState {
    /// Battery is actively charging
    Charging,
    /// Battery is discharging (on battery power)
    Discharging,
    /// Battery is full
    Full,
    /// Battery is completely drained
    Empty,
    /// Waiting to start charging (e.g., charge threshold not reached)
    PendingCharge,
    /// Waiting to start discharging
    PendingDischarge,
    /// State cannot be determined
    #[default]
    Unknown,
}

impl ChargeState {
    /// Maps the tool's state token (`"fully-charged"`, `"discharging"`, ...) to a variant.
    pub fn from_report(state: &str) -> Self {
        match state {
            "charging" => ChargeState::Charging,
            "discharging" => ChargeState::Discharging,
            "fully-charged" => ChargeState::Full,
            "empty" => ChargeState::Empty,
            "pending-charge" => ChargeState::PendingCharge,
            "pending-discharge" => ChargeState::PendingDischarge,
            _ => ChargeState::Unknown,
        }
    }

    /// Returns a human-readable label for the charge state.
    pub fn label(&self) -> &'static str {
        match self {
            ChargeState::Charging => "Charging",
            ChargeState::Discharging => "On Battery",
            ChargeState::Full => "Full",
            ChargeState::Empty => "Empty",
            ChargeState::PendingCharge => "Pending Charge",
            ChargeState::PendingDischarge => "Pending Discharge",
            ChargeState::Unknown => "Unknown",
        }
    }

    /// Returns true if the battery is currently charging.
    pub fn is_charging(&self) -> bool {
        matches!(self, ChargeState::Charging)
    }

    /// Returns true if external power is connected.
    pub fn is_plugged_in(&self) -> bool {
        matches!(
            self,
            ChargeState::Charging | ChargeState::Full | ChargeState::PendingCharge
        )
    }
}

impl fmt::Display for ChargeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
