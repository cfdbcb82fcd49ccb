//! Typed battery records for batinfo.
//!
//! The records mirror what `upower -i <device>` reports for a power device:
//! a [`BatteryInfo`] snapshot embedding a [`Battery`], its [`Energy`] readings
//! and any [`History`] samples the tool printed. Measurements are wrapped in
//! small unit types ([`WattHour`], [`Watt`], [`Volt`], [`Percentage`]) that know
//! how to render themselves.
//!
//! # Example
//!
//! ```
//! use batinfo_schema::{Percentage, Watt};
//!
//! assert_eq!(Percentage::from(62.0).to_string(), "62.00%");
//! assert_eq!(Watt::from(10.3).to_string(), "10.300 W");
//! ```

mod record;
mod state;
mod units;

pub use record::{Battery, BatteryInfo, Energy, History, BATTERY_MARKER};
pub use state::ChargeState;
pub use units::{Percentage, Volt, Watt, WattHour};
