//! Plain-text rendering of battery snapshots.

use std::fmt::{self, Display};
use std::time::Duration;

use batinfo_schema::{BatteryInfo, History};

const LABEL_WIDTH: usize = 20;

/// Formats a duration at second precision, `"-"` when zero.
pub fn duration(d: Duration) -> String {
    if d.is_zero() {
        return "-".to_string();
    }
    humantime::format_duration(Duration::from_secs(d.as_secs())).to_string()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn row(
    f: &mut fmt::Formatter<'_>,
    indent: usize,
    label: &str,
    value: impl Display,
) -> fmt::Result {
    writeln!(
        f,
        "{:indent$}{:<width$}{}",
        "",
        format!("{}:", label),
        value,
        indent = indent,
        width = LABEL_WIDTH
    )
}

/// Full device report, laid out like `upower -i`.
pub struct Report<'a>(&'a BatteryInfo);

pub fn report(info: &BatteryInfo) -> Report<'_> {
    Report(info)
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.0;
        writeln!(f, "{}", info.device)?;

        row(f, 2, "native-path", &info.native_path)?;
        row(f, 2, "vendor", &info.vendor)?;
        row(f, 2, "model", &info.model)?;
        row(f, 2, "serial", info.serial)?;
        row(f, 2, "power supply", yes_no(info.power_supply))?;
        row(f, 2, "updated", info.updated.format("%Y-%m-%d %H:%M:%S UTC"))?;
        row(f, 2, "has history", yes_no(info.has_history))?;
        row(f, 2, "has statistics", yes_no(info.has_statistics))?;

        let battery = &info.battery;
        let energy = &battery.energy;
        writeln!(f, "  battery")?;
        row(f, 4, "present", yes_no(battery.present))?;
        row(f, 4, "rechargeable", yes_no(battery.rechargeable))?;
        row(
            f,
            4,
            "state",
            format_args!("{} ({})", battery.state, battery.charge_state()),
        )?;
        row(f, 4, "warning-level", &battery.warning_level)?;
        row(f, 4, "energy", energy.current)?;
        row(f, 4, "energy-empty", energy.empty)?;
        row(f, 4, "energy-full", energy.full)?;
        row(f, 4, "energy-full-design", energy.full_design)?;
        row(f, 4, "energy-rate", battery.energy_rate)?;
        row(f, 4, "voltage", battery.voltage)?;
        row(f, 4, "charge-cycles", &battery.charge_cycles)?;
        row(f, 4, "time to empty", duration(battery.time_to_empty))?;
        row(f, 4, "time to full", duration(battery.time_to_full))?;
        row(f, 4, "percentage", energy.percentage)?;
        row(f, 4, "capacity", energy.capacity)?;
        row(f, 4, "technology", &battery.technology)?;
        row(f, 4, "icon-name", &battery.icon_name)
    }
}

/// One line per history sample: time, type tag (`-` when untagged), status.
pub struct HistoryTable<'a>(Vec<&'a History>);

pub fn history<'a>(samples: impl IntoIterator<Item = &'a History>) -> HistoryTable<'a> {
    HistoryTable(samples.into_iter().collect())
}

impl Display for HistoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sample in &self.0 {
            let kind = if sample.kind.is_empty() {
                "-"
            } else {
                sample.kind.as_str()
            };
            writeln!(
                f,
                "{}  {:<8} {}",
                sample.time.format("%Y-%m-%d %H:%M:%S"),
                kind,
                sample.status
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batinfo_schema::{Battery, Percentage, Watt};
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_duration() {
        assert_eq!(duration(Duration::ZERO), "-");
        assert_eq!(duration(Duration::from_secs(9000)), "2h 30m");
        assert_eq!(duration(Duration::from_millis(90_400)), "1m 30s");
    }

    #[test]
    fn test_report_uses_unit_rendering() {
        let info = BatteryInfo {
            device: "/org/freedesktop/UPower/devices/battery_BAT0".to_string(),
            battery: Battery {
                state: "charging".to_string(),
                energy_rate: Watt(10.3),
                time_to_full: Duration::from_secs(1800),
                energy: batinfo_schema::Energy {
                    percentage: Percentage(62.0),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };

        let text = report(&info).to_string();
        assert!(text.starts_with("/org/freedesktop/UPower/devices/battery_BAT0\n"));
        assert!(text.contains("    energy-rate:        10.300 W\n"));
        assert!(text.contains("    percentage:         62.00%\n"));
        assert!(text.contains("    state:              charging (Charging)\n"));
        assert!(text.contains("    time to full:       30m\n"));
        assert!(text.contains("  updated:            1970-01-01 00:00:00 UTC\n"));
    }

    #[test]
    fn test_history_rows() {
        let samples = vec![
            History {
                kind: "charge".to_string(),
                status: "discharging".to_string(),
                time: DateTime::from_timestamp(1609459200, 0).unwrap(),
            },
            History {
                kind: String::new(),
                status: "unknown".to_string(),
                time: DateTime::default(),
            },
        ];

        assert_eq!(
            history(&samples).to_string(),
            "2021-01-01 00:00:00  charge   discharging\n1970-01-01 00:00:00  -        unknown\n"
        );
    }
}
