//! Device queries: fetch a report, parse it, stamp the identifier.

use batinfo_schema::{BatteryInfo, BATTERY_MARKER};
use tracing::{debug, info, warn};

use crate::error::{QueryError, Result};
use crate::history::parse_report;
use crate::source::{ReportSource, UpowerCli};

/// Marker looked for in device identifiers by [`BatteryQuery::build_default`].
pub const DEFAULT_DEVICE_PATTERN: &str = BATTERY_MARKER;

/// Text the tool prints, with a zero exit status, for an unknown device path.
pub const INVALID_DEVICE_SENTINEL: &str = "path invalid";

/// First words of the `upower -v` banner.
pub const VERSION_PREFIX: &str = "UPower client version";

/// First identifier in `devices` containing `pattern`, in tool order.
///
/// This is the selection rule behind [`BatteryQuery::build_matching`].
pub fn find_matching<'a>(devices: &'a [String], pattern: &str) -> Option<&'a str> {
    devices
        .iter()
        .map(String::as_str)
        .find(|d| d.contains(pattern))
}

/// Builds [`BatteryInfo`] snapshots from a [`ReportSource`].
///
/// Every build produces an independent snapshot; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct BatteryQuery<S = UpowerCli> {
    source: S,
}

impl BatteryQuery<UpowerCli> {
    /// Query backed by `upower` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ReportSource> BatteryQuery<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Checks that the configured tool is a UPower client and returns its version banner.
    ///
    /// Intended to be called once, before the first query.
    pub fn probe_version(&self) -> Result<String> {
        let lines = self.source.version()?;
        let banner = lines.first().map(|l| l.trim()).unwrap_or_default();

        if !banner.starts_with(VERSION_PREFIX) {
            warn!(banner, "Unexpected power tool banner");
            return Err(QueryError::UnsupportedTool(banner.to_string()));
        }

        let version = banner[VERSION_PREFIX.len()..]
            .trim_start_matches(':')
            .trim()
            .to_string();
        debug!(%version, "Power tool detected");
        Ok(version)
    }

    /// Lists the identifiers of every power device, in tool order.
    pub fn devices(&self) -> Result<Vec<String>> {
        let devices = self
            .source
            .devices()?
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
        Ok(devices)
    }

    /// Raw report lines for `device`.
    pub fn fetch(&self, device: &str) -> Result<Vec<String>> {
        let lines = self.source.report(device)?;

        if lines.len() == 1 && lines[0].contains(INVALID_DEVICE_SENTINEL) {
            return Err(QueryError::InvalidDevice(device.to_string()));
        }

        Ok(lines)
    }

    /// Parses report lines into a snapshot. Infallible; the device field is left empty.
    pub fn parse<L: AsRef<str>>(lines: &[L]) -> BatteryInfo {
        parse_report(lines)
    }

    /// Fetches and parses the report for `device`.
    pub fn build(&self, device: &str) -> Result<BatteryInfo> {
        let lines = self.fetch(device)?;
        let mut info = Self::parse(&lines);
        info.device = device.to_string();
        debug!(
            device,
            state = %info.battery.state,
            percentage = %info.battery.energy.percentage,
            samples = info.history.len(),
            "Built battery snapshot"
        );
        Ok(info)
    }

    /// Builds the first device whose identifier contains `"BAT"`.
    pub fn build_default(&self) -> Result<BatteryInfo> {
        self.build_matching(DEFAULT_DEVICE_PATTERN)
    }

    /// Builds the first device whose identifier contains `pattern`.
    pub fn build_matching(&self, pattern: &str) -> Result<BatteryInfo> {
        let devices = self.devices()?;
        let device = find_matching(&devices, pattern).ok_or_else(|| {
            QueryError::DefaultDeviceNotFound {
                pattern: pattern.to_string(),
            }
        })?;

        info!(device, pattern, "Selected default device");
        self.build(device)
    }

    /// Builds a fresh snapshot of the device `stale` was queried from.
    pub fn refresh(&self, stale: &BatteryInfo) -> Result<BatteryInfo> {
        self.build(&stale.device)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::{CommandError, CommandFailure};

    const AC: &str = "/org/freedesktop/UPower/devices/line_power_AC";
    const BAT0: &str = "/org/freedesktop/UPower/devices/battery_BAT0";

    #[derive(Default)]
    struct FakeSource {
        devices: Vec<String>,
        reports: RefCell<HashMap<String, Vec<String>>>,
        version: Vec<String>,
        requested: RefCell<Vec<String>>,
        broken: bool,
    }

    impl FakeSource {
        fn with_devices(devices: &[&str]) -> Self {
            Self {
                devices: devices.iter().map(|d| d.to_string()).collect(),
                ..Default::default()
            }
        }

        fn set_report(&self, device: &str, lines: &[&str]) {
            self.reports.borrow_mut().insert(
                device.to_string(),
                lines.iter().map(|l| l.to_string()).collect(),
            );
        }

        fn failure(&self, args: &str) -> CommandError {
            CommandError {
                command: format!("upower {}", args),
                cause: CommandFailure::Spawn(io::Error::from(io::ErrorKind::NotFound)),
            }
        }
    }

    impl ReportSource for FakeSource {
        fn report(&self, device: &str) -> std::result::Result<Vec<String>, CommandError> {
            self.requested.borrow_mut().push(device.to_string());
            if self.broken {
                return Err(self.failure(&format!("-i {}", device)));
            }
            Ok(self
                .reports
                .borrow()
                .get(device)
                .cloned()
                .unwrap_or_else(|| {
                    vec![format!(
                        "failed to get device properties: path invalid: {}",
                        device
                    )]
                }))
        }

        fn devices(&self) -> std::result::Result<Vec<String>, CommandError> {
            if self.broken {
                return Err(self.failure("-e"));
            }
            Ok(self.devices.clone())
        }

        fn version(&self) -> std::result::Result<Vec<String>, CommandError> {
            if self.broken {
                return Err(self.failure("-v"));
            }
            Ok(self.version.clone())
        }
    }

    #[test]
    fn test_build_stamps_device() {
        let source = FakeSource::default();
        source.set_report(BAT0, &["native-path: BAT0", "percentage:   62%"]);
        let query = BatteryQuery::with_source(source);

        let info = query.build(BAT0).unwrap();
        assert_eq!(info.device, BAT0);
        assert_eq!(info.native_path, "BAT0");
        assert_eq!(info.battery.energy.percentage.to_string(), "62.00%");
    }

    #[test]
    fn test_invalid_device_sentinel() {
        let source = FakeSource::default();
        source.set_report("bogus", &["path invalid"]);
        let query = BatteryQuery::with_source(source);

        match query.build("bogus") {
            Err(QueryError::InvalidDevice(name)) => assert_eq!(name, "bogus"),
            other => panic!("expected invalid device, got {:?}", other),
        }
    }

    #[test]
    fn test_sentinel_only_checked_on_single_line() {
        let source = FakeSource::default();
        source.set_report(BAT0, &["vendor: path invalid", "model: X1"]);
        let query = BatteryQuery::with_source(source);

        let info = query.build(BAT0).unwrap();
        assert_eq!(info.vendor, "invalid");
        assert_eq!(info.model, "X1");
    }

    #[test]
    fn test_command_failure_propagates() {
        let query = BatteryQuery::with_source(FakeSource {
            broken: true,
            ..Default::default()
        });

        let err = query.build(BAT0).unwrap_err();
        let QueryError::Command(cmd) = &err else {
            panic!("expected command error, got {:?}", err);
        };
        assert_eq!(cmd.command, format!("upower -i {}", BAT0));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_build_default_selects_battery() {
        let source = FakeSource::with_devices(&[AC, BAT0]);
        source.set_report(BAT0, &["state:   discharging"]);
        let query = BatteryQuery::with_source(source);

        let info = query.build_default().unwrap();
        assert_eq!(info.device, BAT0);
        assert_eq!(info.battery.state, "discharging");
        assert_eq!(*query.source().requested.borrow(), vec![BAT0.to_string()]);
    }

    #[test]
    fn test_build_default_not_found() {
        let query = BatteryQuery::with_source(FakeSource::with_devices(&[AC]));
        assert!(matches!(
            query.build_default(),
            Err(QueryError::DefaultDeviceNotFound { ref pattern }) if pattern == "BAT"
        ));

        let query = BatteryQuery::with_source(FakeSource::with_devices(&[]));
        assert!(matches!(
            query.build_default(),
            Err(QueryError::DefaultDeviceNotFound { .. })
        ));
    }

    #[test]
    fn test_find_matching_takes_first_in_tool_order() {
        let devices = vec![
            AC.to_string(),
            BAT0.to_string(),
            "/org/freedesktop/UPower/devices/battery_BAT1".to_string(),
        ];
        assert_eq!(find_matching(&devices, "BAT"), Some(BAT0));
        assert_eq!(find_matching(&devices, "line_power"), Some(AC));
        assert_eq!(find_matching(&devices, "CMB"), None);
        assert_eq!(find_matching(&[], "BAT"), None);
    }

    #[test]
    fn test_build_matching_custom_pattern() {
        let source = FakeSource::with_devices(&[BAT0, AC]);
        source.set_report(AC, &["power supply:   yes"]);
        let query = BatteryQuery::with_source(source);

        let info = query.build_matching("line_power").unwrap();
        assert_eq!(info.device, AC);
        assert!(info.power_supply);
    }

    #[test]
    fn test_enumeration_failure_is_returned() {
        let query = BatteryQuery::with_source(FakeSource {
            broken: true,
            ..Default::default()
        });
        assert!(matches!(query.build_default(), Err(QueryError::Command(_))));
    }

    #[test]
    fn test_devices_skips_blank_lines() {
        let query = BatteryQuery::with_source(FakeSource::with_devices(&["", AC, "  "]));
        assert_eq!(query.devices().unwrap(), vec![AC.to_string()]);
    }

    #[test]
    fn test_refresh_builds_new_snapshot() {
        let source = FakeSource::with_devices(&[BAT0]);
        source.set_report(
            BAT0,
            &["percentage:   62%", "History (charge):", "1609459200\t62.0\tdischarging"],
        );
        let query = BatteryQuery::with_source(source);
        let stale = query.build_default().unwrap();
        assert_eq!(stale.history.len(), 1);

        query
            .source()
            .set_report(BAT0, &["percentage:   61%", "state:   discharging"]);
        let fresh = query.refresh(&stale).unwrap();

        assert_eq!(fresh.device, BAT0);
        assert_eq!(fresh.battery.energy.percentage.value(), 61.0);
        assert!(fresh.history.is_empty());
        assert_eq!(stale.battery.energy.percentage.value(), 62.0);
    }

    #[test]
    fn test_probe_version() {
        let query = BatteryQuery::with_source(FakeSource {
            version: vec![
                "UPower client version 0.99.20".to_string(),
                "UPower daemon version 0.99.20".to_string(),
            ],
            ..Default::default()
        });
        assert_eq!(query.probe_version().unwrap(), "0.99.20");
    }

    #[test]
    fn test_probe_version_rejects_other_tools() {
        let query = BatteryQuery::with_source(FakeSource {
            version: vec!["upower 1.0 (some other program)".to_string()],
            ..Default::default()
        });
        assert!(matches!(
            query.probe_version(),
            Err(QueryError::UnsupportedTool(_))
        ));

        let query = BatteryQuery::with_source(FakeSource::default());
        assert!(matches!(
            query.probe_version(),
            Err(QueryError::UnsupportedTool(_))
        ));
    }

    #[test]
    fn test_parse_leaves_device_empty() {
        let info = BatteryQuery::<FakeSource>::parse(&["vendor:  ACME"]);
        assert_eq!(info.device, "");
        assert_eq!(info.vendor, "ACME");
    }
}
