pub mod config;
pub mod debug;
pub mod history;
pub mod list;
pub mod show;
pub mod watch;

use batinfo_schema::BatteryInfo;
use batinfo_upower::{find_matching, BatteryQuery, UpowerCli};
use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;

use crate::config::UserConfig;

/// Builds a query against the configured tool after checking its version.
pub fn connect(config: &UserConfig) -> Result<BatteryQuery> {
    let query = BatteryQuery::with_source(UpowerCli::new(&config.upower_path));
    let version = query
        .probe_version()
        .wrap_err_with(|| format!("could not use {:?} as the power tool", config.upower_path))?;
    debug!(%version, "Using upower");
    Ok(query)
}

/// Snapshot of the device named on the command line, the configured device,
/// or the first device matching the configured pattern, in that order.
pub fn resolve(
    query: &BatteryQuery,
    config: &UserConfig,
    device: Option<&str>,
) -> Result<BatteryInfo> {
    let info = match device.or(config.device.as_deref()) {
        Some(device) => query.build(device)?,
        None => query.build_matching(&config.device_pattern)?,
    };
    Ok(info)
}

/// Device a bare command would query, given the tool's device list: the
/// configured device, else the first match of the configured pattern.
pub fn default_device<'a>(config: &'a UserConfig, devices: &'a [String]) -> Option<&'a str> {
    config
        .device
        .as_deref()
        .or_else(|| find_matching(devices, &config.device_pattern))
}
