use std::time::Duration;

use batinfo_schema::BatteryInfo;
use color_eyre::eyre::Result;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::commands::{connect, resolve};
use crate::config::UserConfig;

pub fn run(
    config: &UserConfig,
    device: Option<&str>,
    samples: u32,
    interval: Option<u64>,
    compact: bool,
) -> Result<()> {
    let interval = Duration::from_millis(interval.unwrap_or(config.watch_interval_ms));
    let query = connect(config)?;
    let mut info = resolve(&query, config, device)?;
    let mut counter = 0u32;

    info!(device = %info.device, ?interval, samples, "Watching device");

    loop {
        let doc = sample_doc(&info);
        if compact {
            println!("{}", serde_json::to_string(&doc)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }

        counter += 1;
        if samples > 0 && counter >= samples {
            break;
        }

        std::thread::sleep(interval);

        match query.refresh(&info) {
            Ok(fresh) => info = fresh,
            Err(e) => {
                warn!(error = %e, device = %info.device, "Refresh failed");
                return Err(e.into());
            }
        }
    }

    Ok(())
}

fn sample_doc(info: &BatteryInfo) -> Value {
    let battery = &info.battery;
    json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "device": info.device,
        "updated": info.updated.to_rfc3339(),
        "state": battery.state,
        "percent": battery.energy.percentage.value(),
        "energy_wh": battery.energy.current.value(),
        "energy_rate_w": battery.energy_rate.value(),
        "voltage_v": battery.voltage.value(),
        "capacity_percent": battery.energy.capacity.value(),
        "time_remaining_secs": battery.time_remaining().map(|d| d.as_secs()),
    })
}
