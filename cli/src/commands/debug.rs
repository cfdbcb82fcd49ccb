use color_eyre::eyre::Result;

use batinfo_upower::{BatteryQuery, UpowerCli};

use crate::config::{config_path, runtime_dir, UserConfig};

pub fn run(config: &UserConfig) -> Result<()> {
    println!("batinfo debug information");
    println!("{}", "=".repeat(60));

    println!("\n--- Power Tool ---");
    let query = BatteryQuery::with_source(UpowerCli::new(&config.upower_path));
    println!("Program: {}", query.source().program().display());
    match query.probe_version() {
        Ok(version) => println!("Version: {}", version),
        Err(e) => {
            println!("Unusable: {}", e);
            return Ok(());
        }
    }

    println!("\n--- Devices ---");
    let devices = query.devices()?;
    for device in &devices {
        match query.build(device) {
            Ok(info) => println!(
                "{} ({} history samples, state {:?})",
                device,
                info.history.len(),
                info.battery.state
            ),
            Err(e) => println!("{} (error: {})", device, e),
        }
    }

    println!("\n--- Default Device ---");
    match query.build_matching(&config.device_pattern) {
        Ok(info) => println!("{}", info.device),
        Err(e) => println!("{}", e),
    }

    println!("\n--- Config Paths ---");
    println!("Config: {}", config_path().display());
    println!("Logs: {}", runtime_dir().display());

    println!("\n--- Current Config ---");
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
