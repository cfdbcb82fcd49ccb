use std::fs;
use std::process::Command;

use color_eyre::eyre::{bail, Result, WrapErr};
use tracing::debug;

use crate::commands::{connect, default_device};
use crate::config::{config_path, UserConfig};

pub fn run(config: &UserConfig, path: bool, reset: bool, edit: bool) -> Result<()> {
    if path {
        println!("{}", config_path().display());
        Ok(())
    } else if reset {
        UserConfig::default().save()?;
        println!("Config reset to defaults at: {}", config_path().display());
        Ok(())
    } else if edit {
        edit_config()
    } else {
        show(config)
    }
}

fn show(config: &UserConfig) -> Result<()> {
    println!("Config file: {}", config_path().display());
    println!();
    println!("{}", toml::to_string_pretty(config)?);

    // A configured device is used as-is, so the tool is only asked when the
    // pattern decides.
    let devices = match config.device {
        Some(_) => Ok(Vec::new()),
        None => connect(config).and_then(|query| Ok(query.devices()?)),
    };

    match devices {
        Ok(devices) => println!("Default device: {}", device_summary(config, &devices)),
        Err(e) => {
            debug!(error = ?e, "Could not list devices");
            println!("Default device: unknown ({})", e);
        }
    }

    Ok(())
}

fn edit_config() -> Result<()> {
    let config_file = config_path();
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "nano".to_string());

    if !config_file.exists() {
        UserConfig::default().save()?;
    }

    let status = Command::new(&editor)
        .arg(&config_file)
        .status()
        .wrap_err_with(|| format!("could not start editor {:?}", editor))?;
    if !status.success() {
        bail!("editor {:?} exited with {}", editor, status);
    }

    let content = fs::read_to_string(&config_file)?;
    if let Err(e) = UserConfig::parse(&content) {
        println!(
            "{} is not a valid config, defaults will be used until it is fixed:\n{}",
            config_file.display(),
            e
        );
    }

    Ok(())
}

fn device_summary(config: &UserConfig, devices: &[String]) -> String {
    match default_device(config, devices) {
        Some(device) if config.device.is_some() => format!("{} (configured)", device),
        Some(device) => format!("{} (first match for {:?})", device, config.device_pattern),
        None => format!("none (no device matches {:?})", config.device_pattern),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const AC: &str = "/org/freedesktop/UPower/devices/line_power_AC";
    const BAT0: &str = "/org/freedesktop/UPower/devices/battery_BAT0";

    #[test]
    fn test_device_summary() {
        let devices = vec![AC.to_string(), BAT0.to_string()];

        assert_eq!(
            device_summary(&UserConfig::default(), &devices),
            format!("{} (first match for \"BAT\")", BAT0)
        );

        let config = UserConfig {
            device_pattern: "CMB".to_string(),
            ..Default::default()
        };
        assert_eq!(
            device_summary(&config, &devices),
            "none (no device matches \"CMB\")"
        );

        let config = UserConfig {
            device: Some(AC.to_string()),
            ..Default::default()
        };
        assert_eq!(device_summary(&config, &[]), format!("{} (configured)", AC));
    }
}
