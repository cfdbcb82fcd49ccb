use color_eyre::eyre::Result;

use crate::commands::{connect, default_device};
use crate::config::UserConfig;

pub fn run(config: &UserConfig) -> Result<()> {
    let query = connect(config)?;
    let devices = query.devices()?;

    if devices.is_empty() {
        println!("No power devices reported.");
        return Ok(());
    }

    let default = default_device(config, &devices);
    for device in &devices {
        let marker = if default == Some(device.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} {}", marker, device);
    }

    Ok(())
}
