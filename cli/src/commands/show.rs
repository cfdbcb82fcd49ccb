use color_eyre::eyre::Result;

use crate::commands::{connect, resolve};
use crate::config::UserConfig;
use crate::render;

pub fn run(config: &UserConfig, device: Option<&str>, json: bool) -> Result<()> {
    let query = connect(config)?;
    let info = resolve(&query, config, device)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", render::report(&info));
    }

    Ok(())
}
