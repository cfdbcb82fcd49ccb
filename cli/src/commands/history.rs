use color_eyre::eyre::Result;

use crate::commands::{connect, resolve};
use crate::config::UserConfig;
use crate::render;

pub fn run(config: &UserConfig, device: Option<&str>, kind: Option<&str>, json: bool) -> Result<()> {
    let query = connect(config)?;
    let info = resolve(&query, config, device)?;

    let samples: Vec<_> = match kind {
        Some(kind) => info.history_of(kind).collect(),
        None => info.history.iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
        return Ok(());
    }

    if samples.is_empty() {
        if info.has_history {
            println!("No history samples in the report for {}.", info.device);
        } else {
            println!("{} does not record history.", info.device);
        }
        return Ok(());
    }

    print!("{}", render::history(samples));
    Ok(())
}
