mod cli;
mod commands;
mod config;
mod logging;
mod render;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands};
use config::{LogLevel, UserConfig};
use logging::LogMode;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = UserConfig::load();
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);
    let command = cli.command.unwrap_or_default();

    let log_mode = match &command {
        Commands::Watch { device, .. } => {
            LogMode::watch(device.as_deref().or(config.device.as_deref()))
        }
        _ => LogMode::Stderr,
    };
    let _guard = logging::init(config.log_level, log_mode, log_level_override);

    match command {
        Commands::Show { device, json } => commands::show::run(&config, device.as_deref(), json),
        Commands::List => commands::list::run(&config),
        Commands::History { device, kind, json } => {
            commands::history::run(&config, device.as_deref(), kind.as_deref(), json)
        }
        Commands::Watch {
            device,
            samples,
            interval,
            compact,
        } => commands::watch::run(&config, device.as_deref(), samples, interval, compact),
        Commands::Debug => commands::debug::run(&config),
        Commands::Config { path, reset, edit } => {
            commands::config::run(&config, path, reset, edit)
        }
    }
}
