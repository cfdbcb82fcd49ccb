use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the full report for a device (default)
    #[command(alias = "info")]
    Show {
        /// Device identifier, e.g. /org/freedesktop/UPower/devices/battery_BAT0
        device: Option<String>,

        /// Print the snapshot as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List power device identifiers
    #[command(alias = "ls")]
    List,

    /// Show history samples recorded by the power daemon
    History {
        device: Option<String>,

        /// Only samples of this type (e.g. charge, rate)
        #[arg(short, long)]
        kind: Option<String>,

        #[arg(short, long)]
        json: bool,
    },

    /// Print refreshed snapshots as JSON, one per interval
    #[command(alias = "pipe")]
    Watch {
        device: Option<String>,

        /// Number of samples to output (0 = infinite)
        #[arg(short, long, default_value_t = 0)]
        samples: u32,

        /// Update interval in milliseconds (defaults to the configured interval)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Compact JSON output (one line per sample)
        #[arg(short, long)]
        compact: bool,
    },

    /// Print debug information about the power tool and devices
    Debug,

    /// Show or edit configuration
    Config {
        /// Print config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(short, long)]
        edit: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Show {
            device: None,
            json: false,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "batinfo", version, about = "Battery reports from upower")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the configured log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_watch_args() {
        let cli = Cli::parse_from(["batinfo", "watch", "-s", "3", "-c", "--log-level", "debug"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Some(Commands::Watch {
                device,
                samples,
                interval,
                compact,
            }) => {
                assert_eq!(device, None);
                assert_eq!(samples, 3);
                assert_eq!(interval, None);
                assert!(compact);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
