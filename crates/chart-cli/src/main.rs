// chartctl: inspect, dump and simulate rhythm charts from the command line.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use chart_model::{ParseOptions, TokenPolicy};

#[derive(Parser, Debug)]
#[command(name = "chartctl", about = "Inspect and simulate rhythm game charts")]
struct Cli {
    /// Keep unparsable tokens as rests instead of dropping them.
    #[arg(long, global = true)]
    zero_fill: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the parsed score and the flattened event list.
    Inspect {
        /// Chart file
        file: PathBuf,
    },

    /// Print the flattened chart as JSON.
    Dump {
        /// Chart file
        file: PathBuf,

        #[arg(long)]
        pretty: bool,
    },

    /// Play the chart headlessly on a fixed frame clock.
    Simulate {
        /// Chart file
        file: PathBuf,

        /// Play settings JSON; defaults are used if the file doesn't exist.
        #[arg(long, env = "CHARTCTL_CONFIG", default_value = "play_settings.json")]
        config: PathBuf,

        /// Frames per second of the simulated clock.
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Press every lane that has a note in the hit window.
        #[arg(long)]
        autoplay: bool,

        /// Follow the system clock instead of stepping frames instantly.
        #[arg(long)]
        realtime: bool,
    },
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            token_policy: if self.zero_fill {
                TokenPolicy::ZeroFill
            } else {
                TokenPolicy::DropInvalid
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = cli.parse_options();
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Command::Inspect { file } => commands::inspect(&mut out, file, options),
        Command::Dump { file, pretty } => commands::dump(&mut out, file, options, *pretty),
        Command::Simulate {
            file,
            config,
            fps,
            autoplay,
            realtime,
        } => {
            let run = commands::SimulateRun {
                fps: *fps,
                autoplay: *autoplay,
                realtime: *realtime,
            };
            commands::simulate(&mut out, file, options, config, run)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_fill_is_global() {
        let cli = Cli::try_parse_from(["chartctl", "inspect", "song.bms", "--zero-fill"]).unwrap();
        assert_eq!(cli.parse_options().token_policy, TokenPolicy::ZeroFill);
    }

    #[test]
    fn drop_invalid_by_default() {
        let cli = Cli::try_parse_from(["chartctl", "dump", "song.bms", "--pretty"]).unwrap();
        assert_eq!(cli.parse_options().token_policy, TokenPolicy::DropInvalid);
        match cli.command {
            Command::Dump { pretty, .. } => assert!(pretty),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn simulate_defaults() {
        let cli = Cli::try_parse_from(["chartctl", "simulate", "song.bms"]).unwrap();
        match cli.command {
            Command::Simulate {
                fps,
                autoplay,
                realtime,
                ..
            } => {
                assert_eq!(fps, 60);
                assert!(!autoplay);
                assert!(!realtime);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn file_is_required() {
        assert!(Cli::try_parse_from(["chartctl", "inspect"]).is_err());
    }
}
