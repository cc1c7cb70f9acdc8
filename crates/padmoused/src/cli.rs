use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Subcommand, PartialEq)]
pub(crate) enum Command {
    /// Drive the desktop with a controller in the foreground.
    Run {
        /// Controller device path. Defaults to the first controller found
        controller: Option<PathBuf>,

        /// The profile to load
        #[clap(short, long)]
        profile: Option<PathBuf>,
    },
    /// List available controllers.
    List,
}

/// Use a gamepad as a mouse and keyboard.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_with_controller_and_profile() {
        let cli = Cli::try_parse_from([
            "padmoused",
            "-v",
            "run",
            "/dev/input/event7",
            "--profile",
            "pad.yaml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(!cli.no_color);
        assert_eq!(
            cli.command,
            Command::Run {
                controller: Some(PathBuf::from("/dev/input/event7")),
                profile: Some(PathBuf::from("pad.yaml")),
            }
        );
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["padmoused", "--no-color", "run"]).unwrap();
        assert!(cli.no_color);
        assert_eq!(
            cli.command,
            Command::Run {
                controller: None,
                profile: None,
            }
        );
    }

    #[test]
    fn list_takes_no_arguments() {
        let cli = Cli::try_parse_from(["padmoused", "list"]).unwrap();
        assert_eq!(cli.command, Command::List);
        assert!(Cli::try_parse_from(["padmoused", "list", "extra"]).is_err());
    }
}
