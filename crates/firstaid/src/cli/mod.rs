//! Command-line interface for firstaid.
//!
//! This module provides the CLI structure for the `firstaid` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, FlowArg, GuideCommand, KitCommand, KitStatusArg, LanguageArg, RunCommand,
    StatusCommand,
};

/// firstaid - Step-by-step first-aid guidance
///
/// Walks a bystander through bleeding, burns, wounds, fainting and CPR with
/// spoken instructions in English or Arabic.
#[derive(Debug, Parser)]
#[command(name = "firstaid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive kiosk session
    Run(RunCommand),

    /// Print the steps of a guide
    Guide(GuideCommand),

    /// Manage the first-aid kit inventory
    #[command(subcommand)]
    Kit(KitCommand),

    /// Show platform, storage and language status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn status_cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Status(StatusCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "firstaid");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;
        assert_eq!(status_cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(status_cli(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(status_cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(status_cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(status_cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["firstaid", "run", "--language", "ar", "--mute"]).unwrap();
        match cli.command {
            Command::Run(run) => {
                assert_eq!(run.language, Some(LanguageArg::Ar));
                assert!(run.mute);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_guide() {
        let cli = Cli::try_parse_from(["firstaid", "guide", "cpr-infant", "--json"]).unwrap();
        match cli.command {
            Command::Guide(guide) => {
                assert_eq!(guide.flow, FlowArg::CprInfant);
                assert!(guide.json);
                assert_eq!(guide.language, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_guide_rejects_unknown_flow() {
        assert!(Cli::try_parse_from(["firstaid", "guide", "snakebite"]).is_err());
    }

    #[test]
    fn test_parse_kit_add() {
        let cli = Cli::try_parse_from([
            "firstaid", "kit", "add", "Triangular Bandage", "-s", "low", "-n", "2",
        ])
        .unwrap();
        match cli.command {
            Command::Kit(KitCommand::Add {
                name,
                description,
                status,
                quantity,
            }) => {
                assert_eq!(name, "Triangular Bandage");
                assert_eq!(description, "");
                assert_eq!(status, KitStatusArg::Low);
                assert_eq!(quantity, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_kit_remove() {
        let cli = Cli::try_parse_from(["firstaid", "kit", "remove", "4"]).unwrap();
        assert!(matches!(cli.command, Command::Kit(KitCommand::Remove { .. })));
    }

    #[test]
    fn test_parse_status() {
        let cli = Cli::try_parse_from(["firstaid", "status"]).unwrap();
        assert!(matches!(cli.command, Command::Status(_)));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["firstaid", "-c", "/custom/config.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose() {
        let cli = Cli::try_parse_from(["firstaid", "-v", "status"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }
}
