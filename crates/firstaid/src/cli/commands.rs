//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::content::{FlowKind, Language};
use crate::kit::KitStatus;

/// Run command arguments.
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Start in this language instead of the configured one
    #[arg(short, long, value_enum)]
    pub language: Option<LanguageArg>,

    /// Start with narration muted
    #[arg(short, long)]
    pub mute: bool,
}

/// Guide command arguments.
#[derive(Debug, Args)]
pub struct GuideCommand {
    /// Which flow to print
    #[arg(value_enum)]
    pub flow: FlowArg,

    /// Content language
    #[arg(short, long, value_enum)]
    pub language: Option<LanguageArg>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Kit inventory commands.
#[derive(Debug, Subcommand)]
pub enum KitCommand {
    /// List kit items
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Add an item
    Add {
        /// Item name
        name: String,

        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Stock status
        #[arg(short, long, value_enum, default_value = "available")]
        status: KitStatusArg,

        /// How many are in the kit
        #[arg(short = 'n', long, default_value = "1")]
        quantity: u32,
    },

    /// Remove an item by id
    Remove {
        /// Item id as shown by `kit list`
        id: String,
    },

    /// Restore the default kit
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Language argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    /// English
    En,
    /// Arabic
    Ar,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Self::English,
            LanguageArg::Ar => Self::Arabic,
        }
    }
}

/// Flow argument for `guide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlowArg {
    /// Severe bleeding
    Bleeding,
    /// Burns
    Burns,
    /// Wounds
    Wounds,
    /// Fainting, conscious
    FaintingConscious,
    /// Fainting, unconscious
    FaintingUnconscious,
    /// Adult CPR
    CprAdult,
    /// Child CPR
    CprChild,
    /// Infant CPR
    CprInfant,
}

impl From<FlowArg> for FlowKind {
    fn from(arg: FlowArg) -> Self {
        match arg {
            FlowArg::Bleeding => Self::Bleeding,
            FlowArg::Burns => Self::Burns,
            FlowArg::Wounds => Self::Wounds,
            FlowArg::FaintingConscious => Self::FaintingConscious,
            FlowArg::FaintingUnconscious => Self::FaintingUnconscious,
            FlowArg::CprAdult => Self::CprAdult,
            FlowArg::CprChild => Self::CprChild,
            FlowArg::CprInfant => Self::CprInfant,
        }
    }
}

/// Kit status argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KitStatusArg {
    /// In stock
    Available,
    /// Running low
    Low,
    /// Past its date
    Expired,
}

impl From<KitStatusArg> for KitStatus {
    fn from(arg: KitStatusArg) -> Self {
        match arg {
            KitStatusArg::Available => Self::Available,
            KitStatusArg::Low => Self::Low,
            KitStatusArg::Expired => Self::Expired,
        }
    }
}
