//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "open-with",
    version,
    about = "Open files from a content root with external applications"
)]
pub struct Cli {
    /// Settings file to use instead of the per-user default
    #[arg(long, global = true, env = "OPEN_WITH_SETTINGS", value_name = "FILE")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List the commands registered with the palette
    Commands,

    /// Execute a palette command, optionally with a focused file
    Run {
        /// Command id, e.g. open-file-with-code
        id: String,
        /// Content root directory
        #[arg(long)]
        root: String,
        /// File to focus, absolute or relative to the root
        file: Option<String>,
    },

    /// Show the context menu for a file
    Menu {
        #[arg(long)]
        root: String,
        file: String,
        /// Activate the Nth item (1-based)
        #[arg(long, value_name = "N")]
        activate: Option<usize>,
    },

    /// Show the current settings
    Settings,

    /// Register an application
    Add {
        name: String,
        /// Executable name, path or application bundle
        code: String,
        /// Comma-separated extra arguments
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        arguments: String,
    },

    /// Remove an application by name
    Remove { name: String },

    /// Flip whether an application appears in the file menu
    Toggle { name: String },

    /// Show or hide "Show in system explorer" in the file menu
    Explorer {
        #[arg(value_enum)]
        state: Switch,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}
