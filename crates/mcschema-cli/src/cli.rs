//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// mcschema - validate Minecraft data-pack JSON against the schema catalog
///
/// Validates documents, synthesizes default documents and prints the
/// structure of any registered schema.
#[derive(Parser, Debug)]
#[command(
    name = "mcschema",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "MCSCHEMA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a document against a registered schema
    Validate(ValidateArgs),

    /// Print the default document of a schema
    Default(DefaultArgs),

    /// List registered schema names
    List(ListArgs),

    /// Print the structure of a schema
    Tree(TreeArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Schema name, e.g. recipe or configured_feature
    #[arg(value_name = "SCHEMA")]
    pub schema: String,

    /// Path to the document (JSON or YAML)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Collections fixture (JSON or YAML) with pools and block properties
    #[arg(long, value_name = "FILE")]
    pub collections: Option<PathBuf>,

    /// Stop at the first error
    #[arg(long)]
    pub fail_fast: bool,

    /// Stop after this many errors
    #[arg(long, value_name = "N")]
    pub max_errors: Option<usize>,

    /// Print the normalized document after validating
    #[arg(long)]
    pub normalize: bool,
}

/// Arguments for the default command
#[derive(Parser, Debug)]
pub struct DefaultArgs {
    /// Schema name
    #[arg(value_name = "SCHEMA")]
    pub schema: String,

    /// Collections fixture used to pick default resource ids
    #[arg(long, value_name = "FILE")]
    pub collections: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only show names containing this text
    #[arg(value_name = "FILTER")]
    pub filter: Option<String>,
}

/// Arguments for the tree command
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// Schema name
    #[arg(value_name = "SCHEMA")]
    pub schema: String,

    /// Also print every schema the tree references
    #[arg(long)]
    pub reachable: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}
