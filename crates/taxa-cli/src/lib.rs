//! Taxa CLI Library
//!
//! Command-line front end for the taxon resolver.
//!
//! # Overview
//!
//! - **Resolution**: resolve names and ids against a catalog (`taxa resolve`)
//! - **Ranks**: print the rank order (`taxa ranks`)

pub mod commands;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Taxa - taxonomic reference resolver
#[derive(Parser, Debug)]
#[command(name = "taxa")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve taxon names or ids to catalog ids
    Resolve(ResolveArgs),

    /// Show the rank order, lowest first
    Ranks,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Names or ids; digit-only values are treated as ids
    pub references: Vec<String>,

    /// JSON catalog file (array of name records)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// PostgreSQL catalog; ignored when --catalog is given
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Include synonyms
    #[arg(long)]
    pub synonyms: bool,

    /// Include every subtaxon
    #[arg(long)]
    pub subtaxa: bool,

    /// Include subtaxa one level down
    #[arg(long)]
    pub immediate_subtaxa: bool,

    /// Leave the named taxa themselves out of the result
    #[arg(long)]
    pub exclude_original: bool,

    /// Bound on catalog batches and on the result (defaults to TAXA_MAX_BATCH_SIZE or 1000)
    #[arg(long)]
    pub max_batch_size: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ids)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One id per line
    Ids,
    /// A JSON document with the references, options, and ids
    Json,
}
