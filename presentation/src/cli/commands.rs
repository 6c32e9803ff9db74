//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Identifier looked up by `lookup --demo`.
pub const DEMO_IDENTIFIER: &str = "Q49300657";

/// History depth used by `lookup --demo`.
pub const DEMO_HISTORY: usize = 10;

/// Output format for a single provenance record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Human-readable summary
    Text,
}

/// CLI arguments for wikiprov
#[derive(Parser, Debug)]
#[command(name = "wikiprov")]
#[command(author, version, about = "Revision provenance for Wikibase query results")]
#[command(long_about = r#"
wikiprov attaches revision provenance to Wikibase records: the latest revision,
its timestamp, a permalink to that revision, and a short edit history.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./wikiprov.toml     Project-level config
3. ~/.config/wikiprov/config.toml   Global config

Example:
  wikiprov lookup Q27229608 --history 3
  wikiprov query --param item --query 'SELECT ?item WHERE { ?item wdt:P31 wd:Q5 } LIMIT 5'
  wikiprov query formats.sparql
  cat formats.sparql | wikiprov query
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up provenance for a single record
    Lookup {
        /// Identifier or entity IRI, e.g. Q27229608
        #[arg(required_unless_present = "demo")]
        id: Option<String>,

        /// Number of revisions to return
        #[arg(long, value_name = "N")]
        history: Option<usize>,

        /// Look up a demonstration record with a longer history
        #[arg(long)]
        demo: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        output: OutputFormat,
    },

    /// Run a query and attach provenance to its results
    Query {
        /// `.sparql` script to run; piped stdin is read when omitted
        script: Option<PathBuf>,

        /// Query variable holding the entity IRIs
        #[arg(short, long, value_name = "KEY")]
        param: Option<String>,

        /// Number of revisions to return per record
        #[arg(long, value_name = "N")]
        history: Option<usize>,

        /// Number of concurrent revision requests
        #[arg(short, long, value_name = "N")]
        threads: Option<usize>,

        /// SPARQL endpoint to query
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,

        /// Wikibase site the records live on
        #[arg(long, value_name = "URL")]
        wikibase_url: Option<String>,

        /// Query text, instead of a script
        #[arg(long, value_name = "QUERY", conflicts_with = "script")]
        query: Option<String>,
    },

    /// Print the version and the user agent sent to Wikibase
    Version,
}
