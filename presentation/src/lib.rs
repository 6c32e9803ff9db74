//! Presentation layer for wikiprov
//!
//! This crate contains CLI definitions, `.sparql` script parsing,
//! output formatters, and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, DEMO_HISTORY, DEMO_IDENTIFIER, OutputFormat};
pub use cli::script::{ScriptError, SparqlScript};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
