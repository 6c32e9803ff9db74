//! Configuration file loading for wikiprov
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./wikiprov.toml` or `./.wikiprov.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/wikiprov/config.toml`
//! 4. Environment: `WIKIPROV_<SECTION>__<KEY>`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileProvenanceConfig, FileQueryConfig, FileWikibaseConfig,
};
pub use loader::ConfigLoader;
