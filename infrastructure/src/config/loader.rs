//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_FILES: [&str; 2] = ["wikiprov.toml", ".wikiprov.toml"];
const ENV_PREFIX: &str = "WIKIPROV_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./wikiprov.toml` or `./.wikiprov.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/wikiprov/config.toml`
    /// 4. Environment: `WIKIPROV_<SECTION>__<KEY>`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `$XDG_CONFIG_HOME/wikiprov/config.toml`, or the platform equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("wikiprov").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(config_path: Option<&Path>) -> String {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{mark}] Explicit: {}", path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project:  {}", path.display())),
            None => lines.push("  [     ] Project:  ./wikiprov.toml or ./.wikiprov.toml".into()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{mark}] Global:   {}", path.display()));
        }

        lines.push(format!("  [     ] Env:      {ENV_PREFIX}<SECTION>__<KEY>"));
        lines.push("  [     ] Default:  built-in defaults".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.provenance.history, 5);
        assert_eq!(config.provenance.max_threads, 10);
        assert!(config.provenance.key.is_empty());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("wikiprov"));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[provenance]\nhistory = 2\nkey = \"item\"\n\n[wikibase]\nbase_uri = \"http://localhost:8181\""
        )
        .unwrap();

        let config = ConfigLoader::load(Some(file.path())).unwrap();
        assert_eq!(config.provenance.history, 2);
        assert_eq!(config.provenance.key, "item");
        assert_eq!(config.wikibase.api_url(), "http://localhost:8181/w/api.php");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provenance]\nhistory = \"many\"").unwrap();
        assert!(ConfigLoader::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_project_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file("wikiprov.toml", "[provenance]\nthreads = 3\nhistory = 4\n")?;
            jail.set_env("WIKIPROV_PROVENANCE__KEY", "subject");
            jail.set_env("WIKIPROV_PROVENANCE__HISTORY", "9");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.provenance.threads, 3);
            // project file outranks the environment
            assert_eq!(config.provenance.history, 4);
            assert_eq!(config.provenance.key, "subject");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_outranks_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file(".wikiprov.toml", "[provenance]\nthreads = 3\n")?;
            jail.create_file("custom.toml", "[provenance]\nthreads = 7\n")?;

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| *e)?;
            assert_eq!(config.provenance.threads, 7);
            Ok(())
        });
    }

    #[test]
    fn test_describe_sources_lists_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file("wikiprov.toml", "")?;
            let text = ConfigLoader::describe_sources(None);
            assert!(text.contains("[FOUND] Project:  wikiprov.toml"));
            Ok(())
        });
    }
}
