//! Configuration file loading and settings resolution.
//!
//! wiki-sync reads optional settings from `wiki-sync.toml` in the working
//! directory. Every key has a default, so running without a config file is the
//! normal case.
//!
//! Priority order (highest to lowest):
//! 1. Command-line flags
//! 2. Config file
//! 3. Environment (`GITHUB_REPOSITORY` for the repository identifier)
//! 4. Defaults (hardcoded)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{Result, WikiError};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "wiki-sync.toml";

/// Environment variable holding the `owner/repo` identifier (set by GitHub Actions).
pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

/// Repository used when none is configured.
pub const FALLBACK_REPOSITORY: &str = "rios0rios0/guide";

/// Host serving raw wiki files; the repository identifier is appended.
pub const WIKI_RAW_HOST: &str = "https://raw.githubusercontent.com/wiki";

const DEFAULT_SOURCE_DIR: &str = ".";
const DEFAULT_WIKI_DIR: &str = "wiki";
const DEFAULT_EXCLUDE: &[&str] = &[".git", ".github", ".editorconfig", "README.md"];
const DEFAULT_PRESERVE: &[&str] = &[".git"];

/// Root configuration structure loaded from `wiki-sync.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WikiConfig {
    /// Documentation tree to publish (default: ".").
    pub source_dir: Option<PathBuf>,
    /// Staging directory, usually a clone of the wiki repository (default: "wiki").
    pub wiki_dir: Option<PathBuf>,
    /// Repository identifier in `owner/repo` form.
    pub repository: Option<String>,
    /// Base URL for wiki images, overrides the one derived from `repository`.
    pub base_url: Option<String>,
    /// Top-level names in the source tree that are not copied.
    pub exclude: Option<Vec<String>>,
    /// Names in the wiki directory kept when it is cleared.
    pub preserve: Option<Vec<String>>,
}

impl WikiConfig {
    /// Load configuration from an explicit path.
    ///
    /// Unlike [`WikiConfig::load_from_dir`], a missing file is an error: the
    /// caller asked for this file by name.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| WikiError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| WikiError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `wiki-sync.toml` from `dir` if it exists.
    ///
    /// Returns an empty config (all fields None) if the file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load(&config_path)
    }

    /// Get exclude list with default fallback.
    pub fn exclude(&self) -> Vec<String> {
        self.exclude
            .clone()
            .unwrap_or_else(|| DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect())
    }

    /// Get preserve list with default fallback.
    pub fn preserve(&self) -> Vec<String> {
        self.preserve
            .clone()
            .unwrap_or_else(|| DEFAULT_PRESERVE.iter().map(|s| s.to_string()).collect())
    }
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source_dir: Option<PathBuf>,
    pub wiki_dir: Option<PathBuf>,
    pub repository: Option<String>,
    pub base_url: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub source_dir: PathBuf,
    pub wiki_dir: PathBuf,
    pub repository: String,
    pub base_url: String,
    pub exclude: Vec<String>,
    pub preserve: Vec<String>,
}

impl Settings {
    /// Merge flags, config file, and environment into the settings for a run.
    ///
    /// `env_repository` is the value of [`REPOSITORY_ENV`], passed in so callers
    /// and tests control where it comes from. Blank values count as unset.
    pub fn resolve(
        config: &WikiConfig,
        overrides: &Overrides,
        env_repository: Option<String>,
    ) -> Self {
        let repository = first_non_blank([
            overrides.repository.clone(),
            config.repository.clone(),
            env_repository,
        ])
        .unwrap_or_else(|| FALLBACK_REPOSITORY.to_string());

        let base_url = first_non_blank([overrides.base_url.clone(), config.base_url.clone()])
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| base_url_for(&repository));

        Self {
            source_dir: overrides
                .source_dir
                .clone()
                .or_else(|| config.source_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR)),
            wiki_dir: overrides
                .wiki_dir
                .clone()
                .or_else(|| config.wiki_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WIKI_DIR)),
            repository,
            base_url,
            exclude: config.exclude(),
            preserve: config.preserve(),
        }
    }
}

/// Base URL of the raw wiki file store for an `owner/repo` identifier.
pub fn base_url_for(repository: &str) -> String {
    format!("{}/{}", WIKI_RAW_HOST, repository.trim_matches('/'))
}

fn first_non_blank<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config_toml = r#"
source_dir = "docs"
wiki_dir = "out/wiki"
repository = "acme/handbook"
exclude = [".git", "drafts"]
preserve = [".git", "_Sidebar.md"]
"#;
        let config: WikiConfig = toml::from_str(config_toml).unwrap();

        assert_eq!(config.source_dir, Some(PathBuf::from("docs")));
        assert_eq!(config.repository.as_deref(), Some("acme/handbook"));
        assert_eq!(config.exclude(), vec![".git", "drafts"]);
        assert_eq!(config.preserve(), vec![".git", "_Sidebar.md"]);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: std::result::Result<WikiConfig, _> = toml::from_str("wikidir = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_dir_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = WikiConfig::load_from_dir(temp.path()).unwrap();

        assert_eq!(config, WikiConfig::default());
        assert_eq!(config.exclude(), vec![".git", ".github", ".editorconfig", "README.md"]);
        assert_eq!(config.preserve(), vec![".git"]);
    }

    #[test]
    fn test_load_from_dir_reads_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "repository = \"acme/handbook\"\n",
        )
        .unwrap();

        let config = WikiConfig::load_from_dir(temp.path()).unwrap();
        assert_eq!(config.repository.as_deref(), Some("acme/handbook"));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "repository = [unterminated").unwrap();

        let err = WikiConfig::load(&path).unwrap_err();
        assert!(matches!(err, WikiError::ConfigParse { .. }));
        assert_eq!(err.path(), &path);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = WikiConfig::load(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, WikiError::ConfigRead { .. }));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(&WikiConfig::default(), &Overrides::default(), None);

        assert_eq!(settings.source_dir, PathBuf::from("."));
        assert_eq!(settings.wiki_dir, PathBuf::from("wiki"));
        assert_eq!(settings.repository, FALLBACK_REPOSITORY);
        assert_eq!(
            settings.base_url,
            "https://raw.githubusercontent.com/wiki/rios0rios0/guide"
        );
    }

    #[test]
    fn test_resolve_repository_priority() {
        let config = WikiConfig {
            repository: Some("config/repo".to_string()),
            ..Default::default()
        };
        let overrides = Overrides {
            repository: Some("flag/repo".to_string()),
            ..Default::default()
        };
        let env = Some("env/repo".to_string());

        let settings = Settings::resolve(&config, &overrides, env.clone());
        assert_eq!(settings.repository, "flag/repo");

        let settings = Settings::resolve(&config, &Overrides::default(), env.clone());
        assert_eq!(settings.repository, "config/repo");

        let settings = Settings::resolve(&WikiConfig::default(), &Overrides::default(), env);
        assert_eq!(settings.repository, "env/repo");
        assert_eq!(
            settings.base_url,
            "https://raw.githubusercontent.com/wiki/env/repo"
        );
    }

    #[test]
    fn test_resolve_blank_env_falls_back() {
        let settings = Settings::resolve(
            &WikiConfig::default(),
            &Overrides::default(),
            Some("   ".to_string()),
        );
        assert_eq!(settings.repository, FALLBACK_REPOSITORY);
    }

    #[test]
    fn test_resolve_explicit_base_url_wins() {
        let config = WikiConfig {
            base_url: Some("https://cdn.example.com/wiki/".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(&config, &Overrides::default(), Some("a/b".to_string()));

        assert_eq!(settings.base_url, "https://cdn.example.com/wiki");
        assert_eq!(settings.repository, "a/b");
    }
}
