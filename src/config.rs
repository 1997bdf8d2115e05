//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/artsy-timeline/config.toml` (XDG) or platform config dir
//! 2. Project config: `.artsy-timeline.toml`
//! 3. Environment variables: `ARTSY_TIMELINE_*`, nested keys separated by `__`
//!
//! ```toml
//! [artsy]
//! xapp_token = "..."
//! base_api_url = "https://api.artsy.net/api/v1/"
//! base_url = "https://artsy.net"
//! ```
//!
//! The same token can be supplied as `ARTSY_TIMELINE_ARTSY__XAPP_TOKEN`.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

/// Default Artsy API endpoint. Paths are appended verbatim, so it ends with `/`.
pub const DEFAULT_BASE_API_URL: &str = "https://api.artsy.net/api/v1/";

/// Default public site, used as the base for rewritten relative links.
pub const DEFAULT_BASE_URL: &str = "https://artsy.net";

const PROJECT_CONFIG_FILE: &str = ".artsy-timeline.toml";
const ENV_PREFIX: &str = "ARTSY_TIMELINE_";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub artsy: ArtsyConfig,
}

/// Artsy API access.
///
/// The token is optional here so that a missing credential is reported by
/// [`Client`](crate::client::Client) construction rather than by config extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtsyConfig {
    /// Static application token sent as `X-Xapp-Token`.
    #[serde(default)]
    pub xapp_token: Option<String>,
    /// API endpoint, e.g. `https://api.artsy.net/api/v1/`.
    #[serde(default = "default_base_api_url")]
    pub base_api_url: String,
    /// Public site base for link rewriting.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ArtsyConfig {
    fn default() -> Self {
        Self {
            xapp_token: None,
            base_api_url: default_base_api_url(),
            base_url: default_base_url(),
        }
    }
}

fn default_base_api_url() -> String {
    DEFAULT_BASE_API_URL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::user_config_path(), PROJECT_CONFIG_FILE)
    }

    /// Load config from explicit user and project files, then the environment.
    ///
    /// Missing files are skipped.
    pub fn load_from(
        user_config: impl AsRef<Path>,
        project_config: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Toml::file(user_config.as_ref()))
            .merge(Toml::file(project_config.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/artsy-timeline/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home
                .join(".config")
                .join("artsy-timeline")
                .join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        dirs::config_dir()
            .map(|p| p.join("artsy-timeline").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for key in [
            "ARTSY_TIMELINE_ARTSY__XAPP_TOKEN",
            "ARTSY_TIMELINE_ARTSY__BASE_API_URL",
            "ARTSY_TIMELINE_ARTSY__BASE_URL",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_files() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("none.toml"), dir.path().join("x.toml"))
            .unwrap();

        assert_eq!(config.artsy.xapp_token, None);
        assert_eq!(config.artsy.base_api_url, DEFAULT_BASE_API_URL);
        assert_eq!(config.artsy.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_project_file_overrides_user_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("user.toml");
        let project = dir.path().join("project.toml");

        let mut f = std::fs::File::create(&user).unwrap();
        writeln!(f, "[artsy]\nxapp_token = \"user-token\"\nbase_url = \"https://user.example\"")
            .unwrap();
        let mut f = std::fs::File::create(&project).unwrap();
        writeln!(f, "[artsy]\nxapp_token = \"project-token\"").unwrap();

        let config = Config::load_from(&user, &project).unwrap();
        assert_eq!(config.artsy.xapp_token.as_deref(), Some("project-token"));
        assert_eq!(config.artsy.base_url, "https://user.example");
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("project.toml");
        let mut f = std::fs::File::create(&project).unwrap();
        writeln!(f, "[artsy]\nxapp_token = \"project-token\"").unwrap();

        std::env::set_var("ARTSY_TIMELINE_ARTSY__XAPP_TOKEN", "env-token");
        let config = Config::load_from(dir.path().join("none.toml"), &project).unwrap();
        clear_env();

        assert_eq!(config.artsy.xapp_token.as_deref(), Some("env-token"));
    }
}
