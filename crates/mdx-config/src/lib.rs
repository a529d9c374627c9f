//! Configuration management for the MDX documentation engine.
//!
//! Parses `docs.config.json` files with serde and provides
//! auto-discovery of config files in parent directories. The file uses
//! camelCase keys because the same JSON is served to the frontend:
//!
//! ```json
//! {
//!   "docsDir": "docs",
//!   "title": "Documentation",
//!   "description": "Project documentation"
//! }
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docs.config.json";

/// Default docs directory name when no config is present.
const DEFAULT_DOCS_DIR: &str = "docs";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override docs source directory.
    pub docs_dir: Option<PathBuf>,
    /// Override whether draft documents are served.
    pub include_drafts: Option<bool>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicitly requested config file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Raw configuration as parsed from JSON.
///
/// Kept separate from [`Config`] so the on-disk schema (camelCase,
/// relative paths, everything optional) stays decoupled from the
/// resolved runtime values.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ConfigRaw {
    docs_dir: Option<String>,
    title: Option<String>,
    description: Option<String>,
    server: Option<ServerRaw>,
    playground: Option<PlaygroundRaw>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ServerRaw {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlaygroundRaw {
    cycle_policy: Option<CyclePolicyChoice>,
}

/// How the playground resolver treats files that import each other in
/// a cycle. Mapped onto the resolver's own policy type by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicyChoice {
    #[default]
    Resolve,
    Placeholder,
}

/// Server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4400,
        }
    }
}

/// Resolved application configuration.
#[derive(Debug)]
pub struct Config {
    /// Directory containing the markdown/MDX documents, resolved
    /// relative to the config file location (or cwd without one).
    pub docs_dir: PathBuf,
    /// Site title shown in the navigation header.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Server bind settings.
    pub server: ServerSettings,
    /// Whether documents marked `draft: true` are served.
    pub include_drafts: bool,
    /// Playground cycle handling.
    pub cycle_policy: CyclePolicyChoice,
    /// Path to the config file, if one was loaded.
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file and fails if
    /// it is missing or malformed. Otherwise searches for
    /// `docs.config.json` in the current directory and parents; a
    /// discovered file that fails to parse is logged and ignored,
    /// matching the best-effort posture of the rest of the pipeline.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// cannot be parsed.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            match Self::load_from_file(&discovered) {
                Ok(config) => config,
                Err(error) => {
                    warn!(
                        path = %discovered.display(),
                        %error,
                        "ignoring unreadable config file, using defaults"
                    );
                    Self::default_with_cwd()
                }
            }
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// The URL prefix documents are served under: the last path segment
    /// of the docs directory, falling back to `docs`.
    #[must_use]
    pub fn route_prefix(&self) -> String {
        self.docs_dir
            .file_name()
            .map_or_else(|| DEFAULT_DOCS_DIR.to_owned(), |name| {
                name.to_string_lossy().into_owned()
            })
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(docs_dir) = &settings.docs_dir {
            self.docs_dir.clone_from(docs_dir);
        }
        if let Some(include_drafts) = settings.include_drafts {
            self.include_drafts = include_drafts;
        }
    }

    /// Search for the config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            docs_dir: base.join(DEFAULT_DOCS_DIR),
            title: "Documentation".to_owned(),
            description: String::new(),
            server: ServerSettings::default(),
            include_drafts: false,
            cycle_policy: CyclePolicyChoice::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let raw: ConfigRaw = serde_json::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::default_with_base(config_dir);

        if let Some(docs_dir) = raw.docs_dir {
            config.docs_dir = config_dir.join(docs_dir);
        }
        if let Some(title) = raw.title {
            config.title = title;
        }
        if let Some(description) = raw.description {
            config.description = description;
        }
        if let Some(server) = raw.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
        }
        if let Some(playground) = raw.playground
            && let Some(policy) = playground.cycle_policy
        {
            config.cycle_policy = policy;
        }
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::Validation(
                "server.host cannot be empty".to_owned(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be non-zero".to_owned(),
            ));
        }
        if self.route_prefix().is_empty() {
            return Err(ConfigError::Validation(
                "docsDir must have a non-empty final path segment".to_owned(),
            ));
        }
        Ok(())
    }
}
