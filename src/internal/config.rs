//! Run configuration: repository, ordered tag list and the PlantUML jar, loaded from JSON.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::path::DEFAULT_STORE_DIR;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no tags configured")]
    NoTags,

    #[error("no visualization tool configured")]
    NoTool,
}

/// Contents of the JSON config file.
///
/// ```json
/// {
///     "repository_path": "/path/to/repo",
///     "tag_names": ["v1.0", "v1.1"],
///     "visualization_tool": "/path/to/plantuml.jar"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub repository_path: PathBuf,
    /// Oldest first
    #[serde(default)]
    pub tag_names: Vec<String>,
    /// Path to `plantuml.jar`
    #[serde(default)]
    pub visualization_tool: Option<PathBuf>,
    /// Store directory under the repository root
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// Where the rendered image is written; the extension picks the format
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Java launcher used to run the jar
    #[serde(default = "default_java")]
    pub java: PathBuf,
    /// Follow annotated tag objects to their commit
    #[serde(default)]
    pub peel_tags: bool,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_DIR)
}

fn default_output() -> PathBuf {
    PathBuf::from("graph.png")
}

fn default_java() -> PathBuf {
    PathBuf::from("java")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repository_path: PathBuf::from("."),
            tag_names: Vec::new(),
            visualization_tool: None,
            store_dir: default_store_dir(),
            output: default_output(),
            java: default_java(),
            peel_tags: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise starts from defaults so flags can fill everything in.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("config file {} not found, using defaults", path.display());
            Ok(Config::default())
        }
    }

    pub fn from_json(content: &str) -> Result<Config, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn require_tags(&self) -> Result<&[String], ConfigError> {
        if self.tag_names.is_empty() {
            return Err(ConfigError::NoTags);
        }
        Ok(&self.tag_names)
    }

    pub fn require_tool(&self) -> Result<&Path, ConfigError> {
        self.visualization_tool.as_deref().ok_or(ConfigError::NoTool)
    }
}
