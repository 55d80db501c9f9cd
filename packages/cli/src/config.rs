use docanchor_editor::{
    IdentityScheme, OutlineConfig, DEFAULT_MARKER_TITLE_PREFIX, DEFAULT_OUTLINE_KEY,
};
use docanchor_workspace::VersionStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "docanchor.config.json";

/// Docanchor configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// How anchors are derived ("positional" or "occurrence")
    #[serde(default)]
    pub identity_scheme: IdentityScheme,

    /// Settings key the outline snapshot is stored under
    #[serde(default = "default_outline_key")]
    pub outline_key: String,

    #[serde(default = "default_marker_title_prefix")]
    pub marker_title_prefix: String,

    /// Where saved versions go, relative to the config directory
    #[serde(default = "default_versions_dir")]
    pub versions_dir: String,

    #[serde(default = "default_keep_versions")]
    pub keep_versions: bool,
}

fn default_outline_key() -> String {
    DEFAULT_OUTLINE_KEY.to_string()
}

fn default_marker_title_prefix() -> String {
    DEFAULT_MARKER_TITLE_PREFIX.to_string()
}

fn default_versions_dir() -> String {
    ".docanchor/versions".to_string()
}

fn default_keep_versions() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn outline_config(&self) -> OutlineConfig {
        OutlineConfig {
            scheme: self.identity_scheme,
            settings_key: self.outline_key.clone(),
            marker_title_prefix: self.marker_title_prefix.clone(),
        }
    }

    /// Version store for saves, if versioning is on
    pub fn version_store(&self, cwd: &str) -> Option<VersionStore> {
        self.keep_versions
            .then(|| VersionStore::new(PathBuf::from(cwd).join(&self.versions_dir)))
    }

    /// Version store for reading, regardless of `keep_versions`
    pub fn versions_root(&self, cwd: &str) -> VersionStore {
        VersionStore::new(PathBuf::from(cwd).join(&self.versions_dir))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identity_scheme: IdentityScheme::default(),
            outline_key: default_outline_key(),
            marker_title_prefix: default_marker_title_prefix(),
            versions_dir: default_versions_dir(),
            keep_versions: default_keep_versions(),
        }
    }
}
