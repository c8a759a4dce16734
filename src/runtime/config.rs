use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::modules::error::ConfigError;
use crate::modules::interface::{InitSystemKind, PackageManagerKind};

pub const CONFIG_ENV: &str = "TUM_CONFIG";

/// Engine configuration, usually read from `~/.config/tum/config.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Per-command timeout; `None` waits for the tool indefinitely
    #[serde(rename = "timeout_secs", with = "serde_duration_opt")]
    pub timeout: Option<Duration>,
    /// Return unsuccessful outcomes as errors
    pub strict: bool,
    pub assume_yes: bool,
    /// Exported as LC_ALL/LANG to child processes; `None` inherits
    pub locale: Option<String>,
    /// Skip package manager detection and use this one
    pub package_manager: Option<PackageManagerKind>,
    /// Skip init system detection and use this one
    pub init_system: Option<InitSystemKind>,
    pub log_level: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            strict: false,
            assume_yes: true,
            locale: Some("C".to_string()),
            package_manager: None,
            init_system: None,
            log_level: "warn".to_string(),
        }
    }
}

impl ManagerConfig {
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|error| ConfigError::Parse {
            path: origin.display().to_string(),
            error,
        })
    }

    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|error| ConfigError::Read {
                path: path.display().to_string(),
                error,
            })?;
        Self::from_yaml(&content, path)
    }

    /// Load from `explicit`, then `$TUM_CONFIG`, then the user config
    /// directory. Only an explicitly named file has to exist.
    pub async fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path).await;
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path)).await;
        }
        match Self::default_path() {
            Some(path) if tokio::fs::metadata(&path).await.is_ok() => Self::load(&path).await,
            _ => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tum").join("config.yaml"))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

mod serde_duration_opt {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
