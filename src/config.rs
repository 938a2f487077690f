use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Plugin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub typewriter: TypewriterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypewriterConfig {
    /// Master switch for typewriter mode
    #[serde(default = "default_true")]
    pub enable: bool,
    /// Debounce delay before scrolling, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Table block targeting
    #[serde(default)]
    pub table: TableTargeting,
    /// Code block targeting
    #[serde(default)]
    pub code: CodeTargeting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableTargeting {
    /// Scroll to the enclosing table cell instead of the whole table
    #[serde(default = "default_true")]
    pub row: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeTargeting {
    /// Scroll to the current line instead of the whole code block
    /// (reserved; currently behaves as if off)
    #[serde(default)]
    pub row: bool,
}

// Default value helpers
fn default_true() -> bool {
    true
}
fn default_timeout_ms() -> u64 {
    150
}

impl Default for Config {
    fn default() -> Self {
        Self {
            typewriter: TypewriterConfig::default(),
        }
    }
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            enable: true,
            timeout_ms: 150,
            table: TableTargeting::default(),
            code: CodeTargeting::default(),
        }
    }
}

impl Default for TableTargeting {
    fn default() -> Self {
        Self { row: true }
    }
}

impl Default for CodeTargeting {
    fn default() -> Self {
        Self { row: false }
    }
}

impl TypewriterConfig {
    /// The debounce delay as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Load configuration from the default config file location
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(content) = std::fs::read_to_string(&path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("blockwriter").join("config.toml"))
    }

    /// Save configuration to the default config file location
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(self)?;
            std::fs::write(path, content)?;
        }
        Ok(())
    }
}
