use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://www.mgm.gov.tr";

/// Per-wait timeout used unless the config overrides it.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(15);

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/100.0.4896.60 Safari/537.36";

/// Target site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin of the forecast site, also used to absolutize icon paths.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string() }
    }
}

/// Launch settings for the browser. Sessions always run headless.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub user_agent: String,
    /// Explicit Chrome binary; auto-detected when unset.
    pub chrome_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            window_width: 1920,
            window_height: 1080,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub wait_timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { wait_timeout_secs: DEFAULT_WAIT_TIMEOUT.as_secs() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [browser]
/// user_agent = "..."
///
/// [extraction]
/// wait_timeout_secs = 20
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub browser: BrowserConfig,
    pub extraction: ExtractionConfig,
}

/// Settings the extraction pipeline needs for one request.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub base_url: String,
    pub wait_timeout: Duration,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), wait_timeout: DEFAULT_WAIT_TIMEOUT }
    }
}

impl Config {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            base_url: self.site.base_url.clone(),
            wait_timeout: Duration::from_secs(self.extraction.wait_timeout_secs),
        }
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate().with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "mgm-weather", "mgm-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.extraction.wait_timeout_secs == 0 {
            return Err(anyhow!("extraction.wait_timeout_secs must be greater than zero"));
        }
        let base_url = &self.site.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(anyhow!("site.base_url must be an http(s) origin, got '{base_url}'"));
        }
        Ok(())
    }
}
