use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loaded from `~/.config/nozomi/config.toml`.
///
/// Missing keys fall back to the values in [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NozomiConfig {
    /// Host that serves the index files.
    pub domain: String,
    /// URL scheme used to reach `domain`.
    pub scheme: String,
    /// Gallery identifiers shown per listing page.
    pub entries_per_page: u32,
    /// File extension of index files, including the dot.
    pub extension: String,
    /// Host of the human-facing site; pasted URLs are cut after `<site_host>/`.
    pub site_host: String,
    /// Optional request timeout in seconds (None = wait indefinitely).
    pub timeout_secs: Option<u64>,
}

impl Default for NozomiConfig {
    fn default() -> Self {
        Self {
            domain: "ltn.hitomi.la".to_string(),
            scheme: "https".to_string(),
            entries_per_page: 25,
            extension: ".nozomi".to_string(),
            site_host: "hitomi.la".to_string(),
            timeout_secs: None,
        }
    }
}

impl NozomiConfig {
    /// `scheme://domain`, without trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.domain.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Reject values no fetch could work with.
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            bail!("config: domain must not be empty");
        }
        if self.scheme.trim().is_empty() {
            bail!("config: scheme must not be empty");
        }
        if self.entries_per_page == 0 {
            bail!("config: entries_per_page must be at least 1");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("nozomi")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit file; it must exist.
pub fn load_from(path: &Path) -> Result<NozomiConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: NozomiConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NozomiConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = NozomiConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}
