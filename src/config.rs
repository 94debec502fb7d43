use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default transfer buffer size: 128 KiB. Large buffers amortize per-write
/// syscall overhead on bulk image transfer; any sufficiently large value
/// behaves the same.
pub const DEFAULT_TRANSFER_BUFFER: usize = 128 * 1024;

/// Transport configuration loaded from `~/.config/imgio/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Verify the server TLS certificate. Disabling this is an opt-in for
    /// test servers with self-signed certificates; production transfers
    /// should leave it on.
    pub verify_tls: bool,
    /// Transfer buffer size in bytes, applied to both directions.
    pub transfer_buffer_bytes: usize,
    /// Optional connection-establishment timeout in seconds (None = no limit).
    /// Request deadlines are per-operation parameters, not configuration.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            verify_tls: true,
            transfer_buffer_bytes: DEFAULT_TRANSFER_BUFFER,
            connect_timeout_secs: Some(30),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgio")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TransportConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TransportConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: TransportConfig = toml::from_str(&data)?;
    Ok(cfg)
}
