//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tpir/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TpirConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub sms: SmsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path to a contact directory TOML file. Relative paths resolve against
    /// the working directory. Unset = embedded directory.
    pub directory_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EmailConfig {
    pub base_url: Option<String>,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SmsConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_EMAIL_BASE_URL: &str = "https://api.emailjs.com";
pub const DEFAULT_EMAIL_SERVICE_ID: &str = "service_jfxtlcr";
pub const DEFAULT_EMAIL_TEMPLATE_ID: &str = "template_om2tjfy";
pub const DEFAULT_EMAIL_PUBLIC_KEY: &str = "y_Fxj6-d0d9Um4_JL";
pub const DEFAULT_SMS_BASE_URL: &str = "https://incident-management-backend.onrender.com";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub directory_file: Option<PathBuf>,
    pub email_base_url: String,
    pub email_service_id: String,
    pub email_template_id: String,
    pub email_public_key: String,
    pub sms_base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tpir/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tpir").join("config.toml"))
}

/// Load config from `~/.tpir/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TpirConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TpirConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TpirConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TpirConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: TpirConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# TPIR Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# directory_file = "contacts.toml"   # Contact directory (default: embedded)

# [email]
# base_url = "https://api.emailjs.com"
# service_id = "service_jfxtlcr"     # Or set TPIR_EMAIL_SERVICE_ID
# template_id = "template_om2tjfy"   # Or set TPIR_EMAIL_TEMPLATE_ID
# public_key = "y_Fxj6-d0d9Um4_JL"   # Or set TPIR_EMAIL_PUBLIC_KEY

# [sms]
# base_url = "https://incident-management-backend.onrender.com"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_directory` is the `--directory` flag (None = not specified).
pub fn resolve(config: &TpirConfig, cli_directory: Option<&str>) -> ResolvedConfig {
    // Directory file: CLI → env → config → embedded (None)
    let directory_file = cli_directory
        .map(|s| s.to_string())
        .or_else(|| std::env::var("TPIR_DIRECTORY_FILE").ok())
        .or_else(|| config.general.directory_file.clone())
        .map(PathBuf::from);

    let email_base_url = std::env::var("TPIR_EMAIL_BASE_URL")
        .ok()
        .or_else(|| config.email.base_url.clone())
        .unwrap_or_else(|| DEFAULT_EMAIL_BASE_URL.to_string());

    let email_service_id = std::env::var("TPIR_EMAIL_SERVICE_ID")
        .ok()
        .or_else(|| config.email.service_id.clone())
        .unwrap_or_else(|| DEFAULT_EMAIL_SERVICE_ID.to_string());

    let email_template_id = std::env::var("TPIR_EMAIL_TEMPLATE_ID")
        .ok()
        .or_else(|| config.email.template_id.clone())
        .unwrap_or_else(|| DEFAULT_EMAIL_TEMPLATE_ID.to_string());

    let email_public_key = std::env::var("TPIR_EMAIL_PUBLIC_KEY")
        .ok()
        .or_else(|| config.email.public_key.clone())
        .unwrap_or_else(|| DEFAULT_EMAIL_PUBLIC_KEY.to_string());

    let sms_base_url = std::env::var("TPIR_SMS_BASE_URL")
        .ok()
        .or_else(|| config.sms.base_url.clone())
        .unwrap_or_else(|| DEFAULT_SMS_BASE_URL.to_string());

    ResolvedConfig {
        directory_file,
        email_base_url,
        email_service_id,
        email_template_id,
        email_public_key,
        sms_base_url,
    }
}
