//! Application configuration.
//!
//! Configuration is stored in `config.yaml` under [`contas_root`](crate::paths::contas_root) and includes:
//! - The accounts API base URL and request timeout
//! - Listing page size and search debounce delay
//! - How successful mutations are reconciled into the listing
//! - User-facing messages (confirmations, notifications, empty state)

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ContasError, Result};
use crate::paths::config_file;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the accounts API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Rows requested per page (default: 5)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Quiet period before a search edit triggers a fetch (default: 300)
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Remote operation timeout in seconds (default: 30)
    #[serde(default = "default_remote_timeout")]
    pub remote_timeout: u64,

    /// Reconciliation of mutations into the listing
    #[serde(default, skip_serializing_if = "ReconcileConfig::is_default")]
    pub reconcile: ReconcileConfig,

    /// User-facing messages
    #[serde(default, skip_serializing_if = "Messages::is_default")]
    pub messages: Messages,
}

fn default_base_url() -> String {
    "http://localhost:8087".to_string()
}

fn default_page_size() -> u32 {
    5
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_remote_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            remote_timeout: default_remote_timeout(),
            reconcile: ReconcileConfig::default(),
            messages: Messages::default(),
        }
    }
}

/// What happens to the listing after a successful delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteReconcile {
    /// Remove the row locally, leave the total count as reported
    #[default]
    Keep,
    /// Remove the row locally, then refetch the current page
    Refetch,
}

/// What happens to the listing after a successful payment update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentReconcile {
    /// Set the row's payment date to the date that was sent
    #[default]
    Patch,
    /// Refetch the current page
    Refetch,
    /// Leave the listing untouched until the next fetch
    Leave,
}

impl fmt::Display for DeleteReconcile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteReconcile::Keep => write!(f, "keep"),
            DeleteReconcile::Refetch => write!(f, "refetch"),
        }
    }
}

impl FromStr for DeleteReconcile {
    type Err = ContasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(DeleteReconcile::Keep),
            "refetch" => Ok(DeleteReconcile::Refetch),
            _ => Err(ContasError::Config(format!(
                "unknown delete reconcile mode '{s}', expected 'keep' or 'refetch'"
            ))),
        }
    }
}

impl fmt::Display for PaymentReconcile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentReconcile::Patch => write!(f, "patch"),
            PaymentReconcile::Refetch => write!(f, "refetch"),
            PaymentReconcile::Leave => write!(f, "leave"),
        }
    }
}

impl FromStr for PaymentReconcile {
    type Err = ContasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "patch" => Ok(PaymentReconcile::Patch),
            "refetch" => Ok(PaymentReconcile::Refetch),
            "leave" => Ok(PaymentReconcile::Leave),
            _ => Err(ContasError::Config(format!(
                "unknown payment reconcile mode '{s}', expected 'patch', 'refetch' or 'leave'"
            ))),
        }
    }
}

/// Reconciliation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileConfig {
    #[serde(default)]
    pub after_delete: DeleteReconcile,
    #[serde(default)]
    pub after_payment: PaymentReconcile,
}

impl ReconcileConfig {
    /// Check if this config is the default (for serialization skip)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Messages shown by the listing and its row actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub listing_title: String,
    pub search_placeholder: String,
    pub empty_listing: String,
    pub loading: String,
    pub confirm_delete: String,
    pub confirm_payment: String,
    pub deleted: String,
    pub paid: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            listing_title: "Listagem de Contas".to_string(),
            search_placeholder: "Pesquisar...".to_string(),
            empty_listing: "Nenhum registro encontrado.".to_string(),
            loading: "Carregando...".to_string(),
            confirm_delete: "Realmente deseja apagar?".to_string(),
            confirm_payment: "Deseja realizar pagamento?".to_string(),
            deleted: "Registro apagado com sucesso!".to_string(),
            paid: "Registro pago com sucesso!".to_string(),
        }
    }
}

impl Messages {
    /// Check if these messages are the defaults (for serialization skip)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        config_file()
    }

    /// Load configuration from the default location, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ContasError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                ContasError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| {
            ContasError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;
        Ok(())
    }

    /// Reject values the listing cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ContasError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        url::Url::parse(&self.base_url).map_err(|e| {
            ContasError::Config(format!("invalid base_url '{}': {e}", self.base_url))
        })?;
        Ok(())
    }

    /// Get the API base URL from the environment or config file
    pub fn api_base_url(&self) -> String {
        if let Ok(url) = env::var("CONTAS_BASE_URL")
            && !url.is_empty()
        {
            return url;
        }

        self.base_url.clone()
    }

    /// Get the remote operation timeout duration
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout)
    }

    /// Get the search debounce delay
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Set a value by its dotted key, as used by `contas config set`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => {
                url::Url::parse(value).map_err(|e| {
                    ContasError::Config(format!("invalid base_url '{value}': {e}"))
                })?;
                self.base_url = value.to_string();
            }
            "page_size" => {
                let size = parse_number::<u32>(key, value)?;
                if size == 0 {
                    return Err(ContasError::Config(
                        "page_size must be at least 1".to_string(),
                    ));
                }
                self.page_size = size;
            }
            "search_debounce_ms" => self.search_debounce_ms = parse_number(key, value)?,
            "remote_timeout" => self.remote_timeout = parse_number(key, value)?,
            "reconcile.after_delete" => self.reconcile.after_delete = value.parse()?,
            "reconcile.after_payment" => self.reconcile.after_payment = value.parse()?,
            _ => {
                return Err(ContasError::Config(format!(
                    "unknown config key '{key}'. Valid keys: {}",
                    VALID_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Keys accepted by [`Config::set`]
pub const VALID_KEYS: &[&str] = &[
    "base_url",
    "page_size",
    "search_debounce_ms",
    "remote_timeout",
    "reconcile.after_delete",
    "reconcile.after_payment",
];

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ContasError::Config(format!("invalid value '{value}' for {key}")))
}
