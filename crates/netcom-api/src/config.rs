//! # API Configuration
//!
//! Where the two backends live and which token each one gets.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     NETCOM_STOREFRONT_URL   NETCOM_STOREFRONT_TOKEN                    │
//! │     NETCOM_PARTNER_URL      NETCOM_PARTNER_TOKEN                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/netcom-selfservice/netcom.toml (Linux)                   │
//! │     ~/Library/Application Support/br.netcom.selfservice/netcom.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     production base URLs, no tokens                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storefront]
//! base_url = "https://api.brazmovel.com.br/v1/"
//! token = "..."
//!
//! [partner]
//! base_url = "https://nextlayer.dev/api/appnetcom/"
//! token = "..."
//! ```
//!
//! Tokens are process configuration, never user input, and are held as
//! [`SecretString`] from the moment they are read.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use tracing::{debug, info};
use url::Url;

use crate::auth::{PartnerToken, StorefrontToken};
use crate::error::{ApiError, ApiResult};

pub const DEFAULT_STOREFRONT_URL: &str = "https://api.brazmovel.com.br/v1/";
pub const DEFAULT_PARTNER_URL: &str = "https://nextlayer.dev/api/appnetcom/";

pub const ENV_STOREFRONT_URL: &str = "NETCOM_STOREFRONT_URL";
pub const ENV_STOREFRONT_TOKEN: &str = "NETCOM_STOREFRONT_TOKEN";
pub const ENV_PARTNER_URL: &str = "NETCOM_PARTNER_URL";
pub const ENV_PARTNER_TOKEN: &str = "NETCOM_PARTNER_TOKEN";

// =============================================================================
// Backend Settings
// =============================================================================

/// One backend: base URL and its bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub token: Option<SecretString>,
}

fn default_storefront() -> BackendSettings {
    BackendSettings {
        base_url: DEFAULT_STOREFRONT_URL.to_string(),
        token: None,
    }
}

fn default_partner() -> BackendSettings {
    BackendSettings {
        base_url: DEFAULT_PARTNER_URL.to_string(),
        token: None,
    }
}

fn deserialize_secret<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SecretString>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(SecretString::from))
}

impl BackendSettings {
    /// Parses `base_url`, requiring http(s).
    pub fn url(&self) -> ApiResult<Url> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ApiError::Config(format!(
                "a URL base deve usar http ou https, recebido {other}://"
            ))),
        }
    }
}

// =============================================================================
// Api Config
// =============================================================================

/// Complete API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_storefront")]
    pub storefront: BackendSettings,

    #[serde(default = "default_partner")]
    pub partner: BackendSettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            storefront: default_storefront(),
            partner: default_partner(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`netcom.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ApiResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading API config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> ApiResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Both base URLs must parse as http(s).
    pub fn validate(&self) -> ApiResult<()> {
        self.storefront.url()?;
        self.partner.url()?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source (the process environment
    /// in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_STOREFRONT_URL) {
            debug!(url = %url, "Overriding storefront URL from environment");
            self.storefront.base_url = url;
        }
        if let Some(token) = lookup(ENV_STOREFRONT_TOKEN).filter(|t| !t.is_empty()) {
            self.storefront.token = Some(SecretString::from(token));
        }
        if let Some(url) = lookup(ENV_PARTNER_URL) {
            debug!(url = %url, "Overriding partner URL from environment");
            self.partner.base_url = url;
        }
        if let Some(token) = lookup(ENV_PARTNER_TOKEN).filter(|t| !t.is_empty()) {
            self.partner.token = Some(SecretString::from(token));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("br", "netcom", "selfservice")
            .map(|dirs| dirs.config_dir().join("netcom.toml"))
    }

    // =========================================================================
    // Credentials
    // =========================================================================

    /// The end-user storefront token. Errors when not configured.
    pub fn storefront_token(&self) -> ApiResult<StorefrontToken> {
        self.storefront
            .token
            .clone()
            .map(StorefrontToken::new)
            .ok_or_else(|| ApiError::Config(format!("{ENV_STOREFRONT_TOKEN} não está definido")))
    }

    /// The server-to-server partner token. Errors when not configured.
    pub fn partner_token(&self) -> ApiResult<PartnerToken> {
        self.partner
            .token
            .clone()
            .map(PartnerToken::new)
            .ok_or_else(|| ApiError::Config(format!("{ENV_PARTNER_TOKEN} não está definido")))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
