//! Configuration loading and management

use crate::core::auth::{Role, UserAccount};
use crate::core::card::Card;
use crate::core::query::PaginationConfig;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:8080"
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Postgres,
}

/// Record store selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Connection URL, required for `postgres`
    pub url: Option<String>,

    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            url: None,
            max_connections: 5,
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
    pub storage: StorageConfig,

    /// Accounts accepted by the static auth provider
    pub users: Vec<UserAccount>,

    /// Fixture cards loaded into the store at startup
    pub seed: Vec<Card>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.pagination.default_page_size == 0 {
            bail!("pagination.default_page_size must be positive");
        }
        if self.pagination.max_page_size < self.pagination.default_page_size {
            bail!(
                "pagination.max_page_size ({}) is below default_page_size ({})",
                self.pagination.max_page_size,
                self.pagination.default_page_size
            );
        }

        let mut usernames = HashSet::new();
        for user in &self.users {
            if !usernames.insert(user.username.as_str()) {
                bail!("duplicate user '{}'", user.username);
            }
        }

        let mut ids = HashSet::new();
        for card in &self.seed {
            if card.id.value() <= 0 {
                bail!("seed card id {} must be positive", card.id);
            }
            if card.id.value() == i64::MAX {
                bail!("seed card id {} leaves no room for new cards", card.id);
            }
            if !ids.insert(card.id) {
                bail!("duplicate seed card id {}", card.id);
            }
        }

        if self.storage.backend == StorageBackend::Postgres && self.storage.url.is_none() {
            bail!("storage.url is required for the postgres backend");
        }

        Ok(())
    }

    /// Demo configuration: three users and four fixture cards
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            pagination: PaginationConfig::default(),
            storage: StorageConfig::default(),
            users: vec![
                UserAccount::with_password("sarah1", "abc123", vec![Role::CardOwner]),
                UserAccount::with_password("hank-owns-no-cards", "qrs456", vec![Role::NonOwner]),
                UserAccount::with_password("kumar2", "xyz789", vec![Role::CardOwner]),
            ],
            seed: vec![
                Card::new(99, 123.45, "sarah1"),
                Card::new(100, 1.00, "sarah1"),
                Card::new(101, 150.00, "sarah1"),
                Card::new(102, 200.00, "kumar2"),
            ],
        }
    }
}
