//! Engine configuration with TOML file support.
//!
//! ```toml
//! vote_policy = "single"
//! execution_guard = "reject"
//! log_format = "json"
//!
//! [organization]
//! name = "Quorum"
//! governance_token = "GOV"
//! treasury = "treasury"
//!
//! [default_policy]
//! name = "standard"
//! duration = 100000000
//! success_vote_percent = 30
//! ```

use crate::engine::{EngineOptions, ExecutionGuard, VotePolicy};
use crate::logging::LogFormat;
use crate::organization::Charter;
use crate::policy::PolicyParams;
use quorum_types::{AccountAddress, AssetId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value: {0}")]
    Invalid(String),
}

/// Configuration of one governance engine instance.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// `"single"` or `"revote"`.
    #[serde(default)]
    pub vote_policy: VotePolicy,

    /// `"reject"` or `"allow"`: what executing a settled proposal does.
    #[serde(default)]
    pub execution_guard: ExecutionGuard,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Charter and treasury used at initialization.
    #[serde(default)]
    pub organization: OrganizationConfig,

    /// The policy registered at initialization.
    #[serde(default)]
    pub default_policy: PolicyConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationConfig {
    #[serde(default = "default_org_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_governance_token")]
    pub governance_token: String,
    /// Ledger account holding the treasury.
    #[serde(default = "default_treasury")]
    pub treasury: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_policy_name")]
    pub name: String,
    #[serde(default = "default_duration")]
    pub duration: u64,
    #[serde(default = "default_success_vote_percent")]
    pub success_vote_percent: u64,
    #[serde(default = "default_min_amount_to_vote")]
    pub min_amount_to_vote: u64,
    #[serde(default = "default_min_amount_to_create_proposal")]
    pub min_amount_to_create_proposal: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_org_name() -> String {
    "Quorum".to_string()
}

fn default_governance_token() -> String {
    "GOV".to_string()
}

fn default_treasury() -> String {
    "treasury".to_string()
}

fn default_policy_name() -> String {
    "standard".to_string()
}

fn default_duration() -> u64 {
    100_000_000
}

fn default_success_vote_percent() -> u64 {
    30
}

fn default_min_amount_to_vote() -> u64 {
    30_000_000
}

fn default_min_amount_to_create_proposal() -> u64 {
    100_000_000
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GovernanceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            vote_policy: self.vote_policy,
            execution_guard: self.execution_guard,
        }
    }

    pub fn charter(&self) -> Charter {
        Charter {
            name: self.organization.name.clone(),
            description: self.organization.description.clone(),
            image_url: self.organization.image_url.clone(),
            governance_token: AssetId::new(self.organization.governance_token.clone()),
        }
    }

    pub fn treasury(&self) -> AccountAddress {
        AccountAddress::new(self.organization.treasury.clone())
    }

    /// Name and parameters of the policy registered at initialization.
    pub fn default_policy(&self) -> (&str, PolicyParams) {
        let policy = &self.default_policy;
        (
            policy.name.as_str(),
            PolicyParams {
                duration: policy.duration,
                success_vote_percent: policy.success_vote_percent,
                min_amount_to_vote: policy.min_amount_to_vote,
                min_amount_to_create_proposal: policy.min_amount_to_create_proposal,
            },
        )
    }

    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        self.log_format.parse().map_err(ConfigError::Invalid)
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            vote_policy: VotePolicy::default(),
            execution_guard: ExecutionGuard::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            organization: OrganizationConfig::default(),
            default_policy: PolicyConfig::default(),
        }
    }
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            name: default_org_name(),
            description: String::new(),
            image_url: String::new(),
            governance_token: default_governance_token(),
            treasury: default_treasury(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            name: default_policy_name(),
            duration: default_duration(),
            success_vote_percent: default_success_vote_percent(),
            min_amount_to_vote: default_min_amount_to_vote(),
            min_amount_to_create_proposal: default_min_amount_to_create_proposal(),
        }
    }
}
