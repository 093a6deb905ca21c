use std::time::Duration;

use alloy::primitives::Address;
use thiserror::Error;

use eco_vault_flow_core::ExecutorSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeProfile {
    Development,
    Production,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct FlowAdapterConfig {
    pub runtime_profile: RuntimeProfile,
    pub chain_id: u64,
    pub rpc_url: Option<String>,
    pub contract_address: Address,
    pub credit_id: u64,
    pub account: Option<Address>,
    pub submission_timeout_ms: u64,
    pub rpc_timeout_ms: u64,
    pub receipt_poll_interval_ms: u64,
    pub receipt_max_polls: u32,
}

impl Default for FlowAdapterConfig {
    fn default() -> Self {
        Self {
            runtime_profile: RuntimeProfile::Development,
            // Sepolia
            chain_id: 11_155_111,
            rpc_url: None,
            // Not deployed yet.
            contract_address: Address::ZERO,
            credit_id: 1,
            account: None,
            submission_timeout_ms: 120_000,
            rpc_timeout_ms: 15_000,
            receipt_poll_interval_ms: 1_000,
            receipt_max_polls: 60,
        }
    }
}

impl FlowAdapterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get("ECO_VAULT_PROFILE") {
            cfg.runtime_profile = match v.to_ascii_lowercase().as_str() {
                "development" | "dev" => RuntimeProfile::Development,
                "production" | "prod" => RuntimeProfile::Production,
                _ => return Err(invalid("ECO_VAULT_PROFILE", v)),
            };
        }
        if let Some(v) = get("ECO_VAULT_CHAIN_ID") {
            cfg.chain_id = parse_u64("ECO_VAULT_CHAIN_ID", v)?;
        }
        if let Some(v) = get("ECO_VAULT_RPC_URL") {
            cfg.rpc_url = Some(v);
        }
        if let Some(v) = get("ECO_VAULT_CONTRACT") {
            cfg.contract_address = v.parse().map_err(|_| invalid("ECO_VAULT_CONTRACT", v))?;
        }
        if let Some(v) = get("ECO_VAULT_CREDIT_ID") {
            cfg.credit_id = parse_u64("ECO_VAULT_CREDIT_ID", v)?;
        }
        if let Some(v) = get("ECO_VAULT_ACCOUNT") {
            cfg.account = Some(v.parse().map_err(|_| invalid("ECO_VAULT_ACCOUNT", v))?);
        }
        if let Some(v) = get("ECO_VAULT_SUBMISSION_TIMEOUT_MS") {
            cfg.submission_timeout_ms = parse_u64("ECO_VAULT_SUBMISSION_TIMEOUT_MS", v)?;
        }
        if let Some(v) = get("ECO_VAULT_RPC_TIMEOUT_MS") {
            cfg.rpc_timeout_ms = parse_u64("ECO_VAULT_RPC_TIMEOUT_MS", v)?;
        }
        if let Some(v) = get("ECO_VAULT_RECEIPT_POLL_MS") {
            cfg.receipt_poll_interval_ms = parse_u64("ECO_VAULT_RECEIPT_POLL_MS", v)?;
        }
        if let Some(v) = get("ECO_VAULT_RECEIPT_MAX_POLLS") {
            cfg.receipt_max_polls = v
                .parse()
                .map_err(|_| invalid("ECO_VAULT_RECEIPT_MAX_POLLS", v))?;
        }
        Ok(cfg)
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }

    pub fn executor_settings(&self) -> ExecutorSettings {
        ExecutorSettings {
            contract_address: self.contract_address,
            credit_id: self.credit_id,
            timeout: Duration::from_millis(self.submission_timeout_ms),
        }
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidValue { key, value }
}

fn parse_u64(key: &'static str, value: String) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| invalid(key, value))
}
