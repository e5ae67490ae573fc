// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup into an [`AppConfig`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `TLS_CERT_PATH` / `TLS_KEY_PATH` | PEM files; HTTPS when both are set | unset |
//! | `INVOICE_CONTRACT_ADDRESS` | Invoice ledger contract on ZetaChain | built-in testnet deployment |
//! | `ZETA_RPC_URL` | ZetaChain EVM RPC endpoint | public Athens endpoint |
//! | `GOERLI_RPC_URL`, `MUMBAI_RPC_URL`, `BSC_TESTNET_RPC_URL` | Connected chain RPC endpoints | public endpoints |
//! | `ZETA_API_URL` | ZetaChain Cosmos REST endpoint | public Athens endpoint |
//! | `LEDGER_SIGNER_KEY` | Hex key creating and listing invoices | unset |
//! | `PAYER_SIGNER_KEY` | Hex key submitting settlements | unset |
//! | `SETTLEMENT_VALUE` | Native value sent with every settlement | `0.01` |
//! | `FEE_INPUT_ZETA` | ZETA amount quoted when estimating fees | `1` |
//! | `TOKEN_PRICES_USD` | `TICKER=price` pairs, comma-separated | empty |
//! | `PAYMENT_LINK_BASE` | Prefix of invoice payment links | `/send` |
//!
//! RPC URLs may carry provider API keys; they are only ever logged through
//! [`crate::blockchain::redact_rpc_url`].

use std::collections::HashMap;
use std::fmt;

use alloy::primitives::{Address, U256};

use crate::blockchain::{parse_amount, NetworkRegistry, DEFAULT_INVOICE_CONTRACT};
use crate::providers::zeta_api::DEFAULT_ZETA_API_URL;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const INVOICE_CONTRACT_ENV: &str = "INVOICE_CONTRACT_ADDRESS";
pub const ZETA_API_URL_ENV: &str = "ZETA_API_URL";
pub const LEDGER_SIGNER_KEY_ENV: &str = "LEDGER_SIGNER_KEY";
pub const PAYER_SIGNER_KEY_ENV: &str = "PAYER_SIGNER_KEY";
pub const SETTLEMENT_VALUE_ENV: &str = "SETTLEMENT_VALUE";
pub const FEE_INPUT_ENV: &str = "FEE_INPUT_ZETA";
pub const TOKEN_PRICES_ENV: &str = "TOKEN_PRICES_USD";
pub const PAYMENT_LINK_BASE_ENV: &str = "PAYMENT_LINK_BASE";

/// RPC override variables per network identifier.
pub const RPC_URL_ENVS: [(&str, &str); 4] = [
    ("zeta_testnet", "ZETA_RPC_URL"),
    ("goerli_testnet", "GOERLI_RPC_URL"),
    ("mumbai_testnet", "MUMBAI_RPC_URL"),
    ("bsc_testnet", "BSC_TESTNET_RPC_URL"),
];

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SETTLEMENT_VALUE: &str = "0.01";
const DEFAULT_FEE_INPUT: &str = "1";
const DEFAULT_PAYMENT_LINK_BASE: &str = "/send";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl fmt::Display) -> Self {
        Self::Invalid {
            name,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Hex private key that never prints its contents.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Everything the service reads from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub tls: Option<(String, String)>,
    pub invoice_contract: Address,
    pub networks: NetworkRegistry,
    pub zeta_api_url: String,
    pub ledger_signer_key: Option<SecretKey>,
    pub payer_signer_key: Option<SecretKey>,
    /// Native value per settlement, in wei.
    pub settlement_value: U256,
    /// ZETA amount quoted for fee estimates, in azeta.
    pub fee_input: U256,
    /// Upper-case ticker to USD price.
    pub token_prices: HashMap<String, f64>,
    pub payment_link_base: String,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid(PORT_ENV, e))?,
            None => DEFAULT_PORT,
        };

        let log_format = match get(LOG_FORMAT_ENV) {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some((cert, key)),
            (None, None) => None,
            _ => {
                return Err(ConfigError::invalid(
                    TLS_CERT_PATH_ENV,
                    "TLS_CERT_PATH and TLS_KEY_PATH must be set together",
                ))
            }
        };

        let invoice_contract = match get(INVOICE_CONTRACT_ENV) {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid(INVOICE_CONTRACT_ENV, e))?,
            None => DEFAULT_INVOICE_CONTRACT,
        };

        let mut networks = NetworkRegistry::testnet();
        for (network, var) in RPC_URL_ENVS {
            if let Some(url) = get(var) {
                url::Url::parse(&url).map_err(|e| ConfigError::invalid(var, e))?;
                networks.override_rpc_url(network, url);
            }
        }

        let settlement_value = parse_amount(
            &get(SETTLEMENT_VALUE_ENV).unwrap_or_else(|| DEFAULT_SETTLEMENT_VALUE.to_string()),
            18,
        )
        .map_err(|e| ConfigError::invalid(SETTLEMENT_VALUE_ENV, e))?;

        let fee_input = parse_amount(
            &get(FEE_INPUT_ENV).unwrap_or_else(|| DEFAULT_FEE_INPUT.to_string()),
            18,
        )
        .map_err(|e| ConfigError::invalid(FEE_INPUT_ENV, e))?;

        let token_prices = match get(TOKEN_PRICES_ENV) {
            Some(raw) => parse_prices(&raw)?,
            None => HashMap::new(),
        };

        Ok(Self {
            host,
            port,
            log_format,
            tls,
            invoice_contract,
            networks,
            zeta_api_url: get(ZETA_API_URL_ENV).unwrap_or_else(|| DEFAULT_ZETA_API_URL.to_string()),
            ledger_signer_key: get(LEDGER_SIGNER_KEY_ENV).map(SecretKey),
            payer_signer_key: get(PAYER_SIGNER_KEY_ENV).map(SecretKey),
            settlement_value,
            fee_input,
            token_prices,
            payment_link_base: get(PAYMENT_LINK_BASE_ENV)
                .unwrap_or_else(|| DEFAULT_PAYMENT_LINK_BASE.to_string()),
        })
    }
}

/// Parse `ZETA=1.2, ETH=1850` into an upper-case ticker map.
fn parse_prices(raw: &str) -> Result<HashMap<String, f64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (ticker, price) = pair.split_once('=').ok_or_else(|| {
                ConfigError::invalid(TOKEN_PRICES_ENV, format!("expected TICKER=price, got {pair:?}"))
            })?;
            let price: f64 = price
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(TOKEN_PRICES_ENV, format!("{pair:?}: {e}")))?;
            if !price.is_finite() || price < 0.0 {
                return Err(ConfigError::invalid(
                    TOKEN_PRICES_ENV,
                    format!("{pair:?}: price must be a non-negative number"),
                ));
            }
            Ok((ticker.trim().to_ascii_uppercase(), price))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.tls.is_none());
        assert_eq!(config.invoice_contract, DEFAULT_INVOICE_CONTRACT);
        assert_eq!(config.settlement_value, U256::from(10_000_000_000_000_000u64));
        assert_eq!(config.fee_input, U256::from(1_000_000_000_000_000_000u64));
        assert!(config.ledger_signer_key.is_none());
        assert!(config.token_prices.is_empty());
        assert_eq!(config.payment_link_base, "/send");
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("PORT", "9000"),
            ("LOG_FORMAT", "JSON"),
            ("ZETA_RPC_URL", "http://localhost:8545"),
            ("SETTLEMENT_VALUE", "0.5"),
            ("LEDGER_SIGNER_KEY", "  abcd  "),
            ("TOKEN_PRICES_USD", "zeta=1.2, ETH=1850"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.networks.ledger().rpc_url, "http://localhost:8545");
        assert_eq!(config.settlement_value, U256::from(500_000_000_000_000_000u64));
        assert_eq!(config.ledger_signer_key.as_ref().map(SecretKey::expose), Some("abcd"));
        assert_eq!(config.token_prices.get("ZETA"), Some(&1.2));
        assert_eq!(config.token_prices.get("ETH"), Some(&1850.0));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[("PORT", "   "), ("PAYER_SIGNER_KEY", "")]).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.payer_signer_key.is_none());
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("INVOICE_CONTRACT_ADDRESS", "0x123")]).is_err());
        assert!(load(&[("TOKEN_PRICES_USD", "ZETA")]).is_err());
        assert!(load(&[("TOKEN_PRICES_USD", "ZETA=-1")]).is_err());
        assert!(load(&[("TLS_CERT_PATH", "/cert.pem")]).is_err());
        assert!(load(&[("MUMBAI_RPC_URL", "nope")]).is_err());
    }

    #[test]
    fn secret_key_debug_is_redacted() {
        let key = SecretKey("deadbeef".to_string());
        assert_eq!(format!("{key:?}"), "SecretKey(<redacted>)");
    }
}
