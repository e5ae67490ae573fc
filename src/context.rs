// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain context shared by every request.
//!
//! Built once at startup. Every external dependency sits behind a trait
//! object so handlers and flows can run against in-memory fakes.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::{Address, U256};

use crate::blockchain::{
    redact_rpc_url, BalanceSource, ChainClientError, ContractLedger, DexQuoter, EvmBalanceSource,
    EvmClient, InvoiceLedger, NetworkRegistry, QuoteSource, TransactionSender, WalletSender,
    DEFAULT_INVOICE_CONTRACT,
};
use crate::config::AppConfig;
use crate::flows::fees::FeeEstimator;
use crate::flows::settlement::Settlement;
use crate::providers::{StakingSource, ZetaApiClient, ZetaApiError};

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Chain(#[from] ChainClientError),

    #[error(transparent)]
    ZetaApi(#[from] ZetaApiError),
}

/// External services the flows depend on.
pub struct ChainServices {
    pub ledger: Arc<dyn InvoiceLedger>,
    /// Read client of the ledger chain, used for health checks
    pub ledger_client: Option<EvmClient>,
    /// Settlement senders keyed by network identifier
    pub senders: HashMap<String, Arc<dyn TransactionSender>>,
    pub quotes: Arc<dyn QuoteSource>,
    pub balances: Arc<dyn BalanceSource>,
    pub staking: Arc<dyn StakingSource>,
}

/// Tunables of the payment flows.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    pub invoice_contract: Address,
    /// Native value per settlement, in wei
    pub settlement_value: U256,
    /// ZETA quoted for fee estimates, in azeta
    pub fee_input: U256,
    pub payment_link_base: String,
}

impl FlowSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            invoice_contract: config.invoice_contract,
            settlement_value: config.settlement_value,
            fee_input: config.fee_input,
            payment_link_base: config.payment_link_base.clone(),
        }
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            invoice_contract: DEFAULT_INVOICE_CONTRACT,
            settlement_value: U256::from(10_000_000_000_000_000u64),
            fee_input: U256::from(1_000_000_000_000_000_000u64),
            payment_link_base: "/send".to_string(),
        }
    }
}

pub struct ChainContext {
    pub registry: NetworkRegistry,
    pub ledger: Arc<dyn InvoiceLedger>,
    pub ledger_client: Option<EvmClient>,
    pub senders: HashMap<String, Arc<dyn TransactionSender>>,
    pub fees: FeeEstimator,
    pub balances: Arc<dyn BalanceSource>,
    pub staking: Arc<dyn StakingSource>,
    pub settings: FlowSettings,
}

impl ChainContext {
    pub fn new(registry: NetworkRegistry, services: ChainServices, settings: FlowSettings) -> Self {
        Self {
            fees: FeeEstimator::new(services.quotes, settings.fee_input),
            registry,
            ledger: services.ledger,
            ledger_client: services.ledger_client,
            senders: services.senders,
            balances: services.balances,
            staking: services.staking,
            settings,
        }
    }

    /// Build the live context: HTTP providers for every network, optional
    /// local signers, and the Cosmos REST client.
    pub fn connect(config: &AppConfig) -> Result<Self, ContextError> {
        let registry = config.networks.clone();
        let ledger_network = registry.ledger().clone();

        let ledger_signer = config
            .ledger_signer_key
            .as_ref()
            .map(|key| EvmClient::create_signer(key.expose()))
            .transpose()?;
        let owner = ledger_signer.as_ref().map(|s| s.address());

        let ledger_client = match ledger_signer {
            Some(signer) => {
                EvmClient::with_wallet(ledger_network.clone(), EvmClient::create_wallet(signer))?
            }
            None => {
                tracing::warn!("No ledger signer configured, invoice creation and listing are disabled");
                EvmClient::new(ledger_network.clone())?
            }
        };
        let ledger = ContractLedger::new(&ledger_client, config.invoice_contract, owner);

        tracing::info!(
            network = ledger_network.name,
            rpc = %redact_rpc_url(&ledger_network.rpc_url),
            contract = %ledger.address(),
            owner = ?owner,
            "Invoice ledger connected"
        );

        let mut senders: HashMap<String, Arc<dyn TransactionSender>> = HashMap::new();
        match &config.payer_signer_key {
            Some(key) => {
                let signer = EvmClient::create_signer(key.expose())?;
                for network in registry.connected() {
                    let sender = WalletSender::new(network.clone(), signer.clone())?;
                    tracing::info!(
                        network = network.name,
                        rpc = %redact_rpc_url(&network.rpc_url),
                        payer = %sender.address(),
                        "Settlement sender ready"
                    );
                    senders.insert(network.name.to_string(), Arc::new(sender));
                }
            }
            None => tracing::warn!("No payer signer configured, only unsigned settlements are available"),
        }

        let services = ChainServices {
            ledger: Arc::new(ledger),
            ledger_client: Some(ledger_client),
            senders,
            quotes: Arc::new(DexQuoter::new()),
            balances: Arc::new(EvmBalanceSource::new(
                registry.clone(),
                config.token_prices.clone(),
            )),
            staking: Arc::new(ZetaApiClient::new(config.zeta_api_url.clone())?),
        };

        Ok(Self::new(registry, services, FlowSettings::from_config(config)))
    }

    pub fn settlement(&self) -> Settlement<'_> {
        Settlement {
            ledger: self.ledger.as_ref(),
            registry: &self.registry,
            ledger_contract: self.settings.invoice_contract,
            value: self.settings.settlement_value,
        }
    }
}
