// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory fakes of every external dependency, for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{address, Address, U256};
use async_trait::async_trait;

use crate::blockchain::{
    BalanceRecord, BalanceSource, ChainClientError, CoinType, InvoiceLedger, InvoiceRecord,
    NetworkConfig, NetworkRegistry, PreparedTransaction, QuoteSource, SendResult,
    TransactionSender,
};
use crate::context::{ChainContext, ChainServices, FlowSettings};
use crate::providers::{StakingSource, ZetaApiError};
use crate::state::AppState;
use crate::store::InMemoryStore;

pub const OWNER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

/// Ledger that keeps invoices in a vector and mints ids from 1.
#[derive(Default)]
pub struct FakeLedger {
    pub owner: Option<Address>,
    pub invoices: Mutex<Vec<InvoiceRecord>>,
    /// Fail every call with a contract error.
    pub fail_with: Option<String>,
    pub create_calls: AtomicUsize,
    pub read_calls: AtomicUsize,
    /// When set, `my_invoices` waits for a notification before answering.
    pub listing_gate: Option<Arc<tokio::sync::Notify>>,
}

impl FakeLedger {
    pub fn with_owner() -> Self {
        Self {
            owner: Some(OWNER),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            owner: Some(OWNER),
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Owned ledger whose listing call blocks until `gate` is notified.
    pub fn gated(gate: Arc<tokio::sync::Notify>) -> Self {
        Self {
            owner: Some(OWNER),
            listing_gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn seed(&self, description: &str, price_usd: u64, paid: bool) -> u64 {
        let mut invoices = self.invoices.lock().unwrap();
        let id = invoices.len() as u64 + 1;
        invoices.push(InvoiceRecord {
            id,
            description: description.to_string(),
            price_usd: U256::from(price_usd),
            paid,
        });
        id
    }

    fn check(&self) -> Result<(), ChainClientError> {
        match &self.fail_with {
            Some(message) => Err(ChainClientError::ContractError(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl InvoiceLedger for FakeLedger {
    fn owner(&self) -> Option<Address> {
        self.owner
    }

    async fn create_invoice(
        &self,
        description: &str,
        price_usd: U256,
    ) -> Result<String, ChainClientError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut invoices = self.invoices.lock().unwrap();
        let id = invoices.len() as u64 + 1;
        invoices.push(InvoiceRecord {
            id,
            description: description.to_string(),
            price_usd,
            paid: false,
        });
        Ok(format!("0x{id:064x}"))
    }

    async fn get_invoice(&self, id: u64) -> Result<Option<InvoiceRecord>, ChainClientError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn my_invoices(&self) -> Result<Vec<InvoiceRecord>, ChainClientError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.listing_gate {
            gate.notified().await;
        }
        self.check()?;
        Ok(self.invoices.lock().unwrap().clone())
    }
}

/// Sender that records transactions instead of broadcasting them.
pub struct FakeSender {
    pub network: NetworkConfig,
    pub sent: Mutex<Vec<PreparedTransaction>>,
}

impl FakeSender {
    pub fn new(network: NetworkConfig) -> Self {
        Self {
            network,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl TransactionSender for FakeSender {
    fn network(&self) -> &NetworkConfig {
        &self.network
    }

    fn address(&self) -> Address {
        OWNER
    }

    async fn send(&self, tx: PreparedTransaction) -> Result<SendResult, ChainClientError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(tx);
        let tx_hash = format!("0x{:064x}", sent.len());
        Ok(SendResult {
            explorer_url: self.network.tx_url(&tx_hash),
            tx_hash,
        })
    }
}

/// Quote source answering every route with the same amount.
pub struct FakeQuotes {
    pub amount_out: Result<U256, String>,
    /// Route names in call order (`v3` or `v2`).
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakeQuotes {
    pub fn returning(amount_out: U256) -> Self {
        Self {
            amount_out: Ok(amount_out),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            amount_out: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn answer(&self, route: &'static str) -> Result<U256, ChainClientError> {
        self.calls.lock().unwrap().push(route);
        self.amount_out
            .clone()
            .map_err(ChainClientError::RpcError)
    }
}

#[async_trait]
impl QuoteSource for FakeQuotes {
    async fn quote_exact_input_single(
        &self,
        _network: &NetworkConfig,
        _quoter: Address,
        _token_in: Address,
        _token_out: Address,
        _fee_tier: u32,
        _amount_in: U256,
    ) -> Result<U256, ChainClientError> {
        self.answer("v3")
    }

    async fn amounts_out(
        &self,
        _network: &NetworkConfig,
        _router: Address,
        path: Vec<Address>,
        _amount_in: U256,
    ) -> Result<U256, ChainClientError> {
        assert_eq!(path.len(), 2);
        self.answer("v2")
    }
}

/// Balance source returning fixed records and counting calls.
#[derive(Default)]
pub struct FakeBalances {
    pub records: Vec<BalanceRecord>,
    pub calls: AtomicUsize,
}

impl FakeBalances {
    pub fn new(records: Vec<BalanceRecord>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceSource for FakeBalances {
    async fn balances(&self, _account: Address) -> Result<Vec<BalanceRecord>, ChainClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

/// Staking source with a fixed total; `None` fails every lookup.
pub struct FakeStaking(pub Option<U256>);

#[async_trait]
impl StakingSource for FakeStaking {
    async fn staked_total(&self, _account: Address) -> Result<U256, ZetaApiError> {
        self.0
            .ok_or_else(|| ZetaApiError::Request("connection refused".to_string()))
    }
}

pub fn balance(ticker: &str, chain: &str, coin_type: CoinType, value: Option<&str>) -> BalanceRecord {
    BalanceRecord {
        ticker: ticker.to_string(),
        chain_name: chain.to_string(),
        coin_type,
        price: None,
        balance: value.map(str::to_string),
    }
}

/// Handles to the fakes behind a test [`ChainContext`].
pub struct Fakes {
    pub ledger: Arc<FakeLedger>,
    pub senders: Vec<Arc<FakeSender>>,
    pub quotes: Arc<FakeQuotes>,
    pub balances: Arc<FakeBalances>,
}

/// Context over the testnet registry with a sender for every connected chain.
pub fn fake_context(ledger: FakeLedger, quotes: FakeQuotes, balances: FakeBalances) -> (ChainContext, Fakes) {
    let registry = NetworkRegistry::testnet();
    let ledger = Arc::new(ledger);
    let quotes = Arc::new(quotes);
    let balances = Arc::new(balances);
    let senders: Vec<Arc<FakeSender>> = registry
        .connected()
        .iter()
        .cloned()
        .map(|n| Arc::new(FakeSender::new(n)))
        .collect();

    let services = ChainServices {
        ledger: ledger.clone(),
        ledger_client: None,
        senders: senders
            .iter()
            .map(|s| {
                let sender: Arc<dyn TransactionSender> = s.clone();
                (s.network.name.to_string(), sender)
            })
            .collect(),
        quotes: quotes.clone(),
        balances: balances.clone(),
        staking: Arc::new(FakeStaking(Some(U256::ZERO))),
    };

    let context = ChainContext::new(registry, services, FlowSettings::default());
    (
        context,
        Fakes {
            ledger,
            senders,
            quotes,
            balances,
        },
    )
}

/// App state over [`fake_context`] with an owned ledger and a 1.0 quote.
pub fn fake_state() -> (AppState, Fakes) {
    let (context, fakes) = fake_context(
        FakeLedger::with_owner(),
        FakeQuotes::returning(U256::from(10u64).pow(U256::from(18))),
        FakeBalances::default(),
    );
    (AppState::new(context, InMemoryStore::new()), fakes)
}
