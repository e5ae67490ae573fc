// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Invoice ledger contract on ZetaChain.
//!
//! The `InvoiceManager` contract owns every invoice. This service only reads
//! invoices and submits `createInvoice` calls; the `paid` flag is flipped by
//! the contract itself when a cross-chain settlement lands.

use alloy::{
    primitives::{Address, U256},
    providers::DynProvider,
    sol,
};
use async_trait::async_trait;

use super::client::{ChainClientError, EvmClient};

sol! {
    #[sol(rpc)]
    interface InvoiceManager {
        struct Invoice {
            uint256 id;
            string description;
            uint256 priceUSD;
            bool paid;
        }

        function createInvoice(string description, uint256 priceUSD) external returns (uint256);
        function getInvoice(uint256 id) external view returns (Invoice memory);
        function getMyInvoices() external view returns (Invoice[] memory);
    }
}

/// An invoice as stored on the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRecord {
    pub id: u64,
    pub description: String,
    /// Whole US dollars.
    pub price_usd: U256,
    pub paid: bool,
}

impl TryFrom<InvoiceManager::Invoice> for InvoiceRecord {
    type Error = ChainClientError;

    fn try_from(raw: InvoiceManager::Invoice) -> Result<Self, Self::Error> {
        let id = u64::try_from(raw.id).map_err(|_| {
            ChainClientError::ContractError(format!("invoice id {} does not fit in u64", raw.id))
        })?;
        Ok(Self {
            id,
            description: raw.description,
            price_usd: raw.priceUSD,
            paid: raw.paid,
        })
    }
}

/// Read/write access to the invoice ledger.
#[async_trait]
pub trait InvoiceLedger: Send + Sync {
    /// Account that owns invoices created through this handle, if a signer is
    /// configured.
    fn owner(&self) -> Option<Address>;

    /// Submit `createInvoice`; returns the transaction hash.
    async fn create_invoice(
        &self,
        description: &str,
        price_usd: U256,
    ) -> Result<String, ChainClientError>;

    /// Fetch one invoice; `None` when the id is unknown to the contract.
    async fn get_invoice(&self, id: u64) -> Result<Option<InvoiceRecord>, ChainClientError>;

    /// Invoices created by [`InvoiceLedger::owner`].
    async fn my_invoices(&self) -> Result<Vec<InvoiceRecord>, ChainClientError>;
}

/// [`InvoiceLedger`] talking to the deployed contract over JSON-RPC.
pub struct ContractLedger {
    contract: InvoiceManager::InvoiceManagerInstance<DynProvider>,
    owner: Option<Address>,
}

impl ContractLedger {
    /// Bind to `address` through `client`. Writes require a client created
    /// with a wallet whose address is `owner`.
    pub fn new(client: &EvmClient, address: Address, owner: Option<Address>) -> Self {
        Self {
            contract: InvoiceManager::new(address, client.provider().clone()),
            owner,
        }
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }
}

#[async_trait]
impl InvoiceLedger for ContractLedger {
    fn owner(&self) -> Option<Address> {
        self.owner
    }

    async fn create_invoice(
        &self,
        description: &str,
        price_usd: U256,
    ) -> Result<String, ChainClientError> {
        let owner = self.owner.ok_or_else(|| {
            ChainClientError::TransactionFailed("no ledger signer configured".to_string())
        })?;

        let pending = self
            .contract
            .createInvoice(description.to_string(), price_usd)
            .from(owner)
            .send()
            .await
            .map_err(ChainClientError::from_contract)?;

        Ok(format!("{:?}", pending.tx_hash()))
    }

    async fn get_invoice(&self, id: u64) -> Result<Option<InvoiceRecord>, ChainClientError> {
        let raw = self
            .contract
            .getInvoice(U256::from(id))
            .call()
            .await
            .map_err(ChainClientError::from_contract)?;

        // Unknown ids come back as a zeroed struct.
        if raw.id != U256::from(id) || (raw.description.is_empty() && raw.priceUSD.is_zero()) {
            return Ok(None);
        }

        InvoiceRecord::try_from(raw).map(Some)
    }

    async fn my_invoices(&self) -> Result<Vec<InvoiceRecord>, ChainClientError> {
        let mut call = self.contract.getMyInvoices();
        if let Some(owner) = self.owner {
            call = call.from(owner);
        }

        let raw = call
            .call()
            .await
            .map_err(ChainClientError::from_contract)?;

        raw.into_iter().map(InvoiceRecord::try_from).collect()
    }
}
