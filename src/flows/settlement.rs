// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cross-chain settlement of an invoice.
//!
//! A payer on a connected chain sends a fixed native value to the ZetaChain
//! TSS address. The call data names the ledger contract and the invoice id,
//! and ZetaChain forwards it to the ledger which marks the invoice paid.
//! Settlements are never sent on the ledger chain itself.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::{Address, U256};
use tokio::sync::RwLock;

use super::{FlowError, Precondition};
use crate::blockchain::message::encode_invoice_payment;
use crate::blockchain::{
    InvoiceLedger, InvoiceRecord, NetworkConfig, NetworkRegistry, PreparedTransaction,
    TransactionSender,
};
use crate::store::{InMemoryStore, SettlementRecord};

/// Everything needed to settle invoices of one ledger.
pub struct Settlement<'a> {
    pub ledger: &'a dyn InvoiceLedger,
    pub registry: &'a NetworkRegistry,
    /// Ledger contract receiving the cross-chain call
    pub ledger_contract: Address,
    /// Native value sent with every settlement, in wei
    pub value: U256,
}

/// An unsigned settlement transaction and what it pays.
#[derive(Debug, Clone)]
pub struct PreparedSettlement {
    pub invoice: InvoiceRecord,
    pub network: NetworkConfig,
    pub tx: PreparedTransaction,
}

impl Settlement<'_> {
    /// Build the settlement transaction for `invoice_id` on `network`.
    pub async fn prepare(
        &self,
        invoice_id: Option<u64>,
        network: Option<&str>,
    ) -> Result<PreparedSettlement, FlowError> {
        let invoice_id = invoice_id.ok_or(FlowError::MissingPrecondition(Precondition::Invoice))?;
        let network = self.resolve_network(network)?;

        let tss = network
            .tss_address
            .ok_or_else(|| FlowError::UnsupportedNetwork(network.name.to_string()))?;

        let invoice = self
            .ledger
            .get_invoice(invoice_id)
            .await?
            .ok_or(FlowError::NotFound(invoice_id))?;
        if invoice.paid {
            return Err(FlowError::AlreadyPaid(invoice_id));
        }

        let tx = PreparedTransaction {
            chain_id: network.chain_id,
            to: tss,
            value: self.value,
            data: encode_invoice_payment(self.ledger_contract, invoice_id),
        };

        Ok(PreparedSettlement {
            invoice,
            network: network.clone(),
            tx,
        })
    }

    /// Prepare and broadcast the settlement through the network's sender,
    /// recording it so the invoice reads as pending.
    pub async fn pay(
        &self,
        invoice_id: Option<u64>,
        network: Option<&str>,
        senders: &HashMap<String, Arc<dyn TransactionSender>>,
        store: &RwLock<InMemoryStore>,
    ) -> Result<SettlementRecord, FlowError> {
        let prepared = self.prepare(invoice_id, network).await?;
        let sender = senders
            .get(prepared.network.name)
            .ok_or(FlowError::MissingPrecondition(Precondition::Signer))?;

        let sent = sender.send(prepared.tx).await.map_err(|e| {
            tracing::error!(
                invoice_id = prepared.invoice.id,
                network = prepared.network.name,
                error = %e,
                "Settlement failed"
            );
            e
        })?;

        tracing::info!(
            invoice_id = prepared.invoice.id,
            network = prepared.network.name,
            tx_hash = %sent.tx_hash,
            "Settlement submitted"
        );

        Ok(store.write().await.record_settlement(
            prepared.invoice.id,
            prepared.network.name,
            sent.tx_hash,
            sent.explorer_url,
        ))
    }

    fn resolve_network(&self, network: Option<&str>) -> Result<&NetworkConfig, FlowError> {
        let name = network
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(FlowError::MissingPrecondition(Precondition::Network))?;

        let network = self
            .registry
            .get(name)
            .ok_or_else(|| FlowError::UnsupportedNetwork(name.to_string()))?;

        if self.registry.is_ledger(network) {
            return Err(FlowError::WrongNetwork {
                connected: network.name.to_string(),
                message: switch_network_message(self.registry),
            });
        }
        Ok(network)
    }
}

/// Instruction shown to a payer connected to the ledger chain.
pub fn switch_network_message(registry: &NetworkRegistry) -> String {
    let names: Vec<&str> = registry
        .connected()
        .iter()
        .filter(|n| n.tss_address.is_some())
        .map(|n| n.display_name)
        .collect();

    let targets = match names.split_last() {
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        None => "a connected chain".to_string(),
    };
    format!("You need to switch your wallet to {targets} to pay the invoice")
}
