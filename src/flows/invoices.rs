// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Invoice creation, lookup and listing.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use utoipa::ToSchema;

use super::{FlowError, Precondition};
use crate::blockchain::{InvoiceLedger, InvoiceRecord};
use crate::store::InMemoryStore;

/// Lifecycle of an invoice as seen by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// On the ledger, nothing submitted for it yet.
    Created,
    /// Unpaid on the ledger, but a settlement was broadcast from here.
    Pending,
    /// Marked paid by the ledger contract.
    Paid,
}

impl InvoiceStatus {
    pub fn derive(invoice: &InvoiceRecord, store: &InMemoryStore) -> Self {
        if invoice.paid {
            InvoiceStatus::Paid
        } else if store.has_settlement(invoice.id) {
            InvoiceStatus::Pending
        } else {
            InvoiceStatus::Created
        }
    }
}

/// Invoice as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct InvoiceSummary {
    pub id: u64,
    pub description: String,
    /// Whole US dollars
    pub price_usd: String,
    pub paid: bool,
    pub status: InvoiceStatus,
    /// Link a payer opens to settle the invoice
    pub payment_link: String,
}

impl InvoiceSummary {
    pub fn new(invoice: InvoiceRecord, store: &InMemoryStore, link_base: &str) -> Self {
        let status = InvoiceStatus::derive(&invoice, store);
        Self {
            payment_link: payment_link(link_base, invoice.id),
            id: invoice.id,
            description: invoice.description,
            price_usd: invoice.price_usd.to_string(),
            paid: invoice.paid,
            status,
        }
    }
}

/// State of the invoice list: `Loading` until the ledger answers, then
/// `Empty` or `Populated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceListing {
    /// Request in flight. Never returned by [`list_invoices`]; API clients
    /// render it while awaiting `GET /v1/invoices`.
    Loading,
    Empty,
    Populated(Vec<InvoiceSummary>),
}

impl InvoiceListing {
    fn from_summaries(summaries: Vec<InvoiceSummary>) -> Self {
        if summaries.is_empty() {
            InvoiceListing::Empty
        } else {
            InvoiceListing::Populated(summaries)
        }
    }
}

pub fn payment_link(base: &str, id: u64) -> String {
    format!("{base}?id={id}")
}

/// Parse a whole, non-negative USD amount.
pub fn parse_usd_amount(raw: &str) -> Result<U256, FlowError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FlowError::InvalidInput("amount is required".to_string()));
    }
    // U256's FromStr also accepts radix prefixes.
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FlowError::InvalidInput(format!(
            "amount must be a whole number of US dollars, got {raw:?}"
        )));
    }
    raw.parse::<U256>()
        .map_err(|e| FlowError::InvalidInput(format!("amount {raw:?}: {e}")))
}

/// Submit a new invoice to the ledger. Only one creation may be in flight.
///
/// Returns the creation transaction hash.
pub async fn create_invoice(
    ledger: &dyn InvoiceLedger,
    guard: &Mutex<()>,
    amount: &str,
    description: &str,
) -> Result<String, FlowError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(FlowError::InvalidInput("description is required".to_string()));
    }
    let price_usd = parse_usd_amount(amount)?;

    if ledger.owner().is_none() {
        return Err(FlowError::MissingPrecondition(Precondition::Signer));
    }

    let _in_flight = guard.try_lock().map_err(|_| FlowError::CreationInFlight)?;

    match ledger.create_invoice(description, price_usd).await {
        Ok(tx_hash) => {
            tracing::info!(tx_hash = %tx_hash, price_usd = %price_usd, "Invoice creation submitted");
            Ok(tx_hash)
        }
        Err(e) => {
            tracing::error!(error = %e, "Invoice creation failed");
            Err(e.into())
        }
    }
}

/// Fetch one invoice by id.
pub async fn get_invoice(
    ledger: &dyn InvoiceLedger,
    id: Option<u64>,
) -> Result<InvoiceRecord, FlowError> {
    let id = id.ok_or(FlowError::MissingPrecondition(Precondition::Invoice))?;
    ledger.get_invoice(id).await?.ok_or(FlowError::NotFound(id))
}

/// Invoices owned by the ledger signer.
///
/// The store is only read once the ledger has answered, so a slow ledger
/// never holds up settlement bookkeeping.
pub async fn list_invoices(
    ledger: &dyn InvoiceLedger,
    store: &RwLock<InMemoryStore>,
    link_base: &str,
) -> Result<InvoiceListing, FlowError> {
    if ledger.owner().is_none() {
        return Err(FlowError::MissingPrecondition(Precondition::Signer));
    }

    let invoices = ledger.my_invoices().await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to list invoices");
        e
    })?;

    let store = store.read().await;
    Ok(InvoiceListing::from_summaries(
        invoices
            .into_iter()
            .map(|invoice| InvoiceSummary::new(invoice, &store, link_base))
            .collect(),
    ))
}
