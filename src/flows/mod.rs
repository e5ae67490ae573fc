// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Payment Flows
//!
//! Each flow is a short sequence of external calls. Flows never reach for
//! ambient state: the ledger, senders and quote sources they need are passed
//! in, and every outcome is a tagged `Result<_, FlowError>` so callers can
//! surface failure states instead of silently doing nothing.
//!
//! - `balances` - balance table view-model
//! - `invoices` - invoice creation, lookup and listing
//! - `settlement` - cross-chain payment of an invoice
//! - `fees` - cross-chain fee estimation

pub mod balances;
pub mod fees;
pub mod invoices;
pub mod settlement;

use std::fmt;

use crate::blockchain::ChainClientError;

/// A precondition a flow needs before it can talk to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// No signing account is configured for the operation.
    Signer,
    /// No network was selected.
    Network,
    /// No invoice id was supplied.
    Invoice,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precondition::Signer => f.write_str("no signer is configured"),
            Precondition::Network => f.write_str("no network selected"),
            Precondition::Invoice => f.write_str("no invoice id given"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Missing precondition: {0}")]
    MissingPrecondition(Precondition),

    #[error("{message}")]
    WrongNetwork { connected: String, message: String },

    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invoice {0} not found")]
    NotFound(u64),

    #[error("Invoice {0} is already paid")]
    AlreadyPaid(u64),

    #[error("An invoice creation is already in flight")]
    CreationInFlight,

    #[error(transparent)]
    Chain(#[from] ChainClientError),
}

impl FlowError {
    /// Whether repeating the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FlowError::Chain(e) => e.is_retryable(),
            FlowError::CreationInFlight => true,
            _ => false,
        }
    }
}
