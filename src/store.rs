// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory log of what this process submitted to the chains.
//!
//! Nothing here is authoritative: the ledger contract owns every invoice. The
//! log only lets the service report an unpaid invoice as `pending` once a
//! settlement for it has been broadcast. It is lost on restart.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A settlement transaction broadcast by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementRecord {
    pub id: Uuid,
    pub invoice_id: u64,
    pub network: String,
    pub tx_hash: String,
    pub explorer_url: String,
    pub submitted_at: DateTime<Utc>,
}

/// Latest settlement per invoice; a repeated payment replaces the earlier
/// record, so the store holds at most one entry per invoice.
#[derive(Default)]
pub struct InMemoryStore {
    settlements: HashMap<u64, SettlementRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_settlement(
        &mut self,
        invoice_id: u64,
        network: impl Into<String>,
        tx_hash: impl Into<String>,
        explorer_url: impl Into<String>,
    ) -> SettlementRecord {
        let record = SettlementRecord {
            id: Uuid::new_v4(),
            invoice_id,
            network: network.into(),
            tx_hash: tx_hash.into(),
            explorer_url: explorer_url.into(),
            submitted_at: Utc::now(),
        };
        self.settlements.insert(invoice_id, record.clone());
        record
    }

    pub fn has_settlement(&self, invoice_id: u64) -> bool {
        self.settlements.contains_key(&invoice_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_settlement_replaces_earlier_ones() {
        let mut store = InMemoryStore::new();
        assert!(!store.has_settlement(1));

        store.record_settlement(1, "goerli_testnet", "0xaa", "https://x/tx/0xaa");
        let second = store.record_settlement(1, "bsc_testnet", "0xbb", "https://y/tx/0xbb");
        store.record_settlement(2, "bsc_testnet", "0xcc", "https://y/tx/0xcc");

        assert!(store.has_settlement(1));
        assert_eq!(store.settlements.len(), 2);
        assert_eq!(store.settlements.get(&1), Some(&second));
        assert_eq!(store.settlements[&2].tx_hash, "0xcc");
        assert!(!store.has_settlement(3));
    }
}
