// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::context::ChainContext;
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ChainContext>,
    pub store: Arc<RwLock<InMemoryStore>>,
    /// Held while an invoice creation is in flight.
    pub creation_guard: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(context: ChainContext, store: InMemoryStore) -> Self {
        Self {
            context: Arc::new(context),
            store: Arc::new(RwLock::new(store)),
            creation_guard: Arc::new(Mutex::new(())),
        }
    }
}
