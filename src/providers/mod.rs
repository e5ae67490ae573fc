// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Off-chain HTTP APIs.

pub mod zeta_api;

pub use zeta_api::{StakingSource, ZetaApiClient, ZetaApiError};
