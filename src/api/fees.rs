// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cross-chain fee estimate endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{models::FeeResponse, state::AppState};

/// Query parameters for the fee estimate.
#[derive(Debug, Deserialize, IntoParams)]
pub struct FeeQuery {
    /// Network the settlement would be sent from
    pub network: Option<String>,
}

/// Estimate the cross-chain fee of settling from a network.
///
/// Always answers 200: when no estimate is available `fee` is null and
/// `error` explains why.
#[utoipa::path(
    get,
    path = "/v1/fees",
    tag = "Fees",
    params(FeeQuery),
    responses(
        (status = 200, description = "Fee estimate or the reason none is available", body = FeeResponse)
    )
)]
pub async fn estimate_fee(
    State(state): State<AppState>,
    Query(query): Query<FeeQuery>,
) -> Json<FeeResponse> {
    let context = &state.context;
    let network = query.network.as_deref();

    match context.fees.estimate(&context.registry, network).await {
        Ok(fee) => Json(FeeResponse {
            network: query.network,
            fee: Some(fee),
            error: None,
        }),
        Err(e) => {
            tracing::warn!(network = ?network, error = %e, "No fee estimate available");
            Json(FeeResponse {
                network: query.network,
                fee: None,
                error: Some(e.to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fake_state;

    #[tokio::test]
    async fn estimate_applies_margin() {
        let (state, _) = fake_state();
        let Json(body) = estimate_fee(
            State(state),
            Query(FeeQuery {
                network: Some("goerli_testnet".to_string()),
            }),
        )
        .await;

        assert_eq!(body.fee.as_deref(), Some("1.01"));
        assert!(body.error.is_none());
    }

    #[tokio::test]
    async fn failures_are_tagged_not_raised() {
        let (state, _) = fake_state();
        let Json(body) = estimate_fee(State(state), Query(FeeQuery { network: None })).await;

        assert!(body.fee.is_none());
        assert_eq!(
            body.error.as_deref(),
            Some("Missing precondition: no network selected")
        );

        let json = serde_json::to_value(&body).unwrap();
        assert!(json["fee"].is_null());
    }
}
