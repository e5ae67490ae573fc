// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    blockchain::{CoinType, NetworkSummary},
    flows::{
        balances::BalanceRow,
        invoices::{InvoiceStatus, InvoiceSummary},
    },
    models::{
        BalancesResponse, CreateInvoiceRequest, CreateInvoiceResponse, FeeResponse,
        InvoiceListResponse, InvoiceResponse, ListingState, PayInvoiceRequest, SettlementResponse,
        SettlementTransaction, TransactionStatusResponse,
    },
    state::AppState,
};

pub mod balance;
pub mod fees;
pub mod health;
pub mod invoices;
pub mod networks;
pub mod settlement;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/balances/{address}", get(balance::get_balances))
        .route(
            "/invoices",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route("/invoice", get(invoices::get_invoice))
        .route("/invoice/settlement", get(settlement::prepare_settlement))
        .route("/invoice/pay", post(settlement::pay_invoice))
        .route("/fees", get(fees::estimate_fee))
        .route("/networks", get(networks::list_networks))
        .route(
            "/networks/{network}/transactions/{tx_hash}",
            get(networks::get_transaction_status),
        )
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        balance::get_balances,
        invoices::create_invoice,
        invoices::list_invoices,
        invoices::get_invoice,
        settlement::prepare_settlement,
        settlement::pay_invoice,
        fees::estimate_fee,
        networks::list_networks,
        networks::get_transaction_status,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            BalancesResponse,
            BalanceRow,
            CoinType,
            CreateInvoiceRequest,
            CreateInvoiceResponse,
            InvoiceResponse,
            InvoiceListResponse,
            InvoiceSummary,
            InvoiceStatus,
            ListingState,
            SettlementTransaction,
            PayInvoiceRequest,
            SettlementResponse,
            FeeResponse,
            NetworkSummary,
            TransactionStatusResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Balances", description = "Balance table across networks"),
        (name = "Invoices", description = "Invoice ledger on ZetaChain"),
        (name = "Settlement", description = "Cross-chain invoice settlement"),
        (name = "Fees", description = "Cross-chain fee estimates"),
        (name = "Networks", description = "Supported networks and transaction status"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
