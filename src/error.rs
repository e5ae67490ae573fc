// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::flows::{FlowError, Precondition};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        let message = err.to_string();
        match &err {
            FlowError::InvalidInput(_)
            | FlowError::UnsupportedNetwork(_)
            | FlowError::MissingPrecondition(Precondition::Network | Precondition::Invoice) => {
                Self::bad_request(message)
            }
            FlowError::NotFound(_) => Self::not_found(message),
            FlowError::WrongNetwork { .. }
            | FlowError::AlreadyPaid(_)
            | FlowError::CreationInFlight => Self::conflict(message),
            FlowError::MissingPrecondition(Precondition::Signer) => {
                Self::service_unavailable(message)
            }
            FlowError::Chain(e) if e.is_retryable() => Self::service_unavailable(message),
            FlowError::Chain(_) => Self::bad_gateway(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::ChainClientError;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");

        let conflict = ApiError::conflict("busy");
        assert_eq!(conflict.status, StatusCode::CONFLICT);
    }

    #[test]
    fn flow_errors_map_to_statuses() {
        let cases = [
            (FlowError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (FlowError::UnsupportedNetwork("x".into()), StatusCode::BAD_REQUEST),
            (
                FlowError::MissingPrecondition(Precondition::Invoice),
                StatusCode::BAD_REQUEST,
            ),
            (FlowError::NotFound(1), StatusCode::NOT_FOUND),
            (
                FlowError::WrongNetwork {
                    connected: "zeta_testnet".into(),
                    message: "switch".into(),
                },
                StatusCode::CONFLICT,
            ),
            (FlowError::AlreadyPaid(1), StatusCode::CONFLICT),
            (FlowError::CreationInFlight, StatusCode::CONFLICT),
            (
                FlowError::MissingPrecondition(Precondition::Signer),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                FlowError::Chain(ChainClientError::RpcError("timeout".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                FlowError::Chain(ChainClientError::ContractError("revert".into())),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, status) in cases {
            let label = err.to_string();
            assert_eq!(ApiError::from(err).status, status, "{label}");
        }
    }

    #[test]
    fn wrong_network_message_is_passed_through() {
        let err = ApiError::from(FlowError::WrongNetwork {
            connected: "zeta_testnet".into(),
            message: "You need to switch your wallet".into(),
        });
        assert_eq!(err.message, "You need to switch your wallet");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }
}
