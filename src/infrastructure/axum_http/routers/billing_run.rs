use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::error;

use crate::{
    application::usercases::billing_run::BillingRunUseCase, config::config_model::DotEnvyConfig,
};

// Run example
//   curl -X POST "http://localhost:$SERVER_PORT/internal/v1/billing/run" \
//     -H "Authorization: Bearer $BILLING_INTERNAL_TOKEN"

#[derive(Clone)]
pub struct BillingRunRouteState {
    config: Arc<DotEnvyConfig>,
    usecase: Arc<BillingRunUseCase>,
}

pub fn routes(config: Arc<DotEnvyConfig>, usecase: Arc<BillingRunUseCase>) -> Router {
    Router::new()
        .route("/run", post(run_billing))
        .with_state(BillingRunRouteState { config, usecase })
}

#[derive(Debug, Serialize)]
pub struct BillingRunResponse {
    pub success: bool,
    pub message: String,
    pub scanned: usize,
    pub issued: usize,
    pub first_reminders: usize,
    pub second_reminders: usize,
    pub marked_overdue: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BillingRunErrorResponse {
    pub error: String,
    pub details: String,
}

pub async fn run_billing(State(state): State<BillingRunRouteState>, headers: HeaderMap) -> Response {
    let expected_token = match state.config.billing.internal_token.as_deref() {
        Some(token) => token,
        None => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                "billing token is not configured",
            )
                .into_response();
        }
    };

    if let Err(status) = authorize_bearer(&headers, expected_token) {
        return (status, "unauthorized").into_response();
    }

    match state.usecase.run(Utc::now()).await {
        Ok(summary) => Json(BillingRunResponse {
            success: true,
            message: format!(
                "billing run completed: {} scanned, {} issued, {} first reminders, {} second reminders, {} marked overdue",
                summary.scanned,
                summary.issued,
                summary.first_reminders,
                summary.second_reminders,
                summary.marked_overdue,
            ),
            scanned: summary.scanned,
            issued: summary.issued,
            first_reminders: summary.first_reminders,
            second_reminders: summary.second_reminders,
            marked_overdue: summary.marked_overdue,
            errors: summary.errors,
        })
        .into_response(),
        Err(err) => {
            error!(error = ?err, "billing run: usecase failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(BillingRunErrorResponse {
                    error: "billing run failed".to_string(),
                    details: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn authorize_bearer(headers: &HeaderMap, expected_token: &str) -> Result<(), StatusCode> {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if token == expected_token {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}
