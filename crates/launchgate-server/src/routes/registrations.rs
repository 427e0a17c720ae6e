//! Registration routes.
//!
//! The two workflow operations exposed to the presentation layer: the splash
//! page posts an email to get an access code, and the claim page posts
//! code + email + seller to bind the registration.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Request body for issuing an access code.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IssueRequest {
    pub email: String,
}

/// Response for a successful issuance.
#[derive(Debug, Serialize)]
pub struct IssueResponse {
    /// The issued access code. This is the only source of truth for the
    /// code — the caller must display exactly this value.
    pub code: String,
}

/// Request body for binding a seller.
///
/// Fields default to empty so an absent field flows into the workflow's
/// missing-field check instead of a generic body rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyRequest {
    pub code: String,
    pub email: String,
    pub seller: String,
}

/// Response for a successful bind.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub ok: bool,
}

/// Build the registrations router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(issue))
        .route("/verify", post(verify))
}

/// `POST /v1/registrations` — issue an access code for an email.
async fn issue(
    State(state): State<Arc<AppState>>,
    Json(body): Json<IssueRequest>,
) -> Result<(StatusCode, Json<IssueResponse>), AppError> {
    let reg = state.issuer.issue(&body.email).await?;
    Ok((StatusCode::CREATED, Json(IssueResponse { code: reg.code })))
}

/// `POST /v1/registrations/verify` — bind a seller to a registration.
async fn verify(
    State(state): State<Arc<AppState>>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    state
        .binder
        .bind(&body.code, &body.email, &body.seller)
        .await?;
    Ok(Json(VerifyResponse { ok: true }))
}
