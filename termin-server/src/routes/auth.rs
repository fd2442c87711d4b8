//! Authentication endpoints.
//!
//! Thin pass-through to the backend's identity service. With the local
//! backend there are no accounts and sign-in reports as much.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use termin_core::TerminError;
use termin_core::session::{AuthClient, Identity};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-out", post(sign_out))
        .route("/auth/session", get(current_session))
}

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Identity summary returned to clients. The access token stays
/// server-side.
#[derive(Serialize)]
pub struct SessionInfo {
    pub user_id: String,
    pub email: String,
}

impl From<Identity> for SessionInfo {
    fn from(identity: Identity) -> Self {
        SessionInfo {
            user_id: identity.user_id,
            email: identity.email,
        }
    }
}

fn require_auth(state: &AppState) -> Result<&AuthClient, AppError> {
    state
        .auth
        .as_ref()
        .ok_or_else(|| TerminError::Config("the local backend has no accounts".into()).into())
}

/// POST /auth/sign-in
async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SessionInfo>, AppError> {
    let auth = require_auth(&state)?;
    let identity = auth.sign_in(&request.email, &request.password).await?;
    Ok(Json(identity.into()))
}

/// POST /auth/sign-out
async fn sign_out(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let auth = require_auth(&state)?;
    auth.sign_out().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/session - the current identity, or null when signed out
async fn current_session(State(state): State<AppState>) -> Json<Option<SessionInfo>> {
    Json(state.session.current_user().map(SessionInfo::from))
}
