use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use edubook_auth::{ensure_signing_secret, verify_token};
use edubook_core::AppError;
use edubook_models::{Principal, UserRole};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::metrics::track_jwt_validation;
use crate::state::AppState;

const INVALID_TOKEN: &str = "Invalid or expired token";

/// Resolves the caller of a request.
///
/// Missing, invalid or expired credentials and credentials for accounts that no
/// longer exist are all 401. Store failures and an unset signing secret are 500.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Principal, AppError> {
    let token = state
        .transport
        .extract(headers)
        .ok_or_else(|| AppError::unauthorized("No token provided".to_string()))?;

    ensure_signing_secret(&state.jwt_config)?;

    let claims = verify_token(&token, &state.jwt_config).map_err(|reason| {
        warn!(reason = reason.as_str(), "Rejected access token");
        track_jwt_validation(reason.as_str());
        AppError::from(reason)
    })?;
    track_jwt_validation("valid");

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::unauthorized(INVALID_TOKEN.to_string()))?;

    let identity = state
        .identity
        .find_identity(user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_TOKEN.to_string()))?;

    let profile = state
        .profiles
        .find_profile(user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_TOKEN.to_string()))?;

    debug!(user_id = %user_id, role = %profile.role, "Authenticated request");

    Ok(Principal {
        id: identity.id,
        email: identity.email,
        role: profile.role,
    })
}

/// Route layer that rejects unauthenticated requests before the handler runs and
/// leaves the resolved [`Principal`] in request extensions.
///
/// ```ignore
/// Router::new()
///     .route("/", post(create_course))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = authenticate(&state, req.headers()).await?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Extractor for the authenticated caller.
///
/// Reuses the principal left by [`require_auth`]; on routes without the layer it
/// authenticates on its own.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(AuthUser(principal.clone()));
        }

        authenticate(state, &parts.headers).await.map(AuthUser)
    }
}
