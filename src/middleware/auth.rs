// SPDX-License-Identifier: MIT

//! Supabase JWT authentication middleware.
//!
//! Users sign in against Supabase directly; this server only verifies the
//! access tokens it issued (HS256 with the project JWT secret).

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Claims we rely on from Supabase access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (auth user UUID)
    pub sub: String,
    /// Account email, when the provider shares one
    pub email: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

/// Authenticated user extracted from the JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
}

/// Middleware that requires a valid Supabase access token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) if h.starts_with("Bearer ") => &h[7..],
        _ => return Err(StatusCode::UNAUTHORIZED),
    };

    let key = DecodingKey::from_secret(&state.config.supabase_jwt_secret);
    let mut validation = Validation::new(Algorithm::HS256);
    // Supabase sets aud="authenticated"; exp is what actually matters here
    validation.validate_aud = false;

    let token_data =
        decode::<Claims>(token, &key, &validation).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let auth_user = AuthUser {
        user_id: token_data.claims.sub,
        email: token_data.claims.email,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
