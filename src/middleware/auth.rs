//! Middleware de autenticación JWT
//!
//! Extrae el token Bearer, lo verifica con el proveedor de identidad e
//! inyecta el propietario autenticado en las extensions de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    state::AppState,
    utils::{errors::AppError, jwt::extract_token_from_header},
};

/// Propietario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedOwner {
    pub owner_id: String,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let session = state.identity.verify(token)?;

    request.extensions_mut().insert(AuthenticatedOwner {
        owner_id: session.owner_id,
    });

    Ok(next.run(request).await)
}
