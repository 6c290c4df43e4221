use crate::auth::config::JwtConfig;
use crate::auth::principal::Identity;
use crate::auth::token::{verify_token, TokenError};
use crate::models::user::Role;
use actix_web::http::header;
use actix_web::HttpRequest;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no token provided")]
    NoToken,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("forbidden: {0}")]
    Forbidden(String),
}

/// Where a request may carry its token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenSource {
    Header,
    Cookie,
    /// Bearer header first, then the session cookie.
    HeaderOrCookie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequiredRole {
    Any,
    Only(Role),
}

impl TokenSource {
    pub fn extract(&self, req: &HttpRequest, cookie_name: &str) -> Option<String> {
        match self {
            TokenSource::Header => bearer_token(req),
            TokenSource::Cookie => cookie_token(req, cookie_name),
            TokenSource::HeaderOrCookie => {
                bearer_token(req).or_else(|| cookie_token(req, cookie_name))
            }
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn cookie_token(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    req.cookie(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|s| !s.is_empty())
}

pub fn authorize(identity: &Identity, required: RequiredRole) -> Result<(), AuthError> {
    match required {
        RequiredRole::Any => Ok(()),
        RequiredRole::Only(role) if identity.role == role => Ok(()),
        RequiredRole::Only(role) => Err(AuthError::Forbidden(format!(
            "requires role {role}, token carries {}",
            identity.role
        ))),
    }
}

/// The single verification path for every protected route: pull the token
/// from `source`, verify signature and expiry, then apply `required`.
pub fn authenticate(
    req: &HttpRequest,
    cfg: &JwtConfig,
    source: TokenSource,
    required: RequiredRole,
) -> Result<Identity, AuthError> {
    let token = source
        .extract(req, &cfg.cookie_name)
        .ok_or(AuthError::NoToken)?;
    let identity = verify_token(&token, cfg)?;
    authorize(&identity, required)?;
    Ok(identity)
}
