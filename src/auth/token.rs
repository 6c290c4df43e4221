use crate::auth::config::JwtConfig;
use crate::auth::principal::Identity;
use crate::models::user::Role;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("unable to issue token: {0}")]
    Issue(String),
}

#[derive(Serialize, Deserialize)]
struct Claims {
    iss: String,
    aud: String,
    sub: String, // account_id
    name: String,
    role: Role,
    iat: u64,
    exp: u64,
}

pub fn issue_token(identity: &Identity, cfg: &JwtConfig) -> Result<String, TokenError> {
    let now = get_current_timestamp();
    let claims = Claims {
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        sub: identity.account_id.to_string(),
        name: identity.name.clone(),
        role: identity.role,
        iat: now,
        exp: now + cfg.expiry_secs,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Issue(e.to_string()))
}

pub fn verify_token(token: &str, cfg: &JwtConfig) -> Result<Identity, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[cfg.issuer.as_str()]);
    validation.set_audience(&[cfg.audience.as_str()]);
    validation.leeway = cfg.leeway_secs;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
    })?;
    let account_id: i32 = data
        .claims
        .sub
        .parse()
        .map_err(|e| TokenError::Invalid(format!("invalid sub: {e}")))?;
    Ok(Identity {
        account_id,
        name: data.claims.name,
        role: data.claims.role,
    })
}
