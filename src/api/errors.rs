use crate::auth::{AuthError, TokenError};
use crate::db::RepositoryError;
use actix_web::error::{BlockingError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("No token provided")]
    NoToken,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account no longer exists")]
    AccountNotFound,
    #[error("{0}")]
    Forbidden(String),
    #[error("Restaurant is pending admin approval")]
    PendingApproval,
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    InvalidTransition(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Duplicate(_) => "DUPLICATE",
            ApiError::NoToken => "NO_TOKEN",
            ApiError::TokenExpired => "TOKEN_EXPIRED",
            ApiError::InvalidToken => "INVALID_TOKEN",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::PendingApproval => "PENDING_APPROVAL",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidTransition(_) => "INVALID_TRANSITION",
            ApiError::Conflict(_) => "STATUS_CONFLICT",
            ApiError::Internal => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Duplicate(_) => StatusCode::BAD_REQUEST,
            ApiError::NoToken
            | ApiError::TokenExpired
            | ApiError::InvalidToken
            | ApiError::InvalidCredentials
            | ApiError::AccountNotFound => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) | ApiError::PendingApproval => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidTransition(_) | ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            status: "error".to_string(),
            code: self.code().to_string(),
            message: self.to_string(),
        })
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(what) => ApiError::NotFound(what),
            RepositoryError::ValidationError(msg) => ApiError::Validation(msg),
            RepositoryError::Duplicate(msg) => ApiError::Duplicate(msg),
            RepositoryError::Forbidden(msg) => ApiError::Forbidden(msg),
            RepositoryError::InvalidCredentials => ApiError::InvalidCredentials,
            RepositoryError::PendingApproval(_) => ApiError::PendingApproval,
            RepositoryError::AccountNotFound(_) => ApiError::AccountNotFound,
            e @ RepositoryError::InvalidTransition { .. } => ApiError::InvalidTransition(e.to_string()),
            e @ RepositoryError::StaleStatus(_) => ApiError::Conflict(e.to_string()),
            other => {
                error!("internal repository error: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::NoToken => ApiError::NoToken,
            AuthError::Token(TokenError::Expired) => ApiError::TokenExpired,
            AuthError::Token(TokenError::Invalid(reason)) => {
                debug!("rejecting token: {}", reason);
                ApiError::InvalidToken
            }
            AuthError::Token(TokenError::Issue(reason)) => {
                error!("token error: {}", reason);
                ApiError::Internal
            }
            AuthError::Forbidden(msg) => ApiError::Forbidden(msg),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        AuthError::Token(e).into()
    }
}

impl From<BlockingError> for ApiError {
    fn from(e: BlockingError) -> Self {
        error!("blocking task failed: {}", e);
        ApiError::Internal
    }
}

pub(crate) fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    ApiError::Validation(format!("Invalid JSON body: {err}")).into()
}

pub(crate) fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    ApiError::Validation(format!("Invalid query string: {err}")).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::OrderStatus;

    #[test]
    fn repository_errors_map_to_status_codes() {
        let cases = [
            (RepositoryError::NotFound("order 1".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (RepositoryError::Duplicate("x".into()), StatusCode::BAD_REQUEST, "DUPLICATE"),
            (RepositoryError::PendingApproval(3), StatusCode::FORBIDDEN, "PENDING_APPROVAL"),
            (RepositoryError::AccountNotFound(3), StatusCode::UNAUTHORIZED, "ACCOUNT_NOT_FOUND"),
            (
                RepositoryError::InvalidTransition {
                    from: OrderStatus::Shipped,
                    to: OrderStatus::Pending,
                },
                StatusCode::CONFLICT,
                "INVALID_TRANSITION",
            ),
            (RepositoryError::StaleStatus(1), StatusCode::CONFLICT, "STATUS_CONFLICT"),
            (
                RepositoryError::Migration("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (repo_err, status, code) in cases {
            let api_err = ApiError::from(repo_err);
            assert_eq!(api_err.status_code(), status);
            assert_eq!(api_err.code(), code);
        }
    }

    #[test]
    fn token_errors_map_to_401() {
        let expired = ApiError::from(AuthError::Token(TokenError::Expired));
        assert_eq!(expired.code(), "TOKEN_EXPIRED");
        assert_eq!(expired.status_code(), StatusCode::UNAUTHORIZED);
        let missing = ApiError::from(AuthError::NoToken);
        assert_eq!(missing.code(), "NO_TOKEN");
    }
}
