use crate::api::errors::{ApiError, ErrorResponse};
use crate::auth::{issue_token, Identity, IdentityExtractor, JwtConfig};
use crate::db::AccountOperations;
use crate::enums::common::MessageResp;
use crate::enums::users::{
    AccountProfile, CheckEmailReq, CheckEmailResp, LoginReq, LoginResp, ProfileResp, RegisterReq,
    RegisterResp,
};
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{get, post, web, HttpResponse};

fn session_cookie<'c>(jwt_cfg: &JwtConfig, value: String) -> Cookie<'c> {
    Cookie::build(jwt_cfg.cookie_name.clone(), value)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(jwt_cfg.cookie_secure)
        .path("/")
        .max_age(Duration::seconds(jwt_cfg.expiry_secs as i64))
        .finish()
}

#[utoipa::path(
    tag = "Auth",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Account created", body = RegisterResp),
        (status = 400, description = "Missing fields or email already registered", body = ErrorResponse)
    ),
    summary = "Register a customer or restaurant owner account"
)]
#[post("/register")]
pub(super) async fn register(
    account_ops: web::Data<AccountOperations>,
    req_data: web::Json<RegisterReq>,
) -> Result<HttpResponse, ApiError> {
    let registration = req_data.into_inner().into_registration().map_err(|e| {
        debug!("register: rejected registration: {}", e);
        ApiError::Validation(e)
    })?;
    let email = registration.email.clone();

    let ops = account_ops.clone();
    match web::block(move || ops.register(registration)).await? {
        Ok(account) => {
            info!(
                "register: created {} account {} for '{}'",
                account.role, account.account_id, email
            );
            Ok(HttpResponse::Created().json(RegisterResp {
                status: "ok".to_string(),
                message: "User registered successfully".to_string(),
                user_id: account.account_id,
            }))
        }
        Err(e) => {
            error!("register: failed to create account for '{}': {}", email, e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    tag = "Auth",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Credentials accepted, token issued in body and cookie", body = LoginResp),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse),
        (status = 403, description = "Restaurant not yet approved", body = ErrorResponse)
    ),
    summary = "Log in and receive a session token"
)]
#[post("/login")]
pub(super) async fn login(
    account_ops: web::Data<AccountOperations>,
    jwt_cfg: web::Data<JwtConfig>,
    req_body: web::Json<LoginReq>,
) -> Result<HttpResponse, ApiError> {
    let LoginReq { email, password } = req_body.into_inner();
    let (email, password) = match (email, password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(ApiError::Validation(
                "email and password are required".to_string(),
            ))
        }
    };

    let ops = account_ops.clone();
    let login_email = email.clone();
    let account = match web::block(move || ops.authenticate(&login_email, &password)).await? {
        Ok(account) => account,
        Err(e) => {
            debug!("login: authentication failed for '{}': {}", email, e);
            return Err(e.into());
        }
    };

    let identity = Identity {
        account_id: account.account_id,
        name: account.name.clone(),
        role: account.role,
    };
    let token = issue_token(&identity, &jwt_cfg)?;
    info!("login: account {} logged in as {}", account.account_id, account.role);

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&jwt_cfg, token.clone()))
        .json(LoginResp {
            status: "ok".to_string(),
            message: "Login successful".to_string(),
            user_name: account.name,
            user_type: account.role,
            token,
        }))
}

#[utoipa::path(
    tag = "Auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResp)
    ),
    summary = "Log out by clearing the session cookie"
)]
#[post("/logout")]
pub(super) async fn logout(jwt_cfg: web::Data<JwtConfig>) -> HttpResponse {
    let mut cookie = session_cookie(&jwt_cfg, String::new());
    cookie.make_removal();
    HttpResponse::Ok()
        .cookie(cookie)
        .json(MessageResp::ok("Logged out successfully"))
}

#[utoipa::path(
    tag = "Auth",
    request_body = CheckEmailReq,
    responses(
        (status = 200, description = "Whether the email is already registered", body = CheckEmailResp),
        (status = 400, description = "Email missing", body = ErrorResponse)
    ),
    summary = "Check whether an email is already registered"
)]
#[post("/check-email")]
pub(super) async fn check_email(
    account_ops: web::Data<AccountOperations>,
    req_body: web::Json<CheckEmailReq>,
) -> Result<HttpResponse, ApiError> {
    let email = req_body
        .into_inner()
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("email is required".to_string()))?;

    let ops = account_ops.clone();
    let exists = web::block(move || ops.email_exists(&email)).await??;
    let message = if exists {
        "Email is already registered"
    } else {
        "Email is available"
    };
    Ok(HttpResponse::Ok().json(CheckEmailResp {
        status: "ok".to_string(),
        exists,
        message: message.to_string(),
    }))
}

#[utoipa::path(
    tag = "Auth",
    responses(
        (status = 200, description = "Profile of the logged-in account", body = ProfileResp),
        (status = 401, description = "Missing, invalid or expired token, or account deleted", body = ErrorResponse)
    ),
    summary = "Profile of the account behind the current token"
)]
#[get("")]
pub(super) async fn me(
    account_ops: web::Data<AccountOperations>,
    identity: IdentityExtractor,
) -> Result<HttpResponse, ApiError> {
    let IdentityExtractor(identity) = identity;
    let account_id = identity.account_id;

    let ops = account_ops.clone();
    match web::block(move || ops.resolve_identity(&identity)).await? {
        Ok(account) => Ok(HttpResponse::Ok().json(ProfileResp {
            status: "ok".to_string(),
            data: AccountProfile::from(account),
        })),
        Err(e) => {
            debug!("me: could not resolve account {}: {}", account_id, e);
            Err(e.into())
        }
    }
}
