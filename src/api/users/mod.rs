mod auth;

use crate::auth::{AuthLayer, JwtConfig, RequiredRole, TokenSource};
use crate::db::AccountOperations;
use actix_web::web;
use auth::*;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(cfg: &mut ServiceConfig, account_ops: &AccountOperations, jwt_cfg: &JwtConfig) {
    // `/me` sits in its own scope so the token gate only covers it.
    cfg.service(
        scope::scope("/api/auth/me")
            .app_data(web::Data::new(account_ops.clone()))
            .wrap(AuthLayer::new(
                jwt_cfg.clone(),
                TokenSource::HeaderOrCookie,
                RequiredRole::Any,
            ))
            .service(me),
    )
    .service(
        scope::scope("/api/auth")
            .app_data(web::Data::new(account_ops.clone()))
            .app_data(web::Data::new(jwt_cfg.clone()))
            .service(register)
            .service(login)
            .service(logout)
            .service(check_email),
    );
}
