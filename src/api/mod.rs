pub mod admin;
pub mod common;
mod errors;
pub mod restaurants;
pub mod users;

use crate::AppState;
use actix_web::{get, web, HttpResponse, Responder};
pub use errors::{ApiError, ErrorResponse};
pub(crate) use errors::{default_error_handler, query_error_handler};
use utoipa_actix_web::service_config::ServiceConfig;

#[utoipa::path(
    tag = "Health",
    responses((status = 200, description = "Server is running", body = String)),
    summary = "Health check"
)]
#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Server up!")
}

/// JSON bodies that fail to parse are answered with `VALIDATION_ERROR`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(default_error_handler)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

pub fn configure(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.service(root_endpoint)
        .configure(|cfg| users::config(cfg, &state.account_ops, &state.jwt_cfg))
        .configure(|cfg| {
            restaurants::config(
                cfg,
                &state.restaurant_ops,
                &state.menu_ops,
                &state.search_ops,
                &state.jwt_cfg,
                &state.asset_cfg,
            )
        })
        .configure(|cfg| common::config(cfg, &state.order_ops, &state.account_ops, &state.jwt_cfg))
        .configure(|cfg| {
            admin::config(
                cfg,
                &state.restaurant_ops,
                &state.account_ops,
                &state.jwt_cfg,
                &state.asset_cfg,
            )
        });
}
