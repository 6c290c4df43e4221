#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{http::header, web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use foodcart::auth::JwtConfig;
use foodcart::config::{AssetConfig, BootstrapAdmin, ServerConfig};
use foodcart::{api, AppState};
use utoipa_actix_web::AppExt;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let server_cfg = ServerConfig::from_env();
    let jwt_cfg = JwtConfig::from_env();
    let asset_cfg = AssetConfig::from_env();

    info!("Initializing database connection pool...");
    let state = AppState::new(
        &server_cfg.database_url,
        server_cfg.pool_size,
        jwt_cfg,
        asset_cfg,
    )
    .map_err(std::io::Error::other)?;

    if let Some(admin) = BootstrapAdmin::from_env() {
        let ops = state.account_ops.clone();
        let result = web::block(move || ops.ensure_admin(&admin.name, &admin.email, &admin.password))
            .await
            .map_err(std::io::Error::other)?;
        match result {
            Ok(account) => info!("Admin account {} is ready", account.account_id),
            Err(e) => error!("Could not create bootstrap admin: {}", e),
        }
    }

    info!(
        "Starting server at http://{}:{}",
        server_cfg.host, server_cfg.port
    );
    let allowed_origin = server_cfg.allowed_origin.clone();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .supports_credentials()
            .max_age(3600);

        let (app, openapi) = App::new()
            .into_utoipa_app()
            .configure(|cfg| api::configure(cfg, &state))
            .split_for_parts();

        app.app_data(api::json_config())
            .app_data(api::query_config())
            .route(
                "/api/openapi.json",
                web::get().to(move || {
                    let doc = openapi.clone();
                    async move { HttpResponse::Ok().json(doc) }
                }),
            )
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .wrap(Logger::default())
    })
    .bind((server_cfg.host.as_str(), server_cfg.port))?
    .run()
    .await
}
