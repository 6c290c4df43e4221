use crate::auth::{AuthLayer, JwtConfig, RequiredRole, TokenSource};
use crate::config::AssetConfig;
use crate::db::{AccountOperations, RestaurantOperations};
use crate::models::user::Role;
use actix_web::web;
use restaurants::*;
use users::*;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

mod restaurants;
mod users;

pub fn config(
    cfg: &mut ServiceConfig,
    restaurant_ops: &RestaurantOperations,
    account_ops: &AccountOperations,
    jwt_cfg: &JwtConfig,
    assets: &AssetConfig,
) {
    cfg.service(
        scope::scope("/api/admin")
            .app_data(web::Data::new(restaurant_ops.clone()))
            .app_data(web::Data::new(account_ops.clone()))
            .app_data(web::Data::new(assets.clone()))
            .wrap(AuthLayer::new(
                jwt_cfg.clone(),
                TokenSource::Header,
                RequiredRole::Only(Role::Admin),
            ))
            .service(list_pending)
            .service(list_verified)
            .service(verify_restaurant)
            .service(approve_restaurant)
            .service(reject_restaurant)
            .service(delete_restaurant)
            .service(list_users)
            .service(delete_user),
    );
}
