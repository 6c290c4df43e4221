mod menu;
mod restaurant;
mod search;

use crate::auth::{AuthLayer, JwtConfig, RequiredRole, TokenSource};
use crate::config::AssetConfig;
use crate::db::{MenuOperations, RestaurantOperations, SearchOperations};
use actix_web::web;
use menu::*;
use restaurant::*;
use search::*;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(
    cfg: &mut ServiceConfig,
    restaurant_ops: &RestaurantOperations,
    menu_ops: &MenuOperations,
    search_ops: &SearchOperations,
    jwt_cfg: &JwtConfig,
    assets: &AssetConfig,
) {
    cfg.service(
        scope::scope("/api/restaurants/dishes")
            .app_data(web::Data::new(menu_ops.clone()))
            .app_data(web::Data::new(assets.clone()))
            .wrap(AuthLayer::new(
                jwt_cfg.clone(),
                TokenSource::HeaderOrCookie,
                RequiredRole::Any,
            ))
            .service(add_dish),
    )
    .service(
        scope::scope("/api/restaurants")
            .app_data(web::Data::new(restaurant_ops.clone()))
            .app_data(web::Data::new(menu_ops.clone()))
            .app_data(web::Data::new(search_ops.clone()))
            .app_data(web::Data::new(assets.clone()))
            .service(list_restaurants)
            .service(register_restaurant)
            .service(search_restaurants)
            .service(get_categorized_menu)
            .service(get_restaurant_by_owner)
            .service(get_menu),
    );
}
