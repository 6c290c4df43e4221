mod orders;

use crate::auth::{AuthLayer, JwtConfig, RequiredRole, TokenSource};
use crate::db::{AccountOperations, OrderOperations};
use actix_web::web;
use orders::*;
use utoipa_actix_web::scope;
use utoipa_actix_web::service_config::ServiceConfig;

pub fn config(
    cfg: &mut ServiceConfig,
    order_ops: &OrderOperations,
    account_ops: &AccountOperations,
    jwt_cfg: &JwtConfig,
) {
    cfg.service(
        scope::scope("/api/orders")
            .app_data(web::Data::new(order_ops.clone()))
            .app_data(web::Data::new(account_ops.clone()))
            .wrap(AuthLayer::new(
                jwt_cfg.clone(),
                TokenSource::HeaderOrCookie,
                RequiredRole::Any,
            ))
            .service(create_order)
            .service(list_restaurant_orders)
            // before `/{id}`
            .service(order_history)
            .service(get_order)
            .service(update_order_status),
    );
}
