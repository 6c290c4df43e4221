use crate::api::errors::{ApiError, ErrorResponse};
use crate::config::AssetConfig;
use crate::db::RestaurantOperations;
use crate::enums::admin::{RegisterRestaurantReq, RestaurantListResp, RestaurantResp, RestaurantView};
use actix_web::{get, post, web, HttpResponse};

#[utoipa::path(
    tag = "Restaurants",
    responses(
        (status = 200, description = "All verified restaurants", body = RestaurantListResp)
    ),
    summary = "List restaurants open for orders"
)]
#[get("")]
pub(super) async fn list_restaurants(
    restaurant_ops: web::Data<RestaurantOperations>,
    assets: web::Data<AssetConfig>,
) -> Result<HttpResponse, ApiError> {
    let ops = restaurant_ops.clone();
    let found = web::block(move || ops.list_verified()).await??;
    debug!("list_restaurants: returning {} restaurants", found.len());

    Ok(HttpResponse::Ok().json(RestaurantListResp {
        status: "ok".to_string(),
        data: found
            .into_iter()
            .map(|r| RestaurantView::new(r, &assets))
            .collect(),
    }))
}

#[utoipa::path(
    tag = "Restaurants",
    request_body = RegisterRestaurantReq,
    responses(
        (status = 201, description = "Restaurant created and awaiting approval", body = RestaurantResp),
        (status = 400, description = "Missing fields or owner already has a restaurant", body = ErrorResponse),
        (status = 401, description = "Owner credentials rejected", body = ErrorResponse),
        (status = 403, description = "Account is not a restaurant owner", body = ErrorResponse)
    ),
    summary = "Register a restaurant for an owner account"
)]
#[post("/register")]
pub(super) async fn register_restaurant(
    restaurant_ops: web::Data<RestaurantOperations>,
    assets: web::Data<AssetConfig>,
    req_data: web::Json<RegisterRestaurantReq>,
) -> Result<HttpResponse, ApiError> {
    let application = req_data
        .into_inner()
        .into_application()
        .map_err(ApiError::Validation)?;
    let email = application.email.clone();

    let ops = restaurant_ops.clone();
    let result = web::block(move || {
        ops.register_restaurant(&application.email, &application.password, application.details)
    })
    .await?;
    match result {
        Ok(restaurant) => {
            info!(
                "register_restaurant: restaurant {} awaiting approval",
                restaurant.restaurant_id
            );
            Ok(HttpResponse::Created().json(RestaurantResp {
                status: "ok".to_string(),
                data: RestaurantView::new(restaurant, &assets),
            }))
        }
        Err(e) => {
            error!("register_restaurant: failed for owner '{}': {}", email, e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    tag = "Restaurants",
    params(("user_id" = i32, Path, description = "Owner account id")),
    responses(
        (status = 200, description = "Restaurant owned by the account", body = RestaurantResp),
        (status = 404, description = "Account owns no restaurant", body = ErrorResponse)
    ),
    summary = "Find the restaurant owned by an account"
)]
#[get("/user/{user_id}")]
pub(super) async fn get_restaurant_by_owner(
    restaurant_ops: web::Data<RestaurantOperations>,
    assets: web::Data<AssetConfig>,
    path: web::Path<(i32,)>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = path.into_inner().0;
    let ops = restaurant_ops.clone();
    let restaurant = web::block(move || ops.get_by_owner(owner_id)).await??;

    Ok(HttpResponse::Ok().json(RestaurantResp {
        status: "ok".to_string(),
        data: RestaurantView::new(restaurant, &assets),
    }))
}
