use crate::api::errors::{ApiError, ErrorResponse};
use crate::auth::AdminIdentity;
use crate::config::AssetConfig;
use crate::db::{OwnerSummary, RestaurantOperations};
use crate::enums::admin::{
    RestaurantResp, RestaurantView, RestaurantWithOwner, ReviewListResp, VerifyRestaurantReq,
};
use crate::enums::common::MessageResp;
use crate::models::admin::Restaurant;
use actix_web::{delete, get, post, put, web, HttpResponse};

fn review_list(rows: Vec<(Restaurant, OwnerSummary)>, assets: &AssetConfig) -> ReviewListResp {
    ReviewListResp {
        status: "ok".to_string(),
        data: rows
            .into_iter()
            .map(|(restaurant, owner)| RestaurantWithOwner {
                restaurant: RestaurantView::new(restaurant, assets),
                owner: owner.into(),
            })
            .collect(),
    }
}

#[utoipa::path(
    tag = "Admin",
    responses(
        (status = 200, description = "Restaurants awaiting approval with their owners", body = ReviewListResp),
        (status = 401, description = "Missing or invalid admin token", body = ErrorResponse),
        (status = 403, description = "Token is not an admin token", body = ErrorResponse)
    ),
    summary = "List restaurants pending approval"
)]
#[get("/restaurants/pending")]
pub(super) async fn list_pending(
    restaurant_ops: web::Data<RestaurantOperations>,
    assets: web::Data<AssetConfig>,
    _admin: AdminIdentity,
) -> Result<HttpResponse, ApiError> {
    let ops = restaurant_ops.clone();
    let rows = web::block(move || ops.list_by_verification(false)).await??;
    debug!("list_pending: {} restaurants awaiting approval", rows.len());
    Ok(HttpResponse::Ok().json(review_list(rows, &assets)))
}

#[utoipa::path(
    tag = "Admin",
    responses(
        (status = 200, description = "Verified restaurants with their owners", body = ReviewListResp),
        (status = 401, description = "Missing or invalid admin token", body = ErrorResponse),
        (status = 403, description = "Token is not an admin token", body = ErrorResponse)
    ),
    summary = "List verified restaurants"
)]
#[get("/restaurants/verified")]
pub(super) async fn list_verified(
    restaurant_ops: web::Data<RestaurantOperations>,
    assets: web::Data<AssetConfig>,
    _admin: AdminIdentity,
) -> Result<HttpResponse, ApiError> {
    let ops = restaurant_ops.clone();
    let rows = web::block(move || ops.list_by_verification(true)).await??;
    Ok(HttpResponse::Ok().json(review_list(rows, &assets)))
}

async fn set_verification(
    restaurant_ops: &RestaurantOperations,
    assets: &AssetConfig,
    target_id: i32,
    verified: bool,
) -> Result<HttpResponse, ApiError> {
    let ops = restaurant_ops.clone();
    match web::block(move || ops.set_verified(target_id, verified)).await? {
        Ok(restaurant) => {
            info!(
                "set_verification: restaurant {} is_verified = {}",
                target_id, verified
            );
            Ok(HttpResponse::Ok().json(RestaurantResp {
                status: "ok".to_string(),
                data: RestaurantView::new(restaurant, assets),
            }))
        }
        Err(e) => {
            error!(
                "set_verification: failed to update restaurant {}: {}",
                target_id, e
            );
            Err(e.into())
        }
    }
}

#[utoipa::path(
    tag = "Admin",
    params(("id" = i32, Path, description = "Restaurant id")),
    request_body = VerifyRestaurantReq,
    responses(
        (status = 200, description = "Verification flag updated", body = RestaurantResp),
        (status = 400, description = "isVerified missing", body = ErrorResponse),
        (status = 404, description = "Unknown restaurant", body = ErrorResponse)
    ),
    summary = "Set the verification flag of a restaurant"
)]
#[put("/verify/{id}")]
pub(super) async fn verify_restaurant(
    restaurant_ops: web::Data<RestaurantOperations>,
    assets: web::Data<AssetConfig>,
    _admin: AdminIdentity,
    path: web::Path<(i32,)>,
    req_data: web::Json<VerifyRestaurantReq>,
) -> Result<HttpResponse, ApiError> {
    let verified = req_data
        .is_verified
        .ok_or_else(|| ApiError::Validation("isVerified is required".to_string()))?;
    set_verification(&restaurant_ops, &assets, path.into_inner().0, verified).await
}

#[utoipa::path(
    tag = "Admin",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant approved", body = RestaurantResp),
        (status = 404, description = "Unknown restaurant", body = ErrorResponse)
    ),
    summary = "Approve a pending restaurant"
)]
#[post("/restaurants/approve/{id}")]
pub(super) async fn approve_restaurant(
    restaurant_ops: web::Data<RestaurantOperations>,
    assets: web::Data<AssetConfig>,
    _admin: AdminIdentity,
    path: web::Path<(i32,)>,
) -> Result<HttpResponse, ApiError> {
    set_verification(&restaurant_ops, &assets, path.into_inner().0, true).await
}

#[utoipa::path(
    tag = "Admin",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Application rejected and removed", body = MessageResp),
        (status = 404, description = "Unknown restaurant", body = ErrorResponse)
    ),
    summary = "Reject a restaurant application"
)]
#[post("/restaurants/reject/{id}")]
pub(super) async fn reject_restaurant(
    restaurant_ops: web::Data<RestaurantOperations>,
    _admin: AdminIdentity,
    path: web::Path<(i32,)>,
) -> Result<HttpResponse, ApiError> {
    let target_id = path.into_inner().0;
    let ops = restaurant_ops.clone();
    let removed = web::block(move || ops.delete_restaurant(target_id)).await??;
    info!("reject_restaurant: rejected '{}'", removed.restaurant_name);
    Ok(HttpResponse::Ok().json(MessageResp::ok("Restaurant application rejected")))
}

#[utoipa::path(
    tag = "Admin",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant deleted", body = MessageResp),
        (status = 404, description = "Unknown restaurant", body = ErrorResponse)
    ),
    summary = "Delete a restaurant with its menu and orders"
)]
#[delete("/restaurants/{id}")]
pub(super) async fn delete_restaurant(
    restaurant_ops: web::Data<RestaurantOperations>,
    _admin: AdminIdentity,
    path: web::Path<(i32,)>,
) -> Result<HttpResponse, ApiError> {
    let target_id = path.into_inner().0;
    let ops = restaurant_ops.clone();
    match web::block(move || ops.delete_restaurant(target_id)).await? {
        Ok(_) => {
            info!("delete_restaurant: deleted restaurant {}", target_id);
            Ok(HttpResponse::Ok().json(MessageResp::ok("Restaurant deleted successfully")))
        }
        Err(e) => {
            error!("delete_restaurant: failed to delete {}: {}", target_id, e);
            Err(e.into())
        }
    }
}
