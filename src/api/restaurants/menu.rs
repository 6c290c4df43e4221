use crate::api::errors::{ApiError, ErrorResponse};
use crate::auth::OwnerIdentity;
use crate::config::AssetConfig;
use crate::db::MenuOperations;
use crate::enums::admin::{CategorizedMenuResp, DishResp, DishView, MenuResp, NewDishReq};
use actix_web::{get, post, web, HttpResponse};

#[utoipa::path(
    tag = "Menu",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Dishes of the restaurant", body = MenuResp),
        (status = 404, description = "Unknown restaurant", body = ErrorResponse)
    ),
    summary = "Menu of a restaurant"
)]
#[get("/{id}/menu")]
pub(super) async fn get_menu(
    menu_ops: web::Data<MenuOperations>,
    assets: web::Data<AssetConfig>,
    path: web::Path<(i32,)>,
) -> Result<HttpResponse, ApiError> {
    let search_id = path.into_inner().0;
    let ops = menu_ops.clone();
    let (restaurant, dishes) = web::block(move || ops.get_menu(search_id)).await??;
    debug!("get_menu: restaurant {} has {} dishes", search_id, dishes.len());

    Ok(HttpResponse::Ok().json(MenuResp {
        status: "ok".to_string(),
        restaurant_name: restaurant.restaurant_name,
        menu: dishes.into_iter().map(|d| DishView::new(d, &assets)).collect(),
    }))
}

#[utoipa::path(
    tag = "Menu",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Dishes grouped by category", body = CategorizedMenuResp),
        (status = 404, description = "Unknown restaurant", body = ErrorResponse)
    ),
    summary = "Menu of a restaurant grouped by category"
)]
#[get("/menu/{id}")]
pub(super) async fn get_categorized_menu(
    menu_ops: web::Data<MenuOperations>,
    assets: web::Data<AssetConfig>,
    path: web::Path<(i32,)>,
) -> Result<HttpResponse, ApiError> {
    let search_id = path.into_inner().0;
    let ops = menu_ops.clone();
    let (restaurant, grouped) = web::block(move || ops.get_categorized_menu(search_id)).await??;

    Ok(HttpResponse::Ok().json(CategorizedMenuResp {
        status: "ok".to_string(),
        restaurant_name: restaurant.restaurant_name,
        menu: grouped
            .into_iter()
            .map(|(category, dishes)| {
                let views: Vec<DishView> = dishes.into_iter().map(|d| DishView::new(d, &assets)).collect();
                (category, views)
            })
            .collect(),
    }))
}

#[utoipa::path(
    tag = "Menu",
    request_body = NewDishReq,
    responses(
        (status = 201, description = "Dish added to the owner's menu", body = DishResp),
        (status = 400, description = "Missing fields or negative price", body = ErrorResponse),
        (status = 403, description = "Token does not belong to a restaurant owner", body = ErrorResponse),
        (status = 404, description = "Owner has no restaurant", body = ErrorResponse)
    ),
    summary = "Add a dish to the logged-in owner's menu"
)]
#[post("")]
pub(super) async fn add_dish(
    menu_ops: web::Data<MenuOperations>,
    assets: web::Data<AssetConfig>,
    owner: OwnerIdentity,
    req_data: web::Json<NewDishReq>,
) -> Result<HttpResponse, ApiError> {
    let details = req_data.into_inner().into_details().map_err(ApiError::Validation)?;
    let owner_id = owner.account_id();

    let ops = menu_ops.clone();
    match web::block(move || ops.add_dish(owner_id, details)).await? {
        Ok(dish) => {
            debug!("add_dish: owner {} added dish {}", owner_id, dish.dish_id);
            Ok(HttpResponse::Created().json(DishResp {
                status: "ok".to_string(),
                data: DishView::new(dish, &assets),
            }))
        }
        Err(e) => {
            error!("add_dish: failed for owner {}: {}", owner_id, e);
            Err(e.into())
        }
    }
}
