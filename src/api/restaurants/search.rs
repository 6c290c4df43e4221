use crate::api::errors::{ApiError, ErrorResponse};
use crate::config::AssetConfig;
use crate::db::SearchOperations;
use crate::enums::admin::{RestaurantListResp, RestaurantView, SearchQuery};
use actix_web::{get, web, HttpResponse};

#[utoipa::path(
    tag = "Restaurants",
    params(SearchQuery),
    responses(
        (status = 200, description = "Verified restaurants matching the query", body = RestaurantListResp),
        (status = 400, description = "Empty query", body = ErrorResponse)
    ),
    summary = "Search restaurants by name, sector or locality"
)]
#[get("/search")]
pub(super) async fn search_restaurants(
    search_ops: web::Data<SearchOperations>,
    assets: web::Data<AssetConfig>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let search_query = query.into_inner().query.unwrap_or_default();

    let ops = search_ops.clone();
    let q = search_query.clone();
    match web::block(move || ops.search_restaurants(&q)).await? {
        Ok(found) => {
            debug!(
                "search_restaurants: {} results for '{}'",
                found.len(),
                search_query
            );
            Ok(HttpResponse::Ok().json(RestaurantListResp {
                status: "ok".to_string(),
                data: found
                    .into_iter()
                    .map(|r| RestaurantView::new(r, &assets))
                    .collect(),
            }))
        }
        Err(e) => {
            error!("search_restaurants: query '{}' failed: {}", search_query, e);
            Err(e.into())
        }
    }
}
