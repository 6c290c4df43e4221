use crate::api::errors::{ApiError, ErrorResponse};
use crate::auth::{CustomerIdentity, IdentityExtractor, OwnerIdentity};
use crate::db::{AccountOperations, OrderOperations};
use crate::enums::common::{
    CreateOrderReq, OrderHistoryResp, OrderHistoryView, OrderListResp, OrderResp, OrderView,
    UpdateStatusReq,
};
use actix_web::{get, post, put, web, HttpResponse};

#[utoipa::path(
    tag = "Orders",
    request_body = CreateOrderReq,
    responses(
        (status = 201, description = "Order placed with status Pending", body = OrderResp),
        (status = 400, description = "Missing or inconsistent fields", body = ErrorResponse),
        (status = 401, description = "Not logged in or account deleted", body = ErrorResponse),
        (status = 403, description = "Only customers can place orders", body = ErrorResponse),
        (status = 404, description = "Unknown restaurant", body = ErrorResponse)
    ),
    summary = "Place an order at a restaurant"
)]
#[post("")]
pub(super) async fn create_order(
    order_ops: web::Data<OrderOperations>,
    account_ops: web::Data<AccountOperations>,
    customer: CustomerIdentity,
    req_data: web::Json<CreateOrderReq>,
) -> Result<HttpResponse, ApiError> {
    let request = req_data.into_inner().into_request().map_err(ApiError::Validation)?;
    let CustomerIdentity(identity) = customer;
    let placer = identity.account_id;

    let orders = order_ops.clone();
    let accounts = account_ops.clone();
    let result = web::block(move || {
        accounts.resolve_identity(&identity)?;
        orders.create_order(placer, request)
    })
    .await?;
    match result {
        Ok(order) => {
            debug!(
                "create_order: account {} placed order {}",
                placer, order.order.order_id
            );
            Ok(HttpResponse::Created().json(OrderResp {
                status: "ok".to_string(),
                message: Some("Order placed successfully".to_string()),
                data: OrderView::from(order),
            }))
        }
        Err(e) => {
            error!("create_order: failed for account {}: {}", placer, e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    tag = "Orders",
    responses(
        (status = 200, description = "Orders of the owner's restaurant, newest first", body = OrderListResp),
        (status = 403, description = "Token does not belong to a restaurant owner", body = ErrorResponse),
        (status = 404, description = "Owner has no restaurant", body = ErrorResponse)
    ),
    summary = "List orders received by the logged-in owner's restaurant"
)]
#[get("")]
pub(super) async fn list_restaurant_orders(
    order_ops: web::Data<OrderOperations>,
    owner: OwnerIdentity,
) -> Result<HttpResponse, ApiError> {
    let owner_id = owner.account_id();
    let ops = order_ops.clone();
    let found = web::block(move || ops.list_for_owner(owner_id)).await??;
    debug!(
        "list_restaurant_orders: {} orders for owner {}",
        found.len(),
        owner_id
    );

    Ok(HttpResponse::Ok().json(OrderListResp {
        status: "ok".to_string(),
        data: found.into_iter().map(OrderView::from).collect(),
    }))
}

#[utoipa::path(
    tag = "Orders",
    responses(
        (status = 200, description = "Shipped and declined orders with the customer's phone", body = OrderHistoryResp),
        (status = 403, description = "Token does not belong to a restaurant owner", body = ErrorResponse),
        (status = 404, description = "Owner has no restaurant", body = ErrorResponse)
    ),
    summary = "Order history of the logged-in owner's restaurant"
)]
#[get("/history")]
pub(super) async fn order_history(
    order_ops: web::Data<OrderOperations>,
    owner: OwnerIdentity,
) -> Result<HttpResponse, ApiError> {
    let owner_id = owner.account_id();
    let ops = order_ops.clone();
    let entries = web::block(move || ops.history_for_owner(owner_id)).await??;

    Ok(HttpResponse::Ok().json(OrderHistoryResp {
        status: "ok".to_string(),
        data: entries.into_iter().map(OrderHistoryView::from).collect(),
    }))
}

#[utoipa::path(
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = OrderResp),
        (status = 403, description = "Order was placed by another account", body = ErrorResponse),
        (status = 404, description = "Unknown order", body = ErrorResponse)
    ),
    summary = "Fetch one of your own orders"
)]
#[get("/{id}")]
pub(super) async fn get_order(
    order_ops: web::Data<OrderOperations>,
    requester: IdentityExtractor,
    path: web::Path<(i32,)>,
) -> Result<HttpResponse, ApiError> {
    let search_order_id = path.into_inner().0;
    let requester_id = requester.0.account_id;

    let ops = order_ops.clone();
    match web::block(move || ops.get_order_for_placer(search_order_id, requester_id)).await? {
        Ok(order) => Ok(HttpResponse::Ok().json(OrderResp {
            status: "ok".to_string(),
            message: None,
            data: OrderView::from(order),
        })),
        Err(e) => {
            debug!(
                "get_order: account {} cannot read order {}: {}",
                requester_id, search_order_id, e
            );
            Err(e.into())
        }
    }
}

#[utoipa::path(
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateStatusReq,
    responses(
        (status = 200, description = "Status updated", body = OrderResp),
        (status = 400, description = "Unknown status value", body = ErrorResponse),
        (status = 403, description = "Order belongs to another restaurant", body = ErrorResponse),
        (status = 404, description = "Unknown order", body = ErrorResponse),
        (status = 409, description = "Transition not allowed or lost a concurrent update", body = ErrorResponse)
    ),
    summary = "Move an order to a new status"
)]
#[put("/{id}")]
pub(super) async fn update_order_status(
    order_ops: web::Data<OrderOperations>,
    owner: OwnerIdentity,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateStatusReq>,
) -> Result<HttpResponse, ApiError> {
    let target_order_id = path.into_inner().0;
    let new_status = req_data.parse().map_err(ApiError::Validation)?;
    let owner_id = owner.account_id();

    let ops = order_ops.clone();
    match web::block(move || ops.set_status(target_order_id, new_status, owner_id)).await? {
        Ok(order) => Ok(HttpResponse::Ok().json(OrderResp {
            status: "ok".to_string(),
            message: Some(format!("Order status updated to {new_status}")),
            data: OrderView::from(order),
        })),
        Err(e) => {
            error!(
                "update_order_status: owner {} could not set order {} to {}: {}",
                owner_id, target_order_id, new_status, e
            );
            Err(e.into())
        }
    }
}
