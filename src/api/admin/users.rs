use crate::api::errors::{ApiError, ErrorResponse};
use crate::auth::AdminIdentity;
use crate::db::AccountOperations;
use crate::enums::admin::{total_pages, AccountSummary, PageQuery, UsersPageResp, USERS_PER_PAGE};
use crate::enums::common::MessageResp;
use actix_web::{delete, get, web, HttpResponse};

#[utoipa::path(
    tag = "Admin",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of accounts", body = UsersPageResp),
        (status = 401, description = "Missing or invalid admin token", body = ErrorResponse),
        (status = 403, description = "Token is not an admin token", body = ErrorResponse)
    ),
    summary = "List accounts, 10 per page"
)]
#[get("/users")]
pub(super) async fn list_users(
    account_ops: web::Data<AccountOperations>,
    _admin: AdminIdentity,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let ops = account_ops.clone();
    let (accounts, total) = web::block(move || ops.list_accounts(page, USERS_PER_PAGE)).await??;

    Ok(HttpResponse::Ok().json(UsersPageResp {
        status: "ok".to_string(),
        users: accounts.into_iter().map(AccountSummary::from).collect(),
        total_pages: total_pages(total, USERS_PER_PAGE),
        current_page: page,
    }))
}

#[utoipa::path(
    tag = "Admin",
    params(("id" = i32, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResp),
        (status = 404, description = "Unknown account", body = ErrorResponse)
    ),
    summary = "Delete an account"
)]
#[delete("/users/{id}")]
pub(super) async fn delete_user(
    account_ops: web::Data<AccountOperations>,
    admin: AdminIdentity,
    path: web::Path<(i32,)>,
) -> Result<HttpResponse, ApiError> {
    let target_id = path.into_inner().0;
    let ops = account_ops.clone();
    match web::block(move || ops.delete_account(target_id)).await? {
        Ok(account) => {
            info!(
                "delete_user: admin {} deleted account {} ({})",
                admin.0.account_id, target_id, account.role
            );
            Ok(HttpResponse::Ok().json(MessageResp::ok("User deleted successfully")))
        }
        Err(e) => {
            error!("delete_user: failed to delete account {}: {}", target_id, e);
            Err(e.into())
        }
    }
}
