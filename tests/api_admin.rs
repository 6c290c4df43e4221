mod common;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

#[actix_rt::test]
async fn admin_routes_reject_non_admins() {
    let Some(ctx) = common::setup_pool() else { return; };
    let app = common::init_app(ctx.state()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/restaurants/pending")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/admin/restaurants/pending")
        .insert_header(ctx.owner_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(common::read_json(resp).await["code"], "FORBIDDEN");

    // admin routes only read the Authorization header
    let (_, bearer) = ctx.admin_auth();
    let token = bearer.trim_start_matches("Bearer ").to_string();
    let req = test::TestRequest::get()
        .uri("/api/admin/restaurants/pending")
        .cookie(Cookie::new("token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn approve_flow_unlocks_owner_login() {
    let Some(ctx) = common::setup_pool() else { return; };
    let app = common::init_app(ctx.state()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/restaurants/pending")
        .insert_header(ctx.admin_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let pending = common::read_json(resp).await;
    assert_eq!(pending["data"][0]["restaurantId"], ctx.fixtures.pending_restaurant_id);
    assert_eq!(pending["data"][0]["owner"]["email"], "pending@example.com");
    assert_eq!(pending["data"][0]["owner"]["phone"], "9000000003");

    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/admin/restaurants/approve/{}",
            ctx.fixtures.pending_restaurant_id
        ))
        .insert_header(ctx.admin_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(common::read_json(resp).await["data"]["isVerified"], true);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "pending@example.com", "password": foodcart::test_utils::FIXTURE_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/verify/{}", ctx.fixtures.pending_restaurant_id))
        .insert_header(ctx.admin_auth())
        .set_json(json!({ "isVerified": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/admin/restaurants/verified")
        .insert_header(ctx.admin_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let verified = common::read_json(resp).await;
    assert_eq!(verified["data"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::put()
        .uri("/api/admin/verify/9999")
        .insert_header(ctx.admin_auth())
        .set_json(json!({ "isVerified": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/verify/{}", ctx.fixtures.restaurant_id))
        .insert_header(ctx.admin_auth())
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn reject_and_delete_restaurants() {
    let Some(ctx) = common::setup_pool() else { return; };
    let app = common::init_app(ctx.state()).await;

    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/admin/restaurants/reject/{}",
            ctx.fixtures.pending_restaurant_id
        ))
        .insert_header(ctx.admin_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/restaurants/{}", ctx.fixtures.restaurant_id))
        .insert_header(ctx.admin_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/restaurants/{}", ctx.fixtures.restaurant_id))
        .insert_header(ctx.admin_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/restaurants").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(common::read_json(resp).await["data"], json!([]));
}

#[actix_rt::test]
async fn users_are_paged_and_deletable() {
    let Some(ctx) = common::setup_pool() else { return; };
    let app = common::init_app(ctx.state()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/users?page=1")
        .insert_header(ctx.admin_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = common::read_json(resp).await;
    assert_eq!(page["totalPages"], 1);
    assert_eq!(page["currentPage"], 1);
    assert_eq!(page["users"].as_array().map(Vec::len), Some(4));
    assert!(page["users"][0].get("passwordHash").is_none());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/users/{}", ctx.fixtures.customer_id))
        .insert_header(ctx.admin_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(ctx.admin_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(common::read_json(resp).await["users"].as_array().map(Vec::len), Some(3));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/users/{}", ctx.fixtures.customer_id))
        .insert_header(ctx.admin_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn huge_page_number_is_a_validation_error() {
    let Some(ctx) = common::setup_pool() else { return; };
    let app = common::init_app(ctx.state()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/users?page=9223372036854775807")
        .insert_header(ctx.admin_auth())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::read_json(resp).await["code"], "VALIDATION_ERROR");
}
