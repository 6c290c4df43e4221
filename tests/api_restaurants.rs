mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use foodcart::test_utils::FIXTURE_PASSWORD;
use serde_json::json;

#[actix_rt::test]
async fn public_listing_hides_unverified_restaurants() {
    let Some(ctx) = common::setup_pool() else { return; };
    let app = common::init_app(ctx.state()).await;

    let req = test::TestRequest::get().uri("/api/restaurants").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = common::read_json(resp).await;
    let data = json["data"].as_array().expect("array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["restaurantName"], "Spice Route");
    assert_eq!(
        data[0]["restaurantImage"],
        "http://assets.test/default-restaurant.png"
    );
}

#[actix_rt::test]
async fn search_and_menus() {
    let Some(ctx) = common::setup_pool() else { return; };
    let app = common::init_app(ctx.state()).await;

    let req = test::TestRequest::get()
        .uri("/api/restaurants/search?query=sector%2017")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(common::read_json(resp).await["data"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri("/api/restaurants/search?query=")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/restaurants/{}/menu", ctx.fixtures.restaurant_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let menu = common::read_json(resp).await;
    assert_eq!(menu["restaurantName"], "Spice Route");
    assert_eq!(menu["menu"][0]["dishId"], ctx.fixtures.dish_id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/restaurants/menu/{}", ctx.fixtures.restaurant_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let grouped = common::read_json(resp).await;
    assert_eq!(grouped["menu"]["Starters"][0]["dishName"], "Paneer Tikka");

    let req = test::TestRequest::get().uri("/api/restaurants/404/menu").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::read_json(resp).await["code"], "NOT_FOUND");

    let req = test::TestRequest::get()
        .uri(&format!("/api/restaurants/user/{}", ctx.fixtures.owner_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        common::read_json(resp).await["data"]["restaurantId"],
        ctx.fixtures.restaurant_id
    );
}

#[actix_rt::test]
async fn owner_registers_restaurant_and_adds_dish() {
    let Some(ctx) = common::setup_pool() else { return; };
    let app = common::init_app(ctx.state()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Wen",
            "email": "wen@example.com",
            "password": "wok-and-roll",
            "phone": "9333333333",
            "dob": "1990-09-09T00:00:00Z",
            "role": "restaurant"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let restaurant = json!({
        "email": "wen@example.com",
        "password": "wok-and-roll",
        "restaurantName": "Wok Express",
        "sector": "Sector 35",
        "locality": "Chandigarh",
        "building": "SCO 12",
        "floor": "2",
        "foodType": "Chinese",
        "restaurantImage": "restaurants/wok.png"
    });
    let req = test::TestRequest::post()
        .uri("/api/restaurants/register")
        .set_json(&restaurant)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = common::read_json(resp).await;
    assert_eq!(created["data"]["isVerified"], false);
    assert_eq!(
        created["data"]["restaurantImage"],
        "http://assets.test/uploads/restaurants/wok.png"
    );

    // unverified owners cannot log in yet
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "wen@example.com", "password": "wok-and-roll" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/restaurants/register")
        .set_json(json!({
            "email": "customer@example.com",
            "password": FIXTURE_PASSWORD,
            "restaurantName": "Sneaky",
            "sector": "1", "locality": "2", "building": "3", "floor": "4", "foodType": "5"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/restaurants/dishes")
        .insert_header(ctx.owner_auth())
        .set_json(json!({
            "dishName": "Mango Lassi",
            "description": "Sweet",
            "price": 70.5,
            "category": "Drinks"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let dish = common::read_json(resp).await;
    assert_eq!(dish["data"]["restaurantId"], ctx.fixtures.restaurant_id);
    assert_eq!(dish["data"]["price"], 70.5);

    let req = test::TestRequest::post()
        .uri("/api/restaurants/dishes")
        .insert_header(ctx.customer_auth())
        .set_json(json!({ "dishName": "x", "price": 1, "category": "y" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/restaurants/dishes")
        .insert_header(ctx.owner_auth())
        .set_json(json!({ "dishName": "x", "price": -3, "category": "y" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
