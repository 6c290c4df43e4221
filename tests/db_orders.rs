mod common;

use diesel::prelude::*;
use foodcart::db::{
    AccountOperations, DbConnection, MenuOperations, DishDetails, OrderLine, OrderOperations,
    OrderRequest, RepositoryError, SearchOperations,
};
use foodcart::models::common::OrderStatus;

fn pizza_order(restaurant_id: i32) -> OrderRequest {
    OrderRequest {
        customer_name: "Casey".to_string(),
        items: vec![OrderLine {
            name: "Pizza".to_string(),
            quantity: 2,
            price: 10.0,
        }],
        total: 20.0,
        restaurant_id,
    }
}

fn order_count(ctx: &common::TestCtx) -> i64 {
    let mut conn = DbConnection::new(&ctx.pool).expect("db connection");
    foodcart::db::schema::orders::table
        .count()
        .get_result(conn.connection())
        .expect("count orders")
}

#[actix_rt::test]
async fn created_order_round_trips() {
    let Some(ctx) = common::setup_pool() else { return; };
    let ops = OrderOperations::new(ctx.pool.clone());

    let created = ops
        .create_order(ctx.fixtures.customer_id, pizza_order(ctx.fixtures.restaurant_id))
        .expect("create order");
    let fetched = ops
        .get_order_for_placer(created.order.order_id, ctx.fixtures.customer_id)
        .expect("fetch order");

    assert_eq!(fetched, created);
    assert_eq!(fetched.order.status, OrderStatus::Pending);
    assert_eq!(fetched.order.total, 20.0);
    assert_eq!(fetched.items.len(), 1);
    assert_eq!(fetched.items[0].name, "Pizza");
    assert_eq!(fetched.items[0].quantity, 2);
    assert_eq!(fetched.items[0].price, 10.0);
}

#[actix_rt::test]
async fn create_order_rejects_bad_input_without_writing() {
    let Some(ctx) = common::setup_pool() else { return; };
    let ops = OrderOperations::new(ctx.pool.clone());

    let mut wrong_total = pizza_order(ctx.fixtures.restaurant_id);
    wrong_total.total = 15.0;
    assert!(matches!(
        ops.create_order(ctx.fixtures.customer_id, wrong_total),
        Err(RepositoryError::ValidationError(_))
    ));
    assert!(matches!(
        ops.create_order(ctx.fixtures.customer_id, pizza_order(4242)),
        Err(RepositoryError::NotFound(_))
    ));
    assert!(matches!(
        ops.create_order(
            ctx.fixtures.customer_id,
            pizza_order(ctx.fixtures.pending_restaurant_id)
        ),
        Err(RepositoryError::ValidationError(_))
    ));
    assert_eq!(order_count(&ctx), 0);
}

#[actix_rt::test]
async fn only_the_placer_can_read_an_order() {
    let Some(ctx) = common::setup_pool() else { return; };
    let ops = OrderOperations::new(ctx.pool.clone());
    let created = ops
        .create_order(ctx.fixtures.customer_id, pizza_order(ctx.fixtures.restaurant_id))
        .expect("create order");

    assert!(matches!(
        ops.get_order_for_placer(created.order.order_id, ctx.fixtures.owner_id),
        Err(RepositoryError::Forbidden(_))
    ));
    assert!(matches!(
        ops.get_order_for_placer(9999, ctx.fixtures.customer_id),
        Err(RepositoryError::NotFound(_))
    ));
}

#[actix_rt::test]
async fn owner_listing_is_newest_first() {
    let Some(ctx) = common::setup_pool() else { return; };
    let ops = OrderOperations::new(ctx.pool.clone());

    let mut ids = Vec::new();
    for _ in 0..3 {
        let created = ops
            .create_order(ctx.fixtures.customer_id, pizza_order(ctx.fixtures.restaurant_id))
            .expect("create order");
        ids.push(created.order.order_id);
    }

    let listed = ops.list_for_owner(ctx.fixtures.owner_id).expect("list");
    let listed_ids: Vec<i32> = listed.iter().map(|o| o.order.order_id).collect();
    ids.reverse();
    assert_eq!(listed_ids, ids);
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].order.created_at >= pair[1].order.created_at));
    assert!(listed.iter().all(|o| o.items.len() == 1));

    assert!(matches!(
        ops.list_for_owner(ctx.fixtures.customer_id),
        Err(RepositoryError::NotFound(_))
    ));
}

#[actix_rt::test]
async fn set_status_follows_the_transition_table() {
    let Some(ctx) = common::setup_pool() else { return; };
    let ops = OrderOperations::new(ctx.pool.clone());
    let order_id = ops
        .create_order(ctx.fixtures.customer_id, pizza_order(ctx.fixtures.restaurant_id))
        .expect("create order")
        .order
        .order_id;

    let accepted = ops
        .set_status(order_id, OrderStatus::Accepted, ctx.fixtures.owner_id)
        .expect("accept");
    assert_eq!(accepted.order.status, OrderStatus::Accepted);

    assert!(matches!(
        ops.set_status(order_id, OrderStatus::Pending, ctx.fixtures.owner_id),
        Err(RepositoryError::InvalidTransition {
            from: OrderStatus::Accepted,
            to: OrderStatus::Pending
        })
    ));

    ops.set_status(order_id, OrderStatus::Shipped, ctx.fixtures.owner_id)
        .expect("ship");
    assert!(matches!(
        ops.set_status(order_id, OrderStatus::Declined, ctx.fixtures.owner_id),
        Err(RepositoryError::InvalidTransition { .. })
    ));
    assert_eq!(
        ops.get_order(order_id).expect("fetch").order.status,
        OrderStatus::Shipped
    );
}

#[actix_rt::test]
async fn set_status_requires_the_owning_restaurant() {
    let Some(ctx) = common::setup_pool() else { return; };
    let ops = OrderOperations::new(ctx.pool.clone());
    let order_id = ops
        .create_order(ctx.fixtures.customer_id, pizza_order(ctx.fixtures.restaurant_id))
        .expect("create order")
        .order
        .order_id;

    assert!(matches!(
        ops.set_status(order_id, OrderStatus::Accepted, ctx.fixtures.pending_owner_id),
        Err(RepositoryError::Forbidden(_))
    ));
    assert!(matches!(
        ops.set_status(9999, OrderStatus::Accepted, ctx.fixtures.owner_id),
        Err(RepositoryError::NotFound(_))
    ));
    assert_eq!(
        ops.get_order(order_id).expect("fetch").order.status,
        OrderStatus::Pending
    );
}

#[actix_rt::test]
async fn concurrent_status_updates_have_one_winner() {
    let Some(ctx) = common::setup_pool() else { return; };
    let ops = OrderOperations::new(ctx.pool.clone());
    let order_id = ops
        .create_order(ctx.fixtures.customer_id, pizza_order(ctx.fixtures.restaurant_id))
        .expect("create order")
        .order
        .order_id;
    let owner_id = ctx.fixtures.owner_id;

    // Shipped and Declined are terminal, so only one writer may ever land
    let results: Vec<_> = std::thread::scope(|scope| {
        let writers: Vec<_> = (0..4)
            .map(|i| {
                let ops = ops.clone();
                let target = if i % 2 == 0 {
                    OrderStatus::Shipped
                } else {
                    OrderStatus::Declined
                };
                scope.spawn(move || ops.set_status(order_id, target, owner_id))
            })
            .collect();
        writers
            .into_iter()
            .map(|writer| writer.join().expect("writer thread"))
            .collect()
    });

    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    for lost in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(matches!(
            lost,
            RepositoryError::StaleStatus(id) if *id == order_id
        ) || matches!(lost, RepositoryError::InvalidTransition { .. }));
    }
    assert_eq!(
        ops.get_order(order_id).expect("fetch").order.status,
        winners[0].order.status
    );
}

#[actix_rt::test]
async fn history_has_finished_orders_with_phone() {
    let Some(ctx) = common::setup_pool() else { return; };
    let ops = OrderOperations::new(ctx.pool.clone());
    let accounts = AccountOperations::new(ctx.pool.clone());

    let create = || {
        ops.create_order(ctx.fixtures.customer_id, pizza_order(ctx.fixtures.restaurant_id))
            .expect("create order")
            .order
            .order_id
    };
    let shipped = create();
    let declined = create();
    let _still_pending = create();
    ops.set_status(shipped, OrderStatus::Shipped, ctx.fixtures.owner_id)
        .expect("ship");
    ops.set_status(declined, OrderStatus::Declined, ctx.fixtures.owner_id)
        .expect("decline");

    let history = ops.history_for_owner(ctx.fixtures.owner_id).expect("history");
    let ids: Vec<i32> = history.iter().map(|h| h.order.order.order_id).collect();
    assert_eq!(ids, vec![declined, shipped]);
    assert!(history
        .iter()
        .all(|h| h.phone.as_deref() == Some("9000000001")));

    accounts
        .delete_account(ctx.fixtures.customer_id)
        .expect("delete customer");
    let history = ops.history_for_owner(ctx.fixtures.owner_id).expect("history");
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|h| h.phone.is_none()));
    assert!(history.iter().all(|h| h.order.order.placer_id.is_none()));
}

#[actix_rt::test]
async fn dishes_and_search() {
    let Some(ctx) = common::setup_pool() else { return; };
    let menu = MenuOperations::new(ctx.pool.clone());
    let search = SearchOperations::new(ctx.pool.clone());

    menu.add_dish(
        ctx.fixtures.owner_id,
        DishDetails {
            dish_name: "Gulab Jamun".to_string(),
            description: "Two pieces".to_string(),
            price: 60.0,
            category: "Desserts".to_string(),
            image: None,
        },
    )
    .expect("add dish");
    let (restaurant, grouped) = menu
        .get_categorized_menu(ctx.fixtures.restaurant_id)
        .expect("menu");
    assert_eq!(restaurant.restaurant_name, "Spice Route");
    assert_eq!(
        grouped.keys().cloned().collect::<Vec<_>>(),
        vec!["Desserts".to_string(), "Starters".to_string()]
    );

    let negative = DishDetails {
        dish_name: "Refund".to_string(),
        description: String::new(),
        price: -1.0,
        category: "Misc".to_string(),
        image: None,
    };
    assert!(matches!(
        menu.add_dish(ctx.fixtures.owner_id, negative.clone()),
        Err(RepositoryError::ValidationError(_))
    ));
    assert!(matches!(
        menu.add_dish(ctx.fixtures.customer_id, DishDetails { price: 5.0, ..negative }),
        Err(RepositoryError::NotFound(_))
    ));

    // pending restaurants never show up in search
    assert_eq!(search.search_restaurants("chandigarh").expect("search").len(), 1);
    assert_eq!(search.search_restaurants("spice").expect("search").len(), 1);
    assert!(search.search_restaurants("100%").expect("search").is_empty());
    assert!(matches!(
        search.search_restaurants("   "),
        Err(RepositoryError::ValidationError(_))
    ));
}
