use crate::auth::password::hash_password;
use crate::auth::{issue_token, Identity, JwtConfig};
use crate::config::AssetConfig;
use crate::db::schema::{accounts, dishes, restaurants};
use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, DbPool, RepositoryError};
use crate::models::admin::{NewDish, NewRestaurant};
use crate::models::user::{NewAccount, Role};
use chrono::NaiveDate;
use diesel::prelude::*;

// Fixture strategy:
// - Every fixture account shares FIXTURE_PASSWORD.
// - One verified restaurant with a dish, one pending restaurant.
// - Image keys stay empty so URLs fall back to the defaults below.
pub const FIXTURE_PASSWORD: &str = "fixture-pass-123";
pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        issuer: "foodcart-auth".to_string(),
        audience: "foodcart".to_string(),
        expiry_secs: 3600,
        leeway_secs: 0,
        cookie_name: "token".to_string(),
        cookie_secure: false,
    }
}

pub fn test_asset_config() -> AssetConfig {
    AssetConfig {
        base_url: "http://assets.test/uploads".to_string(),
        default_restaurant_image: "http://assets.test/default-restaurant.png".to_string(),
    }
}

/// Signed token for an arbitrary identity, ready for an `Authorization` header.
pub fn bearer_for(cfg: &JwtConfig, account_id: i32, name: &str, role: Role) -> String {
    let identity = Identity {
        account_id,
        name: name.to_string(),
        role,
    };
    let token = issue_token(&identity, cfg).expect("issue test token");
    format!("Bearer {token}")
}

pub fn build_test_pool(database_url: &str) -> DbPool {
    let pool = establish_connection_pool(database_url, 5).expect("Unable to build pool");
    run_db_migrations(&pool).expect("Unable to run migrations");
    pool
}

pub fn reset_db(pool: &DbPool) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query(
        "TRUNCATE TABLE order_items, orders, dishes, restaurants, accounts RESTART IDENTITY CASCADE",
    )
    .execute(conn.connection())
    .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

pub struct TestFixtures {
    pub customer_id: i32,
    pub owner_id: i32,
    pub restaurant_id: i32,
    pub dish_id: i32,
    pub pending_owner_id: i32,
    pub pending_restaurant_id: i32,
    pub admin_id: i32,
}

pub fn seed_basic_fixtures(pool: &DbPool) -> Result<TestFixtures, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    let customer_id = insert_account(
        conn.connection(),
        "Casey Customer",
        "customer@example.com",
        "9000000001",
        Role::Customer,
    )?;
    let owner_id = insert_account(
        conn.connection(),
        "Olive Owner",
        "owner@example.com",
        "9000000002",
        Role::RestaurantOwner,
    )?;
    let restaurant_id = insert_restaurant(conn.connection(), owner_id, "Spice Route", "owner@example.com", true)?;
    let dish_id = insert_dish(conn.connection(), restaurant_id, "Paneer Tikka", 180.0, "Starters")?;

    let pending_owner_id = insert_account(
        conn.connection(),
        "Pat Pending",
        "pending@example.com",
        "9000000003",
        Role::RestaurantOwner,
    )?;
    let pending_restaurant_id = insert_restaurant(
        conn.connection(),
        pending_owner_id,
        "Noodle Nook",
        "pending@example.com",
        false,
    )?;
    let admin_id = insert_account(
        conn.connection(),
        "Ada Admin",
        "admin@example.com",
        "9000000004",
        Role::Admin,
    )?;

    Ok(TestFixtures {
        customer_id,
        owner_id,
        restaurant_id,
        dish_id,
        pending_owner_id,
        pending_restaurant_id,
        admin_id,
    })
}

pub fn insert_account(
    conn: &mut PgConnection,
    name_val: &str,
    email_val: &str,
    phone_val: &str,
    role_val: Role,
) -> Result<i32, RepositoryError> {
    let new_account = NewAccount {
        name: name_val.to_string(),
        email: email_val.to_string(),
        password_hash: hash_password(FIXTURE_PASSWORD)?,
        phone: phone_val.to_string(),
        dob: NaiveDate::from_ymd_opt(1995, 6, 15).unwrap_or_default(),
        role: role_val,
    };

    diesel::insert_into(accounts::table)
        .values(&new_account)
        .returning(accounts::account_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_restaurant(
    conn: &mut PgConnection,
    owner: i32,
    name_val: &str,
    email_val: &str,
    verified: bool,
) -> Result<i32, RepositoryError> {
    let new_restaurant = NewRestaurant {
        owner_id: owner,
        restaurant_name: name_val.to_string(),
        email: email_val.to_string(),
        sector: "Sector 17".to_string(),
        locality: "Chandigarh".to_string(),
        building: "Plaza 4".to_string(),
        floor: "1".to_string(),
        food_type: "Indian".to_string(),
        restaurant_image: None,
    };

    let id = diesel::insert_into(restaurants::table)
        .values(&new_restaurant)
        .returning(restaurants::restaurant_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)?;
    if verified {
        diesel::update(restaurants::table.find(id))
            .set(restaurants::is_verified.eq(true))
            .execute(conn)
            .map_err(RepositoryError::DatabaseError)?;
    }
    Ok(id)
}

pub fn insert_dish(
    conn: &mut PgConnection,
    restaurant: i32,
    name_val: &str,
    price_val: f64,
    category_val: &str,
) -> Result<i32, RepositoryError> {
    let new_dish = NewDish {
        restaurant_id: restaurant,
        dish_name: name_val.to_string(),
        description: format!("House {name_val}"),
        price: price_val,
        category: category_val.to_string(),
        image: None,
    };

    diesel::insert_into(dishes::table)
        .values(&new_dish)
        .returning(dishes::dish_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}
