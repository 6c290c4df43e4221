use crate::db::admin::restaurant::find_by_owner;
use crate::db::errors::RepositoryError;
use crate::db::schema::{dishes, restaurants};
use crate::db::{DbConnection, DbPool};
use crate::models::admin::{Dish, NewDish, Restaurant};
use diesel::prelude::*;
use diesel::result::Error;
use log::{debug, error};
use std::collections::BTreeMap;

/// Dish fields supplied by an owner, validated by the caller.
#[derive(Debug, Clone)]
pub struct DishDetails {
    pub dish_name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: Option<String>,
}

#[derive(Clone)]
pub struct MenuOperations {
    pool: DbPool,
}

impl MenuOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Adds a dish to the menu of the restaurant owned by `owner_id`.
    pub fn add_dish(&self, owner_id: i32, details: DishDetails) -> Result<Dish, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("add_dish: failed to acquire DB connection: {}", e);
            e
        })?;

        if !details.price.is_finite() || details.price < 0.0 {
            return Err(RepositoryError::ValidationError(format!(
                "price must be a non-negative number, got {}",
                details.price
            )));
        }

        let restaurant = find_by_owner(conn.connection(), owner_id)?;
        let new_dish = NewDish {
            restaurant_id: restaurant.restaurant_id,
            dish_name: details.dish_name,
            description: details.description,
            price: details.price,
            category: details.category,
            image: details.image,
        };

        let dish = diesel::insert_into(dishes::table)
            .values(&new_dish)
            .returning(Dish::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "add_dish: error inserting dish '{}' for restaurant {}: {}",
                    new_dish.dish_name, restaurant.restaurant_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        debug!(
            "add_dish: dish {} added to restaurant {}",
            dish.dish_id, restaurant.restaurant_id
        );
        Ok(dish)
    }

    /// The restaurant and its dishes in insertion order.
    pub fn get_menu(&self, search_restaurant_id: i32) -> Result<(Restaurant, Vec<Dish>), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_menu: failed to acquire DB connection for restaurant {}: {}",
                search_restaurant_id, e
            );
            e
        })?;

        let restaurant = restaurants::table
            .find(search_restaurant_id)
            .select(Restaurant::as_select())
            .first(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => {
                    RepositoryError::NotFound(format!("restaurant {search_restaurant_id}"))
                }
                other => {
                    error!(
                        "get_menu: error fetching restaurant {}: {}",
                        search_restaurant_id, other
                    );
                    RepositoryError::DatabaseError(other)
                }
            })?;

        let menu = Dish::belonging_to(&restaurant)
            .order(dishes::dish_id.asc())
            .select(Dish::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!(
                    "get_menu: error loading dishes for restaurant {}: {}",
                    search_restaurant_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        Ok((restaurant, menu))
    }

    /// Same as `get_menu`, with dishes grouped by category name.
    pub fn get_categorized_menu(
        &self,
        search_restaurant_id: i32,
    ) -> Result<(Restaurant, BTreeMap<String, Vec<Dish>>), RepositoryError> {
        let (restaurant, menu) = self.get_menu(search_restaurant_id)?;
        let mut grouped: BTreeMap<String, Vec<Dish>> = BTreeMap::new();
        for dish in menu {
            grouped.entry(dish.category.clone()).or_default().push(dish);
        }
        Ok((restaurant, grouped))
    }
}
