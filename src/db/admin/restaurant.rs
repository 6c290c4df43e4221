use crate::auth::password::verify_password;
use crate::db::errors::RepositoryError;
use crate::db::schema::{accounts, restaurants};
use crate::db::users::account::normalize_email;
use crate::db::{DbConnection, DbPool};
use crate::models::admin::{NewRestaurant, Restaurant};
use crate::models::user::{Account, Role};
use diesel::prelude::*;
use diesel::result::Error;
use log::{debug, error, info};

/// Restaurant fields supplied at registration, validated by the caller.
#[derive(Debug, Clone)]
pub struct RestaurantDetails {
    pub restaurant_name: String,
    pub sector: String,
    pub locality: String,
    pub building: String,
    pub floor: String,
    pub food_type: String,
    pub restaurant_image: Option<String>,
}

/// Owner columns embedded in the admin review lists.
#[derive(Queryable, Debug, Clone)]
pub struct OwnerSummary {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Clone)]
pub struct RestaurantOperations {
    pool: DbPool,
}

impl RestaurantOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Creates an unverified restaurant for the owner whose credentials are
    /// given. The owner must be a `RestaurantOwner` without a restaurant.
    pub fn register_restaurant(
        &self,
        owner_email: &str,
        owner_password: &str,
        details: RestaurantDetails,
    ) -> Result<Restaurant, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("register_restaurant: failed to acquire DB connection: {}", e);
            e
        })?;
        let owner_email = normalize_email(owner_email);

        let owner = accounts::table
            .filter(accounts::email.eq(&owner_email))
            .select(Account::as_select())
            .first(conn.connection())
            .optional()
            .map_err(|e| {
                error!("register_restaurant: error fetching owner '{}': {}", owner_email, e);
                RepositoryError::DatabaseError(e)
            })?
            .ok_or(RepositoryError::InvalidCredentials)?;

        if !verify_password(owner_password, &owner.password_hash)? {
            return Err(RepositoryError::InvalidCredentials);
        }
        if owner.role != Role::RestaurantOwner {
            return Err(RepositoryError::Forbidden(format!(
                "account {} is not a restaurant owner",
                owner.account_id
            )));
        }

        let new_restaurant = NewRestaurant {
            owner_id: owner.account_id,
            restaurant_name: details.restaurant_name,
            email: owner.email.clone(),
            sector: details.sector,
            locality: details.locality,
            building: details.building,
            floor: details.floor,
            food_type: details.food_type,
            restaurant_image: details.restaurant_image,
        };

        let restaurant = diesel::insert_into(restaurants::table)
            .values(&new_restaurant)
            .returning(Restaurant::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "register_restaurant: error inserting restaurant for owner {}: {}",
                    owner.account_id, e
                );
                RepositoryError::from_insert(
                    e,
                    &format!("account {} already owns a restaurant", owner.account_id),
                )
            })?;
        info!(
            "register_restaurant: restaurant {} registered for owner {}",
            restaurant.restaurant_id, owner.account_id
        );
        Ok(restaurant)
    }

    pub fn get_restaurant(&self, search_restaurant_id: i32) -> Result<Restaurant, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_restaurant: failed to acquire DB connection for id {}: {}",
                search_restaurant_id, e
            );
            e
        })?;

        restaurants::table
            .find(search_restaurant_id)
            .select(Restaurant::as_select())
            .first(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => {
                    RepositoryError::NotFound(format!("restaurant {search_restaurant_id}"))
                }
                other => {
                    error!(
                        "get_restaurant: error fetching restaurant {}: {}",
                        search_restaurant_id, other
                    );
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    pub fn get_by_owner(&self, search_owner_id: i32) -> Result<Restaurant, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_by_owner: failed to acquire DB connection: {}", e);
            e
        })?;
        find_by_owner(conn.connection(), search_owner_id)
    }

    /// Verified restaurants, oldest first.
    pub fn list_verified(&self) -> Result<Vec<Restaurant>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_verified: failed to acquire DB connection: {}", e);
            e
        })?;

        restaurants::table
            .filter(restaurants::is_verified.eq(true))
            .order(restaurants::restaurant_id.asc())
            .select(Restaurant::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!("list_verified: error loading restaurants: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    /// Restaurants with the given verification flag, joined with their owner.
    pub fn list_by_verification(
        &self,
        verified: bool,
    ) -> Result<Vec<(Restaurant, OwnerSummary)>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_by_verification: failed to acquire DB connection: {}", e);
            e
        })?;

        restaurants::table
            .inner_join(accounts::table)
            .filter(restaurants::is_verified.eq(verified))
            .order(restaurants::restaurant_id.asc())
            .select((
                Restaurant::as_select(),
                (accounts::name, accounts::phone, accounts::email),
            ))
            .load::<(Restaurant, OwnerSummary)>(conn.connection())
            .map_err(|e| {
                error!(
                    "list_by_verification: error loading restaurants (verified = {}): {}",
                    verified, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn set_verified(&self, target_id: i32, verified: bool) -> Result<Restaurant, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("set_verified: failed to acquire DB connection: {}", e);
            e
        })?;

        let restaurant = diesel::update(restaurants::table.find(target_id))
            .set(restaurants::is_verified.eq(verified))
            .returning(Restaurant::as_returning())
            .get_result(conn.connection())
            .optional()
            .map_err(|e| {
                error!("set_verified: error updating restaurant {}: {}", target_id, e);
                RepositoryError::DatabaseError(e)
            })?
            .ok_or_else(|| RepositoryError::NotFound(format!("restaurant {target_id}")))?;
        debug!("set_verified: restaurant {} is_verified = {}", target_id, verified);
        Ok(restaurant)
    }

    pub fn delete_restaurant(&self, target_id: i32) -> Result<Restaurant, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("delete_restaurant: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::delete(restaurants::table.find(target_id))
            .returning(Restaurant::as_returning())
            .get_result(conn.connection())
            .optional()
            .map_err(|e| {
                error!("delete_restaurant: error deleting restaurant {}: {}", target_id, e);
                RepositoryError::DatabaseError(e)
            })?
            .ok_or_else(|| RepositoryError::NotFound(format!("restaurant {target_id}")))
    }
}

pub(crate) fn find_by_owner(
    conn: &mut PgConnection,
    search_owner_id: i32,
) -> Result<Restaurant, RepositoryError> {
    restaurants::table
        .filter(restaurants::owner_id.eq(search_owner_id))
        .select(Restaurant::as_select())
        .first(conn)
        .map_err(|e| match e {
            Error::NotFound => {
                RepositoryError::NotFound(format!("restaurant owned by account {search_owner_id}"))
            }
            other => {
                error!(
                    "find_by_owner: error fetching restaurant of owner {}: {}",
                    search_owner_id, other
                );
                RepositoryError::DatabaseError(other)
            }
        })
}
