use crate::db::{DbConnection, DbPool, RepositoryError};
use crate::db::schema::restaurants;
use crate::models::admin::Restaurant;
use diesel::prelude::*;
use log::{debug, error};

#[derive(Clone)]
pub struct SearchOperations {
    pool: DbPool,
}

/// Escapes `%`, `_` and `\` so user input matches literally inside ILIKE.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl SearchOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Case-insensitive substring search over verified restaurants by name,
    /// sector or locality.
    pub fn search_restaurants(&self, search_query: &str) -> Result<Vec<Restaurant>, RepositoryError> {
        let search_query = search_query.trim();
        if search_query.is_empty() {
            return Err(RepositoryError::ValidationError(
                "search query must not be empty".to_string(),
            ));
        }
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "search_restaurants: failed to acquire DB connection for query '{}': {}",
                search_query, e
            );
            e
        })?;
        debug!("search_restaurants: searching for '{}'", search_query);

        let pattern = format!("%{}%", escape_like(search_query));
        restaurants::table
            .filter(restaurants::is_verified.eq(true))
            .filter(
                restaurants::restaurant_name
                    .ilike(&pattern)
                    .or(restaurants::sector.ilike(&pattern))
                    .or(restaurants::locality.ilike(&pattern)),
            )
            .order(restaurants::restaurant_id.asc())
            .select(Restaurant::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!(
                    "search_restaurants: error searching for '{}': {}",
                    search_query, e
                );
                RepositoryError::DatabaseError(e)
            })
    }
}
