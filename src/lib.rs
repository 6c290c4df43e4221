#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod enums;
pub mod models;
pub mod test_utils;
pub mod traits;

use crate::auth::JwtConfig;
use crate::config::AssetConfig;
use crate::db::{
    establish_connection_pool, run_db_migrations, AccountOperations, DbPool, MenuOperations,
    OrderOperations, RepositoryError, RestaurantOperations, SearchOperations,
};

#[derive(Clone)]
pub struct AppState {
    pub account_ops: AccountOperations,
    pub restaurant_ops: RestaurantOperations,
    pub menu_ops: MenuOperations,
    pub order_ops: OrderOperations,
    pub search_ops: SearchOperations,
    pub jwt_cfg: JwtConfig,
    pub asset_cfg: AssetConfig,
}

impl AppState {
    /// Connects, runs pending migrations and builds every operation struct.
    pub fn new(
        url: &str,
        pool_size: u32,
        jwt_cfg: JwtConfig,
        asset_cfg: AssetConfig,
    ) -> Result<Self, RepositoryError> {
        let db = establish_connection_pool(url, pool_size)?;
        run_db_migrations(&db)?;
        Ok(Self::from_pool(db, jwt_cfg, asset_cfg))
    }

    pub fn from_pool(db: DbPool, jwt_cfg: JwtConfig, asset_cfg: AssetConfig) -> Self {
        AppState {
            account_ops: AccountOperations::new(db.clone()),
            restaurant_ops: RestaurantOperations::new(db.clone()),
            menu_ops: MenuOperations::new(db.clone()),
            order_ops: OrderOperations::new(db.clone()),
            search_ops: SearchOperations::new(db),
            jwt_cfg,
            asset_cfg,
        }
    }
}
