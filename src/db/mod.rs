use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{r2d2, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

mod admin;
mod common;
mod errors;
pub mod schema;
mod users;

pub use admin::menu::{DishDetails, MenuOperations};
pub use admin::restaurant::{OwnerSummary, RestaurantDetails, RestaurantOperations};
pub use common::orders::{
    validate_order_request, HistoryEntry, OrderLine, OrderOperations, OrderRequest, OrderWithItems,
};
pub use common::search::{escape_like, SearchOperations};
pub use errors::RepositoryError;
pub use users::account::{normalize_email, AccountOperations, Registration};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn establish_connection_pool(database_url: &str, max_size: u32) -> Result<DbPool, RepositoryError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(RepositoryError::ConnectionPoolError)
}

pub fn run_db_migrations(pool: &DbPool) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    let applied = conn
        .connection()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepositoryError::Migration(e.to_string()))?;
    for version in applied {
        info!("Applied migration {}", version);
    }
    Ok(())
}

// Connection Guard - Manages pool
pub struct DbConnection<'a> {
    conn: r2d2::PooledConnection<ConnectionManager<PgConnection>>,
    _lifetime: std::marker::PhantomData<&'a ()>,
}

impl DbConnection<'_> {
    pub fn new(pool: &DbPool) -> Result<Self, RepositoryError> {
        Ok(Self {
            conn: pool.get().map_err(RepositoryError::ConnectionPoolError)?,
            _lifetime: std::marker::PhantomData,
        })
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}
