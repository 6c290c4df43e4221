use crate::db::admin::restaurant::find_by_owner;
use crate::db::schema::{accounts, order_items, orders, restaurants};
use crate::db::{DbConnection, DbPool, RepositoryError};
use crate::models::common::{NewOrder, Order, OrderItem, OrderStatus};
use diesel::prelude::*;
use diesel::result::Error;
use log::{debug, error, info};

/// Largest accepted difference between the stated total and the item sum.
pub const TOTAL_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub customer_name: String,
    pub items: Vec<OrderLine>,
    pub total: f64,
    pub restaurant_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// A finished order with the phone number of whoever placed it, if that
/// account still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub order: OrderWithItems,
    pub phone: Option<String>,
}

/// Checks an order request before anything touches the database.
pub fn validate_order_request(request: &OrderRequest) -> Result<(), RepositoryError> {
    if request.customer_name.trim().is_empty() {
        return Err(RepositoryError::ValidationError(
            "customerName is required".to_string(),
        ));
    }
    if request.items.is_empty() {
        return Err(RepositoryError::ValidationError(
            "order must contain at least one item".to_string(),
        ));
    }
    for (idx, item) in request.items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(RepositoryError::ValidationError(format!(
                "item {idx} has no name"
            )));
        }
        if item.quantity < 1 {
            return Err(RepositoryError::ValidationError(format!(
                "item '{}' must have a quantity of at least 1",
                item.name
            )));
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(RepositoryError::ValidationError(format!(
                "item '{}' has an invalid price",
                item.name
            )));
        }
    }
    if !request.total.is_finite() || request.total < 0.0 {
        return Err(RepositoryError::ValidationError(
            "total must be a non-negative number".to_string(),
        ));
    }
    let expected: f64 = request
        .items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum();
    if (request.total - expected).abs() > TOTAL_TOLERANCE {
        return Err(RepositoryError::ValidationError(format!(
            "total {} does not match the item sum {:.2}",
            request.total, expected
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct OrderOperations {
    pool: DbPool,
}

impl OrderOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create_order(&self, placer: i32, request: OrderRequest) -> Result<OrderWithItems, RepositoryError> {
        validate_order_request(&request)?;
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_order: failed to acquire DB connection: {}", e);
            e
        })?;

        let verified = restaurants::table
            .find(request.restaurant_id)
            .select(restaurants::is_verified)
            .first::<bool>(conn.connection())
            .optional()
            .map_err(|e| {
                error!(
                    "create_order: error fetching restaurant {}: {}",
                    request.restaurant_id, e
                );
                RepositoryError::DatabaseError(e)
            })?
            .ok_or_else(|| RepositoryError::NotFound(format!("restaurant {}", request.restaurant_id)))?;
        if !verified {
            return Err(RepositoryError::ValidationError(format!(
                "restaurant {} is not accepting orders yet",
                request.restaurant_id
            )));
        }

        let created = conn.connection().transaction(|conn| {
            let order = diesel::insert_into(orders::table)
                .values(&NewOrder {
                    customer_name: request.customer_name.trim().to_string(),
                    total: request.total,
                    status: OrderStatus::Pending,
                    restaurant_id: request.restaurant_id,
                    placer_id: Some(placer),
                })
                .returning(Order::as_returning())
                .get_result(conn)?;

            let lines: Vec<OrderItem> = request
                .items
                .into_iter()
                .zip(0..)
                .map(|(line, position)| OrderItem {
                    order_id: order.order_id,
                    position,
                    name: line.name.trim().to_string(),
                    quantity: line.quantity,
                    price: line.price,
                })
                .collect();
            diesel::insert_into(order_items::table)
                .values(&lines)
                .execute(conn)?;

            Ok::<_, Error>(OrderWithItems { order, items: lines })
        });

        let created = created.map_err(|e| {
            error!("create_order: error saving order for account {}: {}", placer, e);
            RepositoryError::DatabaseError(e)
        })?;
        info!(
            "create_order: order {} placed by account {} at restaurant {}",
            created.order.order_id, placer, created.order.restaurant_id
        );
        Ok(created)
    }

    pub fn get_order(&self, search_order_id: i32) -> Result<OrderWithItems, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_order: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;
        let order = load_order(conn.connection(), search_order_id)?;
        with_items(conn.connection(), order)
    }

    /// Fetches an order on behalf of the account that placed it.
    pub fn get_order_for_placer(&self, search_order_id: i32, requester: i32) -> Result<OrderWithItems, RepositoryError> {
        let order = self.get_order(search_order_id)?;
        if order.order.placer_id != Some(requester) {
            debug!(
                "get_order_for_placer: account {} is not the placer of order {}",
                requester, search_order_id
            );
            return Err(RepositoryError::Forbidden(format!(
                "order {search_order_id} was not placed by this account"
            )));
        }
        Ok(order)
    }

    /// All orders of the restaurant owned by `owner_id`, newest first.
    pub fn list_for_owner(&self, owner_id: i32) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_for_owner: failed to acquire DB connection: {}", e);
            e
        })?;
        let restaurant = find_by_owner(conn.connection(), owner_id)?;

        let found = orders::table
            .filter(orders::restaurant_id.eq(restaurant.restaurant_id))
            .order((orders::created_at.desc(), orders::order_id.desc()))
            .select(Order::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!(
                    "list_for_owner: error loading orders for restaurant {}: {}",
                    restaurant.restaurant_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        attach_items(conn.connection(), found)
    }

    /// Shipped and declined orders of the owner's restaurant, newest first,
    /// with the placer's phone number.
    pub fn history_for_owner(&self, owner_id: i32) -> Result<Vec<HistoryEntry>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("history_for_owner: failed to acquire DB connection: {}", e);
            e
        })?;
        let restaurant = find_by_owner(conn.connection(), owner_id)?;

        let rows: Vec<(Order, Option<String>)> = orders::table
            .left_join(accounts::table.on(orders::placer_id.eq(accounts::account_id.nullable())))
            .filter(orders::restaurant_id.eq(restaurant.restaurant_id))
            .filter(orders::status.eq_any(vec![OrderStatus::Shipped, OrderStatus::Declined]))
            .order((orders::created_at.desc(), orders::order_id.desc()))
            .select((Order::as_select(), accounts::phone.nullable()))
            .load(conn.connection())
            .map_err(|e| {
                error!(
                    "history_for_owner: error loading history for restaurant {}: {}",
                    restaurant.restaurant_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;

        let (found, phones): (Vec<Order>, Vec<Option<String>>) = rows.into_iter().unzip();
        let with_items = attach_items(conn.connection(), found)?;
        Ok(with_items
            .into_iter()
            .zip(phones)
            .map(|(order, phone)| HistoryEntry { order, phone })
            .collect())
    }

    /// Moves an order to `new_status` on behalf of the restaurant owner.
    /// Fails with `Forbidden` when `owner_id` does not own the order's
    /// restaurant and `InvalidTransition` when the table disallows the move.
    pub fn set_status(
        &self,
        target_order_id: i32,
        new_status: OrderStatus,
        owner_id: i32,
    ) -> Result<OrderWithItems, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("set_status: failed to acquire DB connection: {}", e);
            e
        })?;
        let order = load_order(conn.connection(), target_order_id)?;

        let restaurant_owner = restaurants::table
            .find(order.restaurant_id)
            .select(restaurants::owner_id)
            .first::<i32>(conn.connection())
            .optional()
            .map_err(|e| {
                error!(
                    "set_status: error fetching owner of restaurant {}: {}",
                    order.restaurant_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        if restaurant_owner != Some(owner_id) {
            return Err(RepositoryError::Forbidden(format!(
                "order {target_order_id} belongs to another restaurant"
            )));
        }

        if !order.status.can_transition_to(new_status) {
            return Err(RepositoryError::InvalidTransition {
                from: order.status,
                to: new_status,
            });
        }

        let updated = swap_status(conn.connection(), target_order_id, order.status, new_status)?;
        info!(
            "set_status: order {} moved from {} to {}",
            target_order_id, order.status, new_status
        );
        with_items(conn.connection(), updated)
    }
}

fn swap_status(
    conn: &mut PgConnection,
    target_order_id: i32,
    expected: OrderStatus,
    new_status: OrderStatus,
) -> Result<Order, RepositoryError> {
    diesel::update(
        orders::table
            .filter(orders::order_id.eq(target_order_id))
            .filter(orders::status.eq(expected)),
    )
    .set(orders::status.eq(new_status))
    .returning(Order::as_returning())
    .get_result(conn)
    .optional()
    .map_err(|e| {
        error!("swap_status: error updating order {}: {}", target_order_id, e);
        RepositoryError::DatabaseError(e)
    })?
    .ok_or(RepositoryError::StaleStatus(target_order_id))
}

fn load_order(conn: &mut PgConnection, search_order_id: i32) -> Result<Order, RepositoryError> {
    orders::table
        .find(search_order_id)
        .select(Order::as_select())
        .first(conn)
        .map_err(|e| match e {
            Error::NotFound => RepositoryError::NotFound(format!("order {search_order_id}")),
            other => {
                error!("load_order: error fetching order {}: {}", search_order_id, other);
                RepositoryError::DatabaseError(other)
            }
        })
}

fn with_items(conn: &mut PgConnection, order: Order) -> Result<OrderWithItems, RepositoryError> {
    let items = OrderItem::belonging_to(&order)
        .order(order_items::position.asc())
        .select(OrderItem::as_select())
        .load(conn)
        .map_err(|e| {
            error!("with_items: error loading items of order {}: {}", order.order_id, e);
            RepositoryError::DatabaseError(e)
        })?;
    Ok(OrderWithItems { order, items })
}

/// Loads the line items of every order in one query and pairs them up,
/// keeping the order of `found`.
fn attach_items(conn: &mut PgConnection, found: Vec<Order>) -> Result<Vec<OrderWithItems>, RepositoryError> {
    let items = OrderItem::belonging_to(&found)
        .order((order_items::order_id.asc(), order_items::position.asc()))
        .select(OrderItem::as_select())
        .load(conn)
        .map_err(|e| {
            error!("attach_items: error loading order items: {}", e);
            RepositoryError::DatabaseError(e)
        })?;

    Ok(items
        .grouped_by(&found)
        .into_iter()
        .zip(found)
        .map(|(items, order)| OrderWithItems { order, items })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(total: f64) -> OrderRequest {
        OrderRequest {
            customer_name: "Asha".to_string(),
            items: vec![OrderLine {
                name: "Pizza".to_string(),
                quantity: 2,
                price: 10.0,
            }],
            total,
            restaurant_id: 1,
        }
    }

    #[test]
    fn accepts_matching_total() {
        assert!(validate_order_request(&request(20.0)).is_ok());
        assert!(validate_order_request(&request(20.005)).is_ok());
    }

    #[test]
    fn rejects_mismatched_total() {
        assert!(matches!(
            validate_order_request(&request(25.0)),
            Err(RepositoryError::ValidationError(_))
        ));
        assert!(matches!(
            validate_order_request(&request(f64::NAN)),
            Err(RepositoryError::ValidationError(_))
        ));

        // within tolerance of a free order but still below zero
        let mut free = request(-0.005);
        free.items[0].price = 0.0;
        assert!(matches!(
            validate_order_request(&free),
            Err(RepositoryError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_bad_items() {
        let mut empty = request(0.0);
        empty.items.clear();
        assert!(validate_order_request(&empty).is_err());

        let mut zero_qty = request(0.0);
        zero_qty.items[0].quantity = 0;
        assert!(validate_order_request(&zero_qty).is_err());

        let mut negative = request(-20.0);
        negative.items[0].price = -10.0;
        assert!(validate_order_request(&negative).is_err());

        let mut unnamed = request(20.0);
        unnamed.customer_name = "  ".to_string();
        assert!(validate_order_request(&unnamed).is_err());
    }
}
