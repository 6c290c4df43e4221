use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(DbEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[ExistingTypePath = "crate::db::schema::sql_types::OrderStatus"]
pub enum OrderStatus {
    Pending,
    Accepted,
    Declined,
    Shipped,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Declined,
        OrderStatus::Shipped,
    ];

    /// Case-insensitive lookup of a status name. Returns `None` for anything
    /// outside the enumeration.
    pub fn parse(value: &str) -> Option<OrderStatus> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Declined => "Declined",
            OrderStatus::Shipped => "Shipped",
        }
    }

    /// States reachable in a single step from `self`.
    pub fn next_states(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[
                OrderStatus::Accepted,
                OrderStatus::Declined,
                OrderStatus::Shipped,
            ],
            OrderStatus::Accepted => &[OrderStatus::Shipped, OrderStatus::Declined],
            OrderStatus::Declined | OrderStatus::Shipped => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.next_states().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_states().is_empty()
    }

    /// Statuses shown in a restaurant's order history.
    pub fn is_historical(&self) -> bool {
        matches!(self, OrderStatus::Shipped | OrderStatus::Declined)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub order_id: i32,
    pub customer_name: String,
    pub total: f64,
    pub status: OrderStatus,
    pub restaurant_id: i32,
    pub placer_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct NewOrder {
    pub customer_name: String,
    pub total: f64,
    pub status: OrderStatus,
    pub restaurant_id: i32,
    pub placer_id: Option<i32>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::order_items)]
#[diesel(primary_key(order_id, position))]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItem {
    pub order_id: i32,
    pub position: i32,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}
