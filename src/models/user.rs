use chrono::{DateTime, NaiveDate, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Role tag stored with every account. Resolved once at registration and
/// never inferred afterwards.
#[derive(DbEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[ExistingTypePath = "crate::db::schema::sql_types::AccountRole"]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    RestaurantOwner,
    Admin,
}

impl Role {
    /// Parses the wire form of a role. `restaurant` is the legacy tag used by
    /// older clients for restaurant operators.
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_lowercase().as_str() {
            "customer" => Some(Role::Customer),
            "restaurant_owner" | "restaurant" => Some(Role::RestaurantOwner),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::RestaurantOwner => "restaurant_owner",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::accounts)]
#[diesel(primary_key(account_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    pub account_id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::accounts)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub role: Role,
}
