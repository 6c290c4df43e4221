use crate::db::{HistoryEntry, OrderLine, OrderRequest, OrderWithItems};
use crate::enums::users::required;
use crate::models::common::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shown in history entries whose placer account no longer exists.
pub const MISSING_PHONE: &str = "N/A";

#[derive(Serialize, ToSchema)]
pub struct MessageResp {
    pub status: String,
    pub message: String,
}

impl MessageResp {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct OrderItemReq {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderReq {
    pub customer_name: Option<String>,
    pub items: Option<Vec<OrderItemReq>>,
    pub total: Option<f64>,
    pub restaurant_id: Option<i32>,
}

impl CreateOrderReq {
    /// Checks presence of every field. Value checks happen in
    /// `validate_order_request`.
    pub fn into_request(self) -> Result<OrderRequest, String> {
        let customer_name = required(self.customer_name, "customerName")?;
        let items = self.items.ok_or_else(|| "items is required".to_string())?;
        let total = self.total.ok_or_else(|| "total is required".to_string())?;
        let restaurant_id = self
            .restaurant_id
            .ok_or_else(|| "restaurantId is required".to_string())?;

        let items = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                Ok(OrderLine {
                    name: item.name.unwrap_or_default(),
                    quantity: item
                        .quantity
                        .ok_or_else(|| format!("items[{idx}].quantity is required"))?,
                    price: item
                        .price
                        .ok_or_else(|| format!("items[{idx}].price is required"))?,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(OrderRequest {
            customer_name,
            items,
            total,
            restaurant_id,
        })
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateStatusReq {
    pub status: Option<String>,
}

impl UpdateStatusReq {
    pub fn parse(&self) -> Result<OrderStatus, String> {
        let raw = self
            .status
            .as_deref()
            .ok_or_else(|| "status is required".to_string())?;
        OrderStatus::parse(raw).ok_or_else(|| format!("unknown order status '{raw}'"))
    }
}

#[derive(Serialize, ToSchema, Debug, PartialEq)]
pub struct OrderItemView {
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order_id: i32,
    pub customer_name: String,
    pub items: Vec<OrderItemView>,
    pub total: f64,
    pub status: OrderStatus,
    pub restaurant_id: i32,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<OrderWithItems> for OrderView {
    fn from(value: OrderWithItems) -> Self {
        let OrderWithItems { order, items } = value;
        Self {
            order_id: order.order_id,
            customer_name: order.customer_name,
            items: items
                .into_iter()
                .map(|item| OrderItemView {
                    name: item.name,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            total: order.total,
            status: order.status,
            restaurant_id: order.restaurant_id,
            user_id: order.placer_id,
            created_at: order.created_at,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryView {
    #[serde(flatten)]
    pub order: OrderView,
    pub phone_number: String,
}

impl From<HistoryEntry> for OrderHistoryView {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            order: entry.order.into(),
            phone_number: entry.phone.unwrap_or_else(|| MISSING_PHONE.to_string()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct OrderResp {
    pub status: String,
    pub message: Option<String>,
    pub data: OrderView,
}

#[derive(Serialize, ToSchema)]
pub struct OrderListResp {
    pub status: String,
    pub data: Vec<OrderView>,
}

#[derive(Serialize, ToSchema)]
pub struct OrderHistoryResp {
    pub status: String,
    pub data: Vec<OrderHistoryView>,
}
