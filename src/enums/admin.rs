use crate::config::AssetConfig;
use crate::db::{DishDetails, OwnerSummary, RestaurantDetails};
use crate::enums::users::required;
use crate::models::admin::{Dish, Restaurant};
use crate::models::user::{Account, Role};
use crate::traits::ImageRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

pub const USERS_PER_PAGE: i64 = 10;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRestaurantReq {
    pub email: Option<String>,
    pub password: Option<String>,
    pub restaurant_name: Option<String>,
    pub sector: Option<String>,
    pub locality: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub food_type: Option<String>,
    pub restaurant_image: Option<String>,
}

pub struct RestaurantApplication {
    pub email: String,
    pub password: String,
    pub details: RestaurantDetails,
}

impl RegisterRestaurantReq {
    pub fn into_application(self) -> Result<RestaurantApplication, String> {
        let email = required(self.email, "email")?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| "password is required".to_string())?;
        let details = RestaurantDetails {
            restaurant_name: required(self.restaurant_name, "restaurantName")?,
            sector: required(self.sector, "sector")?,
            locality: required(self.locality, "locality")?,
            building: required(self.building, "building")?,
            floor: required(self.floor, "floor")?,
            food_type: required(self.food_type, "foodType")?,
            restaurant_image: self
                .restaurant_image
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        };
        Ok(RestaurantApplication {
            email,
            password,
            details,
        })
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantView {
    pub restaurant_id: i32,
    pub owner_id: i32,
    pub restaurant_name: String,
    pub email: String,
    pub sector: String,
    pub locality: String,
    pub building: String,
    pub floor: String,
    pub food_type: String,
    pub restaurant_image: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl RestaurantView {
    pub fn new(restaurant: Restaurant, assets: &AssetConfig) -> Self {
        let restaurant_image = restaurant.image_url(assets);
        Self {
            restaurant_id: restaurant.restaurant_id,
            owner_id: restaurant.owner_id,
            restaurant_name: restaurant.restaurant_name,
            email: restaurant.email,
            sector: restaurant.sector,
            locality: restaurant.locality,
            building: restaurant.building,
            floor: restaurant.floor,
            food_type: restaurant.food_type,
            restaurant_image,
            is_verified: restaurant.is_verified,
            created_at: restaurant.created_at,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct OwnerView {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl From<OwnerSummary> for OwnerView {
    fn from(owner: OwnerSummary) -> Self {
        Self {
            name: owner.name,
            phone: owner.phone,
            email: owner.email,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct RestaurantWithOwner {
    #[serde(flatten)]
    pub restaurant: RestaurantView,
    pub owner: OwnerView,
}

#[derive(Serialize, ToSchema)]
pub struct RestaurantResp {
    pub status: String,
    pub data: RestaurantView,
}

#[derive(Serialize, ToSchema)]
pub struct RestaurantListResp {
    pub status: String,
    pub data: Vec<RestaurantView>,
}

#[derive(Serialize, ToSchema)]
pub struct ReviewListResp {
    pub status: String,
    pub data: Vec<RestaurantWithOwner>,
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DishView {
    pub dish_id: i32,
    pub restaurant_id: i32,
    pub dish_name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: Option<String>,
}

impl DishView {
    pub fn new(dish: Dish, assets: &AssetConfig) -> Self {
        let image = dish.image_url(assets);
        Self {
            dish_id: dish.dish_id,
            restaurant_id: dish.restaurant_id,
            dish_name: dish.dish_name,
            description: dish.description,
            price: dish.price,
            category: dish.category,
            image,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDishReq {
    pub dish_name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl NewDishReq {
    pub fn into_details(self) -> Result<DishDetails, String> {
        Ok(DishDetails {
            dish_name: required(self.dish_name, "dishName")?,
            description: self.description.unwrap_or_default().trim().to_string(),
            price: self.price.ok_or_else(|| "price is required".to_string())?,
            category: required(self.category, "category")?,
            image: self.image.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct DishResp {
    pub status: String,
    pub data: DishView,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuResp {
    pub status: String,
    pub restaurant_name: String,
    pub menu: Vec<DishView>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedMenuResp {
    pub status: String,
    pub restaurant_name: String,
    pub menu: BTreeMap<String, Vec<DishView>>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRestaurantReq {
    pub is_verified: Option<bool>,
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            user_id: account.account_id,
            name: account.name,
            email: account.email,
            phone: account.phone,
            role: account.role,
            created_at: account.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsersPageResp {
    pub status: String,
    pub users: Vec<AccountSummary>,
    pub total_pages: i64,
    pub current_page: i64,
}

pub fn total_pages(total: i64, per_page: i64) -> i64 {
    (total + per_page - 1) / per_page
}

#[derive(Deserialize, IntoParams)]
pub struct PageQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<i64>,
}

#[derive(Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Matched against restaurant name, sector and locality
    pub query: Option<String>,
}
