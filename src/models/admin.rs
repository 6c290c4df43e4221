use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::restaurants)]
#[diesel(primary_key(restaurant_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Restaurant {
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

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::restaurants)]
pub struct NewRestaurant {
    pub owner_id: i32,
    pub restaurant_name: String,
    pub email: String,
    pub sector: String,
    pub locality: String,
    pub building: String,
    pub floor: String,
    pub food_type: String,
    pub restaurant_image: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::dishes)]
#[diesel(primary_key(dish_id))]
#[diesel(belongs_to(Restaurant, foreign_key = restaurant_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Dish {
    pub dish_id: i32,
    pub restaurant_id: i32,
    pub dish_name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::dishes)]
pub struct NewDish {
    pub restaurant_id: i32,
    pub dish_name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: Option<String>,
}
