pub mod admin;
pub mod common;
pub mod users;
