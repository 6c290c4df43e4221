pub mod orders;
pub mod search;
