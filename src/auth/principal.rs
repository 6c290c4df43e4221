use crate::models::user::Role;

/// Identity carried by a verified token. Resolved without touching storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub account_id: i32,
    pub name: String,
    pub role: Role,
}
