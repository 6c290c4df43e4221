use crate::db::{normalize_email, Registration};
use crate::models::user::{Account, Role};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Returns the trimmed value or a message naming the missing field.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{field} is required"))
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_dob(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[derive(Deserialize, ToSchema)]
pub struct RegisterReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub role: Option<String>,
}

impl RegisterReq {
    pub fn into_registration(self) -> Result<Registration, String> {
        let name = required(self.name, "name")?;
        let email = normalize_email(&required(self.email, "email")?);
        if !email.contains('@') {
            return Err(format!("'{email}' is not a valid email"));
        }
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| "password is required".to_string())?;
        let phone = required(self.phone, "phone")?;
        let dob_raw = required(self.dob, "dob")?;
        let dob = parse_dob(&dob_raw).ok_or_else(|| format!("'{dob_raw}' is not a valid date"))?;
        let role_raw = required(self.role, "role")?;
        let role = match Role::parse(&role_raw) {
            Some(Role::Admin) => return Err("admin accounts cannot be self-registered".to_string()),
            Some(role) => role,
            None => return Err(format!("unknown role '{role_raw}'")),
        };
        Ok(Registration {
            name,
            email,
            password,
            phone,
            dob,
            role,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct RegisterResp {
    pub status: String,
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: i32,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResp {
    pub status: String,
    pub message: String,
    pub user_name: String,
    #[serde(rename = "userType")]
    pub user_type: Role,
    pub token: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CheckEmailReq {
    pub email: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CheckEmailResp {
    pub status: String,
    pub exists: bool,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            user_id: account.account_id,
            name: account.name,
            email: account.email,
            phone: account.phone,
            dob: account.dob,
            role: account.role,
            created_at: account.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ProfileResp {
    pub status: String,
    pub data: AccountProfile,
}
