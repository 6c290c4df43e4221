use crate::auth::password::{hash_password, verify_password};
use crate::auth::Identity;
use crate::db::errors::RepositoryError;
use crate::db::schema::{accounts, restaurants};
use crate::db::{DbConnection, DbPool};
use crate::models::user::{Account, NewAccount, Role};
use chrono::NaiveDate;
use diesel::dsl::exists;
use diesel::prelude::*;
use log::{debug, error};

/// Validated registration input. The password is still plain text here and
/// is hashed inside `AccountOperations::register`.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub role: Role,
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Clone)]
pub struct AccountOperations {
    pool: DbPool,
}

impl AccountOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn register(&self, registration: Registration) -> Result<Account, RepositoryError> {
        // hash before taking a pooled connection
        let password_hash = hash_password(&registration.password)?;
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("register: failed to acquire DB connection: {}", e);
            e
        })?;

        if self.email_taken(conn.connection(), &registration.email)? {
            return Err(RepositoryError::Duplicate(format!(
                "email {} is already registered",
                registration.email
            )));
        }

        let new_account = NewAccount {
            password_hash,
            name: registration.name,
            email: registration.email,
            phone: registration.phone,
            dob: registration.dob,
            role: registration.role,
        };

        diesel::insert_into(accounts::table)
            .values(&new_account)
            .returning(Account::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "register: error inserting account with email '{}': {}",
                    new_account.email, e
                );
                RepositoryError::from_insert(
                    e,
                    &format!("email {} is already registered", new_account.email),
                )
            })
    }

    fn email_taken(&self, conn: &mut PgConnection, email_addr: &str) -> Result<bool, RepositoryError> {
        diesel::select(exists(accounts::table.filter(accounts::email.eq(email_addr))))
            .get_result::<bool>(conn)
            .map_err(|e| {
                error!("email_taken: error checking email '{}': {}", email_addr, e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn email_exists(&self, email_addr: &str) -> Result<bool, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;
        self.email_taken(conn.connection(), &normalize_email(email_addr))
    }

    pub fn get_account(&self, search_account_id: i32) -> Result<Account, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_account: failed to acquire DB connection for account {}: {}",
                search_account_id, e
            );
            e
        })?;

        accounts::table
            .find(search_account_id)
            .select(Account::as_select())
            .first(conn.connection())
            .optional()
            .map_err(|e| {
                error!("get_account: error fetching account {}: {}", search_account_id, e);
                RepositoryError::DatabaseError(e)
            })?
            .ok_or_else(|| RepositoryError::NotFound(format!("account {search_account_id}")))
    }

    /// Re-reads the account behind a verified token.
    pub fn resolve_identity(&self, identity: &Identity) -> Result<Account, RepositoryError> {
        self.get_account(identity.account_id).map_err(|e| match e {
            RepositoryError::NotFound(_) => RepositoryError::AccountNotFound(identity.account_id),
            other => other,
        })
    }

    /// Checks credentials for login. Restaurant owners are refused with
    /// `PendingApproval` until their restaurant is verified, before the
    /// password is looked at.
    pub fn authenticate(&self, email_addr: &str, password: &str) -> Result<Account, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("authenticate: failed to acquire DB connection: {}", e);
            e
        })?;
        let email_addr = normalize_email(email_addr);

        let account = accounts::table
            .filter(accounts::email.eq(&email_addr))
            .select(Account::as_select())
            .first(conn.connection())
            .optional()
            .map_err(|e| {
                error!("authenticate: error fetching account '{}': {}", email_addr, e);
                RepositoryError::DatabaseError(e)
            })?
            .ok_or(RepositoryError::InvalidCredentials)?;

        if account.role == Role::RestaurantOwner {
            let verified = restaurants::table
                .filter(restaurants::owner_id.eq(account.account_id))
                .select(restaurants::is_verified)
                .first::<bool>(conn.connection())
                .optional()
                .map_err(|e| {
                    error!(
                        "authenticate: error fetching restaurant of owner {}: {}",
                        account.account_id, e
                    );
                    RepositoryError::DatabaseError(e)
                })?
                .unwrap_or(false);
            if !verified {
                debug!("authenticate: owner {} is pending approval", account.account_id);
                return Err(RepositoryError::PendingApproval(account.account_id));
            }
        }

        if !verify_password(password, &account.password_hash)? {
            return Err(RepositoryError::InvalidCredentials);
        }
        Ok(account)
    }

    /// One page of accounts plus the total count.
    pub fn list_accounts(&self, page: i64, per_page: i64) -> Result<(Vec<Account>, i64), RepositoryError> {
        let offset = (page.max(1) - 1).checked_mul(per_page).ok_or_else(|| {
            RepositoryError::ValidationError(format!("page {} is out of range", page))
        })?;
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_accounts: failed to acquire DB connection: {}", e);
            e
        })?;

        let page_items = accounts::table
            .order(accounts::account_id.asc())
            .limit(per_page)
            .offset(offset)
            .select(Account::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!("list_accounts: error loading page {}: {}", page, e);
                RepositoryError::DatabaseError(e)
            })?;
        let total = accounts::table
            .count()
            .get_result::<i64>(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        Ok((page_items, total))
    }

    pub fn delete_account(&self, search_account_id: i32) -> Result<Account, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("delete_account: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::delete(accounts::table.find(search_account_id))
            .returning(Account::as_returning())
            .get_result(conn.connection())
            .optional()
            .map_err(|e| {
                error!("delete_account: error deleting account {}: {}", search_account_id, e);
                RepositoryError::DatabaseError(e)
            })?
            .ok_or_else(|| RepositoryError::NotFound(format!("account {search_account_id}")))
    }

    /// Creates the admin account if missing. An existing non-admin account
    /// with the same email is left untouched and reported as a duplicate.
    pub fn ensure_admin(&self, admin_name: &str, email_addr: &str, password: &str) -> Result<Account, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;
        let email_addr = normalize_email(email_addr);

        let existing = accounts::table
            .filter(accounts::email.eq(&email_addr))
            .select(Account::as_select())
            .first(conn.connection())
            .optional()
            .map_err(RepositoryError::DatabaseError)?;
        match existing {
            Some(account) if account.role == Role::Admin => Ok(account),
            Some(_) => Err(RepositoryError::Duplicate(format!(
                "email {email_addr} belongs to a non-admin account"
            ))),
            None => {
                let new_account = NewAccount {
                    name: admin_name.to_string(),
                    email: email_addr.clone(),
                    password_hash: hash_password(password)?,
                    phone: String::new(),
                    dob: NaiveDate::default(),
                    role: Role::Admin,
                };
                diesel::insert_into(accounts::table)
                    .values(&new_account)
                    .returning(Account::as_returning())
                    .get_result(conn.connection())
                    .map_err(|e| RepositoryError::from_insert(e, &email_addr))
            }
        }
    }
}
