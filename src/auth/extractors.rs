use crate::api::ApiError;
use crate::auth::guard::{authorize, AuthError, RequiredRole};
use crate::auth::principal::Identity;
use crate::models::user::Role;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

fn identity_with_role(req: &HttpRequest, required: RequiredRole) -> Result<Identity, ApiError> {
    let identity = req
        .extensions()
        .get::<Identity>()
        .cloned()
        .ok_or(AuthError::NoToken)?;
    authorize(&identity, required)?;
    Ok(identity)
}

/// Any authenticated account.
pub struct IdentityExtractor(pub Identity);

impl FromRequest for IdentityExtractor {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(identity_with_role(req, RequiredRole::Any).map(IdentityExtractor))
    }
}

pub struct CustomerIdentity(pub Identity);

impl FromRequest for CustomerIdentity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(identity_with_role(req, RequiredRole::Only(Role::Customer)).map(CustomerIdentity))
    }
}

pub struct OwnerIdentity(pub Identity);

impl OwnerIdentity {
    pub fn account_id(&self) -> i32 {
        self.0.account_id
    }
}

impl FromRequest for OwnerIdentity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            identity_with_role(req, RequiredRole::Only(Role::RestaurantOwner)).map(OwnerIdentity),
        )
    }
}

pub struct AdminIdentity(pub Identity);

impl FromRequest for AdminIdentity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(identity_with_role(req, RequiredRole::Only(Role::Admin)).map(AdminIdentity))
    }
}
