use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures::future::LocalBoxFuture;

use crate::api::ApiError;
use crate::auth::config::JwtConfig;
use crate::auth::guard::{authenticate, RequiredRole, TokenSource};

/// Scope-level gate. Verifies the token once per request and stores the
/// resulting `Identity` in request extensions for the extractors.
#[derive(Clone)]
pub struct AuthLayer {
    cfg: JwtConfig,
    source: TokenSource,
    required: RequiredRole,
}

impl AuthLayer {
    pub fn new(cfg: JwtConfig, source: TokenSource, required: RequiredRole) -> Self {
        Self {
            cfg,
            source,
            required,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            inner: self.clone(),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    inner: AuthLayer,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let result = authenticate(
            req.request(),
            &self.inner.cfg,
            self.inner.source,
            self.inner.required,
        );

        match result {
            Ok(identity) => {
                debug!(
                    "auth: account {} ({}) -> {}",
                    identity.account_id,
                    identity.role,
                    req.path()
                );
                req.extensions_mut().insert(identity);
                let srv = self.service.clone();
                Box::pin(async move { srv.call(req).await.map(|res| res.map_into_left_body()) })
            }
            Err(e) => {
                debug!("auth: rejected {} {}: {}", req.method(), req.path(), e);
                // answer here so the rejection is a normal response
                let res = req.error_response(ApiError::from(e)).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}
