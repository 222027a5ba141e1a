use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::future::{ready, Ready};
use std::task::{Context, Poll};

use crate::config::Config;
use application::auth::dtos::Claims;

/// Verifies a bearer token when one is sent and parks the claims in the
/// request extensions for the `AuthUser` extractor. A request without an
/// Authorization header passes through untouched so public routes
/// (register, login, track) stay reachable; a present-but-invalid token
/// is rejected here with 401.
pub struct AuthMiddleware;

enum TokenOutcome {
    NoToken,
    Valid(Claims),
    Invalid,
}

fn inspect_token(req: &ServiceRequest) -> TokenOutcome {
    let header_value = match req.headers().get(header::AUTHORIZATION) {
        Some(v) => v,
        None => return TokenOutcome::NoToken,
    };
    let token = header_value
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix("Bearer ").or_else(|| s.strip_prefix("bearer ")));
    let Some(token) = token else {
        return TokenOutcome::NoToken;
    };
    let Some(config) = req.app_data::<web::Data<Config>>() else {
        return TokenOutcome::NoToken;
    };

    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => TokenOutcome::Valid(data.claims),
        Err(_) => TokenOutcome::Invalid,
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match inspect_token(&req) {
            TokenOutcome::Valid(claims) => {
                req.extensions_mut().insert(claims);
            }
            TokenOutcome::Invalid => {
                return Box::pin(async move { Err(ErrorUnauthorized("Invalid or expired token")) });
            }
            TokenOutcome::NoToken => {}
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}
