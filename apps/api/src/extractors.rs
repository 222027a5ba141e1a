use actix_web::Error;
use actix_web::{FromRequest, HttpMessage};
use application::auth::dtos::Claims;
use futures::future::{ready, Ready};

/// Verified token claims placed into request extensions by the auth
/// middleware. Only proves the token was valid; handlers still resolve
/// the live identity (and role) from the store.
pub struct AuthUser(pub Claims);

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthUser(claims.clone()))),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "Not authorized, no token provided",
            ))),
        }
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
