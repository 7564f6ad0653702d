use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

/// Identity claims issued by the external auth service.
///
/// The auth service stores these claims, JSON-encoded, as the actix-identity id
/// inside the encrypted session cookie shared with this service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable subject identifier assigned by the identity provider.
    pub sub: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Expiry as a unix timestamp in seconds.
    pub exp: i64,
}

impl AuthenticatedUser {
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp <= now
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let identity = req
        .get_identity()
        .map_err(|_| actix_web::error::ErrorUnauthorized("authentication required"))?;
    let claims = identity
        .id()
        .map_err(|_| actix_web::error::ErrorUnauthorized("authentication required"))?;
    let user: AuthenticatedUser = serde_json::from_str(&claims).map_err(|err| {
        log::warn!("Rejected malformed identity claims: {err}");
        actix_web::error::ErrorUnauthorized("authentication required")
    })?;

    if user.is_expired(chrono::Utc::now().timestamp()) {
        return Err(actix_web::error::ErrorUnauthorized("session expired"));
    }

    Ok(user)
}
