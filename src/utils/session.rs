// src/utils/session.rs

use std::{
    convert::Infallible,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError, names};

/// Role carried by a session. Every user has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin { Role::Admin } else { Role::User }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

/// Session token claims.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    pub role: Role,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Request-scoped identity of the caller.
///
/// Decoded once per request by [`session_middleware`] and stored in the request
/// extensions; guarded handlers receive it as `Extension<SessionContext>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: i64,
    pub role: Role,
}

/// Signs a session token for the user.
pub fn sign_session(
    user_id: i64,
    role: Role,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies a session token and returns the identity it carries.
pub fn verify_session(token: &str, secret: &str) -> Result<SessionContext, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    let user_id = token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::AuthError("Malformed subject claim".to_string()))?;

    Ok(SessionContext {
        user_id,
        role: token_data.claims.role,
    })
}

/// Browser-session cookie; the token's own `exp` claim bounds its lifetime.
pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((names::SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(names::SESSION_COOKIE_NAME).path("/").build()
}

/// Axum Middleware: Session decoding.
///
/// Runs on every request. A valid session cookie becomes a [`SessionContext`] in the
/// request extensions; a missing, expired or tampered cookie leaves the request anonymous.
pub async fn session_middleware(
    State(config): State<Config>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(cookie) = jar.get(names::SESSION_COOKIE_NAME) {
        match verify_session(cookie.value(), &config.session_secret) {
            Ok(session) => {
                req.extensions_mut().insert(session);
            }
            Err(e) => tracing::debug!("Ignoring invalid session cookie: {}", e),
        }
    }

    next.run(req).await
}

/// Route layer: only sessions with the `user` role pass.
pub async fn require_user(req: Request<Body>, next: Next) -> Response {
    require_role(Role::User, req, next).await
}

/// Route layer: only sessions with the `admin` role pass.
pub async fn require_admin(req: Request<Body>, next: Next) -> Response {
    require_role(Role::Admin, req, next).await
}

/// Must run inside `session_middleware`. Anything but the required role is sent to login.
async fn require_role(required: Role, req: Request<Body>, next: Next) -> Response {
    match req.extensions().get::<SessionContext>() {
        Some(session) if session.role == required => next.run(req).await,
        _ => Redirect::to(names::LOGIN_URL).into_response(),
    }
}

/// Optional session for routes that serve anonymous callers too.
pub struct CurrentSession(pub Option<SessionContext>);

impl<S: Send + Sync> FromRequestParts<S> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(parts.extensions.get::<SessionContext>().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_session_round_trips() {
        let token = sign_session(42, Role::Admin, "secret", 60).unwrap();
        let session = verify_session(&token, "secret").unwrap();
        assert_eq!(session, SessionContext { user_id: 42, role: Role::Admin });
    }

    #[test]
    fn session_signed_with_other_secret_is_rejected() {
        let token = sign_session(7, Role::User, "secret", 60).unwrap();
        assert!(matches!(
            verify_session(&token, "another"),
            Err(AppError::AuthError(_))
        ));
    }

    #[test]
    fn admin_flag_maps_to_role() {
        assert_eq!(Role::from_admin_flag(true), Role::Admin);
        assert!(!Role::from_admin_flag(false).is_admin());
    }
}
