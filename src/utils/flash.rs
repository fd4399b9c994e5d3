// src/utils/flash.rs

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use url::form_urlencoded;

use crate::{error::AppError, names};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Danger => "danger",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "success" => Some(Level::Success),
            "info" => Some(Level::Info),
            "warning" => Some(Level::Warning),
            "danger" => Some(Level::Danger),
            _ => None,
        }
    }
}

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(Level::Danger, message)
    }

    /// Cookie-safe encoding: `level=..&message=..`, url-encoded.
    fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("level", self.level.as_str())
            .append_pair("message", &self.message)
            .finish()
    }

    fn decode(raw: &str) -> Option<Self> {
        let mut level = None;
        let mut message = None;
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "level" => level = Level::parse(&value),
                "message" => message = Some(value.into_owned()),
                _ => {}
            }
        }
        Some(Self::new(level?, message?))
    }
}

/// Sets the flash cookie and redirects (303) to `to`.
pub fn redirect(jar: CookieJar, flash: Flash, to: &str) -> Response {
    let cookie = Cookie::build((names::FLASH_COOKIE_NAME, flash.encode()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    (jar.add(cookie), Redirect::to(to)).into_response()
}

/// Consumes the pending flash message, if any. The returned jar must be part of the response.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(names::FLASH_COOKIE_NAME) else {
        return (jar, None);
    };
    let flash = Flash::decode(cookie.value());
    let jar = jar.remove(Cookie::build(names::FLASH_COOKIE_NAME).path("/"));
    (jar, flash)
}

/// Failure boundary of a mutating handler.
///
/// Missing rows and missing sessions keep their own responses; anything else is logged
/// and reported to the user as a generic danger message. Open transactions have already
/// been rolled back by the time the error reaches this point.
pub fn fail(jar: CookieJar, err: AppError, message: &str, to: &str) -> Result<Response, AppError> {
    match err {
        AppError::InternalServerError(detail) => {
            tracing::error!("{}: {}", message, detail);
            Ok(redirect(jar, Flash::danger(message), to))
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_flash_is_cookie_safe_and_decodes() {
        let flash = Flash::warning("You have already attempted this quiz; see 1/2 & more");
        let encoded = flash.encode();
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains(';'));
        assert_eq!(Flash::decode(&encoded), Some(flash));
    }

    #[test]
    fn unknown_level_is_dropped() {
        assert_eq!(Flash::decode("level=loud&message=hi"), None);
    }
}
