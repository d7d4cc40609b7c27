//! Signed-cookie sessions.
//!
//! The [`Session`] record is serialized to JSON, base64url-encoded and signed
//! with the server's key. Add `Session` to handler parameters to receive the
//! caller's session; a missing or tampered cookie yields an anonymous session.

use actix_web::cookie::{time::Duration, Cookie, CookieJar, Key, SameSite};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use std::fmt;
use std::future::{ready, Ready};

use crate::config::Config;
use crate::constants::{MAX_COOKIE_BYTES, MIN_SESSION_SECRET_LENGTH, SESSION_COOKIE_NAME};
use crate::errors::AppError;
use crate::models::Session;

/// Signing key and cookie settings for sessions
#[derive(Clone)]
pub struct SessionKey {
    key: Key,
    ttl: Duration,
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKey")
            .field("key", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionKey {
    pub fn new(key: Key, ttl_hours: i64) -> Self {
        Self {
            key,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Random key; sessions signed with it die with the process
    pub fn generate(ttl_hours: i64) -> Self {
        Self::new(Key::generate(), ttl_hours)
    }

    /// Build the key from `SESSION_SECRET`, or generate one if it is missing
    /// or too short to sign with.
    pub fn from_config(config: &Config) -> Self {
        match config.session_secret.as_deref() {
            Some(secret) if secret.len() >= MIN_SESSION_SECRET_LENGTH => {
                Self::new(Key::from(secret.as_bytes()), config.session_ttl_hours)
            }
            Some(_) => {
                log::warn!(
                    "SESSION_SECRET is shorter than {} bytes; using a random key instead",
                    MIN_SESSION_SECRET_LENGTH
                );
                Self::generate(config.session_ttl_hours)
            }
            None => {
                log::warn!("SESSION_SECRET not set; sessions will not survive a restart");
                Self::generate(config.session_ttl_hours)
            }
        }
    }

    /// Serialize and sign a session into a cookie ready to send
    pub fn seal(&self, session: &Session) -> Result<Cookie<'static>, AppError> {
        let json = serde_json::to_vec(session)
            .map_err(|e| AppError::internal(format!("Failed to encode session: {}", e)))?;

        let cookie = Cookie::build(SESSION_COOKIE_NAME, URL_SAFE_NO_PAD.encode(json))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(self.ttl)
            .finish();

        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key).add(cookie);
        let sealed = jar
            .get(SESSION_COOKIE_NAME)
            .cloned()
            .ok_or_else(|| AppError::internal("Failed to sign session cookie"))?;

        let size = sealed.name().len() + sealed.value().len();
        if size > MAX_COOKIE_BYTES {
            log::warn!(
                "Session cookie is {} bytes ({} visited codes); browsers may drop it",
                size,
                session.visited_codes.len()
            );
        }

        Ok(sealed)
    }

    /// Verify and decode a session cookie.
    ///
    /// Returns `None` when the signature does not match or the payload is not
    /// a session.
    pub fn open(&self, cookie: Cookie<'static>) -> Option<Session> {
        let mut jar = CookieJar::new();
        jar.add_original(cookie);

        let verified = jar.signed(&self.key).get(SESSION_COOKIE_NAME)?;
        let json = URL_SAFE_NO_PAD.decode(verified.value()).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// A cookie that makes the browser forget its session
    pub fn removal_cookie() -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE_NAME, "").path("/").finish();
        cookie.make_removal();
        cookie
    }
}

impl FromRequest for Session {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let key = match req.app_data::<web::Data<SessionKey>>() {
            Some(key) => key,
            None => {
                return ready(Err(AppError::internal("Session key not available")));
            }
        };

        let session = match req.cookie(SESSION_COOKIE_NAME) {
            Some(cookie) => key.open(cookie).unwrap_or_else(|| {
                log::debug!("Ignoring session cookie with a bad signature or payload");
                Session::default()
            }),
            None => Session::default(),
        };

        ready(Ok(session))
    }
}
