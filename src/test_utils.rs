//! Test utilities and helpers.
//!
//! Provides common test infrastructure used across multiple test modules.
//! This module is only compiled when running tests.

#![cfg(test)]

use crate::config::Config;
use crate::models::{UrlRecord, User};
use crate::session::SessionKey;
use crate::store::Store;

/// Create an empty store
pub fn setup_test_store() -> Store {
    Store::new()
}

/// Create a default test configuration.
pub fn test_config() -> Config {
    Config::default()
}

/// Create a random session key with the default lifetime.
pub fn test_session_key() -> SessionKey {
    SessionKey::generate(test_config().session_ttl_hours)
}

/// Helper to register a test user with a real password hash.
pub fn create_test_user(store: &Store, email: &str, password: &str) -> User {
    crate::services::register_user(store, email, password).expect("Failed to create test user")
}

/// Helper to create a test URL for a user.
pub fn create_test_url(store: &Store, owner_id: &str, long_url: &str) -> UrlRecord {
    crate::services::create_url(store, long_url, owner_id, test_config().short_code_length)
        .expect("Failed to create test URL")
}

/// Extension trait for test assertions.
pub trait TestAssertions {
    /// Assert that a result is Ok.
    fn assert_ok(&self);
    /// Assert that a result is Err.
    fn assert_err(&self);
}

impl<T, E: std::fmt::Debug> TestAssertions for Result<T, E> {
    fn assert_ok(&self) {
        assert!(self.is_ok(), "Expected Ok, got Err: {:?}", self.as_ref().err());
    }

    fn assert_err(&self) {
        assert!(self.is_err(), "Expected Err, got Ok");
    }
}

#[cfg(test)]
mod tests {
    use super::{create_test_url, create_test_user, setup_test_store, test_session_key, TestAssertions};
    use crate::models::Session;

    #[test]
    fn test_create_test_user() {
        let store = setup_test_store();
        let user = create_test_user(&store, "test@example.com", "pw1");
        assert_eq!(user.email, "test@example.com");
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn test_create_test_url() {
        let store = setup_test_store();
        let url = create_test_url(&store, "user1", "https://example.com");
        assert_eq!(url.long_url, "https://example.com");
        assert_eq!(url.short_code.len(), 6);
    }

    #[test]
    fn test_session_keys_are_independent() {
        let first = test_session_key();
        let second = test_session_key();
        let cookie = first.seal(&Session::default()).unwrap();
        assert!(second.open(cookie).is_none());
    }

    #[test]
    fn test_assertions() {
        let ok_result: Result<i32, &str> = Ok(42);
        ok_result.assert_ok();

        let err_result: Result<i32, &str> = Err("error");
        err_result.assert_err();
    }
}
