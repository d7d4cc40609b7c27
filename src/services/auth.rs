//! Registration, login and the ownership guard.

use super::helpers::{hash_password, verify_password};
use super::urls::get_url;
use super::users::{create_user, find_user_by_email, get_user_by_id};
use crate::errors::AppError;
use crate::models::{Session, UrlRecord, User};
use crate::store::Store;

// ============================================================================
// Credentials
// ============================================================================

/// Register a new account.
///
/// Both fields must be present. The caller binds the returned user to the
/// session.
pub fn register_user(store: &Store, email: &str, password: &str) -> Result<User, AppError> {
    if email.is_empty() || password.is_empty() {
        log::warn!("Registration rejected: missing email or password");
        return Err(AppError::missing_credentials());
    }

    // create_user checks again under the write lock
    if find_user_by_email(store, email).is_some() {
        log::warn!("Registration rejected: {} is already registered", email);
        return Err(AppError::email_taken(email));
    }

    let password_hash = hash_password(password)?;
    create_user(store, email, &password_hash)
}

/// Check an email/password pair.
///
/// An unknown email and a wrong password produce the same error.
pub fn login_user(store: &Store, email: &str, password: &str) -> Result<User, AppError> {
    if email.is_empty() || password.is_empty() {
        return Err(AppError::missing_credentials());
    }

    let user = match find_user_by_email(store, email) {
        Some(user) => user,
        None => {
            log::warn!("Login failed: no user for {}", email);
            return Err(AppError::invalid_credentials());
        }
    };

    if !verify_password(password, &user.password_hash)? {
        log::warn!("Login failed: wrong password for {}", email);
        return Err(AppError::invalid_credentials());
    }

    log::info!("User {} logged in", user.id);
    Ok(user)
}

// ============================================================================
// Session Identity
// ============================================================================

/// The user the session is logged in as.
///
/// A session naming a user that does not exist (for example one signed before
/// a restart) is treated as anonymous.
pub fn current_user(store: &Store, session: &Session) -> Option<User> {
    session
        .user_id
        .as_deref()
        .and_then(|id| get_user_by_id(store, id))
}

/// Ensure `requester` owns `short_code`, returning the record if so
pub fn require_owner(
    store: &Store,
    short_code: &str,
    requester: Option<&str>,
) -> Result<UrlRecord, AppError> {
    let record = get_url(store, short_code).ok_or_else(|| AppError::url_not_found(short_code))?;

    if record.is_owned_by(requester) {
        Ok(record)
    } else {
        Err(AppError::not_owner(short_code))
    }
}
