//! In-memory storage for users and URLs.
//!
//! Each table sits behind its own `RwLock`; the services borrow guards from
//! here the way they would borrow a pooled connection. Nothing is persisted.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashMap;

use crate::models::{UrlRecord, User};

/// Users keyed by ID
pub type UserTable = HashMap<String, User>;

/// URLs keyed by short code
pub type UrlTable = HashMap<String, UrlRecord>;

/// Process-wide application state shared by every request
#[derive(Debug, Default)]
pub struct Store {
    users: RwLock<UserTable>,
    urls: RwLock<UrlTable>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the users table
    pub fn users(&self) -> RwLockReadGuard<'_, UserTable> {
        self.users.read()
    }

    /// Write access to the users table
    pub fn users_mut(&self) -> RwLockWriteGuard<'_, UserTable> {
        self.users.write()
    }

    /// Read access to the URLs table
    pub fn urls(&self) -> RwLockReadGuard<'_, UrlTable> {
        self.urls.read()
    }

    /// Write access to the URLs table
    pub fn urls_mut(&self) -> RwLockWriteGuard<'_, UrlTable> {
        self.urls.write()
    }

    /// Number of registered users
    pub fn user_count(&self) -> usize {
        self.users().len()
    }

    /// Number of stored URLs
    pub fn url_count(&self) -> usize {
        self.urls().len()
    }
}
