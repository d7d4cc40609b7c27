//! Data models, form inputs and view models for the URL shortener.
//!
//! Contains the in-memory records, the form bodies the routes accept and the
//! JSON views they render.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Stored Records
// ============================================================================

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique identifier
    pub id: String,
    /// User's email address, unique across all users
    pub email: String,
    /// Argon2 PHC string of the user's password
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// One followed short link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitLogEntry {
    /// Session-scoped visitor identifier
    pub visitor_id: String,
    /// When the link was followed
    pub timestamp: DateTime<Utc>,
}

/// Visit counters and log for a URL
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VisitStats {
    /// Every followed redirect
    pub total: u64,
    /// Redirects from sessions that had not followed this link before
    pub unique: u64,
    /// Chronological visit log
    pub log: Vec<VisitLogEntry>,
}

/// A shortened URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UrlRecord {
    /// The short code (e.g., "b2xVn2")
    pub short_code: String,
    /// Destination of the redirect
    pub long_url: String,
    /// User who created the URL; never changes
    pub owner_id: String,
    /// When the URL was created
    pub created_at: DateTime<Utc>,
    /// Visit analytics
    pub visits: VisitStats,
}

impl UrlRecord {
    /// Create a record with zeroed visit stats
    pub fn new(short_code: String, long_url: String, owner_id: String) -> Self {
        Self {
            short_code,
            long_url,
            owner_id,
            created_at: Utc::now(),
            visits: VisitStats::default(),
        }
    }

    /// Whether `requester` is the owner of this URL
    pub fn is_owned_by(&self, requester: Option<&str>) -> bool {
        requester == Some(self.owner_id.as_str())
    }
}

/// Per-browser session state carried in the signed session cookie
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Logged-in user, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Identifier recorded in visit logs, assigned on the first followed link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visitor_id: Option<String>,
    /// Short codes this browser has already followed
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub visited_codes: BTreeSet<String>,
}

impl Session {
    /// Bind the session to a user
    pub fn log_in(&mut self, user_id: &str) {
        self.user_id = Some(user_id.to_string());
    }
}

// ============================================================================
// Form Inputs
// ============================================================================

/// Form body for login and registration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CredentialsForm {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Form body for creating or editing a URL
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LongUrlForm {
    #[serde(rename = "longURL", alias = "long_url")]
    #[validate(length(min = 1, max = 2048, message = "A URL of at most 2048 characters is required"))]
    pub long_url: String,
}

// ============================================================================
// View Models
// ============================================================================

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserView {
    pub id: String,
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
        }
    }
}

/// Summary of a URL as listed on the index page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlView {
    /// The short code
    pub short_code: String,
    /// The full short URL
    pub short_url: String,
    /// The destination URL
    pub long_url: String,
    /// When created
    pub created_at: DateTime<Utc>,
    /// Number of followed redirects
    pub total_visits: u64,
    /// Number of distinct sessions that followed the link
    pub unique_visits: u64,
}

impl UrlView {
    /// Create a UrlView from a record and base URL
    pub fn from_record(record: &UrlRecord, base_url: &str) -> Self {
        Self {
            short_code: record.short_code.clone(),
            short_url: format!("{}/u/{}", base_url, record.short_code),
            long_url: record.long_url.clone(),
            created_at: record.created_at,
            total_visits: record.visits.total,
            unique_visits: record.visits.unique,
        }
    }
}

/// View for `GET /urls`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlListView {
    pub user: UserView,
    /// Total count of URLs
    pub total: usize,
    pub urls: Vec<UrlView>,
}

/// View for `GET /urls/{short_code}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlDetailView {
    pub user: UserView,
    pub url: UrlView,
    /// Every recorded visit, oldest first
    pub visits: Vec<VisitLogEntry>,
}

/// Which form a form view renders
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Login,
    Register,
    NewUrl,
}

/// View for the form pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormView {
    pub form: FormKind,
    pub user: Option<UserView>,
}

impl FormView {
    pub fn new(form: FormKind, user: Option<&User>) -> Self {
        Self {
            form,
            user: user.map(UserView::from),
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code (for programmatic handling)
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}
