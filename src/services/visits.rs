//! Visit tracking for followed short links.
//!
//! "Unique" means new to this browser session, not new to the world: a visitor
//! who clears their cookies is counted as unique again.

use chrono::Utc;

use super::helpers::generate_visitor_id;
use super::urls::{get_url, record_visit};
use crate::errors::AppError;
use crate::models::{Session, UrlRecord, VisitLogEntry};
use crate::store::Store;

/// Record that the session followed `short_code` and return the updated record.
///
/// The session gains a visitor ID on its first tracked visit and remembers
/// every code it has followed. An unknown code leaves the session untouched.
pub fn track_visit(
    store: &Store,
    session: &mut Session,
    short_code: &str,
) -> Result<UrlRecord, AppError> {
    if get_url(store, short_code).is_none() {
        return Err(AppError::url_not_found(short_code));
    }

    let visitor_id = session
        .visitor_id
        .get_or_insert_with(generate_visitor_id)
        .clone();
    let first_visit = !session.visited_codes.contains(short_code);

    let entry = VisitLogEntry {
        visitor_id,
        timestamp: Utc::now(),
    };

    // The code can disappear between the lookup and the update
    let record = record_visit(store, short_code, entry, first_visit)
        .ok_or_else(|| AppError::url_not_found(short_code))?;

    if first_visit {
        session.visited_codes.insert(short_code.to_string());
    }

    log::debug!(
        "Visit to {} (first for this session: {}, total: {}, unique: {})",
        short_code,
        first_visit,
        record.visits.total,
        record.visits.unique
    );

    Ok(record)
}
