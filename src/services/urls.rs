//! URL directory: creation, lookup, owner-only edits and per-user listings.

use std::collections::hash_map::Entry;

use super::helpers::generate_short_code;
use crate::constants::MAX_ID_GENERATION_RETRIES;
use crate::errors::AppError;
use crate::models::{UrlRecord, VisitLogEntry};
use crate::store::Store;

/// Create a new shortened URL owned by `owner_id`
pub fn create_url(
    store: &Store,
    long_url: &str,
    owner_id: &str,
    code_length: usize,
) -> Result<UrlRecord, AppError> {
    let mut urls = store.urls_mut();

    for _ in 0..MAX_ID_GENERATION_RETRIES {
        if let Entry::Vacant(slot) = urls.entry(generate_short_code(code_length)) {
            let record = UrlRecord::new(
                slot.key().clone(),
                long_url.to_string(),
                owner_id.to_string(),
            );
            slot.insert(record.clone());
            log::info!(
                "Created short URL: {} -> {} (user: {})",
                record.short_code,
                record.long_url,
                owner_id
            );
            return Ok(record);
        }
    }

    Err(AppError::internal("Failed to generate unique short code"))
}

/// Get a URL by its short code (no ownership check)
pub fn get_url(store: &Store, short_code: &str) -> Option<UrlRecord> {
    store.urls().get(short_code).cloned()
}

/// Point a short code at a new destination.
///
/// Only the owner may do this; anonymous requesters are always denied.
pub fn update_long_url(
    store: &Store,
    short_code: &str,
    new_url: &str,
    requester: Option<&str>,
) -> Result<UrlRecord, AppError> {
    let mut urls = store.urls_mut();
    let record = urls
        .get_mut(short_code)
        .ok_or_else(|| AppError::url_not_found(short_code))?;

    if !record.is_owned_by(requester) {
        log::warn!(
            "Rejected update of {} by non-owner {:?}",
            short_code,
            requester
        );
        return Err(AppError::not_owner(short_code));
    }

    record.long_url = new_url.to_string();
    log::info!("Updated short URL: {} -> {}", short_code, new_url);
    Ok(record.clone())
}

/// Delete a URL (owner only), returning the removed record
pub fn delete_url(
    store: &Store,
    short_code: &str,
    requester: Option<&str>,
) -> Result<UrlRecord, AppError> {
    let mut urls = store.urls_mut();
    let record = urls
        .get(short_code)
        .ok_or_else(|| AppError::url_not_found(short_code))?;

    if !record.is_owned_by(requester) {
        log::warn!(
            "Rejected deletion of {} by non-owner {:?}",
            short_code,
            requester
        );
        return Err(AppError::not_owner(short_code));
    }

    let removed = urls
        .remove(short_code)
        .ok_or_else(|| AppError::url_not_found(short_code))?;
    log::info!("Deleted short URL: {} (user: {})", short_code, removed.owner_id);
    Ok(removed)
}

/// List the URLs owned by a user, oldest first.
///
/// `None` in means "no identity" and yields `None` out, which the routes turn
/// into a prompt to log in. A known user without URLs gets an empty list.
pub fn list_urls_for_user(store: &Store, user_id: Option<&str>) -> Option<Vec<UrlRecord>> {
    let user_id = user_id?;

    let mut owned: Vec<UrlRecord> = store
        .urls()
        .values()
        .filter(|record| record.owner_id == user_id)
        .cloned()
        .collect();
    owned.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.short_code.cmp(&b.short_code))
    });

    Some(owned)
}

/// Count one followed redirect and append it to the visit log.
///
/// Returns the updated record, or `None` if the code no longer exists.
pub fn record_visit(
    store: &Store,
    short_code: &str,
    entry: VisitLogEntry,
    first_visit: bool,
) -> Option<UrlRecord> {
    let mut urls = store.urls_mut();
    let record = urls.get_mut(short_code)?;

    record.visits.total += 1;
    if first_visit {
        record.visits.unique += 1;
    }
    record.visits.log.push(entry);

    Some(record.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_url, setup_test_store};
    use chrono::Utc;

    #[test]
    fn test_create_and_get_url() {
        let store = setup_test_store();

        let url = create_url(&store, "http://example.com", "user1", 6).unwrap();
        assert_eq!(url.short_code.len(), 6);
        assert_eq!(url.long_url, "http://example.com");
        assert_eq!(url.owner_id, "user1");
        assert_eq!(url.visits.total, 0);

        let retrieved = get_url(&store, &url.short_code).unwrap();
        assert_eq!(retrieved, url);
    }

    #[test]
    fn test_get_unknown_url_is_none() {
        let store = setup_test_store();
        assert!(get_url(&store, "nope").is_none());
    }

    #[test]
    fn test_update_long_url_by_owner() {
        let store = setup_test_store();
        let url = create_test_url(&store, "user1", "http://example.com");

        let updated =
            update_long_url(&store, &url.short_code, "http://example.org", Some("user1")).unwrap();
        assert_eq!(updated.long_url, "http://example.org");
        assert_eq!(updated.owner_id, "user1");
        assert_eq!(
            get_url(&store, &url.short_code).unwrap().long_url,
            "http://example.org"
        );
    }

    #[test]
    fn test_update_long_url_denied_for_non_owners() {
        let store = setup_test_store();
        let url = create_test_url(&store, "user1", "http://example.com");

        for requester in [Some("user2"), Some(""), None] {
            let result = update_long_url(&store, &url.short_code, "http://evil.com", requester);
            assert!(matches!(result, Err(AppError::Unauthorized(_))));
        }

        assert_eq!(
            get_url(&store, &url.short_code).unwrap().long_url,
            "http://example.com"
        );
    }

    #[test]
    fn test_update_unknown_url_is_not_found() {
        let store = setup_test_store();
        let result = update_long_url(&store, "nope", "http://example.org", Some("user1"));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_delete_url_ownership() {
        let store = setup_test_store();
        let url = create_test_url(&store, "user1", "http://example.com");

        // Non-owners cannot delete it
        let result = delete_url(&store, &url.short_code, Some("user2"));
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        let result = delete_url(&store, &url.short_code, None);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert!(get_url(&store, &url.short_code).is_some());

        // The owner can
        let removed = delete_url(&store, &url.short_code, Some("user1")).unwrap();
        assert_eq!(removed.short_code, url.short_code);
        assert!(get_url(&store, &url.short_code).is_none());

        // And a second delete finds nothing
        let result = delete_url(&store, &url.short_code, Some("user1"));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_list_urls_for_user() {
        let store = setup_test_store();

        for i in 0..3 {
            create_test_url(&store, "user1", &format!("http://example{}.com", i));
        }
        for i in 0..2 {
            create_test_url(&store, "user2", &format!("http://other{}.com", i));
        }

        let user1_urls = list_urls_for_user(&store, Some("user1")).unwrap();
        assert_eq!(user1_urls.len(), 3);
        assert!(user1_urls.iter().all(|u| u.owner_id == "user1"));

        let user2_urls = list_urls_for_user(&store, Some("user2")).unwrap();
        assert_eq!(user2_urls.len(), 2);
        assert!(user2_urls.iter().all(|u| u.owner_id == "user2"));
    }

    #[test]
    fn test_list_urls_for_user_without_urls_is_empty() {
        let store = setup_test_store();
        create_test_url(&store, "user1", "http://example.com");

        let urls = list_urls_for_user(&store, Some("user3")).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn test_list_urls_without_identity_is_none() {
        let store = setup_test_store();
        create_test_url(&store, "user1", "http://example.com");

        assert!(list_urls_for_user(&store, None).is_none());
    }

    #[test]
    fn test_list_urls_is_oldest_first() {
        let store = setup_test_store();
        let now = Utc::now();

        for (code, age_minutes) in [("newest", 1), ("oldest", 30), ("middle", 10)] {
            let mut record =
                UrlRecord::new(code.into(), format!("http://{}.com", code), "user1".into());
            record.created_at = now - chrono::Duration::minutes(age_minutes);
            store.urls_mut().insert(code.into(), record);
        }

        let codes: Vec<String> = list_urls_for_user(&store, Some("user1"))
            .unwrap()
            .into_iter()
            .map(|u| u.short_code)
            .collect();
        assert_eq!(codes, vec!["oldest", "middle", "newest"]);
    }

    #[test]
    fn test_record_visit() {
        let store = setup_test_store();
        let url = create_test_url(&store, "user1", "http://example.com");

        let entry = VisitLogEntry {
            visitor_id: "visitor1".into(),
            timestamp: Utc::now(),
        };
        let updated = record_visit(&store, &url.short_code, entry.clone(), true).unwrap();
        assert_eq!(updated.visits.total, 1);
        assert_eq!(updated.visits.unique, 1);

        let updated = record_visit(&store, &url.short_code, entry, false).unwrap();
        assert_eq!(updated.visits.total, 2);
        assert_eq!(updated.visits.unique, 1);
        assert_eq!(updated.visits.log.len(), 2);
    }

    #[test]
    fn test_record_visit_unknown_code() {
        let store = setup_test_store();
        let entry = VisitLogEntry {
            visitor_id: "visitor1".into(),
            timestamp: Utc::now(),
        };
        assert!(record_visit(&store, "nope", entry, true).is_none());
    }
}
