//! User directory: account lookup and creation.

use std::collections::hash_map::Entry;

use super::helpers::generate_user_id;
use crate::constants::MAX_ID_GENERATION_RETRIES;
use crate::errors::AppError;
use crate::models::User;
use crate::store::Store;

/// Find the user registered with `email`.
///
/// Linear scan over the users table; emails are unique so at most one user
/// can match.
pub fn find_user_by_email(store: &Store, email: &str) -> Option<User> {
    store
        .users()
        .values()
        .find(|user| user.email == email)
        .cloned()
}

/// Get a user by ID
pub fn get_user_by_id(store: &Store, user_id: &str) -> Option<User> {
    store.users().get(user_id).cloned()
}

/// Create a user from an email and an already computed password hash.
///
/// The email check and the insert happen under one write lock, so two
/// registrations racing for the same email cannot both succeed. A generated ID
/// that is already taken is regenerated, never overwritten.
pub fn create_user(store: &Store, email: &str, password_hash: &str) -> Result<User, AppError> {
    let mut users = store.users_mut();

    if users.values().any(|user| user.email == email) {
        return Err(AppError::email_taken(email));
    }

    for _ in 0..MAX_ID_GENERATION_RETRIES {
        if let Entry::Vacant(slot) = users.entry(generate_user_id()) {
            let user = User {
                id: slot.key().clone(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            };
            slot.insert(user.clone());
            log::info!("Registered new user: {} (ID: {})", user.email, user.id);
            return Ok(user);
        }
    }

    Err(AppError::internal("Failed to generate a unique user ID"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_store;

    #[test]
    fn test_find_user_by_email_returns_match() {
        let store = setup_test_store();
        let user = create_user(&store, "user@example.com", "hash1").unwrap();
        create_user(&store, "user2@example.com", "hash2").unwrap();

        let found = find_user_by_email(&store, "user@example.com").unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.email, "user@example.com");
    }

    #[test]
    fn test_find_user_by_email_unknown_is_none() {
        let store = setup_test_store();
        create_user(&store, "user@example.com", "hash1").unwrap();

        assert!(find_user_by_email(&store, "notarealemail@yahoo.gov").is_none());
    }

    #[test]
    fn test_find_user_by_email_is_exact() {
        let store = setup_test_store();
        create_user(&store, "user@example.com", "hash1").unwrap();

        assert!(find_user_by_email(&store, "USER@example.com").is_none());
        assert!(find_user_by_email(&store, "").is_none());
    }

    #[test]
    fn test_create_user_rejects_duplicate_email() {
        let store = setup_test_store();
        create_user(&store, "user@example.com", "hash1").unwrap();

        let result = create_user(&store, "user@example.com", "hash2");
        assert!(matches!(result, Err(AppError::EmailAlreadyExists(_))));
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn test_get_user_by_id() {
        let store = setup_test_store();
        let user = create_user(&store, "user@example.com", "hash1").unwrap();

        assert_eq!(get_user_by_id(&store, &user.id), Some(user));
        assert!(get_user_by_id(&store, "missing").is_none());
    }

    #[test]
    fn test_create_user_assigns_distinct_ids() {
        let store = setup_test_store();
        let ids: std::collections::HashSet<String> = (0..50)
            .map(|i| {
                create_user(&store, &format!("user{}@example.com", i), "hash")
                    .unwrap()
                    .id
            })
            .collect();
        assert_eq!(ids.len(), 50);
        assert_eq!(store.user_count(), 50);
    }
}
