//! Application-wide constants.
//!
//! Centralizes magic numbers and strings for better maintainability.

// ============================================================================
// Identifier Constants
// ============================================================================

/// Characters used for generating identifiers (URL-safe alphanumeric)
pub const ID_ALPHABET: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

/// Default length of generated short codes
pub const DEFAULT_SHORT_CODE_LENGTH: usize = 6;

/// Length of generated user IDs
pub const USER_ID_LENGTH: usize = 8;

/// Length of generated visitor IDs
pub const VISITOR_ID_LENGTH: usize = 8;

/// Maximum attempts at finding an unused identifier before giving up
pub const MAX_ID_GENERATION_RETRIES: u32 = 10;

// ============================================================================
// Session Constants
// ============================================================================

/// Name of the signed cookie carrying the session payload
pub const SESSION_COOKIE_NAME: &str = "session";

/// Default session lifetime in hours
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Longest accepted session lifetime in hours (one year)
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Name plus value size above which browsers start dropping a cookie
pub const MAX_COOKIE_BYTES: usize = 4096;

/// Minimum length of a configured session signing secret, in bytes
pub const MIN_SESSION_SECRET_LENGTH: usize = 64;

// ============================================================================
// Metrics Constants
// ============================================================================

/// Namespace prefixed to every exported metric
pub const METRICS_NAMESPACE: &str = "tinyapp";
