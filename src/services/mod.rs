//! Business logic layer.
//!
//! Plain functions over the in-memory [`Store`](crate::store::Store) and the
//! caller's session; nothing in here knows about HTTP.

mod helpers;
mod auth;
mod urls;
mod users;
mod visits;

pub use auth::*;
pub use urls::*;
pub use visits::*;
