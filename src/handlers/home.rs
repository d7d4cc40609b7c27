//! Landing page and the catch-all for unmatched routes.

use actix_web::{get, web, HttpRequest, HttpResponse};

use super::found;
use crate::errors::AppError;
use crate::models::Session;
use crate::services;
use crate::store::Store;

/// Send logged-in users to their URLs and everyone else to the login form
#[get("/")]
pub(super) async fn index(store: web::Data<Store>, session: Session) -> HttpResponse {
    match services::current_user(&store, &session) {
        Some(_) => found("/urls"),
        None => found("/login"),
    }
}

pub(super) async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(format!(
        "No route for {} {}",
        req.method(),
        req.path()
    )))
}
