//! Redirect endpoint handler.

use actix_web::{get, web, HttpResponse};

use super::found_with_cookie;
use crate::errors::AppError;
use crate::metrics::AppMetrics;
use crate::models::Session;
use crate::services;
use crate::session::SessionKey;
use crate::store::Store;

/// Redirect to the long URL behind a short code.
///
/// Every followed link is counted; the updated session cookie goes back with
/// the redirect so repeat visits from this browser are not counted as unique.
#[get("/u/{short_code}")]
pub(super) async fn follow_short_url(
    store: web::Data<Store>,
    session_key: web::Data<SessionKey>,
    metrics: Option<web::Data<AppMetrics>>,
    mut session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let short_code = path.into_inner();
    let first_visit = !session.visited_codes.contains(&short_code);

    let record = services::track_visit(&store, &mut session, &short_code)?;

    if let Some(ref m) = metrics {
        m.record_redirect(first_visit);
    }

    log::info!(
        "Redirecting {} -> {} (visits: {}, unique: {})",
        short_code,
        record.long_url,
        record.visits.total,
        record.visits.unique
    );

    let cookie = session_key.seal(&session)?;
    Ok(found_with_cookie(&record.long_url, cookie))
}
