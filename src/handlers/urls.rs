//! URL endpoint handlers: listing, creation, detail, edit and delete.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use super::{found, see_other};
use crate::config::Config;
use crate::errors::AppError;
use crate::metrics::AppMetrics;
use crate::models::{
    FormKind, FormView, LongUrlForm, Session, UrlDetailView, UrlListView, UrlView, UserView,
};
use crate::services;
use crate::store::Store;

/// List the caller's URLs
#[get("/urls")]
pub(super) async fn list_urls(
    store: web::Data<Store>,
    config: web::Data<Config>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let user = services::current_user(&store, &session)
        .ok_or_else(|| AppError::login_required("view your URLs"))?;

    let urls: Vec<UrlView> = services::list_urls_for_user(&store, Some(&user.id))
        .unwrap_or_default()
        .iter()
        .map(|record| UrlView::from_record(record, &config.base_url))
        .collect();

    let response = UrlListView {
        user: UserView::from(&user),
        total: urls.len(),
        urls,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Show the new-URL form; anonymous callers get the login form instead
#[get("/urls/new")]
pub(super) async fn new_url_form(store: web::Data<Store>, session: Session) -> HttpResponse {
    let view = match services::current_user(&store, &session) {
        Some(user) => FormView::new(FormKind::NewUrl, Some(&user)),
        None => FormView::new(FormKind::Login, None),
    };

    HttpResponse::Ok().json(view)
}

/// Shorten a URL for the logged-in user
#[post("/urls")]
pub(super) async fn create_url(
    store: web::Data<Store>,
    config: web::Data<Config>,
    metrics: Option<web::Data<AppMetrics>>,
    session: Session,
    form: Option<web::Form<LongUrlForm>>,
) -> Result<HttpResponse, AppError> {
    let user = services::current_user(&store, &session)
        .ok_or_else(|| AppError::login_required("create short URLs"))?;

    let form = form.map(web::Form::into_inner).unwrap_or_default();
    form.validate()
        .map_err(|e| AppError::validation(format!("Invalid input: {}", e)))?;

    let record =
        services::create_url(&store, &form.long_url, &user.id, config.short_code_length)?;

    if let Some(ref m) = metrics {
        m.record_url_created();
    }

    Ok(found(&format!("/urls/{}", record.short_code)))
}

/// Detail view with counters and the visit log (owner only)
#[get("/urls/{short_code}")]
pub(super) async fn show_url(
    store: web::Data<Store>,
    config: web::Data<Config>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let short_code = path.into_inner();
    let user = services::current_user(&store, &session);

    let record =
        services::require_owner(&store, &short_code, user.as_ref().map(|u| u.id.as_str()))?;
    // An owned record implies a logged-in requester
    let user = user.ok_or_else(|| AppError::not_owner(&short_code))?;

    let response = UrlDetailView {
        user: UserView::from(&user),
        url: UrlView::from_record(&record, &config.base_url),
        visits: record.visits.log.clone(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Point a short code at a new destination (owner only)
#[put("/urls/{short_code}")]
pub(super) async fn update_url(
    store: web::Data<Store>,
    session: Session,
    path: web::Path<String>,
    form: Option<web::Form<LongUrlForm>>,
) -> Result<HttpResponse, AppError> {
    let short_code = path.into_inner();
    let user = services::current_user(&store, &session);
    let requester = user.as_ref().map(|u| u.id.as_str());

    services::require_owner(&store, &short_code, requester)?;

    let form = form.map(web::Form::into_inner).unwrap_or_default();
    form.validate()
        .map_err(|e| AppError::validation(format!("Invalid input: {}", e)))?;

    services::update_long_url(&store, &short_code, &form.long_url, requester)?;

    Ok(see_other("/urls"))
}

/// Delete a short code (owner only)
#[delete("/urls/{short_code}")]
pub(super) async fn delete_url(
    store: web::Data<Store>,
    metrics: Option<web::Data<AppMetrics>>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let short_code = path.into_inner();
    let user = services::current_user(&store, &session);

    services::delete_url(&store, &short_code, user.as_ref().map(|u| u.id.as_str()))?;

    if let Some(ref m) = metrics {
        m.record_url_deleted();
    }

    Ok(see_other("/urls"))
}
