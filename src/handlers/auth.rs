//! Auth endpoint handlers: login, registration and logout.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use super::{found, found_with_cookie};
use crate::errors::AppError;
use crate::metrics::AppMetrics;
use crate::models::{CredentialsForm, FormKind, FormView, Session};
use crate::services;
use crate::session::SessionKey;
use crate::store::Store;

/// Show the login form, or skip it when already logged in
#[get("/login")]
pub(super) async fn login_form(store: web::Data<Store>, session: Session) -> HttpResponse {
    match services::current_user(&store, &session) {
        Some(_) => found("/urls"),
        None => HttpResponse::Ok().json(FormView::new(FormKind::Login, None)),
    }
}

/// Show the registration form, or skip it when already logged in
#[get("/register")]
pub(super) async fn register_form(store: web::Data<Store>, session: Session) -> HttpResponse {
    match services::current_user(&store, &session) {
        Some(_) => found("/urls"),
        None => HttpResponse::Ok().json(FormView::new(FormKind::Register, None)),
    }
}

/// Log in with email and password
#[post("/login")]
pub(super) async fn login(
    store: web::Data<Store>,
    session_key: web::Data<SessionKey>,
    metrics: Option<web::Data<AppMetrics>>,
    mut session: Session,
    form: Option<web::Form<CredentialsForm>>,
) -> Result<HttpResponse, AppError> {
    // A missing or unreadable body is treated as empty fields
    let form = form.map(web::Form::into_inner).unwrap_or_default();
    form.validate()
        .map_err(|_| AppError::missing_credentials())?;

    let result = services::login_user(&store, &form.email, &form.password);
    if let Some(ref m) = metrics {
        m.record_login(result.is_ok());
    }
    let user = result?;

    session.log_in(&user.id);
    let cookie = session_key.seal(&session)?;

    Ok(found_with_cookie("/urls", cookie))
}

/// Register a new account and log it in
#[post("/register")]
pub(super) async fn register(
    store: web::Data<Store>,
    session_key: web::Data<SessionKey>,
    metrics: Option<web::Data<AppMetrics>>,
    mut session: Session,
    form: Option<web::Form<CredentialsForm>>,
) -> Result<HttpResponse, AppError> {
    let form = form.map(web::Form::into_inner).unwrap_or_default();
    form.validate()
        .map_err(|_| AppError::missing_credentials())?;

    let user = services::register_user(&store, &form.email, &form.password)?;
    if let Some(ref m) = metrics {
        m.record_registration();
    }

    session.log_in(&user.id);
    let cookie = session_key.seal(&session)?;

    Ok(found_with_cookie("/urls", cookie))
}

/// Forget the session entirely, visit tracking included
#[post("/logout")]
pub(super) async fn logout(session: Session) -> HttpResponse {
    if let Some(user_id) = session.user_id.as_deref() {
        log::info!("User {} logged out", user_id);
    }

    found_with_cookie("/login", SessionKey::removal_cookie())
}
