//! HTTP request handlers for the URL shortener.
//!
//! Defines all route handlers and configures the routing table.

mod auth;
mod health;
mod home;
mod redirect;
mod urls;

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{web, HttpResponse};

/// Configure all application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home::index)
        // Auth routes
        .service(auth::login_form)
        .service(auth::register_form)
        .service(auth::login)
        .service(auth::register)
        .service(auth::logout)
        // URL routes (/urls/new must be registered before /urls/{short_code})
        .service(urls::new_url_form)
        .service(urls::list_urls)
        .service(urls::create_url)
        .service(urls::show_url)
        .service(urls::update_url)
        .service(urls::delete_url)
        .service(redirect::follow_short_url)
        .service(health::health_check)
        .service(health::metrics_endpoint)
        .default_service(web::to(home::not_found));
}

/// 302 Found
fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, location))
        .finish()
}

/// 302 Found that also sets (or removes) the session cookie
fn found_with_cookie(location: &str, cookie: Cookie<'static>) -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, location))
        .cookie(cookie)
        .finish()
}

/// 303 See Other, sent after PUT and DELETE so the browser follows up with GET
fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header((header::LOCATION, location))
        .finish()
}
