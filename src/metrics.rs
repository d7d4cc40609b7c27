//! Prometheus metrics module for the URL shortener.
//!
//! Defines business metrics for redirects, visit uniqueness, URL lifecycle and
//! account activity.

use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::constants::METRICS_NAMESPACE;

/// Application metrics for Prometheus monitoring
#[derive(Clone)]
pub struct AppMetrics {
    /// Total short-link redirects performed
    pub redirects_total: Counter,
    /// Redirects that were the first for their session
    pub unique_visits_total: Counter,
    /// Total URLs created
    pub urls_created_total: Counter,
    /// Total URLs deleted
    pub urls_deleted_total: Counter,
    /// Total accounts registered
    pub registrations_total: Counter,
    /// Login attempts with result label (success, failure)
    pub login_attempts_total: CounterVec,
}

impl AppMetrics {
    /// Create and register all custom metrics with the given Prometheus registry
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let redirects_total = Counter::with_opts(
            Opts::new("redirects_total", "Total short-link redirects performed")
                .namespace(METRICS_NAMESPACE),
        )?;
        registry.register(Box::new(redirects_total.clone()))?;

        let unique_visits_total = Counter::with_opts(
            Opts::new("unique_visits_total", "Redirects that were new to their session")
                .namespace(METRICS_NAMESPACE),
        )?;
        registry.register(Box::new(unique_visits_total.clone()))?;

        let urls_created_total = Counter::with_opts(
            Opts::new("urls_created_total", "Total URLs created").namespace(METRICS_NAMESPACE),
        )?;
        registry.register(Box::new(urls_created_total.clone()))?;

        let urls_deleted_total = Counter::with_opts(
            Opts::new("urls_deleted_total", "Total URLs deleted").namespace(METRICS_NAMESPACE),
        )?;
        registry.register(Box::new(urls_deleted_total.clone()))?;

        let registrations_total = Counter::with_opts(
            Opts::new("registrations_total", "Total accounts registered")
                .namespace(METRICS_NAMESPACE),
        )?;
        registry.register(Box::new(registrations_total.clone()))?;

        let login_attempts_total = CounterVec::new(
            Opts::new("login_attempts_total", "Total login attempts").namespace(METRICS_NAMESPACE),
            &["result"],
        )?;
        registry.register(Box::new(login_attempts_total.clone()))?;

        Ok(Self {
            redirects_total,
            unique_visits_total,
            urls_created_total,
            urls_deleted_total,
            registrations_total,
            login_attempts_total,
        })
    }

    /// Record a followed short link
    pub fn record_redirect(&self, first_visit: bool) {
        self.redirects_total.inc();
        if first_visit {
            self.unique_visits_total.inc();
        }
    }

    /// Record a URL creation
    pub fn record_url_created(&self) {
        self.urls_created_total.inc();
    }

    /// Record a URL deletion
    pub fn record_url_deleted(&self) {
        self.urls_deleted_total.inc();
    }

    /// Record a new account
    pub fn record_registration(&self) {
        self.registrations_total.inc();
    }

    /// Record a login attempt
    pub fn record_login(&self, success: bool) {
        let result = if success { "success" } else { "failure" };
        self.login_attempts_total.with_label_values(&[result]).inc();
    }
}

/// Render every metric in the registry in the Prometheus text format
pub fn render(registry: &Registry) -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
