use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

static METRICS_ENABLED: OnceLock<bool> = OnceLock::new();

/// True once [`init_metrics`] installed a recorder. Stays false in tests.
pub fn is_metrics_enabled() -> bool {
    METRICS_ENABLED.get().copied().unwrap_or(false)
}

fn enabled_in_env() -> bool {
    std::env::var("METRICS_ENABLED")
        .map(|v| v.to_lowercase() != "false" && v != "0")
        .unwrap_or(true)
}

/// Installs the Prometheus recorder and its upkeep task.
/// Returns `None` when `METRICS_ENABLED` turns metrics off.
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !enabled_in_env() {
        let _ = METRICS_ENABLED.set(false);
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    let _ = METRICS_ENABLED.set(true);
    Ok(Some(handle))
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_metrics_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);
    gauge!("http_requests_active").decrement(1.0);

    response
}

pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_signup(role: &str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("signups_total", "role" => role.to_string()).increment(1);
}

pub fn track_login_success(role: &str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("user_logins_total", "role" => role.to_string(), "status" => "success").increment(1);
}

pub fn track_login_failure() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("user_logins_total", "role" => "unknown", "status" => "failure").increment(1);
}

pub fn track_jwt_issued() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("jwt_tokens_issued_total").increment(1);
}

/// `result` is `valid` or a rejection reason such as `expired`.
pub fn track_jwt_validation(result: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("jwt_validations_total", "result" => result).increment(1);
}

pub fn track_authorization_denied(action: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("authorization_denied_total", "action" => action).increment(1);
}
