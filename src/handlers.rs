use std::{num::IntErrorKind, sync::Arc, time::Instant};

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::{caller::CallerInfo, config::AppState, errors::FibError, fibonacci::fibonacci};

#[derive(Deserialize, Debug)]
pub struct FibQuery {
    n: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct FibResponse {
    pub n: u32,
    pub result: u64,
    pub duration_seconds: f64,
    pub function: &'static str,
    pub note: &'static str,
    pub caller_info: CallerInfo,
    pub instance_id: String,
}

#[derive(Serialize, Debug)]
pub struct RootResponse {
    app: &'static str,
    message: &'static str,
    max_n: u32,
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    status: &'static str,
}

/// Parses and bounds-checks `n` before any work is done.
pub fn parse_n(raw: Option<&str>, max: u32) -> Result<u32, FibError> {
    let raw = raw.ok_or_else(|| {
        FibError::Validation(format!("missing required parameter, usage: GET /fib/fibonacci?n=10 (0 <= n <= {})", max))
    })?;
    let trimmed = raw.trim();
    let n: i64 = trimmed.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        // still an integer, just one no bound could admit
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => FibError::Range {
            n: trimmed.to_string(),
            max,
        },
        _ => FibError::Validation(format!("{:?} is not an integer", raw)),
    })?;
    if n < 0 || n > max as i64 {
        return Err(FibError::Range { n: n.to_string(), max });
    }
    Ok(n as u32)
}

fn check_api_key(state: &AppState, headers: &HeaderMap) -> Result<(), FibError> {
    let Some(expected) = state.api_key.as_deref() else {
        return Ok(());
    };
    let provided = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    let matches = provided
        .map(|p| bool::from(p.as_bytes().ct_eq(expected.as_bytes())))
        .unwrap_or(false);
    if matches {
        Ok(())
    } else {
        Err(FibError::Forbidden)
    }
}

fn round4(secs: f64) -> f64 {
    (secs * 10_000.0).round() / 10_000.0
}

pub async fn fibonacci_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<FibQuery>, QueryRejection>,
) -> Result<Json<FibResponse>, FibError> {
    let instance_id = &state.instance_id;
    info!("[{}] function invoked", instance_id);

    if let Err(e) = check_api_key(&state, &headers) {
        warn!("[{}] authentication failed", instance_id);
        return Err(e);
    }

    let Query(query) = query.map_err(|e| FibError::Validation(e.body_text()))?;
    let n = parse_n(query.n.as_deref(), state.max_n)?;
    let caller_info = CallerInfo::from_headers(&headers);

    info!("[{}] starting fibonacci({}) from {}", instance_id, n, caller_info.source_ip);
    // the recursion blocks for as long as it takes, keep it off the async workers
    let (result, elapsed) = tokio::task::spawn_blocking(move || {
        let start = Instant::now();
        let result = fibonacci(n);
        (result, start.elapsed())
    })
    .await?;
    info!("[{}] completed in {:.2}s, result: {}", instance_id, elapsed.as_secs_f64(), result);

    Ok(Json(FibResponse {
        n,
        result,
        duration_seconds: round4(elapsed.as_secs_f64()),
        function: "fibonacci",
        note: "Calculated using recursive algorithm",
        caller_info,
        instance_id: instance_id.clone(),
    }))
}

pub async fn root(Extension(state): Extension<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        app: "fib-probe",
        message: "recursive fibonacci probe, GET /fib/fibonacci?n=<int>",
        max_n: state.max_n,
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
