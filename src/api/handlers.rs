//! HTTP API handlers.

use std::any::Any;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use tracing::{debug, info};

use super::routes::{endpoints, Endpoint};
use crate::error::ApiError;
use crate::info::{current_timestamp, ServiceInfo, StartTime, SystemInfo, SERVICE};

/// Application state shared with handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppState {
    /// Process start time, captured once.
    pub start: StartTime,
}

impl AppState {
    /// Create new app state starting the uptime clock now.
    pub fn new() -> Self {
        Self::with_start(StartTime::now())
    }

    /// Create app state from an existing start time.
    pub fn with_start(start: StartTime) -> Self {
        Self { start }
    }
}

/// Response for the info route.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    /// Static service metadata.
    pub service: ServiceInfo,
    /// Host facts.
    pub system: SystemInfo,
    /// Uptime and clock.
    pub runtime: RuntimeInfo,
    /// Facts about the current request.
    pub request: RequestInfo,
    /// Every exposed route.
    pub endpoints: Vec<Endpoint>,
}

/// Uptime and clock section of the info response.
#[derive(Debug, Serialize)]
pub struct RuntimeInfo {
    /// Whole seconds since startup.
    pub uptime_seconds: u64,
    /// "<H> hours, <M> minutes".
    pub uptime_human: String,
    /// Current UTC time, RFC 3339.
    pub current_time: String,
    /// Always "UTC".
    pub timezone: &'static str,
}

/// Request section of the info response.
#[derive(Debug, Serialize)]
pub struct RequestInfo {
    /// Peer IP address, empty when unknown.
    pub client_ip: String,
    /// User-Agent header, "Unknown" when absent.
    pub user_agent: String,
    /// Request method.
    pub method: String,
    /// Request URI path.
    pub path: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: &'static str,
    /// Current UTC time, RFC 3339.
    pub timestamp: String,
    /// Whole seconds since startup.
    pub uptime_seconds: u64,
}

/// Info handler - service, host, runtime and request metadata.
pub async fn index(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Result<Json<InfoResponse>, ApiError> {
    let path = request_path(&uri);
    info!("Request received: {} {}", method, path);

    let uptime = state.start.uptime();
    let system = SystemInfo::collect().map_err(ApiError::internal)?;
    let current_time = current_timestamp().map_err(ApiError::internal)?;

    let client_ip = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default();
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("Unknown")
        .to_string();

    Ok(Json(InfoResponse {
        service: SERVICE,
        system,
        runtime: RuntimeInfo {
            uptime_seconds: uptime.seconds,
            uptime_human: uptime.human(),
            current_time,
            timezone: "UTC",
        },
        request: RequestInfo {
            client_ip,
            user_agent,
            method: method.to_string(),
            path,
        },
        endpoints: endpoints(),
    }))
}

/// Health check handler - always healthy.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    debug!("Health check requested");

    Ok(Json(HealthResponse {
        status: "healthy",
        timestamp: current_timestamp().map_err(ApiError::internal)?,
        uptime_seconds: state.start.uptime().seconds,
    }))
}

/// Fallback for any path without a route.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        path: request_path(&uri),
    }
}

/// Percent-decoded request path. Invalid UTF-8 is replaced, not rejected.
fn request_path(uri: &Uri) -> String {
    percent_decode_str(uri.path())
        .decode_utf8_lossy()
        .into_owned()
}

/// Turn a handler panic into the generic 500 response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(cause).into_response()
}
