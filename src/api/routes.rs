//! HTTP API route definitions.
//!
//! Routes live in a static table checked in registration order. The same
//! table backs the `endpoints` list of the info response, so the two cannot
//! drift apart. Anything the table does not match falls through to
//! [`not_found`].

use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use serde::Serialize;
use strum::Display;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{handle_panic, health, index, not_found, AppState};

/// HTTP method a route answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET.
    Get,
}

impl HttpMethod {
    fn filter(self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
        }
    }
}

/// Public description of a route, as listed under `endpoints`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// Route path.
    pub path: &'static str,
    /// Accepted method.
    pub method: HttpMethod,
    /// What the route returns.
    pub description: &'static str,
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    /// Public description.
    pub endpoint: Endpoint,
    handler: fn(MethodFilter) -> MethodRouter<AppState>,
}

fn index_route(filter: MethodFilter) -> MethodRouter<AppState> {
    on(filter, index)
}

fn health_route(filter: MethodFilter) -> MethodRouter<AppState> {
    on(filter, health)
}

/// Every route the service exposes, in registration order.
pub const ROUTES: [Route; 2] = [
    Route {
        endpoint: Endpoint {
            path: "/",
            method: HttpMethod::Get,
            description: "Service information",
        },
        handler: index_route,
    },
    Route {
        endpoint: Endpoint {
            path: "/health",
            method: HttpMethod::Get,
            description: "Health check",
        },
        handler: health_route,
    },
];

/// Public descriptions of every route.
pub fn endpoints() -> Vec<Endpoint> {
    ROUTES.iter().map(|route| route.endpoint).collect()
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let router = ROUTES.iter().fold(Router::new(), |router, route| {
        let endpoint = route.endpoint;
        router.route(endpoint.path, (route.handler)(endpoint.method.filter()))
    });

    with_middleware(router).with_state(state)
}

/// Attach the not-found fallback, panic recovery and request tracing.
fn with_middleware(router: Router<AppState>) -> Router<AppState> {
    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}
