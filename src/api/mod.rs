//! HTTP API module for the info, health and error routes.

pub mod handlers;
pub mod routes;

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;

pub use handlers::AppState;
pub use routes::{create_router, endpoints, ROUTES};

/// Serve the API on `listener` until `shutdown` resolves.
///
/// Peer addresses are recorded so the info route can report the client IP.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> crate::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_router(state);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    Ok(())
}
