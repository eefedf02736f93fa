//! In-memory HTTP server for the timer API the `ticker` client talks to.

pub mod app_state;
pub mod config;
pub mod router;
mod routes;

pub use app_state::AppState;
pub use routes::ApiError;

/// Serve the timer API on `listener` until the process is stopped.
pub async fn serve(listener: tokio::net::TcpListener, app_state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router::create(app_state)).await
}
