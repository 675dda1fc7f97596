use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use multiweather_core::MultiProvider;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared application state.
///
/// The provider set is immutable after startup, so it is shared read-only
/// across request handlers.
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<MultiProvider>,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/weather/{*city}", get(handlers::weather))
        .route("/weather", get(handlers::missing_city))
        .route("/weather/", get(handlers::missing_city))
        .route("/hello", get(handlers::hello))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
