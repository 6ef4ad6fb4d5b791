mod error;
mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::store::Store;

pub use error::{ApiError, ErrorResponse};

pub fn create_router(store: Store) -> Router {
    let turmas = Router::new()
        .route("/", get(handlers::list_allocations))
        .route("/usuario-logado", get(handlers::get_login_info))
        .route("/frequencia", post(handlers::record_attendance))
        .route("/{id}/alunos", get(handlers::get_roster))
        .route("/{id}/frequencia", get(handlers::list_attendance));

    Router::new()
        .nest("/turmas", turmas)
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(store)
}
