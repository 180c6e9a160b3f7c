use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::regions::handlers;
use crate::features::regions::services::RegionService;

/// Create routes for the regions feature
pub fn routes(service: Arc<RegionService>) -> Router {
    Router::new()
        // Static segments must be registered before the {id} capture
        .route("/api/regions/search", get(handlers::search_regions))
        .route("/api/regions/list/provinces", get(handlers::list_provinces))
        .route("/api/regions/list/stats", get(handlers::get_stats))
        .route(
            "/api/regions/children/{parent_id}",
            get(handlers::list_children),
        )
        .route("/api/regions/{id}", get(handlers::get_region))
        .with_state(service)
}
