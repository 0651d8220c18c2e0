mod evidences;
mod extract;
mod genomes;
mod genotypes;
mod service_info;

pub use evidences::get_evidence;
pub use extract::FormOrJson;
pub use genomes::{get_genome, list_genomes, post_genomes};
pub use genotypes::get_genotypes;
pub use service_info::service_info;

use crate::storage::GenomeStore;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GenomeStore>,
    pub name: String,
    pub version: String,
}

impl AppState {
    pub fn new(store: Arc<dyn GenomeStore>) -> Self {
        Self {
            store,
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Build the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/genomes", get(list_genomes).post(post_genomes))
        .route("/v1/genomes/{id}", get(get_genome))
        .route("/v1/genomes/{id}/genotypes", get(get_genotypes))
        .route("/v1/evidences/{id}", get(get_evidence))
        .route("/v1/service-info", get(service_info))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
