//! Route configuration for the application.

use axum::{
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::backend::handlers::{
    create_patient, index, list_patients, sort_patients, view_patient,
};

/// Initializes the main router
pub fn get_router() -> Router {
    // Permissive CORS for requests from any origin (debug builds only)
    let router = if cfg!(debug_assertions) {
        let cors = CorsLayer::new()
            .allow_methods(tower_http::cors::AllowMethods::any())
            .allow_origin(Any);
        Router::new().layer(cors)
    } else {
        Router::new()
    };

    router.merge(patient_routes())
}

/// Routes exposing the patient store
fn patient_routes() -> Router {
    Router::new()
        .route("/", get(index)) // Service banner
        .route("/patients", get(list_patients).post(create_patient)) // Listing and creation
        .route("/patients/sort", get(sort_patients)) // Ordered listing
        .route("/patients/:id", get(view_patient)) // Single record
}
