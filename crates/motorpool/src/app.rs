use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        vehicles::{
            create_vehicle, delete_vehicle, delete_vehicle_by_params, get_vehicle, list_vehicles,
            load_snapshot, save_snapshot, update_vehicle, update_vehicle_by_params,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// The routing verbs (`add`, `update`, `delete`, `snapshot/...`) are
/// registered as static routes, which axum matches before the `{id}`
/// capture; the id handlers additionally refuse reserved segments.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/add", post(create_vehicle))
        .route("/vehicles/update", post(update_vehicle_by_params))
        .route("/vehicles/delete", post(delete_vehicle_by_params))
        .route("/vehicles/snapshot/save", post(save_snapshot))
        .route("/vehicles/snapshot/load", post(load_snapshot))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
