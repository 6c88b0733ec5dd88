use crate::infrastructure::http::controllers as api;
use crate::infrastructure::http::middleware::{require_auth, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: AppState) -> Router {
    // Build protected routes (require a demo login token)
    let protected = Router::new()
        .route("/api/auth/logout", post(api::auth::logout))
        // Rooms
        .route(
            "/api/rooms",
            get(api::rooms::list_rooms).post(api::rooms::create_room),
        )
        .route("/api/rooms/reconcile", post(api::rooms::reconcile_rooms))
        .route(
            "/api/rooms/:id",
            get(api::rooms::get_room)
                .put(api::rooms::update_room)
                .delete(api::rooms::delete_room),
        )
        // Availability
        .route("/api/availability", get(api::availability::search))
        // Bookings
        .route(
            "/api/bookings",
            get(api::bookings::list_bookings).post(api::bookings::create_booking),
        )
        .route(
            "/api/bookings/:id",
            get(api::bookings::get_booking).put(api::bookings::update_booking),
        )
        // Pricing
        .route(
            "/api/pricing-rules",
            get(api::price_rules::list_rules).post(api::price_rules::create_rule),
        )
        .route(
            "/api/pricing-rules/:id",
            get(api::price_rules::get_rule)
                .put(api::price_rules::update_rule)
                .delete(api::price_rules::delete_rule),
        )
        .route("/api/pricing/quote", post(api::price_rules::quote))
        // Reports
        .route("/api/reports/:period", get(api::reports::occupancy_report))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    // Build public routes
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/auth/login", post(api::auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "OK"
}
