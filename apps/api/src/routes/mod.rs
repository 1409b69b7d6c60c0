pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::inspections::handlers;
use crate::state::AppState;
use crate::weather::handlers as weather_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Inspections
        .route("/api/v1/inspections", get(handlers::handle_list_inspections))
        .route("/api/v1/inspections/reload", post(handlers::handle_reload))
        .route(
            "/api/v1/inspections/:id/complete",
            post(handlers::handle_complete),
        )
        .route("/api/v1/map/markers", get(handlers::handle_markers))
        .route("/api/v1/stats", get(handlers::handle_stats))
        // Schedules
        .route(
            "/api/v1/schedules",
            get(handlers::handle_list_schedules).post(handlers::handle_create_schedule),
        )
        .route(
            "/api/v1/schedules/:id",
            delete(handlers::handle_delete_schedule),
        )
        // Memos
        .route(
            "/api/v1/memos",
            get(handlers::handle_list_memos)
                .post(handlers::handle_create_memo)
                .delete(handlers::handle_clear_memos),
        )
        .route("/api/v1/memos/:id", delete(handlers::handle_delete_memo))
        // Weather
        .route("/api/v1/weather", get(weather_handlers::handle_get_weather))
        .route(
            "/api/v1/weather/group",
            put(weather_handlers::handle_set_group),
        )
        .with_state(state)
}
