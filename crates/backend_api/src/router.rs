use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, household_handlers, state::AppState};

/// Create the main application router with all API endpoints
pub fn create_router(state: AppState) -> Router {
    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Debt strategy endpoints
        .route("/api/debts/strategy", post(handlers::debt_strategy))
        .route("/api/debts/summary", post(handlers::debt_summary))
        .route("/api/users/:user_id/debts/plan", get(handlers::user_debt_plan))
        // Credit endpoints
        .route("/api/credit/score", post(handlers::credit_score))
        .route("/api/credit/utilization", post(handlers::credit_utilization))
        // Household permission endpoints
        .route(
            "/api/household/permissions/check",
            post(household_handlers::check_permission),
        )
        .route(
            "/api/household/approvals/check",
            post(household_handlers::check_approval),
        )
        .route("/api/household/limits/daily", post(household_handlers::check_daily_limit))
        .route("/api/household/invites", post(household_handlers::create_invite))
        .route(
            "/api/household/invites/validate",
            post(household_handlers::validate_invite),
        )
        .route(
            "/api/household/roles/:role/features",
            get(household_handlers::visible_features),
        )
        .route(
            "/api/households/:household_id/members/:member_id/transactions/review",
            post(household_handlers::review_transaction),
        )
        // Cache management
        .route("/api/cache/invalidate", post(handlers::invalidate_cache))
        // Add shared state
        .with_state(state)
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
