pub mod analytics;
pub mod budgets;
pub mod transactions;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Transaction CRUD
        .route("/api/transactions/get", get(transactions::list))
        .route("/api/transactions/create", post(transactions::create))
        .route("/api/transactions/delete/:id", delete(transactions::delete))
        // Budget CRUD
        .route("/api/budgets/getBudgets", get(budgets::list))
        .route("/api/budgets/setBudget", post(budgets::set_budget))
        .route("/api/budgets/deleteBudget/:id", delete(budgets::delete))
        // Analytics (JSON for charts)
        .route(
            "/api/analytics/budget-vs-actual",
            get(analytics::budget_vs_actual),
        )
        .route(
            "/api/analytics/category-totals",
            get(analytics::category_totals),
        )
        .route(
            "/api/analytics/monthly-breakdown",
            get(analytics::monthly_breakdown),
        )
        .route("/api/analytics/summary", get(analytics::summary))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
