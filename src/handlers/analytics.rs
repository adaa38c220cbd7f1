use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;

use crate::db::queries::{budgets, transactions};
use crate::error::{AppError, AppResult};
use crate::services::analytics::{self, CategorySpend, CategoryTotal, MonthlyTotal, Summary};
use crate::services::budgeting;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MonthParams {
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BreakdownParams {
    pub category: Option<String>,
}

/// Per-category spend against the month's budgets. Budget-driven: only
/// budgeted categories appear.
pub async fn budget_vs_actual(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> AppResult<Json<Vec<CategorySpend>>> {
    let month = params
        .month
        .ok_or_else(|| AppError::Validation("month is required".into()))?;
    budgeting::validate_month_key(&month)?;

    let conn = state.db.get()?;
    let budget_list = budgets::list_budgets(&conn, &month)?;
    let transaction_list = transactions::list_transactions(&conn)?;

    Ok(Json(analytics::budget_vs_actual(
        &budget_list,
        &transaction_list,
        &month,
    )))
}

pub async fn category_totals(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryTotal>>> {
    let conn = state.db.get()?;
    let transaction_list = transactions::list_transactions(&conn)?;

    Ok(Json(analytics::category_totals(&transaction_list)))
}

pub async fn monthly_breakdown(
    State(state): State<AppState>,
    Query(params): Query<BreakdownParams>,
) -> AppResult<Json<Vec<MonthlyTotal>>> {
    let conn = state.db.get()?;
    let transaction_list = transactions::list_transactions(&conn)?;

    Ok(Json(analytics::monthly_breakdown(
        &transaction_list,
        params.category.as_deref(),
    )))
}

pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> AppResult<Json<Summary>> {
    if let Some(month) = &params.month {
        budgeting::validate_month_key(month)?;
    }

    let conn = state.db.get()?;
    let transaction_list = transactions::list_transactions(&conn)?;

    Ok(Json(Summary::from_transactions(
        &transaction_list,
        params.month.as_deref(),
    )))
}
