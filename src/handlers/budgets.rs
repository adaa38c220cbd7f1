use axum::extract::{Path, Query, State};
use axum::response::Json;
use rusqlite::TransactionBehavior;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::db::queries::budgets;
use crate::error::{AppError, AppResult};
use crate::models::{cents_from_decimal, Budget, Category};
use crate::services::budgeting::{self, BudgetWrite};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetBudgetRequest {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BudgetListParams {
    pub month: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BudgetListParams>,
) -> AppResult<Json<Vec<Budget>>> {
    let month = params
        .month
        .ok_or_else(|| AppError::Validation("month is required".into()))?;
    budgeting::validate_month_key(&month)?;

    let conn = state.db.get()?;
    Ok(Json(budgets::list_budgets(&conn, &month)?))
}

pub async fn set_budget(
    State(state): State<AppState>,
    Json(payload): Json<SetBudgetRequest>,
) -> AppResult<Json<Budget>> {
    let category_raw = payload
        .category
        .ok_or_else(|| AppError::Validation("category is required".into()))?;
    let category = Category::parse(&category_raw)
        .ok_or_else(|| AppError::Validation(format!("Unknown category '{category_raw}'")))?;
    let amount = payload
        .amount
        .ok_or_else(|| AppError::Validation("amount is required".into()))?;
    let amount_cents = cents_from_decimal(amount)
        .ok_or_else(|| AppError::Validation("amount must be a finite number".into()))?;
    let month = payload
        .month
        .ok_or_else(|| AppError::Validation("month is required".into()))?;

    let mut conn = state.db.get()?;
    // Immediate transaction: the lookup and the write are one atomic
    // read-modify-write per (category, month) key
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let existing = budgets::list_budgets(&tx, &month)?;
    let write = budgeting::resolve_budget_upsert(category, amount_cents, &month, &existing)?;
    let action = write.action();

    let id = match write {
        BudgetWrite::Create(ref new_budget) => {
            budgets::create_budget(&tx, new_budget).map_err(|e| {
                if budgets::is_unique_violation(&e) {
                    AppError::Conflict(format!(
                        "A budget for {category} in {month} already exists"
                    ))
                } else {
                    e.into()
                }
            })?
        }
        BudgetWrite::Update { id, amount_cents } => {
            budgets::update_budget_amount(&tx, id, amount_cents)?;
            id
        }
    };

    let stored = budgets::get_budget(&tx, id)?
        .ok_or_else(|| AppError::Internal(format!("Budget {id} missing after upsert")))?;
    tx.commit()?;

    debug!(
        budget_id = id,
        action,
        category = %stored.category,
        month = %stored.month,
        amount = %stored.amount_display(),
        "Set budget"
    );
    Ok(Json(stored))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;

    if budgets::delete_budget(&conn, id)? {
        Ok(Json(json!({ "message": "Budget deleted successfully" })))
    } else {
        Err(AppError::NotFound("Budget not found".into()))
    }
}
