use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::db::queries::transactions;
use crate::error::{AppError, AppResult};
use crate::models::{cents_from_decimal, Category, NewTransaction, Transaction};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
}

impl CreateTransactionRequest {
    /// Treat an optional string as absent when empty or whitespace-only.
    fn non_empty(s: Option<String>) -> Option<String> {
        s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    fn into_new_transaction(self) -> AppResult<NewTransaction> {
        let (Some(amount), Some(date)) = (self.amount, Self::non_empty(self.date)) else {
            return Err(AppError::Validation("Amount and date are required".into()));
        };

        let amount_cents = cents_from_decimal(amount)
            .ok_or_else(|| AppError::Validation("amount must be a finite number".into()))?;
        if amount_cents == 0 {
            return Err(AppError::Validation("amount must be a non-zero number".into()));
        }

        // Stored dates must be canonical ISO so month-key prefix matching
        // sees a zero-padded month
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| {
                AppError::Validation(format!("date must be in YYYY-MM-DD format, got '{date}'"))
            })?
            .format("%Y-%m-%d")
            .to_string();

        let category_raw = Self::non_empty(self.category)
            .ok_or_else(|| AppError::Validation("category is required".into()))?;
        let category = Category::parse(&category_raw).ok_or_else(|| {
            AppError::Validation(format!("Unknown category '{category_raw}'"))
        })?;

        Ok(NewTransaction {
            date,
            amount_cents,
            description: Self::non_empty(self.description),
            category,
        })
    }
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Transaction>>> {
    let conn = state.db.get()?;
    Ok(Json(transactions::list_transactions(&conn)?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionRequest>,
) -> AppResult<(StatusCode, Json<Transaction>)> {
    let new_transaction = payload.into_new_transaction()?;

    let conn = state.db.get()?;
    let id = transactions::create_transaction(&conn, &new_transaction)?;
    let created = transactions::get_transaction(&conn, id)?
        .ok_or_else(|| AppError::Internal(format!("Transaction {id} missing after insert")))?;

    debug!(
        transaction_id = id,
        amount = %created.amount_display(),
        description = %created.description_text(),
        "Recorded transaction"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let conn = state.db.get()?;

    if transactions::delete_transaction(&conn, id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Transaction not found".into()))
    }
}
