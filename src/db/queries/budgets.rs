use crate::models::budget::{Budget, NewBudget};
use crate::models::category::Category;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

fn map_budget(row: &Row<'_>) -> rusqlite::Result<Budget> {
    let category_str: String = row.get(1)?;
    Ok(Budget {
        id: row.get(0)?,
        category: Category::parse(&category_str).unwrap_or(Category::Other),
        amount_cents: row.get(2)?,
        month: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Budgets for one month, in creation order.
pub fn list_budgets(conn: &Connection, month: &str) -> rusqlite::Result<Vec<Budget>> {
    let mut stmt = conn.prepare(
        "SELECT id, category, amount_cents, month, created_at, updated_at
         FROM budgets
         WHERE month = ?
         ORDER BY id",
    )?;

    let budgets = stmt
        .query_map([month], map_budget)?
        .filter_map(|b| b.ok())
        .collect();

    Ok(budgets)
}

pub fn get_budget(conn: &Connection, id: i64) -> rusqlite::Result<Option<Budget>> {
    conn.query_row(
        "SELECT id, category, amount_cents, month, created_at, updated_at
         FROM budgets WHERE id = ?",
        [id],
        map_budget,
    )
    .optional()
}

pub fn create_budget(conn: &Connection, budget: &NewBudget) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO budgets (category, amount_cents, month) VALUES (?, ?, ?)",
        params![
            budget.category.as_str(),
            budget.amount_cents,
            budget.month,
        ],
    )?;

    let id = conn.last_insert_rowid();
    debug!(
        budget_id = id,
        category = %budget.category,
        month = %budget.month,
        "Created budget"
    );
    Ok(id)
}

pub fn update_budget_amount(conn: &Connection, id: i64, amount_cents: i64) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE budgets SET amount_cents = ?, updated_at = datetime('now') WHERE id = ?",
        params![amount_cents, id],
    )?;
    debug!(budget_id = id, amount_cents, "Updated budget amount");
    Ok(())
}

pub fn delete_budget(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM budgets WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(budget_id = id, "Deleted budget");
    }
    Ok(rows > 0)
}

/// The UNIQUE(category, month) index reports a lost upsert race as a
/// constraint violation; callers surface it as a conflict instead of
/// writing a duplicate.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
