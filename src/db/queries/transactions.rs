use crate::models::category::Category;
use crate::models::transaction::{NewTransaction, Transaction};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

fn map_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let category_str: String = row.get(4)?;
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        amount_cents: row.get(2)?,
        description: row.get(3)?,
        category: Category::parse(&category_str).unwrap_or(Category::Other),
        created_at: row.get(5)?,
    })
}

/// All transactions, newest date first. Rowid breaks ties so the most
/// recently recorded entry leads within a day.
pub fn list_transactions(conn: &Connection) -> rusqlite::Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, amount_cents, description, category, created_at
         FROM transactions
         ORDER BY date DESC, id DESC",
    )?;

    let transactions = stmt
        .query_map([], map_transaction)?
        .filter_map(|t| t.ok())
        .collect();

    Ok(transactions)
}

pub fn get_transaction(conn: &Connection, id: i64) -> rusqlite::Result<Option<Transaction>> {
    conn.query_row(
        "SELECT id, date, amount_cents, description, category, created_at
         FROM transactions WHERE id = ?",
        [id],
        map_transaction,
    )
    .optional()
}

pub fn create_transaction(conn: &Connection, transaction: &NewTransaction) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO transactions (date, amount_cents, description, category)
         VALUES (?, ?, ?, ?)",
        params![
            transaction.date,
            transaction.amount_cents,
            transaction.description,
            transaction.category.as_str(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    debug!(
        transaction_id = id,
        amount_cents = transaction.amount_cents,
        category = %transaction.category,
        "Created transaction"
    );
    Ok(id)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM transactions WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(transaction_id = id, "Deleted transaction");
    }
    Ok(rows > 0)
}
