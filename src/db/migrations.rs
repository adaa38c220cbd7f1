use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Apply any pending `*.sql` files from `migrations_dir`, in filename order.
/// Applied migrations are recorded in `_migrations` and skipped on later runs.
pub fn run_migrations(conn: &Connection, migrations_dir: &Path) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let mut files: Vec<_> = fs::read_dir(migrations_dir)
        .map(|rd| {
            rd.filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().map(|ext| ext == "sql").unwrap_or(false))
                .collect()
        })
        .unwrap_or_default();
    files.sort();

    tracing::debug!(
        dir = %migrations_dir.display(),
        count = files.len(),
        "Found migration files"
    );

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let already_applied: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM _migrations WHERE name = ?)",
            [name.as_str()],
            |row| row.get(0),
        )?;
        if already_applied {
            continue;
        }

        let sql = fs::read_to_string(&path)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        tracing::info!(migration = %name, "Applying migration");
        conn.execute_batch(&sql)?;
        conn.execute("INSERT INTO _migrations (name) VALUES (?)", [name.as_str()])?;
    }

    Ok(())
}
