use rusqlite::Connection;

use crate::DbError;

pub fn run(conn: &Connection) -> Result<(), DbError> {
    // Idempotent schema creation; AUTOINCREMENT guarantees ids are never
    // reused after a delete.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS items (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            text           TEXT NOT NULL,
            attachment_url TEXT
        );
        ",
    )?;
    Ok(())
}
