use rusqlite::{params, Row};

use punchlist_core::item::{CreateItem, Item};

use crate::{Db, DbError};

fn row_to_item(row: &Row) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get("id")?,
        text: row.get("text")?,
        attachment_url: row.get("attachment_url")?,
    })
}

impl Db {
    /// Insert one item and return it with its freshly assigned id.
    /// Durable once this returns.
    pub fn create_item(&self, input: &CreateItem) -> Result<Item, DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO items (text, attachment_url) VALUES (?1, ?2)",
                params![input.text, input.attachment_url],
            )?;
            let id = conn.last_insert_rowid();
            conn.query_row(
                "SELECT * FROM items WHERE id = ?1",
                params![id],
                row_to_item,
            )
            .map_err(DbError::from)
        })
    }

    /// Every persisted item, id ascending (equals insertion order).
    pub fn list_items(&self) -> Result<Vec<Item>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM items ORDER BY id ASC")?;
            let items = stmt
                .query_map([], row_to_item)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(items)
        })
    }

    /// Remove one item. `DbError::NotFound` when no row has that id.
    pub fn delete_item(&self, id: i64) -> Result<(), DbError> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(DbError::NotFound(format!("item {id}")));
            }
            Ok(())
        })
    }
}
