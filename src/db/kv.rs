// src/db/kv.rs
use crate::errors::ServerError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>, ServerError> {
    conn.query_row(
        "select value from kv_store where key = ?",
        params![key],
        |row| row.get::<_, String>(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("kv read failed: {e}")))
}

/// Insert or replace the whole document stored under `key`.
pub fn put_value(conn: &Connection, key: &str, value: &str) -> Result<(), ServerError> {
    let now = Utc::now().to_rfc3339();

    conn.execute(
        r#"
        insert into kv_store (key, value, updated_at)
        values (?1, ?2, ?3)
        on conflict(key) do update set
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
        params![key, value, now],
    )
    .map_err(|e| ServerError::DbError(format!("kv write failed: {e}")))?;

    Ok(())
}

pub fn delete_value(conn: &Connection, key: &str) -> Result<(), ServerError> {
    conn.execute("delete from kv_store where key = ?", params![key])
        .map_err(|e| ServerError::DbError(format!("kv delete failed: {e}")))?;
    Ok(())
}
