//! Async SQL connector over sqlx.
//!
//! Supports Postgres and SQLite, selected by the connection URL scheme.
//! Query results are normalized to JSON values so agents can consume them
//! without knowing the backend.

use crate::error::{MdanError, Result};
use serde::Serialize;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row};
use std::time::Instant;

/// A normalized query result.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    /// One JSON array per row, positionally matching `columns`.
    pub rows: Vec<Vec<Value>>,
    pub row_count: usize,
    pub execution_time: f64,
}

/// Database connection, one variant per supported backend.
#[derive(Debug)]
pub enum SqlTool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl SqlTool {
    /// Connect using a URL. `postgres://` and `sqlite://` (or `sqlite::memory:`)
    /// schemes are supported.
    pub async fn connect(url: &str) -> Result<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .map_err(|e| MdanError::ToolError(format!("database connection failed: {}", e)))?;
            Ok(SqlTool::Postgres(pool))
        } else if url.starts_with("sqlite:") {
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect(url)
                .await
                .map_err(|e| MdanError::ToolError(format!("database connection failed: {}", e)))?;
            Ok(SqlTool::Sqlite(pool))
        } else {
            Err(MdanError::UserError(format!(
                "unsupported database URL '{}'. Use a postgres:// or sqlite:// URL.",
                url
            )))
        }
    }

    /// Run a SELECT-style query and return all rows.
    pub async fn query(&self, sql: &str) -> Result<QueryResult> {
        let started = Instant::now();

        let (columns, rows) = match self {
            SqlTool::Postgres(pool) => {
                let rows = sqlx::query(sql)
                    .fetch_all(pool)
                    .await
                    .map_err(|e| MdanError::ToolError(format!("query failed: {}", e)))?;
                let columns = column_names_pg(&rows);
                let values = rows.iter().map(decode_pg_row).collect();
                (columns, values)
            }
            SqlTool::Sqlite(pool) => {
                let rows = sqlx::query(sql)
                    .fetch_all(pool)
                    .await
                    .map_err(|e| MdanError::ToolError(format!("query failed: {}", e)))?;
                let columns = column_names_sqlite(&rows);
                let values = rows.iter().map(decode_sqlite_row).collect();
                (columns, values)
            }
        };

        let rows: Vec<Vec<Value>> = rows;
        Ok(QueryResult {
            columns,
            row_count: rows.len(),
            rows,
            execution_time: started.elapsed().as_secs_f64(),
        })
    }

    /// Run an INSERT/UPDATE/DELETE/DDL statement and return affected rows.
    pub async fn execute(&self, sql: &str) -> Result<u64> {
        match self {
            SqlTool::Postgres(pool) => sqlx::query(sql)
                .execute(pool)
                .await
                .map(|r| r.rows_affected())
                .map_err(|e| MdanError::ToolError(format!("statement failed: {}", e))),
            SqlTool::Sqlite(pool) => sqlx::query(sql)
                .execute(pool)
                .await
                .map(|r| r.rows_affected())
                .map_err(|e| MdanError::ToolError(format!("statement failed: {}", e))),
        }
    }

    /// Run multiple statements in one transaction. Any failure rolls back
    /// the whole batch.
    pub async fn transaction(&self, statements: &[String]) -> Result<Vec<u64>> {
        let mut affected = Vec::with_capacity(statements.len());

        match self {
            SqlTool::Postgres(pool) => {
                let mut tx = pool
                    .begin()
                    .await
                    .map_err(|e| MdanError::ToolError(format!("transaction failed: {}", e)))?;
                for sql in statements {
                    let result = sqlx::query(sql)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| MdanError::ToolError(format!("transaction failed: {}", e)))?;
                    affected.push(result.rows_affected());
                }
                tx.commit()
                    .await
                    .map_err(|e| MdanError::ToolError(format!("transaction failed: {}", e)))?;
            }
            SqlTool::Sqlite(pool) => {
                let mut tx = pool
                    .begin()
                    .await
                    .map_err(|e| MdanError::ToolError(format!("transaction failed: {}", e)))?;
                for sql in statements {
                    let result = sqlx::query(sql)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| MdanError::ToolError(format!("transaction failed: {}", e)))?;
                    affected.push(result.rows_affected());
                }
                tx.commit()
                    .await
                    .map_err(|e| MdanError::ToolError(format!("transaction failed: {}", e)))?;
            }
        }

        Ok(affected)
    }

    /// List table names in the connected database.
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let sql = match self {
            SqlTool::Postgres(_) => {
                "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = 'public' ORDER BY table_name"
            }
            SqlTool::Sqlite(_) => {
                "SELECT name FROM sqlite_master WHERE type = 'table' \
                 AND name NOT LIKE 'sqlite_%' ORDER BY name"
            }
        };

        let result = self.query(sql).await?;
        Ok(result
            .rows
            .iter()
            .filter_map(|row| row.first().and_then(|v| v.as_str()).map(String::from))
            .collect())
    }

    /// Column metadata for a table.
    pub async fn table_schema(&self, table_name: &str) -> Result<QueryResult> {
        // Identifier, not a bind parameter; reject anything suspicious
        if !table_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(MdanError::UserError(format!(
                "invalid table name '{}'",
                table_name
            )));
        }

        let sql = match self {
            SqlTool::Postgres(_) => format!(
                "SELECT column_name, data_type, is_nullable, column_default \
                 FROM information_schema.columns WHERE table_name = '{}' \
                 ORDER BY ordinal_position",
                table_name
            ),
            SqlTool::Sqlite(_) => format!("PRAGMA table_info({})", table_name),
        };

        self.query(&sql).await
    }

    /// Format a query result as a readable table for prompt context.
    pub fn format_results(result: &QueryResult) -> String {
        let mut lines = vec![
            format!(
                "Query returned {} rows in {:.3}s",
                result.row_count, result.execution_time
            ),
            String::new(),
        ];

        if !result.columns.is_empty() {
            let header = result.columns.join(" | ");
            lines.push(header.clone());
            lines.push("-".repeat(header.len()));
        }

        for row in &result.rows {
            lines.push(
                row.iter()
                    .map(render_value)
                    .collect::<Vec<_>>()
                    .join(" | "),
            );
        }

        lines.join("\n")
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "NULL".to_string(),
        other => other.to_string(),
    }
}

fn column_names_pg(rows: &[PgRow]) -> Vec<String> {
    rows.first()
        .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default()
}

fn column_names_sqlite(rows: &[SqliteRow]) -> Vec<String> {
    rows.first()
        .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default()
}

/// Decode a Postgres row into JSON values by trying common types per column.
fn decode_pg_row(row: &PgRow) -> Vec<Value> {
    (0..row.columns().len())
        .map(|i| {
            if let Ok(v) = row.try_get::<Option<i64>, _>(i) {
                v.map(Value::from).unwrap_or(Value::Null)
            } else if let Ok(v) = row.try_get::<Option<i32>, _>(i) {
                v.map(Value::from).unwrap_or(Value::Null)
            } else if let Ok(v) = row.try_get::<Option<f64>, _>(i) {
                v.map(Value::from).unwrap_or(Value::Null)
            } else if let Ok(v) = row.try_get::<Option<bool>, _>(i) {
                v.map(Value::from).unwrap_or(Value::Null)
            } else if let Ok(v) = row.try_get::<Option<String>, _>(i) {
                v.map(Value::from).unwrap_or(Value::Null)
            } else {
                Value::Null
            }
        })
        .collect()
}

/// Decode a SQLite row into JSON values by trying common types per column.
fn decode_sqlite_row(row: &SqliteRow) -> Vec<Value> {
    (0..row.columns().len())
        .map(|i| {
            if let Ok(v) = row.try_get::<Option<i64>, _>(i) {
                v.map(Value::from).unwrap_or(Value::Null)
            } else if let Ok(v) = row.try_get::<Option<f64>, _>(i) {
                v.map(Value::from).unwrap_or(Value::Null)
            } else if let Ok(v) = row.try_get::<Option<bool>, _>(i) {
                v.map(Value::from).unwrap_or(Value::Null)
            } else if let Ok(v) = row.try_get::<Option<String>, _>(i) {
                v.map(Value::from).unwrap_or(Value::Null)
            } else {
                Value::Null
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_db() -> SqlTool {
        let tool = SqlTool::connect("sqlite::memory:").await.unwrap();
        tool.execute("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, active BOOLEAN)")
            .await
            .unwrap();
        tool
    }

    #[tokio::test]
    async fn test_unsupported_scheme_rejected() {
        let err = SqlTool::connect("mysql://localhost/db").await.unwrap_err();
        assert!(err.to_string().contains("unsupported database URL"));
    }

    #[tokio::test]
    async fn test_execute_and_query() {
        let tool = memory_db().await;

        let affected = tool
            .execute("INSERT INTO users (name, active) VALUES ('amina', 1), ('said', 0)")
            .await
            .unwrap();
        assert_eq!(affected, 2);

        let result = tool
            .query("SELECT id, name FROM users ORDER BY id")
            .await
            .unwrap();
        assert_eq!(result.columns, vec!["id", "name"]);
        assert_eq!(result.row_count, 2);
        assert_eq!(result.rows[0][1], Value::from("amina"));
    }

    #[tokio::test]
    async fn test_query_error_is_tool_error() {
        let tool = memory_db().await;
        let err = tool.query("SELECT * FROM missing").await.unwrap_err();
        assert_eq!(err.exit_code(), crate::exit_codes::TOOL_FAILURE);
    }

    #[tokio::test]
    async fn test_transaction_commits_all() {
        let tool = memory_db().await;

        let affected = tool
            .transaction(&[
                "INSERT INTO users (name) VALUES ('a')".to_string(),
                "INSERT INTO users (name) VALUES ('b')".to_string(),
            ])
            .await
            .unwrap();
        assert_eq!(affected, vec![1, 1]);

        let result = tool.query("SELECT COUNT(*) FROM users").await.unwrap();
        assert_eq!(result.rows[0][0], Value::from(2));
    }

    #[tokio::test]
    async fn test_transaction_rolls_back_on_error() {
        let tool = memory_db().await;

        let result = tool
            .transaction(&[
                "INSERT INTO users (name) VALUES ('a')".to_string(),
                "INSERT INTO nope (name) VALUES ('b')".to_string(),
            ])
            .await;
        assert!(result.is_err());

        let count = tool.query("SELECT COUNT(*) FROM users").await.unwrap();
        assert_eq!(count.rows[0][0], Value::from(0));
    }

    #[tokio::test]
    async fn test_list_tables() {
        let tool = memory_db().await;
        let tables = tool.list_tables().await.unwrap();
        assert_eq!(tables, vec!["users"]);
    }

    #[tokio::test]
    async fn test_table_schema() {
        let tool = memory_db().await;
        let schema = tool.table_schema("users").await.unwrap();
        assert_eq!(schema.row_count, 3);
    }

    #[tokio::test]
    async fn test_table_schema_rejects_bad_identifier() {
        let tool = memory_db().await;
        let err = tool.table_schema("users; DROP TABLE users").await.unwrap_err();
        assert_eq!(err.exit_code(), crate::exit_codes::USER_ERROR);
    }

    #[tokio::test]
    async fn test_format_results() {
        let tool = memory_db().await;
        tool.execute("INSERT INTO users (name) VALUES ('amina')")
            .await
            .unwrap();

        let result = tool.query("SELECT id, name FROM users").await.unwrap();
        let formatted = SqlTool::format_results(&result);

        assert!(formatted.contains("Query returned 1 rows"));
        assert!(formatted.contains("id | name"));
        assert!(formatted.contains("1 | amina"));
    }
}
