//! `SQLite` schema for the record store.
//!
//! The database is used as a plain key-value medium: one row per collection,
//! holding the collection's full record sequence as a JSON payload. There is
//! no schema versioning; the persisted format is unversioned by design and a
//! shape change means a fresh collection key.

/// SQL statement to create the collections table.
pub const CREATE_COLLECTIONS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS collections (
    name TEXT PRIMARY KEY,
    payload TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_COLLECTIONS_TABLE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_collections_table_columns() {
        assert!(CREATE_COLLECTIONS_TABLE.contains("name TEXT PRIMARY KEY"));
        assert!(CREATE_COLLECTIONS_TABLE.contains("payload TEXT NOT NULL"));
    }

    #[test]
    fn test_schema_applies_cleanly() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        for stmt in SCHEMA_STATEMENTS {
            conn.execute(stmt, []).unwrap();
        }
        // Idempotent
        for stmt in SCHEMA_STATEMENTS {
            conn.execute(stmt, []).unwrap();
        }
    }
}
