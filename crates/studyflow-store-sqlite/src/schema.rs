//! SQL schema for the assignment store.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS assignments (
    assignment_id   TEXT PRIMARY KEY,
    account_id      TEXT NOT NULL,
    title           TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    course_code     TEXT NOT NULL,
    due_date        TEXT NOT NULL,   -- RFC 3339 UTC
    priority        TEXT NOT NULL,   -- 'low' | 'medium' | 'high'
    status          TEXT NOT NULL,   -- 'pending' | 'in_progress' | 'completed'
    estimated_hours REAL,
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS assignments_account_idx ON assignments(account_id);

PRAGMA user_version = 1;
";
