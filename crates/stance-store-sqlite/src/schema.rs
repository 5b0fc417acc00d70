//! SQL schema for the Stance SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per partition that has ever been written.
CREATE TABLE IF NOT EXISTS sheets (
    name        TEXT PRIMARY KEY,
    updated_at  TEXT NOT NULL    -- ISO 8601 UTC of the last overwrite
);

-- Rows of every partition. A write replaces all rows of its partition inside
-- one transaction; `position` preserves insertion order.
CREATE TABLE IF NOT EXISTS sheet_rows (
    partition        TEXT    NOT NULL REFERENCES sheets(name),
    position         INTEGER NOT NULL,
    topic            TEXT    NOT NULL,
    student_name     TEXT    NOT NULL,
    student_id       TEXT    NOT NULL,
    pre_position     TEXT    NOT NULL,   -- 'A' | 'B'
    post_position    TEXT    NOT NULL,   -- 'A' | 'B'
    question_type    TEXT    NOT NULL,   -- 'fact' | 'inference' | 'critique'
    question_text    TEXT    NOT NULL,
    question_target  TEXT    NOT NULL,   -- 'A' | 'B'
    submission_id    TEXT    NOT NULL,
    submitted_at     TEXT    NOT NULL,   -- ISO 8601 UTC; server-assigned
    PRIMARY KEY (partition, position)
);

CREATE INDEX IF NOT EXISTS sheet_rows_topic_idx ON sheet_rows(topic);

PRAGMA user_version = 1;
";
