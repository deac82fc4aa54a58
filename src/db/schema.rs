//! Database schema and migrations for SIREN.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Users table for authentication and account management
CREATE TABLE users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name    TEXT NOT NULL,
    last_name     TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    phone_number  TEXT NOT NULL UNIQUE,
    password      TEXT NOT NULL,           -- Argon2 hash
    role          TEXT NOT NULL DEFAULT 'user',  -- 'user', 'admin'
    created_at    TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at    TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_email ON users(email);
CREATE INDEX idx_users_phone_number ON users(phone_number);
"#,
    // v2: Reports and their append-only status audit trail
    r#"
-- Incident reports filed by users
CREATE TABLE reports (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    incident    TEXT NOT NULL,
    details     TEXT NOT NULL,
    latitude    REAL NOT NULL DEFAULT 0,
    longitude   REAL NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_reports_user_id ON reports(user_id);

-- Append-only audit trail of status transitions; the latest row is the
-- report's current status, a report with no rows is 'pending'
CREATE TABLE status_updates (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    report_id   INTEGER NOT NULL REFERENCES reports(id) ON DELETE CASCADE,
    updated_by  INTEGER NOT NULL REFERENCES users(id),
    status      TEXT NOT NULL,  -- 'pending', 'under investigation', 'rejected', 'resolved'
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_status_updates_report_id ON status_updates(report_id);
"#,
    // v3: Media attachment records and report locations
    r#"
-- Media attachment records (storage mechanics live outside this service)
CREATE TABLE media_attachments (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    report_id    INTEGER NOT NULL REFERENCES reports(id) ON DELETE CASCADE,
    file_url     TEXT NOT NULL,
    media_type   TEXT NOT NULL,
    uploaded_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_media_attachments_report_id ON media_attachments(report_id);

-- Optional structured location per report
CREATE TABLE locations (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    report_id   INTEGER NOT NULL REFERENCES reports(id) ON DELETE CASCADE,
    latitude    REAL NOT NULL,
    longitude   REAL NOT NULL,
    address     TEXT,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_locations_report_id ON locations(report_id);
"#,
    // v4: Emergency contacts
    r#"
CREATE TABLE emergency_contacts (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id       INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name          TEXT NOT NULL,
    relationship  TEXT NOT NULL,
    phone_number  TEXT NOT NULL,
    email         TEXT,
    address       TEXT
);

CREATE INDEX idx_emergency_contacts_user_id ON emergency_contacts(user_id);
"#,
    // v5: Revocation ledger for token invalidation
    r#"
-- Append-only ledger of revoked token identifiers; existence of a row
-- permanently invalidates that jti
CREATE TABLE revoked_tokens (
    jti         TEXT PRIMARY KEY,
    revoked_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
];
