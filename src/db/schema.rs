pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS trips (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL UNIQUE COLLATE NOCASE,
    total_budget  TEXT NOT NULL,
    style         TEXT NOT NULL DEFAULT 'comfortable',
    duration_days INTEGER NOT NULL DEFAULT 1,
    travelers     INTEGER NOT NULL DEFAULT 1,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS trip_allocations (
    trip_id    INTEGER NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
    position   INTEGER NOT NULL,
    category   TEXT NOT NULL,
    percentage TEXT NOT NULL,
    amount     TEXT NOT NULL,
    min_amount TEXT NOT NULL,
    max_amount TEXT NOT NULL,
    PRIMARY KEY (trip_id, category)
);

CREATE INDEX IF NOT EXISTS idx_trip_allocations_trip ON trip_allocations(trip_id);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[
    // Future migrations go here as (1, "ALTER TABLE ..."),
];
