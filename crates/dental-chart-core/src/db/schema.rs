//! SQLite schema definition.

/// Complete database schema for the local chart cache.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patient chart records (authoritative copy as last received or written)
-- ============================================================================

CREATE TABLE IF NOT EXISTS patient_records (
    patient_id TEXT PRIMARY KEY,
    dental_chart TEXT NOT NULL DEFAULT '{}',     -- JSON object keyed by tooth number
    treatment_plan TEXT NOT NULL DEFAULT '[]',   -- JSON array of TimelineItem
    tooth_notes TEXT NOT NULL DEFAULT '{}',      -- JSON object keyed by tooth number
    appointments TEXT NOT NULL DEFAULT '[]',     -- JSON array of Appointment
    chart_revision TEXT,                         -- SHA-256 of dental_chart
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_records_updated ON patient_records(updated_at);
"#;
