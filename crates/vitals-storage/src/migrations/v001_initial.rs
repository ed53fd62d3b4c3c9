//! V001: reports, results, per-category configs, global config.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS check_reports (
    id             TEXT PRIMARY KEY,
    timestamp      TEXT NOT NULL,
    score          INTEGER NOT NULL,
    overall_status TEXT NOT NULL,
    duration_ms    INTEGER NOT NULL,
    payload        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_check_reports_timestamp
    ON check_reports(timestamp);

-- report_id is NULL for results saved on their own.
CREATE TABLE IF NOT EXISTS check_results (
    id          TEXT PRIMARY KEY,
    report_id   TEXT REFERENCES check_reports(id) ON DELETE CASCADE,
    category    TEXT NOT NULL,
    status      TEXT NOT NULL,
    severity    TEXT NOT NULL,
    duration_ms INTEGER NOT NULL,
    timestamp   TEXT NOT NULL,
    payload     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_check_results_report ON check_results(report_id);
CREATE INDEX IF NOT EXISTS idx_check_results_category ON check_results(category, timestamp);
CREATE INDEX IF NOT EXISTS idx_check_results_status ON check_results(status, timestamp);
CREATE INDEX IF NOT EXISTS idx_check_results_severity ON check_results(severity, timestamp);
CREATE INDEX IF NOT EXISTS idx_check_results_timestamp ON check_results(timestamp);

CREATE TABLE IF NOT EXISTS check_configs (
    category   TEXT PRIMARY KEY,
    payload    TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS global_config (
    id         INTEGER PRIMARY KEY CHECK (id = 1),
    payload    TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
