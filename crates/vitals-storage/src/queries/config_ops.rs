//! check_configs and global_config.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use vitals_core::errors::VitalsResult;
use vitals_core::models::{CheckCategory, CheckConfig, GlobalConfig};

use crate::{fmt_ts, to_storage_err};

pub fn get_check_config(conn: &Connection, category: CheckCategory) -> VitalsResult<Option<CheckConfig>> {
    let payload: Option<String> = conn
        .query_row(
            "SELECT payload FROM check_configs WHERE category = ?1",
            params![category.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(payload.map(|p| serde_json::from_str(&p)).transpose()?)
}

pub fn save_check_config(conn: &Connection, category: CheckCategory, config: &CheckConfig) -> VitalsResult<()> {
    let payload = serde_json::to_string(config)?;
    conn.execute(
        "INSERT INTO check_configs (category, payload, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(category) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
        params![category.as_str(), payload, fmt_ts(&Utc::now())],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn all_check_configs(conn: &Connection) -> VitalsResult<BTreeMap<CheckCategory, CheckConfig>> {
    let mut stmt = conn
        .prepare_cached("SELECT category, payload FROM check_configs")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut configs = BTreeMap::new();
    for row in rows {
        let (category, payload) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let category = CheckCategory::from_str(&category).map_err(to_storage_err)?;
        configs.insert(category, serde_json::from_str(&payload)?);
    }
    Ok(configs)
}

/// Stored global config, if one was ever saved.
pub fn get_global_config(conn: &Connection) -> VitalsResult<Option<GlobalConfig>> {
    let payload: Option<String> = conn
        .query_row("SELECT payload FROM global_config WHERE id = 1", [], |row| row.get(0))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(payload.map(|p| serde_json::from_str(&p)).transpose()?)
}

pub fn save_global_config(conn: &Connection, config: &GlobalConfig) -> VitalsResult<()> {
    let payload = serde_json::to_string(config)?;
    conn.execute(
        "INSERT INTO global_config (id, payload, updated_at) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
        params![payload, fmt_ts(&Utc::now())],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
