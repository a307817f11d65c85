// src/db/models/emission.rs

//! Emission record model - one persisted calculation

use crate::calculator::CalculationOutcome;
use crate::db;
use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use tracing::info;

/// Owner recorded on every row; the service is single-tenant
pub const DEFAULT_OWNER: &str = "demo_user";

const SELECT_COLUMNS: &str =
    "SELECT id, category, activity, amount, unit, co2_kg, timestamp, owner FROM emissions";

/// A calculation that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmission {
    pub category: String,
    pub activity: String,
    pub amount: f64,
    pub unit: String,
    pub co2_kg: f64,
}

impl From<&CalculationOutcome> for NewEmission {
    fn from(outcome: &CalculationOutcome) -> Self {
        Self {
            category: outcome.category.clone(),
            activity: outcome.activity.clone(),
            amount: outcome.amount,
            unit: outcome.unit.clone(),
            co2_kg: outcome.co2_kg,
        }
    }
}

/// A stored, immutable emission record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionRecord {
    pub id: i64,
    pub category: String,
    pub activity: String,
    pub amount: f64,
    pub unit: String,
    /// Full precision, exactly as computed
    pub co2_kg: f64,
    pub timestamp: DateTime<Utc>,
    pub owner: String,
}

impl EmissionRecord {
    /// Persist a calculation, assigning its id and timestamp
    pub fn append(conn: &mut Connection, new: &NewEmission) -> Result<Self> {
        Self::append_at(conn, new, Utc::now())
    }

    /// Persist a calculation as of `now`.
    ///
    /// The stored timestamp never precedes the newest existing record, so
    /// timestamps are non-decreasing in id order even if the clock steps back.
    pub fn append_at(conn: &mut Connection, new: &NewEmission, now: DateTime<Utc>) -> Result<Self> {
        let record = db::transaction(conn, |tx| {
            let newest: Option<String> =
                tx.query_row("SELECT MAX(timestamp) FROM emissions", [], |row| row.get(0))?;
            let timestamp = match newest {
                Some(ref s) => now.max(parse_timestamp(s)?),
                None => now,
            };

            tx.execute(
                "INSERT INTO emissions (category, activity, amount, unit, co2_kg, timestamp, owner)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    &new.category,
                    &new.activity,
                    new.amount,
                    &new.unit,
                    new.co2_kg,
                    format_timestamp(&timestamp),
                    DEFAULT_OWNER,
                ],
            )?;

            let id = tx.last_insert_rowid();
            let record = tx.query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                [id],
                Self::from_row,
            )?;
            Ok(record)
        })?;

        info!(
            "Recorded emission #{}: {}/{} = {:.2} kg CO2",
            record.id, record.category, record.activity, record.co2_kg
        );
        Ok(record)
    }

    /// Find a record by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
        let record = stmt.query_row([id], Self::from_row).optional()?;
        Ok(record)
    }

    /// Most recent records first, at most `limit`
    pub fn list_recent(conn: &Connection, limit: u32) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!(
            "{SELECT_COLUMNS} ORDER BY timestamp DESC, id DESC LIMIT ?1"
        ))?;

        let records = stmt
            .query_map([i64::from(limit)], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Every stored record, oldest first
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;

        let records = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Number of stored records
    pub fn count(conn: &Connection) -> Result<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM emissions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a database row to an EmissionRecord
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let timestamp_str: String = row.get("timestamp")?;
        let timestamp = parse_timestamp(&timestamp_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                6,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())),
            )
        })?;

        Ok(Self {
            id: row.get("id")?,
            category: row.get("category")?,
            activity: row.get("activity")?,
            amount: row.get("amount")?,
            unit: row.get("unit")?,
            co2_kg: row.get("co2_kg")?,
            timestamp,
            owner: row.get("owner")?,
        })
    }
}

/// Fixed-width UTC form used for storage
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::InvalidTimestamp(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use chrono::{Duration, TimeZone};

    fn create_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::migrate(&conn).unwrap();
        conn
    }

    fn new_emission(category: &str, activity: &str, co2_kg: f64) -> NewEmission {
        NewEmission {
            category: category.to_string(),
            activity: activity.to_string(),
            amount: 1.0,
            unit: "kg".to_string(),
            co2_kg,
        }
    }

    #[test]
    fn test_append_and_find() {
        let mut conn = create_test_db();
        let record = EmissionRecord::append(&mut conn, &new_emission("food", "beef", 27.0)).unwrap();
        assert!(record.id > 0);
        assert_eq!(record.owner, DEFAULT_OWNER);

        let found = EmissionRecord::find_by_id(&conn, record.id).unwrap().unwrap();
        assert_eq!(found, record);
        assert!(EmissionRecord::find_by_id(&conn, record.id + 1).unwrap().is_none());
    }

    #[test]
    fn test_full_precision_is_stored() {
        let mut conn = create_test_db();
        let co2 = 3.333 * 0.041;
        let record = EmissionRecord::append(&mut conn, &new_emission("transport", "train", co2)).unwrap();
        let found = EmissionRecord::find_by_id(&conn, record.id).unwrap().unwrap();
        assert_eq!(found.co2_kg, co2);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut conn = create_test_db();
        let mut last = 0;
        for i in 0..5 {
            let record =
                EmissionRecord::append(&mut conn, &new_emission("waste", "landfill", i as f64)).unwrap();
            assert!(record.id > last);
            last = record.id;
        }
        assert_eq!(EmissionRecord::count(&conn).unwrap(), 5);
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let mut conn = create_test_db();
        let later = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let earlier = later - Duration::hours(3);

        let first =
            EmissionRecord::append_at(&mut conn, &new_emission("food", "rice", 4.0), later).unwrap();
        let second =
            EmissionRecord::append_at(&mut conn, &new_emission("food", "rice", 4.0), earlier).unwrap();

        assert_eq!(first.timestamp, later);
        assert_eq!(second.timestamp, later);
        assert!(second.id > first.id);
    }

    #[test]
    fn test_list_recent_is_newest_first() {
        let mut conn = create_test_db();
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        for (i, activity) in ["bus", "train", "car_petrol"].iter().enumerate() {
            EmissionRecord::append_at(
                &mut conn,
                &new_emission("transport", activity, 1.0),
                start + Duration::minutes(i as i64),
            )
            .unwrap();
        }

        let recent = EmissionRecord::list_recent(&conn, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].activity, "car_petrol");
        assert_eq!(recent[1].activity, "train");

        let all = EmissionRecord::list_all(&conn).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].activity, "bus");
    }

    #[test]
    fn test_same_timestamp_breaks_ties_by_id() {
        let mut conn = create_test_db();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let a = EmissionRecord::append_at(&mut conn, &new_emission("food", "milk", 1.9), at).unwrap();
        let b = EmissionRecord::append_at(&mut conn, &new_emission("food", "fish", 6.1), at).unwrap();

        let recent = EmissionRecord::list_recent(&conn, 10).unwrap();
        assert_eq!(recent[0].id, b.id);
        assert_eq!(recent[1].id, a.id);
    }

    #[test]
    fn test_timestamp_format_roundtrip() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        let s = format_timestamp(&ts);
        assert_eq!(s, "2026-10-17T09:30:00.000000Z");
        assert_eq!(parse_timestamp(&s).unwrap(), ts);
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(Error::InvalidTimestamp(_))
        ));
    }
}
