//! Query layer for stored earthquakes.

use chrono::{DateTime, SecondsFormat, Utc};
use quake_map_database_models::{EarthquakeRecord, NewEarthquake};
use rusqlite::{Connection, OptionalExtension as _, params};

use crate::DbError;

/// Renders a timestamp in the fixed millisecond RFC 3339 form the `time`
/// column stores, keeping lexicographic order chronological.
fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn row_to_earthquake(row: &rusqlite::Row<'_>) -> rusqlite::Result<EarthquakeRecord> {
    let time: String = row.get("time")?;
    let time = DateTime::parse_from_rfc3339(&time)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    Ok(EarthquakeRecord {
        id: row.get("id")?,
        earthquake_id: row.get("earthquake_id")?,
        time,
        depth: row.get("depth")?,
        magnitude: row.get("magnitude")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        country: row.get("country")?,
        place: row.get::<_, Option<String>>("place")?.unwrap_or_default(),
    })
}

/// Inserts a new earthquake record, returning its database row id.
///
/// # Errors
///
/// Returns [`DbError`] if the insert fails, including a violation of the
/// `UNIQUE` constraint on the feed identifier.
pub fn insert_earthquake(conn: &Connection, quake: &NewEarthquake) -> Result<i64, DbError> {
    conn.execute(
        "INSERT INTO earthquakes
            (earthquake_id, time, depth, magnitude, latitude, longitude, country, place)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            quake.earthquake_id,
            format_time(&quake.time),
            quake.depth,
            quake.magnitude,
            quake.latitude,
            quake.longitude,
            quake.country,
            quake.place,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns the feed identifier of the most recently stored record — the
/// incremental-ingestion cutoff — or `None` if the store is empty.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails.
pub fn latest_earthquake_id(conn: &Connection) -> Result<Option<String>, DbError> {
    let id = conn
        .query_row(
            "SELECT earthquake_id FROM earthquakes ORDER BY time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Returns all stored records ordered by magnitude descending.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails.
pub fn list_by_magnitude(conn: &Connection) -> Result<Vec<EarthquakeRecord>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT id, earthquake_id, time, depth, magnitude, latitude, longitude, country, place
         FROM earthquakes
         ORDER BY magnitude DESC",
    )?;
    let rows = stmt
        .query_map([], row_to_earthquake)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Fetches a single record by database row id.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails.
pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<EarthquakeRecord>, DbError> {
    let record = conn
        .query_row(
            "SELECT id, earthquake_id, time, depth, magnitude, latitude, longitude, country, place
             FROM earthquakes
             WHERE id = ?1",
            params![id],
            row_to_earthquake,
        )
        .optional()?;
    Ok(record)
}

/// Returns the number of stored records.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails.
pub fn count_earthquakes(conn: &Connection) -> Result<i64, DbError> {
    let count = conn.query_row("SELECT COUNT(*) FROM earthquakes", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};

    use super::*;
    use crate::db;

    fn quake(earthquake_id: &str, minutes_ago: i64, magnitude: f64) -> NewEarthquake {
        NewEarthquake {
            earthquake_id: earthquake_id.to_owned(),
            time: Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap()
                - chrono::Duration::minutes(minutes_ago),
            depth: 10.0,
            magnitude,
            latitude: 35.0,
            longitude: -117.5,
            country: Some("United States".to_owned()),
            place: "somewhere".to_owned(),
        }
    }

    #[test]
    fn insert_and_read_back() {
        let conn = db::open_in_memory().unwrap();
        let id = insert_earthquake(&conn, &quake("us7000aaaa", 0, 4.5)).unwrap();

        let record = get_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.earthquake_id, "us7000aaaa");
        assert_eq!(record.country.as_deref(), Some("United States"));
        assert_eq!(record.place, "somewhere");
        assert!((record.magnitude - 4.5).abs() < 1e-9);
        assert_eq!(record.time, quake("us7000aaaa", 0, 4.5).time);
    }

    #[test]
    fn cutoff_is_latest_by_time_not_insert_order() {
        let conn = db::open_in_memory().unwrap();
        assert_eq!(latest_earthquake_id(&conn).unwrap(), None);

        // Inserted oldest-last: the cutoff must follow `time`, not row id.
        insert_earthquake(&conn, &quake("newest", 0, 3.0)).unwrap();
        insert_earthquake(&conn, &quake("middle", 30, 5.0)).unwrap();
        insert_earthquake(&conn, &quake("oldest", 60, 6.0)).unwrap();

        assert_eq!(latest_earthquake_id(&conn).unwrap().as_deref(), Some("newest"));
    }

    #[test]
    fn list_orders_by_magnitude_descending() {
        let conn = db::open_in_memory().unwrap();
        insert_earthquake(&conn, &quake("small", 0, 2.6)).unwrap();
        insert_earthquake(&conn, &quake("large", 10, 6.1)).unwrap();
        insert_earthquake(&conn, &quake("medium", 20, 4.0)).unwrap();

        let ids: Vec<String> = list_by_magnitude(&conn)
            .unwrap()
            .into_iter()
            .map(|r| r.earthquake_id)
            .collect();
        assert_eq!(ids, ["large", "medium", "small"]);
    }

    #[test]
    fn duplicate_feed_identifier_is_rejected() {
        let conn = db::open_in_memory().unwrap();
        insert_earthquake(&conn, &quake("us7000dup", 0, 4.0)).unwrap();

        let err = insert_earthquake(&conn, &quake("us7000dup", 5, 4.1)).unwrap_err();
        assert!(matches!(err, DbError::Sqlite(_)));
        assert_eq!(count_earthquakes(&conn).unwrap(), 1);
    }

    #[test]
    fn null_country_round_trips() {
        let conn = db::open_in_memory().unwrap();
        let mut oceanic = quake("us7000ocean", 0, 5.5);
        oceanic.country = None;

        let id = insert_earthquake(&conn, &oceanic).unwrap();
        let record = get_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(record.country, None);
    }

    #[test]
    fn get_by_id_miss_is_none() {
        let conn = db::open_in_memory().unwrap();
        assert!(get_by_id(&conn, 42).unwrap().is_none());
    }
}
