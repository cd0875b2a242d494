//! Dashboard statistics
//!
//! All figures come from SQL aggregates read inside one transaction, so
//! the counts agree with each other.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::errors::{ApiError, ApiResult};
use crate::store::{normalize_rows, normalize_value, Record, Store, Table, Transaction};

const RECENT_DONATIONS: &str = "
    SELECT d.AMOUNT, d.DATE, d.CAMPAIGN_NAME,
           p.FIRST_NAME || ' ' || p.LAST_NAME AS donor_name, dr.IS_ANONYMOUS
    FROM DONATION d
    JOIN DONOR dr ON dr.PERSON_ID = d.PERSON_ID
    JOIN PERSON p ON p.ID = d.PERSON_ID
    ORDER BY d.DATE DESC
    LIMIT 5";

const TOP_PARKS: &str = "
    SELECT e.PARK_NAME, COUNT(*) AS enrollments
    FROM ENROLL e
    GROUP BY e.PARK_NAME
    ORDER BY enrollments DESC
    LIMIT 5";

const TOTAL_DONATED: &str = "SELECT COALESCE(SUM(AMOUNT), 0) FROM DONATION";

/// Dashboard summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub persons: i64,
    pub visitors: i64,
    pub rangers: i64,
    pub researchers: i64,
    pub donors: i64,
    pub parks: i64,
    pub programs: i64,
    pub teams: i64,
    pub projects: i64,
    /// Integer 0 when there are no donations
    pub total_donated: serde_json::Value,
    pub enrollments: i64,
    pub recent_donations: Vec<Record>,
    pub top_parks: Vec<Record>,
}

/// Create stats routes
pub fn stats_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/stats", get(stats_handler))
        .with_state(store)
}

fn count(tx: &Transaction<'_>, table: Table) -> rusqlite::Result<i64> {
    tx.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
}

fn rows(tx: &Transaction<'_>, sql: &str) -> rusqlite::Result<Vec<Record>> {
    let mut stmt = tx.prepare(sql)?;
    normalize_rows(&mut stmt, [])
}

async fn stats_handler(State(store): State<Arc<Store>>) -> ApiResult<Json<StatsResponse>> {
    let stats = store
        .transaction(|tx| {
            Ok(StatsResponse {
                persons: count(tx, Table::Person)?,
                visitors: count(tx, Table::Visitor)?,
                rangers: count(tx, Table::Ranger)?,
                researchers: count(tx, Table::Researcher)?,
                donors: count(tx, Table::Donor)?,
                parks: count(tx, Table::NationalPark)?,
                programs: count(tx, Table::Program)?,
                teams: count(tx, Table::RangerTeam)?,
                projects: count(tx, Table::ConservationProject)?,
                total_donated: tx.query_row(TOTAL_DONATED, [], |row| {
                    Ok(normalize_value(row.get_ref(0)?))
                })?,
                enrollments: count(tx, Table::Enroll)?,
                recent_donations: rows(tx, RECENT_DONATIONS)?,
                top_parks: rows(tx, TOP_PARKS)?,
            })
        })
        .map_err(ApiError::read)?;
    Ok(Json(stats))
}
