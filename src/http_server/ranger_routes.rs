//! Ranger HTTP Routes
//!
//! Rangers, ranger teams and team membership.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::errors::{ApiError, ApiResult};
use super::extract::ApiJson;
use super::responses::MessageResponse;
use crate::model::{non_blank, NewRanger, NewTeam, Validate};
use crate::store::{params, Record, Store};

const LIST_RANGERS: &str = "
    SELECT p.ID, p.FIRST_NAME, p.LAST_NAME, p.EMAIL_ADDRESS, p.PHONE_NUMBER,
           r.START_DATE, r.STATUS, r.CERTIFICATIONS,
           CAST((julianday('now') - julianday(r.START_DATE)) / 365.25 AS INTEGER) AS years_of_service,
           GROUP_CONCAT(rt.TEAM_ID || '(' || CASE WHEN i.TEAM_LEADER=1 THEN 'Leader' ELSE 'Member' END || ')', ', ') AS teams
    FROM RANGER r
    JOIN PERSON p ON p.ID=r.PERSON_ID
    LEFT JOIN INCLUDES i ON i.PERSON_ID=r.PERSON_ID
    LEFT JOIN RANGER_TEAM rt ON rt.TEAM_ID=i.TEAM_ID
    GROUP BY r.PERSON_ID
    ORDER BY p.LAST_NAME, p.FIRST_NAME";

const INSERT_RANGER: &str = "
    INSERT OR IGNORE INTO RANGER (PERSON_ID, START_DATE, STATUS, CERTIFICATIONS)
    VALUES (?, ?, ?, ?)";

const JOIN_TEAM: &str = "
    INSERT OR IGNORE INTO INCLUDES (PERSON_ID, TEAM_ID, TEAM_LEADER)
    VALUES (?, ?, ?)";

const LIST_TEAMS: &str = "
    SELECT rt.*,
        COUNT(DISTINCT i.PERSON_ID) AS member_count,
        COUNT(DISTINCT rto.PERSON_ID) AS researcher_count
    FROM RANGER_TEAM rt
    LEFT JOIN INCLUDES i ON i.TEAM_ID=rt.TEAM_ID
    LEFT JOIN REPORTS_TO rto ON rto.TEAM_ID=rt.TEAM_ID
    GROUP BY rt.TEAM_ID
    ORDER BY rt.TEAM_ID";

const LIST_TEAM_MEMBERS: &str = "
    SELECT r.PERSON_ID, p.FIRST_NAME, p.LAST_NAME, r.CERTIFICATIONS,
           CAST((julianday('now') - julianday(r.START_DATE)) / 365.25 AS INTEGER) AS years_of_service,
           CASE WHEN i.TEAM_LEADER=1 THEN 'Leader' ELSE 'Member' END AS role
    FROM INCLUDES i
    JOIN RANGER r ON r.PERSON_ID=i.PERSON_ID
    JOIN PERSON p ON p.ID=r.PERSON_ID
    WHERE i.TEAM_ID=?
    ORDER BY i.TEAM_LEADER DESC, p.LAST_NAME, p.FIRST_NAME";

const INSERT_TEAM: &str = "
    INSERT INTO RANGER_TEAM (TEAM_ID, FOCUS_AREA, FORMATION_DATE)
    VALUES (?, ?, ?)";

/// Create ranger and team routes
pub fn ranger_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/rangers", get(list_rangers_handler).post(create_ranger_handler))
        .route("/teams", get(list_teams_handler).post(create_team_handler))
        .route("/teams/:id/members", get(list_team_members_handler))
        .with_state(store)
}

async fn list_rangers_handler(State(store): State<Arc<Store>>) -> ApiResult<Json<Vec<Record>>> {
    let rows = store.query_rows(LIST_RANGERS, []).map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn create_ranger_handler(
    State(store): State<Arc<Store>>,
    ApiJson(ranger): ApiJson<NewRanger>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    ranger.validate()?;
    let start_date = ranger.start_date_or_today();

    store
        .transaction(|tx| {
            tx.execute(
                INSERT_RANGER,
                params![
                    ranger.person_id,
                    start_date,
                    ranger.status_or_default(),
                    non_blank(&ranger.certifications),
                ],
            )?;
            if let Some(team) = ranger.team() {
                tx.execute(
                    JOIN_TEAM,
                    params![ranger.person_id, team, ranger.is_leader.unwrap_or_default()],
                )?;
            }
            Ok(())
        })
        .map_err(ApiError::write)?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Ranger created"))))
}

async fn list_teams_handler(State(store): State<Arc<Store>>) -> ApiResult<Json<Vec<Record>>> {
    let rows = store.query_rows(LIST_TEAMS, []).map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn list_team_members_handler(
    State(store): State<Arc<Store>>,
    Path(team_id): Path<String>,
) -> ApiResult<Json<Vec<Record>>> {
    let rows = store
        .query_rows(LIST_TEAM_MEMBERS, params![team_id])
        .map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn create_team_handler(
    State(store): State<Arc<Store>>,
    ApiJson(team): ApiJson<NewTeam>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    team.validate()?;
    let formation_date = team.formation_date_or_today();

    store
        .transaction(|tx| {
            tx.execute(
                INSERT_TEAM,
                params![team.team_id, team.focus_area, formation_date],
            )?;
            if let Some(leader) = team.leader() {
                tx.execute(JOIN_TEAM, params![leader, team.team_id, 1])?;
            }
            Ok(())
        })
        .map_err(ApiError::write)?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Team created"))))
}
