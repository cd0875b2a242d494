//! Researcher HTTP Routes

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::errors::{ApiError, ApiResult};
use super::extract::ApiJson;
use super::responses::MessageResponse;
use crate::model::{NewResearcher, Validate};
use crate::store::{params, Record, Store};

const LIST_RESEARCHERS: &str = "
    SELECT p.ID, p.FIRST_NAME, p.LAST_NAME, p.EMAIL_ADDRESS,
           rs.RESEARCH_FIELD, rs.HIRE_DATE, rs.SALARY,
           COUNT(DISTINCT rto.TEAM_ID) AS teams_overseen
    FROM RESEARCHER rs
    JOIN PERSON p ON p.ID=rs.PERSON_ID
    LEFT JOIN REPORTS_TO rto ON rto.PERSON_ID=rs.PERSON_ID
    GROUP BY rs.PERSON_ID
    ORDER BY p.LAST_NAME, p.FIRST_NAME";

// Upsert in place: a delete-and-reinsert would cascade into REPORTS_TO.
const UPSERT_RESEARCHER: &str = "
    INSERT INTO RESEARCHER (PERSON_ID, RESEARCH_FIELD, HIRE_DATE, SALARY)
    VALUES (?, ?, ?, ?)
    ON CONFLICT(PERSON_ID) DO UPDATE SET
        RESEARCH_FIELD=excluded.RESEARCH_FIELD,
        HIRE_DATE=excluded.HIRE_DATE,
        SALARY=excluded.SALARY";

/// Create researcher routes
pub fn researcher_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route(
            "/researchers",
            get(list_researchers_handler).post(create_researcher_handler),
        )
        .with_state(store)
}

async fn list_researchers_handler(
    State(store): State<Arc<Store>>,
) -> ApiResult<Json<Vec<Record>>> {
    let rows = store
        .query_rows(LIST_RESEARCHERS, [])
        .map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn create_researcher_handler(
    State(store): State<Arc<Store>>,
    ApiJson(researcher): ApiJson<NewResearcher>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    researcher.validate()?;
    store
        .execute(
            UPSERT_RESEARCHER,
            params![
                researcher.person_id,
                researcher.research_field,
                researcher.hire_date,
                researcher.salary,
            ],
        )
        .map_err(ApiError::write)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Researcher created")),
    ))
}
