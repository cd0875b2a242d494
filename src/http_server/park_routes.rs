//! Park HTTP Routes
//!
//! National parks and the programs they run.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::errors::{ApiError, ApiResult};
use super::extract::{ApiJson, ApiQuery};
use super::responses::MessageResponse;
use crate::model::{NewPark, NewProgram, ProgramFilter, Validate};
use crate::store::{params, Record, SelectBuilder, Store};

const LIST_PARKS: &str = "
    SELECT np.*,
        (SELECT COUNT(*) FROM PROGRAM WHERE PARK_NAME=np.NAME) AS program_count,
        (SELECT COUNT(*) FROM ENROLL  WHERE PARK_NAME=np.NAME) AS enrollment_count
    FROM NATIONAL_PARK np
    ORDER BY np.NAME";

const INSERT_PARK: &str = "
    INSERT INTO NATIONAL_PARK
        (NAME, STREET, CITY, STATE, POSTAL_CODE, ESTABLISHMENT_DATE, VISITOR_CAPACITY)
    VALUES (?, ?, ?, ?, ?, ?, ?)";

const SELECT_PROGRAMS: &str = "SELECT * FROM PROGRAM";

const INSERT_PROGRAM: &str = "
    INSERT INTO PROGRAM (PARK_NAME, PROGRAM_NAME, TYPE, START_DATE, DURATION)
    VALUES (?, ?, ?, ?, ?)";

/// Create park and program routes
pub fn park_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/parks", get(list_parks_handler).post(create_park_handler))
        .route(
            "/programs",
            get(list_programs_handler).post(create_program_handler),
        )
        .with_state(store)
}

async fn list_parks_handler(State(store): State<Arc<Store>>) -> ApiResult<Json<Vec<Record>>> {
    let rows = store.query_rows(LIST_PARKS, []).map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn create_park_handler(
    State(store): State<Arc<Store>>,
    ApiJson(park): ApiJson<NewPark>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    park.validate()?;
    store
        .execute(
            INSERT_PARK,
            params![
                park.name,
                park.street,
                park.city,
                park.state,
                park.postal_code,
                park.establishment_date,
                park.visitor_capacity,
            ],
        )
        .map_err(ApiError::write)?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Park created"))))
}

async fn list_programs_handler(
    State(store): State<Arc<Store>>,
    ApiQuery(filter): ApiQuery<ProgramFilter>,
) -> ApiResult<Json<Vec<Record>>> {
    let query = SelectBuilder::new(SELECT_PROGRAMS)
        .filter_opt("PARK_NAME=?", filter.park())
        .filter_opt("START_DATE>?", filter.after())
        .order_by("START_DATE")
        .build();
    let rows = store.query_built(&query).map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn create_program_handler(
    State(store): State<Arc<Store>>,
    ApiJson(program): ApiJson<NewProgram>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    program.validate()?;
    store
        .execute(
            INSERT_PROGRAM,
            params![
                program.park_name,
                program.program_name,
                program.kind,
                program.start_date,
                program.duration,
            ],
        )
        .map_err(ApiError::write)?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Program created"))))
}
