//! Visitor HTTP Routes
//!
//! Visitor roles and program enrollments. Enrolling a person grants the
//! visitor role first, inside the same transaction.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::errors::{ApiError, ApiResult};
use super::extract::{ApiJson, ApiQuery};
use super::responses::MessageResponse;
use crate::model::{non_blank, EnrollmentFilter, NewEnrollment, NewVisitor, Validate};
use crate::store::{params, Record, SelectBuilder, Store};

const LIST_VISITORS: &str = "
    SELECT p.*, v.PERSON_ID AS visitor_id,
        (SELECT COUNT(*) FROM ENROLL WHERE PERSON_ID=p.ID) AS enrollment_count
    FROM VISITOR v
    JOIN PERSON p ON p.ID=v.PERSON_ID
    ORDER BY p.LAST_NAME, p.FIRST_NAME";

const ENSURE_VISITOR: &str = "INSERT OR IGNORE INTO VISITOR (PERSON_ID) VALUES (?)";

const SELECT_ENROLLMENTS: &str = "
    SELECT p.ID, p.FIRST_NAME, p.LAST_NAME, e.PARK_NAME, e.PROGRAM_NAME, e.VISIT_DATE, e.ACCESSIBILITY
    FROM ENROLL e
    JOIN VISITOR v ON v.PERSON_ID=e.PERSON_ID
    JOIN PERSON p ON p.ID=v.PERSON_ID";

const INSERT_ENROLLMENT: &str = "
    INSERT INTO ENROLL (PERSON_ID, PARK_NAME, PROGRAM_NAME, VISIT_DATE, ACCESSIBILITY)
    VALUES (?, ?, ?, ?, ?)";

/// Create visitor and enrollment routes
pub fn visitor_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route(
            "/visitors",
            get(list_visitors_handler).post(create_visitor_handler),
        )
        .route(
            "/enrollments",
            get(list_enrollments_handler).post(create_enrollment_handler),
        )
        .with_state(store)
}

async fn list_visitors_handler(State(store): State<Arc<Store>>) -> ApiResult<Json<Vec<Record>>> {
    let rows = store.query_rows(LIST_VISITORS, []).map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn create_visitor_handler(
    State(store): State<Arc<Store>>,
    ApiJson(visitor): ApiJson<NewVisitor>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    visitor.validate()?;
    store
        .execute(ENSURE_VISITOR, params![visitor.person_id])
        .map_err(ApiError::write)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Visitor role assigned")),
    ))
}

async fn list_enrollments_handler(
    State(store): State<Arc<Store>>,
    ApiQuery(filter): ApiQuery<EnrollmentFilter>,
) -> ApiResult<Json<Vec<Record>>> {
    let query = SelectBuilder::new(SELECT_ENROLLMENTS)
        .filter_opt("e.PARK_NAME=?", filter.park())
        .filter_opt("e.PROGRAM_NAME=?", filter.program())
        .order_by("p.LAST_NAME, p.FIRST_NAME")
        .build();
    let rows = store.query_built(&query).map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn create_enrollment_handler(
    State(store): State<Arc<Store>>,
    ApiJson(enrollment): ApiJson<NewEnrollment>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    enrollment.validate()?;
    store
        .transaction(|tx| {
            tx.execute(ENSURE_VISITOR, params![enrollment.person_id])?;
            tx.execute(
                INSERT_ENROLLMENT,
                params![
                    enrollment.person_id,
                    enrollment.park_name,
                    enrollment.program_name,
                    non_blank(&enrollment.visit_date),
                    non_blank(&enrollment.accessibility),
                ],
            )
        })
        .map_err(ApiError::write)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Enrollment created")),
    ))
}
