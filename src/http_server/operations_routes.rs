//! Operations HTTP Routes
//!
//! Administrative bulk updates and the raw SQL escape hatch.
//!
//! `POST /api/query` runs arbitrary statements. Its only guard is the
//! DROP/TRUNCATE prefix block; mount it only where that is acceptable
//! (see `HttpServerConfig::raw_query_enabled`).

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, post},
    Json, Router,
};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::extract::ApiJson;
use super::responses::{DeletedResponse, UpdatedResponse};
use crate::model::{RawQueryRequest, Validate};
use crate::observability::Event;
use crate::store::{RawStatement, Store, StoreError};

const RAISE_MULTI_TEAM_RESEARCHERS: &str = "
    UPDATE RESEARCHER SET SALARY = ROUND(SALARY * 1.03, 2)
    WHERE PERSON_ID IN (
        SELECT PERSON_ID FROM REPORTS_TO
        GROUP BY PERSON_ID
        HAVING COUNT(DISTINCT TEAM_ID) > 1
    )";

const PURGE_INACTIVE_VISITORS: &str = "
    DELETE FROM VISITOR
    WHERE PERSON_ID NOT IN (SELECT PERSON_ID FROM ENROLL)
      AND PERSON_ID NOT IN (
          SELECT PERSON_ID FROM PARK_PASS WHERE EXPIRATION_DATE > date('now')
      )";

/// Create bulk operation routes
pub fn operations_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route(
            "/operations/researcher-raises",
            post(researcher_raises_handler),
        )
        .route(
            "/operations/inactive-visitors",
            delete(inactive_visitors_handler),
        )
        .with_state(store)
}

/// Create the raw query route
pub fn query_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/query", post(raw_query_handler))
        .with_state(store)
}

async fn researcher_raises_handler(
    State(store): State<Arc<Store>>,
) -> ApiResult<Json<UpdatedResponse>> {
    let updated = store
        .execute(RAISE_MULTI_TEAM_RESEARCHERS, [])
        .map_err(ApiError::read)?;
    tracing::info!(event = %Event::BulkRaiseApplied, updated, "researcher raises applied");
    Ok(Json(UpdatedResponse {
        message: "3% raise applied".to_string(),
        updated,
    }))
}

async fn inactive_visitors_handler(
    State(store): State<Arc<Store>>,
) -> ApiResult<Json<DeletedResponse>> {
    let deleted = store
        .execute(PURGE_INACTIVE_VISITORS, [])
        .map_err(ApiError::read)?;
    tracing::info!(event = %Event::InactiveVisitorsPurged, deleted, "inactive visitors removed");
    Ok(Json(DeletedResponse {
        message: "Inactive visitors removed".to_string(),
        deleted,
    }))
}

async fn raw_query_handler(
    State(store): State<Arc<Store>>,
    ApiJson(request): ApiJson<RawQueryRequest>,
) -> ApiResult<Json<Value>> {
    request.validate()?;
    let text = request.sql.as_deref().unwrap_or_default();

    let statement = RawStatement::parse(text).map_err(|err| {
        if let StoreError::Rejected(reason) = &err {
            tracing::warn!(event = %Event::RawQueryRejected, reason = %reason, "raw query blocked");
        }
        ApiError::write(err)
    })?;

    let outcome = store.run_raw(&statement).map_err(ApiError::write)?;
    tracing::info!(event = %Event::RawQueryExecuted, sql = %statement.sql(), "raw query executed");
    Ok(Json(outcome.to_json()))
}
