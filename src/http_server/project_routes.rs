//! Project HTTP Routes
//!
//! Conservation projects and the newsletter mailing list.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use super::errors::{ApiError, ApiResult};
use crate::store::{Record, Store};

const LIST_PROJECTS: &str = "
    SELECT cp.*, GROUP_CONCAT(h.NATIONAL_PARK_NAME, ', ') AS parks
    FROM CONSERVATION_PROJECT cp
    LEFT JOIN HOSTS h ON h.PROJECT_ID=cp.PROJECT_ID
    GROUP BY cp.PROJECT_ID
    ORDER BY cp.START_DATE DESC";

const MAILING_LIST: &str = "
    SELECT FIRST_NAME, LAST_NAME, STREET, CITY, STATE, POSTAL_CODE, EMAIL_ADDRESS
    FROM PERSON
    WHERE NEWSLETTER_SUBSCRIBED=1
    ORDER BY LAST_NAME, FIRST_NAME";

/// Create project and mailing-list routes
pub fn project_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/projects", get(list_projects_handler))
        .route("/mailing-list", get(mailing_list_handler))
        .with_state(store)
}

async fn list_projects_handler(State(store): State<Arc<Store>>) -> ApiResult<Json<Vec<Record>>> {
    let rows = store.query_rows(LIST_PROJECTS, []).map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn mailing_list_handler(State(store): State<Arc<Store>>) -> ApiResult<Json<Vec<Record>>> {
    let rows = store.query_rows(MAILING_LIST, []).map_err(ApiError::read)?;
    Ok(Json(rows))
}
