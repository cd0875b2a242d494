//! Person HTTP Routes
//!
//! People, their role flags and their emergency contacts.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::errors::{ApiError, ApiResult};
use super::extract::ApiJson;
use super::responses::{CreatedResponse, MessageResponse};
use crate::model::{non_blank, Key, NewEmergencyContact, NewPerson, Validate};
use crate::store::{params, Record, Store};

const LIST_PERSONS: &str = "
    SELECT p.*,
        CASE WHEN v.PERSON_ID  IS NOT NULL THEN 1 ELSE 0 END AS is_visitor,
        CASE WHEN r.PERSON_ID  IS NOT NULL THEN 1 ELSE 0 END AS is_ranger,
        CASE WHEN rs.PERSON_ID IS NOT NULL THEN 1 ELSE 0 END AS is_researcher,
        CASE WHEN d.PERSON_ID  IS NOT NULL THEN 1 ELSE 0 END AS is_donor
    FROM PERSON p
    LEFT JOIN VISITOR    v  ON v.PERSON_ID  = p.ID
    LEFT JOIN RANGER     r  ON r.PERSON_ID  = p.ID
    LEFT JOIN RESEARCHER rs ON rs.PERSON_ID = p.ID
    LEFT JOIN DONOR      d  ON d.PERSON_ID  = p.ID
    ORDER BY p.LAST_NAME, p.FIRST_NAME";

const GET_PERSON: &str = "SELECT * FROM PERSON WHERE ID=?";

const INSERT_PERSON: &str = "
    INSERT INTO PERSON
        (ID, FIRST_NAME, MIDDLE_INITIAL, LAST_NAME, DATE_OF_BIRTH, GENDER, STREET, CITY, STATE,
         POSTAL_CODE, PHONE_NUMBER, EMAIL_ADDRESS, NEWSLETTER_SUBSCRIBED)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const DELETE_PERSON: &str = "DELETE FROM PERSON WHERE ID=?";

const LIST_CONTACTS: &str = "SELECT * FROM EMERGENCY_CONTACT WHERE PERSON_ID=? ORDER BY NAME";

const INSERT_CONTACT: &str = "
    INSERT INTO EMERGENCY_CONTACT (PERSON_ID, NAME, RELATIONSHIP, PHONE_NUMBER)
    VALUES (?, ?, ?, ?)";

/// Create person routes
pub fn person_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/persons", get(list_persons_handler).post(create_person_handler))
        .route(
            "/persons/:id",
            get(get_person_handler).delete(delete_person_handler),
        )
        .route(
            "/persons/:id/emergency-contacts",
            get(list_contacts_handler).post(create_contact_handler),
        )
        .with_state(store)
}

async fn list_persons_handler(State(store): State<Arc<Store>>) -> ApiResult<Json<Vec<Record>>> {
    let rows = store.query_rows(LIST_PERSONS, []).map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn get_person_handler(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Record>> {
    store
        .query_one(GET_PERSON, params![Key::from_path(&id)])
        .map_err(ApiError::read)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Person not found"))
}

async fn create_person_handler(
    State(store): State<Arc<Store>>,
    ApiJson(person): ApiJson<NewPerson>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    person.validate()?;

    let id = person.id.clone().unwrap_or(Key::Int(0));
    store
        .execute(
            INSERT_PERSON,
            params![
                id,
                person.first_name,
                non_blank(&person.middle_initial),
                person.last_name,
                person.date_of_birth,
                non_blank(&person.gender),
                person.street,
                person.city,
                person.state,
                person.postal_code,
                non_blank(&person.phone_number),
                non_blank(&person.email_address),
                person.newsletter_subscribed.unwrap_or_default(),
            ],
        )
        .map_err(ApiError::write)?;

    tracing::debug!(person_id = ?id, "person created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Person created".to_string(),
            id,
        }),
    ))
}

async fn delete_person_handler(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = store
        .execute(DELETE_PERSON, params![Key::from_path(&id)])
        .map_err(ApiError::write)?;
    if deleted == 0 {
        return Err(ApiError::not_found("Person not found"));
    }
    Ok(Json(MessageResponse::new("Person deleted")))
}

async fn list_contacts_handler(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Record>>> {
    let rows = store
        .query_rows(LIST_CONTACTS, params![Key::from_path(&id)])
        .map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn create_contact_handler(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
    ApiJson(contact): ApiJson<NewEmergencyContact>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    contact.validate()?;
    store
        .execute(
            INSERT_CONTACT,
            params![
                Key::from_path(&id),
                contact.name,
                contact.relationship,
                contact.phone_number,
            ],
        )
        .map_err(ApiError::write)?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Contact added"))))
}
