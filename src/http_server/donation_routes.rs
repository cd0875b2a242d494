//! Donation HTTP Routes
//!
//! Donor summaries and individual donations. Recording a donation grants
//! the donor role and stores the payment subtype in one transaction.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::errors::{ApiError, ApiResult};
use super::extract::{ApiJson, ApiQuery};
use super::responses::MessageResponse;
use crate::model::{non_blank, DonationFilter, NewDonation, Payment, Validate};
use crate::store::{params, Record, SelectBuilder, SqlValue, Store};

const LIST_DONORS: &str = "
    SELECT p.ID, p.FIRST_NAME, p.LAST_NAME, p.EMAIL_ADDRESS, d.IS_ANONYMOUS,
           COUNT(dn.DATE) AS donation_count,
           COALESCE(SUM(dn.AMOUNT), 0) AS total_donated
    FROM DONOR d
    JOIN PERSON p ON p.ID=d.PERSON_ID
    LEFT JOIN DONATION dn ON dn.PERSON_ID=d.PERSON_ID
    GROUP BY d.PERSON_ID
    ORDER BY total_donated DESC";

const SELECT_DONATIONS: &str = "
    SELECT d.*, p.FIRST_NAME || ' ' || p.LAST_NAME AS donor_name, dr.IS_ANONYMOUS
    FROM DONATION d
    JOIN PERSON p ON p.ID=d.PERSON_ID
    JOIN DONOR dr ON dr.PERSON_ID=d.PERSON_ID";

const ENSURE_DONOR: &str = "INSERT OR IGNORE INTO DONOR (PERSON_ID, IS_ANONYMOUS) VALUES (?, ?)";

const INSERT_DONATION: &str = "
    INSERT INTO DONATION (PERSON_ID, DATE, AMOUNT, CAMPAIGN_NAME)
    VALUES (?, ?, ?, ?)";

const INSERT_CARD_PAYMENT: &str = "
    INSERT INTO CREDIT_CARD_DONATION (PERSON_ID, DATE, LAST_FOUR_DIGITS, CARD_TYPE, EXPIRATION_DATE)
    VALUES (?, ?, ?, ?, ?)";

const INSERT_CHECK_PAYMENT: &str = "
    INSERT INTO CHECK_DONATION (PERSON_ID, DATE, CHECK_NUMBER)
    VALUES (?, ?, ?)";

/// Create donor and donation routes
pub fn donation_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/donors", get(list_donors_handler))
        .route(
            "/donations",
            get(list_donations_handler).post(create_donation_handler),
        )
        .with_state(store)
}

async fn list_donors_handler(State(store): State<Arc<Store>>) -> ApiResult<Json<Vec<Record>>> {
    let rows = store.query_rows(LIST_DONORS, []).map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn list_donations_handler(
    State(store): State<Arc<Store>>,
    ApiQuery(filter): ApiQuery<DonationFilter>,
) -> ApiResult<Json<Vec<Record>>> {
    let mut query = SelectBuilder::new(SELECT_DONATIONS);
    if let Some(range) = filter.month_range()? {
        query = query.filter(
            "d.DATE>=? AND d.DATE<?",
            vec![SqlValue::Text(range.start), SqlValue::Text(range.end)],
        );
    }
    let query = query
        .condition_if(filter.anonymous_only(), "dr.IS_ANONYMOUS=1")
        .order_by("d.DATE DESC")
        .build();

    let rows = store.query_built(&query).map_err(ApiError::read)?;
    Ok(Json(rows))
}

async fn create_donation_handler(
    State(store): State<Arc<Store>>,
    ApiJson(donation): ApiJson<NewDonation>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    donation.validate()?;
    let payment = donation.payment()?;

    store
        .transaction(|tx| {
            tx.execute(
                ENSURE_DONOR,
                params![donation.person_id, donation.is_anonymous.unwrap_or_default()],
            )?;
            tx.execute(
                INSERT_DONATION,
                params![
                    donation.person_id,
                    donation.date,
                    donation.amount,
                    non_blank(&donation.campaign_name),
                ],
            )?;
            match &payment {
                Some(Payment::Card {
                    last_four_digits,
                    card_type,
                    expiration_date,
                }) => {
                    tx.execute(
                        INSERT_CARD_PAYMENT,
                        params![
                            donation.person_id,
                            donation.date,
                            last_four_digits,
                            card_type,
                            expiration_date,
                        ],
                    )?;
                }
                Some(Payment::Check { check_number }) => {
                    tx.execute(
                        INSERT_CHECK_PAYMENT,
                        params![donation.person_id, donation.date, check_number],
                    )?;
                }
                None => {}
            }
            Ok(())
        })
        .map_err(ApiError::write)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Donation recorded")),
    ))
}
