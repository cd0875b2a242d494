//! Request bodies, one per create endpoint
//!
//! Wire names are the upper-case column names the browser client sends.

use chrono::Utc;
use serde::Deserialize;

use super::validation::{Required, Validate, ValidationError};
use super::values::{lenient_number, lenient_text, non_blank, Flag, Key};

/// Today's date (UTC) in ISO form
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// POST /api/persons
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewPerson {
    pub id: Option<Key>,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub newsletter_subscribed: Option<Flag>,
}

impl Validate for NewPerson {
    fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .key("ID", &self.id)
            .text("FIRST_NAME", &self.first_name)
            .text("LAST_NAME", &self.last_name)
            .text("DATE_OF_BIRTH", &self.date_of_birth)
            .text("STREET", &self.street)
            .text("CITY", &self.city)
            .text("STATE", &self.state)
            .text("POSTAL_CODE", &self.postal_code)
            .finish()
    }
}

/// POST /api/persons/:id/emergency-contacts
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewEmergencyContact {
    pub name: Option<String>,
    pub relationship: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
}

impl Validate for NewEmergencyContact {
    fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .text("NAME", &self.name)
            .text("RELATIONSHIP", &self.relationship)
            .text("PHONE_NUMBER", &self.phone_number)
            .finish()
    }
}

/// POST /api/parks
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewPark {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub postal_code: Option<String>,
    pub establishment_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub visitor_capacity: Option<f64>,
}

impl Validate for NewPark {
    fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .text("NAME", &self.name)
            .text("STREET", &self.street)
            .text("CITY", &self.city)
            .text("STATE", &self.state)
            .text("POSTAL_CODE", &self.postal_code)
            .text("ESTABLISHMENT_DATE", &self.establishment_date)
            .finish()
    }
}

/// POST /api/programs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewProgram {
    pub park_name: Option<String>,
    pub program_name: Option<String>,
    #[serde(rename = "TYPE")]
    pub kind: Option<String>,
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration: Option<f64>,
}

impl Validate for NewProgram {
    fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .text("PARK_NAME", &self.park_name)
            .text("PROGRAM_NAME", &self.program_name)
            .text("TYPE", &self.kind)
            .text("START_DATE", &self.start_date)
            .present("DURATION", &self.duration)
            .finish()
    }
}

/// POST /api/visitors
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewVisitor {
    pub person_id: Option<Key>,
}

impl Validate for NewVisitor {
    fn validate(&self) -> Result<(), ValidationError> {
        Required::new().key("PERSON_ID", &self.person_id).finish()
    }
}

/// POST /api/enrollments
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewEnrollment {
    pub person_id: Option<Key>,
    pub park_name: Option<String>,
    pub program_name: Option<String>,
    pub visit_date: Option<String>,
    pub accessibility: Option<String>,
}

impl Validate for NewEnrollment {
    fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .key("PERSON_ID", &self.person_id)
            .text("PARK_NAME", &self.park_name)
            .text("PROGRAM_NAME", &self.program_name)
            .finish()
    }
}

/// POST /api/rangers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewRanger {
    pub person_id: Option<Key>,
    pub start_date: Option<String>,
    pub status: Option<String>,
    pub certifications: Option<String>,
    pub team_id: Option<Key>,
    pub is_leader: Option<Flag>,
}

impl NewRanger {
    pub fn start_date_or_today(&self) -> String {
        non_blank(&self.start_date).map_or_else(today, str::to_string)
    }

    pub fn status_or_default(&self) -> &str {
        non_blank(&self.status).unwrap_or("active")
    }

    /// Team to join, if any
    pub fn team(&self) -> Option<&Key> {
        self.team_id.as_ref().filter(|k| !k.is_blank())
    }
}

impl Validate for NewRanger {
    fn validate(&self) -> Result<(), ValidationError> {
        Required::new().key("PERSON_ID", &self.person_id).finish()
    }
}

/// POST /api/teams
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewTeam {
    pub team_id: Option<Key>,
    pub focus_area: Option<String>,
    pub formation_date: Option<String>,
    pub leader_id: Option<Key>,
}

impl NewTeam {
    pub fn formation_date_or_today(&self) -> String {
        non_blank(&self.formation_date).map_or_else(today, str::to_string)
    }

    pub fn leader(&self) -> Option<&Key> {
        self.leader_id.as_ref().filter(|k| !k.is_blank())
    }
}

impl Validate for NewTeam {
    fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .key("TEAM_ID", &self.team_id)
            .text("FOCUS_AREA", &self.focus_area)
            .finish()
    }
}

/// POST /api/researchers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewResearcher {
    pub person_id: Option<Key>,
    pub research_field: Option<String>,
    pub hire_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub salary: Option<f64>,
}

impl Validate for NewResearcher {
    fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .key("PERSON_ID", &self.person_id)
            .text("RESEARCH_FIELD", &self.research_field)
            .text("HIRE_DATE", &self.hire_date)
            .present("SALARY", &self.salary)
            .finish()
    }
}

/// How a donation was paid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payment {
    Card {
        last_four_digits: Key,
        card_type: String,
        expiration_date: String,
    },
    Check {
        check_number: Key,
    },
}

/// POST /api/donations
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewDonation {
    pub person_id: Option<Key>,
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: Option<f64>,
    pub campaign_name: Option<String>,
    pub is_anonymous: Option<Flag>,
    pub payment_type: Option<String>,
    pub last_four_digits: Option<Key>,
    pub card_type: Option<String>,
    pub expiration_date: Option<String>,
    pub check_number: Option<Key>,
}

impl NewDonation {
    /// Payment subtype details, `None` when no payment type was given
    pub fn payment(&self) -> Result<Option<Payment>, ValidationError> {
        match non_blank(&self.payment_type) {
            None => Ok(None),
            Some("card") => {
                Required::new()
                    .key("LAST_FOUR_DIGITS", &self.last_four_digits)
                    .text("CARD_TYPE", &self.card_type)
                    .text("EXPIRATION_DATE", &self.expiration_date)
                    .finish()?;
                Ok(Some(Payment::Card {
                    last_four_digits: self.last_four_digits.clone().unwrap_or(Key::Int(0)),
                    card_type: self.card_type.clone().unwrap_or_default(),
                    expiration_date: self.expiration_date.clone().unwrap_or_default(),
                }))
            }
            Some("check") => {
                Required::new()
                    .key("CHECK_NUMBER", &self.check_number)
                    .finish()?;
                Ok(Some(Payment::Check {
                    check_number: self.check_number.clone().unwrap_or(Key::Int(0)),
                }))
            }
            // Cash and other methods carry no subtype row
            Some(_) => Ok(None),
        }
    }
}

impl Validate for NewDonation {
    fn validate(&self) -> Result<(), ValidationError> {
        Required::new()
            .key("PERSON_ID", &self.person_id)
            .text("DATE", &self.date)
            .nonzero("AMOUNT", &self.amount)
            .finish()?;
        self.payment().map(|_| ())
    }
}

/// POST /api/query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQueryRequest {
    pub sql: Option<String>,
}

impl Validate for RawQueryRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Required::new().text("sql", &self.sql).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_person_wire_names() {
        let person: NewPerson = serde_json::from_value(json!({
            "ID": 1001,
            "FIRST_NAME": "Alice",
            "LAST_NAME": "Johnson",
            "DATE_OF_BIRTH": "1985-04-12",
            "STREET": "12 Pine St",
            "CITY": "Denver",
            "STATE": "CO",
            "POSTAL_CODE": "80202",
            "NEWSLETTER_SUBSCRIBED": true
        }))
        .unwrap();
        assert_eq!(person.id, Some(Key::Int(1001)));
        assert_eq!(person.newsletter_subscribed, Some(Flag(true)));
        assert!(person.validate().is_ok());
    }

    #[test]
    fn test_person_zero_id_is_missing() {
        let person: NewPerson = serde_json::from_value(json!({
            "ID": 0,
            "FIRST_NAME": "Zoe",
            "LAST_NAME": "Park",
            "DATE_OF_BIRTH": "1990-01-01",
            "STREET": "1 Elm St",
            "CITY": "Moab",
            "STATE": "UT",
            "POSTAL_CODE": "84532"
        }))
        .unwrap();
        assert_eq!(
            person.validate(),
            Err(ValidationError::MissingFields(vec!["ID"]))
        );
    }

    #[test]
    fn test_numeric_codes_read_as_text() {
        let person: NewPerson = serde_json::from_value(json!({
            "ID": 12,
            "FIRST_NAME": "Zoe",
            "LAST_NAME": "Park",
            "DATE_OF_BIRTH": "1990-01-01",
            "STREET": "1 Elm St",
            "CITY": "Moab",
            "STATE": "UT",
            "POSTAL_CODE": 84532,
            "PHONE_NUMBER": 4355550100i64
        }))
        .unwrap();
        assert_eq!(person.postal_code.as_deref(), Some("84532"));
        assert_eq!(person.phone_number.as_deref(), Some("4355550100"));
        assert!(person.validate().is_ok());

        let park: NewPark = serde_json::from_value(json!({"POSTAL_CODE": 4609})).unwrap();
        assert_eq!(park.postal_code.as_deref(), Some("4609"));
    }

    #[test]
    fn test_person_missing_fields() {
        let person: NewPerson =
            serde_json::from_value(json!({"ID": 1, "FIRST_NAME": ""})).unwrap();
        let err = person.validate().unwrap_err();
        match err {
            ValidationError::MissingFields(fields) => {
                assert!(fields.contains(&"FIRST_NAME"));
                assert!(fields.contains(&"POSTAL_CODE"));
                assert!(!fields.contains(&"ID"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_program_duration_zero_is_present() {
        let program: NewProgram = serde_json::from_value(json!({
            "PARK_NAME": "Yosemite",
            "PROGRAM_NAME": "Dawn Walk",
            "TYPE": "Hiking",
            "START_DATE": "2024-05-01",
            "DURATION": 0
        }))
        .unwrap();
        assert!(program.validate().is_ok());
    }

    #[test]
    fn test_ranger_defaults() {
        let ranger: NewRanger = serde_json::from_value(json!({"PERSON_ID": "1003"})).unwrap();
        assert!(ranger.validate().is_ok());
        assert_eq!(ranger.status_or_default(), "active");
        assert_eq!(ranger.start_date_or_today(), today());
        assert!(ranger.team().is_none());
    }

    #[test]
    fn test_donation_zero_amount_is_missing() {
        let donation: NewDonation = serde_json::from_value(json!({
            "PERSON_ID": 1001,
            "DATE": "2024-03-01",
            "AMOUNT": 0
        }))
        .unwrap();
        assert!(donation.validate().is_err());
    }

    #[test]
    fn test_donation_payment_subtypes() {
        let card: NewDonation = serde_json::from_value(json!({
            "PERSON_ID": 1001,
            "DATE": "2024-03-01",
            "AMOUNT": "25",
            "PAYMENT_TYPE": "card",
            "LAST_FOUR_DIGITS": "0042",
            "CARD_TYPE": "Visa",
            "EXPIRATION_DATE": "2027-01"
        }))
        .unwrap();
        assert!(card.validate().is_ok());
        assert!(matches!(card.payment().unwrap(), Some(Payment::Card { .. })));

        let check: NewDonation = serde_json::from_value(json!({
            "PERSON_ID": 1001,
            "DATE": "2024-03-01",
            "AMOUNT": 25,
            "PAYMENT_TYPE": "check"
        }))
        .unwrap();
        assert!(check.validate().is_err());

        let cash: NewDonation = serde_json::from_value(json!({
            "PERSON_ID": 1001,
            "DATE": "2024-03-01",
            "AMOUNT": 25,
            "PAYMENT_TYPE": "cash"
        }))
        .unwrap();
        assert!(cash.validate().is_ok());
        assert_eq!(cash.payment().unwrap(), None);
    }

    #[test]
    fn test_raw_query_requires_sql() {
        let req: RawQueryRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.validate().is_err());
    }
}
