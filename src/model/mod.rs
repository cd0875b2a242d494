//! Request contracts
//!
//! One input type per create endpoint and one filter type per filterable
//! list endpoint. Each is validated before any statement is built.

mod filters;
mod requests;
mod validation;
mod values;

pub use filters::{DonationFilter, EnrollmentFilter, MonthRange, ProgramFilter};
pub use requests::{
    today, NewDonation, NewEmergencyContact, NewEnrollment, NewPark, NewPerson, NewProgram,
    NewRanger, NewResearcher, NewTeam, NewVisitor, Payment, RawQueryRequest,
};
pub use validation::{Validate, ValidationError};
pub use values::{lenient_number, lenient_text, non_blank, Flag, Key};
