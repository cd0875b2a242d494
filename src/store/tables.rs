//! Table identifiers
//!
//! Only these names are ever spliced into SQL text; everything else
//! travels as a bound parameter.

use std::fmt;

/// Tables counted by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Person,
    Visitor,
    Ranger,
    Researcher,
    Donor,
    NationalPark,
    Program,
    RangerTeam,
    ConservationProject,
    Enroll,
    Donation,
}

impl Table {
    /// SQL identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Person => "PERSON",
            Table::Visitor => "VISITOR",
            Table::Ranger => "RANGER",
            Table::Researcher => "RESEARCHER",
            Table::Donor => "DONOR",
            Table::NationalPark => "NATIONAL_PARK",
            Table::Program => "PROGRAM",
            Table::RangerTeam => "RANGER_TEAM",
            Table::ConservationProject => "CONSERVATION_PROJECT",
            Table::Enroll => "ENROLL",
            Table::Donation => "DONATION",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
