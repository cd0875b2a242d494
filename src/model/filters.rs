//! Query-string filters for list endpoints

use chrono::{Months, NaiveDate};
use serde::Deserialize;

use super::validation::ValidationError;
use super::values::non_blank;

/// GET /api/programs?park=&after=
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramFilter {
    pub park: Option<String>,
    /// Exclusive lower bound on START_DATE
    pub after: Option<String>,
}

impl ProgramFilter {
    pub fn park(&self) -> Option<String> {
        non_blank(&self.park).map(str::to_string)
    }

    pub fn after(&self) -> Option<String> {
        non_blank(&self.after).map(str::to_string)
    }
}

/// GET /api/enrollments?park=&program=
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentFilter {
    pub park: Option<String>,
    pub program: Option<String>,
}

impl EnrollmentFilter {
    pub fn park(&self) -> Option<String> {
        non_blank(&self.park).map(str::to_string)
    }

    pub fn program(&self) -> Option<String> {
        non_blank(&self.program).map(str::to_string)
    }
}

/// Half-open date range `[start, end)` in ISO form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRange {
    pub start: String,
    pub end: String,
}

/// GET /api/donations?month=YYYY-MM&anon_only=true
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonationFilter {
    pub month: Option<String>,
    pub anon_only: Option<String>,
}

impl DonationFilter {
    /// Date range covered by `month`, if one was given
    pub fn month_range(&self) -> Result<Option<MonthRange>, ValidationError> {
        let Some(month) = non_blank(&self.month) else {
            return Ok(None);
        };
        let invalid = || ValidationError::Invalid(format!("month must be YYYY-MM, got '{}'", month));

        if month.len() != 7 || month.as_bytes()[4] != b'-' {
            return Err(invalid());
        }
        let start = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
            .map_err(|_| invalid())?;
        let end = start
            .checked_add_months(Months::new(1))
            .ok_or_else(invalid)?;

        Ok(Some(MonthRange {
            start: start.format("%Y-%m-%d").to_string(),
            end: end.format("%Y-%m-%d").to_string(),
        }))
    }

    pub fn anonymous_only(&self) -> bool {
        self.anon_only.as_deref() == Some("true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donation_filter(month: &str) -> DonationFilter {
        DonationFilter {
            month: Some(month.to_string()),
            anon_only: None,
        }
    }

    #[test]
    fn test_month_range_bounds() {
        let range = donation_filter("2024-03").month_range().unwrap().unwrap();
        assert_eq!(range.start, "2024-03-01");
        assert_eq!(range.end, "2024-04-01");
    }

    #[test]
    fn test_month_range_rolls_over_year() {
        let range = donation_filter("2023-12").month_range().unwrap().unwrap();
        assert_eq!(range.end, "2024-01-01");
    }

    #[test]
    fn test_month_range_rejects_bad_input() {
        for bad in ["2024-13", "2024-3", "March", "2024/03", "2024-03-01"] {
            assert!(donation_filter(bad).month_range().is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_month_absent() {
        assert_eq!(DonationFilter::default().month_range().unwrap(), None);
        assert_eq!(donation_filter("").month_range().unwrap(), None);
    }

    #[test]
    fn test_anon_only_exact_true() {
        let mut filter = DonationFilter::default();
        assert!(!filter.anonymous_only());
        filter.anon_only = Some("1".to_string());
        assert!(!filter.anonymous_only());
        filter.anon_only = Some("true".to_string());
        assert!(filter.anonymous_only());
    }

    #[test]
    fn test_blank_filters_ignored() {
        let filter = ProgramFilter {
            park: Some(String::new()),
            after: Some("2024-01-01".to_string()),
        };
        assert_eq!(filter.park(), None);
        assert_eq!(filter.after(), Some("2024-01-01".to_string()));
    }
}
