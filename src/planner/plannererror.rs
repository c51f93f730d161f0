use chrono::NaiveDate;

/// Input validation failures of the leave optimizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    /// The end of the requested window lies before its start.
    #[error("invalid date range: end {end} precedes start {start}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate
    },

    /// A negative number of leave days was requested.
    #[error("invalid leave budget {budget}: must be >= 0")]
    InvalidBudget {
        budget: i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let start = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let e = PlannerError::InvalidRange { start, end };
        assert_eq!(e.to_string(), "invalid date range: end 2025-05-01 precedes start 2025-05-02");

        let e = PlannerError::InvalidBudget { budget: -3 };
        assert_eq!(e.to_string(), "invalid leave budget -3: must be >= 0");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<PlannerError>();
    }
}
