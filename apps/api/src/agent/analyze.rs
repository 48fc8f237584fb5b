//! Aggregate statistics over a query's result set.

use crate::notion::{Record, FIELD_STATUS};

/// Summarizes a record set: total count, rejected count, rejection rate to
/// one decimal place. The empty set gets a fixed message instead of a rate.
pub fn analyze_records(records: &[Record]) -> String {
    let total = records.len();
    if total == 0 {
        return "No job applications found.".to_string();
    }
    let rejected = records
        .iter()
        .filter(|r| r.get(FIELD_STATUS).eq_ignore_ascii_case("rejected"))
        .count();
    let rate = rejected as f64 / total as f64 * 100.0;
    format!("You applied to {total} jobs. {rejected} were rejected. Rejection rate: {rate:.1}%.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(status: &str) -> Record {
        [("Status".to_string(), status.to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_empty_set_returns_fixed_message() {
        assert_eq!(analyze_records(&[]), "No job applications found.");
    }

    #[test]
    fn test_one_rejection_in_four() {
        let records = vec![
            with_status("Applied"),
            with_status("Rejected"),
            with_status("Interview"),
            with_status("Offer"),
        ];
        assert_eq!(
            analyze_records(&records),
            "You applied to 4 jobs. 1 were rejected. Rejection rate: 25.0%."
        );
    }

    #[test]
    fn test_rejected_match_is_case_insensitive() {
        let records = vec![with_status("REJECTED"), with_status("rejected")];
        assert_eq!(
            analyze_records(&records),
            "You applied to 2 jobs. 2 were rejected. Rejection rate: 100.0%."
        );
    }

    #[test]
    fn test_records_without_status_count_toward_total_only() {
        let records = vec![Record::default(), with_status("Rejected"), with_status("Applied")];
        assert_eq!(
            analyze_records(&records),
            "You applied to 3 jobs. 1 were rejected. Rejection rate: 33.3%."
        );
    }
}
