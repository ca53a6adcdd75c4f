//! Field commit validation
//!
//! Rules run before a value is committed to the draft; a failed rule leaves
//! the draft untouched and surfaces an inline message.

use chrono::NaiveDate;
use salesdesk_domain::{CrmError, Result};

/// A PO can only be raised before the engagement starts.
pub fn validate_po_date(po_date: NaiveDate, start_date: Option<NaiveDate>) -> Result<()> {
    match start_date {
        Some(start) if po_date >= start => Err(CrmError::Validation(format!(
            "PO date {} must be before the start date {}",
            po_date, start
        ))),
        _ => Ok(()),
    }
}

/// Invoicing happens on or after the engagement ends.
pub fn validate_invoice_date(invoice_date: NaiveDate, end_date: Option<NaiveDate>) -> Result<()> {
    match end_date {
        Some(end) if invoice_date < end => Err(CrmError::Validation(format!(
            "Invoice date {} must be on or after the end date {}",
            invoice_date, end
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn po_date_after_start_is_rejected() {
        let err = validate_po_date(date(2024, 3, 15), Some(date(2024, 3, 10))).unwrap_err();
        assert!(matches!(err, CrmError::Validation(_)));
    }

    #[test]
    fn po_date_on_start_is_rejected() {
        assert!(validate_po_date(date(2024, 3, 10), Some(date(2024, 3, 10))).is_err());
    }

    #[test]
    fn po_date_before_start_is_accepted() {
        assert!(validate_po_date(date(2024, 3, 1), Some(date(2024, 3, 10))).is_ok());
    }

    #[test]
    fn po_date_without_start_is_accepted() {
        assert!(validate_po_date(date(2024, 3, 1), None).is_ok());
    }

    #[test]
    fn invoice_date_before_end_is_rejected() {
        assert!(validate_invoice_date(date(2024, 4, 1), Some(date(2024, 4, 5))).is_err());
    }

    #[test]
    fn invoice_date_on_or_after_end_is_accepted() {
        assert!(validate_invoice_date(date(2024, 4, 5), Some(date(2024, 4, 5))).is_ok());
        assert!(validate_invoice_date(date(2024, 4, 9), Some(date(2024, 4, 5))).is_ok());
    }
}
