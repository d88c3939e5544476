// SPDX-License-Identifier: MIT
//
// Request validation. Runs to completion before any identifier is assigned
// or any file is written, so a failed request leaves zero trace.

use crate::error::{CertmintError, Result};
use crate::types::CertificateRequest;

/// Reject a malformed generation request, naming the first missing or blank
/// required field. Performs no side effects.
pub fn validate_request(request: &CertificateRequest) -> Result<()> {
    if request.participant_name.trim().is_empty() {
        return Err(CertmintError::Validation(
            "participant name is required".into(),
        ));
    }
    if request.course_name.trim().is_empty() {
        return Err(CertmintError::Validation("course name is required".into()));
    }
    if request.issuer_name.trim().is_empty() {
        return Err(CertmintError::Validation("issuer name is required".into()));
    }
    if request.completion_date.is_none() {
        return Err(CertmintError::Validation(
            "completion date is required".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> CertificateRequest {
        CertificateRequest {
            participant_name: "Ada Lovelace".into(),
            course_name: "Systems Design".into(),
            completion_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            issuer_name: "Acme Academy".into(),
        }
    }

    #[test]
    fn accepts_complete_request() {
        assert!(validate_request(&request()).is_ok());
    }

    #[test]
    fn rejects_blank_participant_first() {
        let mut req = request();
        req.participant_name = "   ".into();
        req.course_name = String::new();

        let err = validate_request(&req).unwrap_err();
        assert!(matches!(err, CertmintError::Validation(ref msg) if msg.contains("participant")));
    }

    #[test]
    fn rejects_blank_course() {
        let mut req = request();
        req.course_name = "".into();
        let err = validate_request(&req).unwrap_err();
        assert!(matches!(err, CertmintError::Validation(ref msg) if msg.contains("course")));
    }

    #[test]
    fn rejects_blank_issuer() {
        let mut req = request();
        req.issuer_name = "\t".into();
        let err = validate_request(&req).unwrap_err();
        assert!(matches!(err, CertmintError::Validation(ref msg) if msg.contains("issuer")));
    }

    #[test]
    fn rejects_missing_completion_date() {
        let mut req = request();
        req.completion_date = None;
        let err = validate_request(&req).unwrap_err();
        assert!(matches!(err, CertmintError::Validation(ref msg) if msg.contains("completion")));
    }

    #[test]
    fn future_completion_date_is_not_rejected() {
        // Caller-supplied dates are trusted as-is; tightening this is a
        // product decision, not a validator one.
        let mut req = request();
        req.completion_date = NaiveDate::from_ymd_opt(2099, 12, 31);
        assert!(validate_request(&req).is_ok());
    }
}
