//! Compliance classification against maximum residue limits.
//!
//! A treatment's measured residue level (parts-per-billion) is classified
//! exactly once, when the record is created. The resulting status is stored
//! with the record and never recomputed.

use crate::models::ComplianceStatus;

/// Levels at or above this are a warning, in ppb.
pub const WARNING_THRESHOLD_PPB: f64 = 50.0;

/// Levels at or above this are a violation, in ppb.
pub const VIOLATION_THRESHOLD_PPB: f64 = 100.0;

/// Classify a valid, non-negative residue level into its threshold band.
///
/// Both boundaries belong to the upper band: exactly 50 is a warning,
/// exactly 100 is a violation.
pub fn classify_level(level_ppb: f64) -> ComplianceStatus {
    if level_ppb < WARNING_THRESHOLD_PPB {
        ComplianceStatus::Compliant
    } else if level_ppb < VIOLATION_THRESHOLD_PPB {
        ComplianceStatus::Warning
    } else {
        ComplianceStatus::Violation
    }
}

/// Determine the compliance status for a record at creation time.
///
/// The measured level arrives as decimal text, unrounded. When it is
/// absent, unparseable, non-finite or negative, the result is the supplied
/// status (default `pending`); a status is never invented from a missing
/// or invalid measurement. Total: always returns a status, never fails.
pub fn classify(
    mrl_level: Option<&str>,
    supplied: Option<ComplianceStatus>,
) -> ComplianceStatus {
    let fallback = supplied.unwrap_or(ComplianceStatus::Pending);
    let Some(raw) = mrl_level else {
        return fallback;
    };
    match raw.trim().parse::<f64>() {
        Ok(level) if level.is_finite() && level >= 0.0 => classify_level(level),
        _ => fallback,
    }
}
