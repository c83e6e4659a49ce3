//! Read-side aggregate computations for dashboards and reports.
//!
//! Every function here is pure: it takes the full current collections as
//! slices, recomputes from scratch, and holds no state between calls. The
//! time-dependent ones take `today` explicitly; the facade passes the
//! current UTC date.

mod admin;
mod dashboard;

pub use admin::*;
pub use dashboard::*;

use crate::models::{ComplianceStatus, TreatmentRecord};

/// Count treatments carrying the given status.
fn count_status(treatments: &[TreatmentRecord], status: ComplianceStatus) -> usize {
    treatments
        .iter()
        .filter(|t| t.compliance_status == status)
        .count()
}
