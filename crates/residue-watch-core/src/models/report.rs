//! Farm report models.
//!
//! The file contents themselves live with the upload handler; this core
//! only tracks the report metadata.

use serde::{Deserialize, Serialize};

/// An uploaded farm document (compliance, inspection or veterinary report).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmReport {
    /// Unique report ID
    pub id: String,
    /// Farm the report concerns (weak reference by ID)
    pub farm_id: String,
    pub file_name: String,
    /// File kind: pdf, excel or csv
    pub file_type: String,
    /// File size in bytes
    pub file_size: u64,
    /// Uploading user (weak reference by ID)
    pub uploaded_by: String,
    /// Upload timestamp, stamped at creation
    pub uploaded_at: String,
    /// Report kind: compliance, inspection or veterinary
    pub report_type: String,
    pub description: Option<String>,
}

/// Insert data for a new farm report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFarmReport {
    pub farm_id: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub uploaded_by: String,
    pub report_type: String,
    pub description: Option<String>,
}

impl FarmReport {
    /// Build a stored report from insert data, minting the ID and stamping
    /// the upload time.
    pub fn from_new(new: NewFarmReport) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            farm_id: new.farm_id,
            file_name: new.file_name,
            file_type: new.file_type,
            file_size: new.file_size,
            uploaded_by: new.uploaded_by,
            uploaded_at: chrono::Utc::now().to_rfc3339(),
            report_type: new.report_type,
            description: new.description,
        }
    }
}
