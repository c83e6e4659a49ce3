//! Treatment record models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::compliance;

/// Compliance status of a treatment's measured residue level.
///
/// Fixed at record creation by the classifier and never recomputed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    /// Residue below the warning threshold
    Compliant,
    /// Residue in the elevated band, below the regulatory limit
    Warning,
    /// Residue at or above the regulatory limit
    Violation,
    /// No measurement recorded yet
    Pending,
}

impl ComplianceStatus {
    /// Canonical lowercase name, as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::Warning => "warning",
            ComplianceStatus::Violation => "violation",
            ComplianceStatus::Pending => "pending",
        }
    }

    /// Capitalized display label, as shown in dashboard breakdowns.
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::Warning => "Warning",
            ComplianceStatus::Violation => "Violation",
            ComplianceStatus::Pending => "Pending",
        }
    }

    /// Parse the canonical lowercase name.
    pub fn parse(s: &str) -> Option<ComplianceStatus> {
        match s {
            "compliant" => Some(ComplianceStatus::Compliant),
            "warning" => Some(ComplianceStatus::Warning),
            "violation" => Some(ComplianceStatus::Violation),
            "pending" => Some(ComplianceStatus::Pending),
            _ => None,
        }
    }
}

/// An antimicrobial treatment administered to one animal.
///
/// Immutable once created. `compliance_status` is derived from `mrl_level`
/// at creation time via [`crate::compliance::classify`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRecord {
    /// Unique record ID
    pub id: String,
    /// Treated animal (weak reference by ID)
    pub animal_id: String,
    /// Farm the animal belongs to (weak reference by ID)
    pub farm_id: String,
    pub medicine_name: String,
    /// Antimicrobial class, e.g. penicillin, tetracycline, sulfonamide
    pub antimicrobial_type: String,
    /// Dose as recorded, numeric-as-text
    pub dosage: String,
    /// Dose unit, e.g. mg, ml, g
    pub unit: String,
    /// Administering party (vet or handler name)
    pub administered_by: String,
    pub administered_date: NaiveDate,
    /// Mandated withdrawal period length
    pub withdrawal_period_days: u32,
    /// Computed end of the withdrawal period
    pub withdrawal_end_date: NaiveDate,
    pub purpose_of_treatment: String,
    /// Measured residue level in parts-per-billion, decimal text.
    /// Kept textual so the value reaches the classifier unrounded.
    pub mrl_level: Option<String>,
    pub compliance_status: ComplianceStatus,
    pub notes: Option<String>,
    /// Recording user (weak reference by ID)
    pub recorded_by: String,
}

/// Insert data for a new treatment record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTreatmentRecord {
    pub animal_id: String,
    pub farm_id: String,
    pub medicine_name: String,
    pub antimicrobial_type: String,
    pub dosage: String,
    pub unit: String,
    pub administered_by: String,
    pub administered_date: NaiveDate,
    pub withdrawal_period_days: u32,
    pub withdrawal_end_date: NaiveDate,
    pub purpose_of_treatment: String,
    pub mrl_level: Option<String>,
    /// Explicit status to keep when no usable measurement is present.
    /// Defaults to `pending`.
    pub compliance_status: Option<ComplianceStatus>,
    pub notes: Option<String>,
    pub recorded_by: String,
}

impl TreatmentRecord {
    /// Build a stored record from insert data, minting the ID and running
    /// the compliance classifier. This is the only construction path, so
    /// every stored record's status is consistent with its measured level.
    pub fn from_new(new: NewTreatmentRecord) -> Self {
        let compliance_status =
            compliance::classify(new.mrl_level.as_deref(), new.compliance_status);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            animal_id: new.animal_id,
            farm_id: new.farm_id,
            medicine_name: new.medicine_name,
            antimicrobial_type: new.antimicrobial_type,
            dosage: new.dosage,
            unit: new.unit,
            administered_by: new.administered_by,
            administered_date: new.administered_date,
            withdrawal_period_days: new.withdrawal_period_days,
            withdrawal_end_date: new.withdrawal_end_date,
            purpose_of_treatment: new.purpose_of_treatment,
            mrl_level: new.mrl_level,
            compliance_status,
            notes: new.notes,
            recorded_by: new.recorded_by,
        }
    }

    /// Whether the withdrawal period is still running on the given date.
    pub fn withdrawal_active(&self, today: NaiveDate) -> bool {
        self.withdrawal_end_date > today
    }
}
