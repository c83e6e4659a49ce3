//! Treatment record database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{ComplianceStatus, TreatmentRecord};

const TREATMENT_COLUMNS: &str =
    "id, animal_id, farm_id, medicine_name, antimicrobial_type, dosage, unit, \
     administered_by, administered_date, withdrawal_period_days, withdrawal_end_date, \
     purpose_of_treatment, mrl_level, compliance_status, notes, recorded_by";

fn treatment_from_row(row: &Row<'_>) -> rusqlite::Result<TreatmentRow> {
    Ok(TreatmentRow {
        id: row.get(0)?,
        animal_id: row.get(1)?,
        farm_id: row.get(2)?,
        medicine_name: row.get(3)?,
        antimicrobial_type: row.get(4)?,
        dosage: row.get(5)?,
        unit: row.get(6)?,
        administered_by: row.get(7)?,
        administered_date: row.get(8)?,
        withdrawal_period_days: row.get(9)?,
        withdrawal_end_date: row.get(10)?,
        purpose_of_treatment: row.get(11)?,
        mrl_level: row.get(12)?,
        compliance_status: row.get(13)?,
        notes: row.get(14)?,
        recorded_by: row.get(15)?,
    })
}

impl Database {
    /// Insert a new treatment record. The record arrives already
    /// classified; this layer only stores it.
    pub fn insert_treatment(&self, record: &TreatmentRecord) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO treatment_records (
                id, animal_id, farm_id, medicine_name, antimicrobial_type,
                dosage, unit, administered_by, administered_date,
                withdrawal_period_days, withdrawal_end_date,
                purpose_of_treatment, mrl_level, compliance_status, notes,
                recorded_by
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
            params![
                record.id,
                record.animal_id,
                record.farm_id,
                record.medicine_name,
                record.antimicrobial_type,
                record.dosage,
                record.unit,
                record.administered_by,
                record.administered_date,
                record.withdrawal_period_days,
                record.withdrawal_end_date,
                record.purpose_of_treatment,
                record.mrl_level,
                record.compliance_status.as_str(),
                record.notes,
                record.recorded_by,
            ],
        )?;
        Ok(())
    }

    /// Get a treatment record by ID.
    pub fn get_treatment(&self, id: &str) -> DbResult<Option<TreatmentRecord>> {
        self.conn
            .query_row(
                &format!("SELECT {TREATMENT_COLUMNS} FROM treatment_records WHERE id = ?"),
                [id],
                treatment_from_row,
            )
            .optional()?
            .map(TreatmentRecord::try_from)
            .transpose()
    }

    /// List all treatment records.
    pub fn list_treatments(&self) -> DbResult<Vec<TreatmentRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TREATMENT_COLUMNS} FROM treatment_records ORDER BY administered_date DESC"
        ))?;

        let rows = stmt.query_map([], treatment_from_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }
        Ok(records)
    }

    /// List the treatment records for one farm.
    pub fn list_treatments_for_farm(&self, farm_id: &str) -> DbResult<Vec<TreatmentRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TREATMENT_COLUMNS} FROM treatment_records \
             WHERE farm_id = ? ORDER BY administered_date DESC"
        ))?;

        let rows = stmt.query_map([farm_id], treatment_from_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }
        Ok(records)
    }

    /// List the treatment records for one animal.
    pub fn list_treatments_for_animal(&self, animal_id: &str) -> DbResult<Vec<TreatmentRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TREATMENT_COLUMNS} FROM treatment_records \
             WHERE animal_id = ? ORDER BY administered_date DESC"
        ))?;

        let rows = stmt.query_map([animal_id], treatment_from_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }
        Ok(records)
    }
}

/// Intermediate row struct for database mapping.
struct TreatmentRow {
    id: String,
    animal_id: String,
    farm_id: String,
    medicine_name: String,
    antimicrobial_type: String,
    dosage: String,
    unit: String,
    administered_by: String,
    administered_date: chrono::NaiveDate,
    withdrawal_period_days: u32,
    withdrawal_end_date: chrono::NaiveDate,
    purpose_of_treatment: String,
    mrl_level: Option<String>,
    compliance_status: String,
    notes: Option<String>,
    recorded_by: String,
}

impl TryFrom<TreatmentRow> for TreatmentRecord {
    type Error = DbError;

    fn try_from(row: TreatmentRow) -> Result<Self, Self::Error> {
        let compliance_status = ComplianceStatus::parse(&row.compliance_status).ok_or_else(|| {
            DbError::Constraint(format!(
                "Unknown compliance status: {}",
                row.compliance_status
            ))
        })?;

        Ok(TreatmentRecord {
            id: row.id,
            animal_id: row.animal_id,
            farm_id: row.farm_id,
            medicine_name: row.medicine_name,
            antimicrobial_type: row.antimicrobial_type,
            dosage: row.dosage,
            unit: row.unit,
            administered_by: row.administered_by,
            administered_date: row.administered_date,
            withdrawal_period_days: row.withdrawal_period_days,
            withdrawal_end_date: row.withdrawal_end_date,
            purpose_of_treatment: row.purpose_of_treatment,
            mrl_level: row.mrl_level,
            compliance_status,
            notes: row.notes,
            recorded_by: row.recorded_by,
        })
    }
}
