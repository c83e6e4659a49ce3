//! Farm report database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::FarmReport;

const REPORT_COLUMNS: &str = "id, farm_id, file_name, file_type, file_size, uploaded_by, \
                              uploaded_at, report_type, description";

fn report_from_row(row: &Row<'_>) -> rusqlite::Result<FarmReport> {
    Ok(FarmReport {
        id: row.get(0)?,
        farm_id: row.get(1)?,
        file_name: row.get(2)?,
        file_type: row.get(3)?,
        file_size: row.get(4)?,
        uploaded_by: row.get(5)?,
        uploaded_at: row.get(6)?,
        report_type: row.get(7)?,
        description: row.get(8)?,
    })
}

impl Database {
    /// Insert a new farm report.
    pub fn insert_report(&self, report: &FarmReport) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO farm_reports (
                id, farm_id, file_name, file_type, file_size, uploaded_by,
                uploaded_at, report_type, description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                report.id,
                report.farm_id,
                report.file_name,
                report.file_type,
                report.file_size,
                report.uploaded_by,
                report.uploaded_at,
                report.report_type,
                report.description,
            ],
        )?;
        Ok(())
    }

    /// Get a farm report by ID.
    pub fn get_report(&self, id: &str) -> DbResult<Option<FarmReport>> {
        self.conn
            .query_row(
                &format!("SELECT {REPORT_COLUMNS} FROM farm_reports WHERE id = ?"),
                [id],
                report_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all farm reports.
    pub fn list_reports(&self) -> DbResult<Vec<FarmReport>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REPORT_COLUMNS} FROM farm_reports ORDER BY uploaded_at DESC"
        ))?;

        let rows = stmt.query_map([], report_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List the reports uploaded for one farm.
    pub fn list_reports_for_farm(&self, farm_id: &str) -> DbResult<Vec<FarmReport>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REPORT_COLUMNS} FROM farm_reports WHERE farm_id = ? ORDER BY uploaded_at DESC"
        ))?;

        let rows = stmt.query_map([farm_id], report_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
