//! Farm database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::Farm;

const FARM_COLUMNS: &str = "id, name, location, owner_name, registration_number, \
                            contact_email, contact_phone, total_animals";

fn farm_from_row(row: &Row<'_>) -> rusqlite::Result<Farm> {
    Ok(Farm {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        owner_name: row.get(3)?,
        registration_number: row.get(4)?,
        contact_email: row.get(5)?,
        contact_phone: row.get(6)?,
        total_animals: row.get(7)?,
    })
}

impl Database {
    /// Insert a new farm.
    pub fn insert_farm(&self, farm: &Farm) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO farms (
                id, name, location, owner_name, registration_number,
                contact_email, contact_phone, total_animals
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                farm.id,
                farm.name,
                farm.location,
                farm.owner_name,
                farm.registration_number,
                farm.contact_email,
                farm.contact_phone,
                farm.total_animals,
            ],
        )?;
        Ok(())
    }

    /// Get a farm by ID.
    pub fn get_farm(&self, id: &str) -> DbResult<Option<Farm>> {
        self.conn
            .query_row(
                &format!("SELECT {FARM_COLUMNS} FROM farms WHERE id = ?"),
                [id],
                farm_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all farms.
    pub fn list_farms(&self) -> DbResult<Vec<Farm>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {FARM_COLUMNS} FROM farms ORDER BY name"))?;

        let rows = stmt.query_map([], farm_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Overwrite a farm's denormalized animal counter.
    pub fn set_farm_animal_count(&self, farm_id: &str, count: u32) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE farms SET total_animals = ? WHERE id = ?",
            params![count, farm_id],
        )?;
        Ok(rows_affected > 0)
    }
}
