//! Animal database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Animal, AnimalStatus, Species};

const ANIMAL_COLUMNS: &str =
    "id, farm_id, tag_number, name, species, breed, date_of_birth, weight, status";

fn animal_from_row(row: &Row<'_>) -> rusqlite::Result<AnimalRow> {
    Ok(AnimalRow {
        id: row.get(0)?,
        farm_id: row.get(1)?,
        tag_number: row.get(2)?,
        name: row.get(3)?,
        species: row.get(4)?,
        breed: row.get(5)?,
        date_of_birth: row.get(6)?,
        weight: row.get(7)?,
        status: row.get(8)?,
    })
}

impl Database {
    /// Insert a new animal.
    pub fn insert_animal(&self, animal: &Animal) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO animals (
                id, farm_id, tag_number, name, species, breed,
                date_of_birth, weight, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                animal.id,
                animal.farm_id,
                animal.tag_number,
                animal.name,
                animal.species.as_str(),
                animal.breed,
                animal.date_of_birth,
                animal.weight,
                animal.status.as_str(),
            ],
        )?;
        Ok(())
    }

    /// Get an animal by ID.
    pub fn get_animal(&self, id: &str) -> DbResult<Option<Animal>> {
        self.conn
            .query_row(
                &format!("SELECT {ANIMAL_COLUMNS} FROM animals WHERE id = ?"),
                [id],
                animal_from_row,
            )
            .optional()?
            .map(Animal::try_from)
            .transpose()
    }

    /// List all animals.
    pub fn list_animals(&self) -> DbResult<Vec<Animal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ANIMAL_COLUMNS} FROM animals ORDER BY tag_number"))?;

        let rows = stmt.query_map([], animal_from_row)?;
        let mut animals = Vec::new();
        for row in rows {
            animals.push(row?.try_into()?);
        }
        Ok(animals)
    }

    /// List the animals registered to one farm.
    pub fn list_animals_for_farm(&self, farm_id: &str) -> DbResult<Vec<Animal>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals WHERE farm_id = ? ORDER BY tag_number"
        ))?;

        let rows = stmt.query_map([farm_id], animal_from_row)?;
        let mut animals = Vec::new();
        for row in rows {
            animals.push(row?.try_into()?);
        }
        Ok(animals)
    }

    /// Count the animals registered to one farm.
    pub fn count_animals_for_farm(&self, farm_id: &str) -> DbResult<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM animals WHERE farm_id = ?",
            [farm_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

/// Intermediate row struct for database mapping.
struct AnimalRow {
    id: String,
    farm_id: String,
    tag_number: String,
    name: String,
    species: String,
    breed: Option<String>,
    date_of_birth: Option<chrono::NaiveDate>,
    weight: Option<f64>,
    status: String,
}

impl TryFrom<AnimalRow> for Animal {
    type Error = DbError;

    fn try_from(row: AnimalRow) -> Result<Self, Self::Error> {
        let species = Species::parse(&row.species)
            .ok_or_else(|| DbError::Constraint(format!("Unknown species: {}", row.species)))?;
        let status = AnimalStatus::parse(&row.status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown animal status: {}", row.status)))?;

        Ok(Animal {
            id: row.id,
            farm_id: row.farm_id,
            tag_number: row.tag_number,
            name: row.name,
            species,
            breed: row.breed,
            date_of_birth: row.date_of_birth,
            weight: row.weight,
            status,
        })
    }
}
