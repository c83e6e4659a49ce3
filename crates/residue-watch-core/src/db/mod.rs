//! Embedded SQLite database layer.

mod schema;
mod users;
mod farms;
mod animals;
mod treatments;
mod reports;

pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

use crate::models::{
    Animal, Farm, FarmReport, NewAnimal, NewFarm, NewFarmReport, NewTreatmentRecord, NewUser,
    Role, TreatmentRecord, User,
};
use crate::storage::{Storage, StorageError, StorageResult};

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

impl From<DbError> for StorageError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(msg) => StorageError::NotFound(msg),
            DbError::Constraint(msg) => StorageError::Constraint(msg),
            DbError::Sqlite(e) => StorageError::Database(e.to_string()),
        }
    }
}

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        tracing::debug!(path = %path.as_ref().display(), "opening database");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

// The per-entity operation modules define the inherent insert/get/list
// methods; this impl maps them onto the storage port.
impl Storage for Database {
    fn get_user(&self, id: &str) -> StorageResult<Option<User>> {
        Ok(Database::get_user(self, id)?)
    }

    fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(Database::get_user_by_username(self, username)?)
    }

    fn get_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        Ok(Database::get_user_by_email(self, email)?)
    }

    fn create_user(&mut self, new: NewUser) -> StorageResult<User> {
        let user = User::from_new(new);
        self.insert_user(&user)?;
        Ok(user)
    }

    fn get_all_users(&self) -> StorageResult<Vec<User>> {
        Ok(self.list_users()?)
    }

    fn update_user_role(&mut self, user_id: &str, role: Role) -> StorageResult<bool> {
        Ok(self.set_user_role(user_id, role)?)
    }

    fn get_all_farms(&self) -> StorageResult<Vec<Farm>> {
        Ok(self.list_farms()?)
    }

    fn get_farm_by_id(&self, id: &str) -> StorageResult<Option<Farm>> {
        Ok(self.get_farm(id)?)
    }

    fn create_farm(&mut self, new: NewFarm) -> StorageResult<Farm> {
        let farm = Farm::from_new(new);
        self.insert_farm(&farm)?;
        Ok(farm)
    }

    fn update_farm_animal_count(&mut self, farm_id: &str, count: u32) -> StorageResult<bool> {
        Ok(self.set_farm_animal_count(farm_id, count)?)
    }

    fn get_all_animals(&self) -> StorageResult<Vec<Animal>> {
        Ok(self.list_animals()?)
    }

    fn get_animal_by_id(&self, id: &str) -> StorageResult<Option<Animal>> {
        Ok(self.get_animal(id)?)
    }

    fn get_animals_by_farm_id(&self, farm_id: &str) -> StorageResult<Vec<Animal>> {
        Ok(self.list_animals_for_farm(farm_id)?)
    }

    fn create_animal(&mut self, new: NewAnimal) -> StorageResult<Animal> {
        let animal = Animal::from_new(new);
        self.insert_animal(&animal)?;

        // Keep the denormalized counter equal to the live count.
        let count = self.count_animals_for_farm(&animal.farm_id)?;
        self.set_farm_animal_count(&animal.farm_id, count)?;

        Ok(animal)
    }

    fn get_all_treatment_records(&self) -> StorageResult<Vec<TreatmentRecord>> {
        Ok(self.list_treatments()?)
    }

    fn get_treatment_record_by_id(&self, id: &str) -> StorageResult<Option<TreatmentRecord>> {
        Ok(self.get_treatment(id)?)
    }

    fn get_treatment_records_by_farm_id(
        &self,
        farm_id: &str,
    ) -> StorageResult<Vec<TreatmentRecord>> {
        Ok(self.list_treatments_for_farm(farm_id)?)
    }

    fn get_treatment_records_by_animal_id(
        &self,
        animal_id: &str,
    ) -> StorageResult<Vec<TreatmentRecord>> {
        Ok(self.list_treatments_for_animal(animal_id)?)
    }

    fn create_treatment_record(
        &mut self,
        new: NewTreatmentRecord,
    ) -> StorageResult<TreatmentRecord> {
        // from_new runs the compliance classifier.
        let record = TreatmentRecord::from_new(new);
        self.insert_treatment(&record)?;
        Ok(record)
    }

    fn get_all_farm_reports(&self) -> StorageResult<Vec<FarmReport>> {
        Ok(self.list_reports()?)
    }

    fn get_farm_report_by_id(&self, id: &str) -> StorageResult<Option<FarmReport>> {
        Ok(self.get_report(id)?)
    }

    fn get_farm_reports_by_farm_id(&self, farm_id: &str) -> StorageResult<Vec<FarmReport>> {
        Ok(self.list_reports_for_farm(farm_id)?)
    }

    fn create_farm_report(&mut self, new: NewFarmReport) -> StorageResult<FarmReport> {
        let report = FarmReport::from_new(new);
        self.insert_report(&report)?;
        Ok(report)
    }
}
