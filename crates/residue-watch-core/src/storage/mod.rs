//! Storage port for the residue-watch core.
//!
//! The core never talks to a backend directly: callers inject any
//! [`Storage`] implementation. Two live in this crate: [`MemStorage`]
//! (ordered maps, the test double and fallback) and the embedded SQLite
//! [`crate::db::Database`].

mod memory;

pub use memory::MemStorage;

use thiserror::Error;

use crate::models::{
    Animal, Farm, FarmReport, NewAnimal, NewFarm, NewFarmReport, NewTreatmentRecord, NewUser,
    Role, TreatmentRecord, User,
};

/// Storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Record not found: {0}")]
    NotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence operations the core depends on.
///
/// Implementations must preserve two invariants of the creation paths:
/// a treatment record's status is derived once by the classifier
/// (guaranteed by building records through
/// [`TreatmentRecord::from_new`]), and a farm's `total_animals` always
/// equals the live count of animals referencing it after
/// [`Storage::create_animal`] returns.
///
/// Reads return full collections; aggregation happens in
/// [`crate::reporting`] over the snapshot a call observed.
pub trait Storage: Send {
    // Users
    fn get_user(&self, id: &str) -> StorageResult<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> StorageResult<Option<User>>;
    fn create_user(&mut self, new: NewUser) -> StorageResult<User>;
    fn get_all_users(&self) -> StorageResult<Vec<User>>;
    /// Returns false when no such user exists.
    fn update_user_role(&mut self, user_id: &str, role: Role) -> StorageResult<bool>;

    // Farms
    fn get_all_farms(&self) -> StorageResult<Vec<Farm>>;
    fn get_farm_by_id(&self, id: &str) -> StorageResult<Option<Farm>>;
    fn create_farm(&mut self, new: NewFarm) -> StorageResult<Farm>;
    /// Returns false when no such farm exists.
    fn update_farm_animal_count(&mut self, farm_id: &str, count: u32) -> StorageResult<bool>;

    // Animals
    fn get_all_animals(&self) -> StorageResult<Vec<Animal>>;
    fn get_animal_by_id(&self, id: &str) -> StorageResult<Option<Animal>>;
    fn get_animals_by_farm_id(&self, farm_id: &str) -> StorageResult<Vec<Animal>>;
    fn create_animal(&mut self, new: NewAnimal) -> StorageResult<Animal>;

    // Treatment records
    fn get_all_treatment_records(&self) -> StorageResult<Vec<TreatmentRecord>>;
    fn get_treatment_record_by_id(&self, id: &str) -> StorageResult<Option<TreatmentRecord>>;
    fn get_treatment_records_by_farm_id(
        &self,
        farm_id: &str,
    ) -> StorageResult<Vec<TreatmentRecord>>;
    fn get_treatment_records_by_animal_id(
        &self,
        animal_id: &str,
    ) -> StorageResult<Vec<TreatmentRecord>>;
    fn create_treatment_record(
        &mut self,
        new: NewTreatmentRecord,
    ) -> StorageResult<TreatmentRecord>;

    // Farm reports
    fn get_all_farm_reports(&self) -> StorageResult<Vec<FarmReport>>;
    fn get_farm_report_by_id(&self, id: &str) -> StorageResult<Option<FarmReport>>;
    fn get_farm_reports_by_farm_id(&self, farm_id: &str) -> StorageResult<Vec<FarmReport>>;
    fn create_farm_report(&mut self, new: NewFarmReport) -> StorageResult<FarmReport>;
}
