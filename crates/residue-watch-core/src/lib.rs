//! Residue-Watch Core Library
//!
//! Farm antimicrobial-treatment tracking with maximum-residue-limit (MRL)
//! compliance classification.
//!
//! # Architecture
//!
//! ```text
//! Treatment intake ──▶ classify(mrl_level) ──▶ stored record
//!                                              (status fixed at creation)
//!                                                       │
//!                                              full record collection
//!                                                       │
//!                     ┌─────────────────┬───────────────┼───────────────┐
//!                     ▼                 ▼               ▼               ▼
//!                Dashboard         6-month          Compliance       System
//!                  stats            trends         distribution       stats
//!                (recomputed from scratch on every read, no cached aggregates)
//! ```
//!
//! # Core Principle
//!
//! **Compliance status is fixed at creation.** A treatment record's status is
//! classified once, from the residue level measured for that record, and is
//! never recomputed afterwards. Dashboards always aggregate the statuses as
//! they were persisted.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Farm, Animal, TreatmentRecord, etc.)
//! - [`compliance`]: MRL threshold classifier
//! - [`reporting`]: Pure read-side aggregations for dashboards and admin
//! - [`storage`]: Storage port and the in-memory implementation
//! - [`db`]: Embedded SQLite implementation

pub mod compliance;
pub mod db;
pub mod models;
pub mod reporting;
pub mod storage;

// Re-export commonly used types
pub use db::Database;
pub use models::{
    Animal, AnimalStatus, ComplianceStatus, Farm, FarmReport, NewAnimal, NewFarm, NewFarmReport,
    NewTreatmentRecord, NewUser, Role, Species, TreatmentRecord, User,
};
pub use reporting::{DashboardStats, DistributionSlice, SystemStats, TrendPoint};
pub use storage::{MemStorage, Storage, StorageError};

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use tracing::info;

// =========================================================================
// Crate-level Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum ResidueWatchError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<StorageError> for ResidueWatchError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(msg) => ResidueWatchError::NotFound(msg),
            StorageError::Constraint(msg) => ResidueWatchError::InvalidInput(msg),
            StorageError::Database(msg) => ResidueWatchError::Storage(msg),
        }
    }
}

impl From<db::DbError> for ResidueWatchError {
    fn from(e: db::DbError) -> Self {
        StorageError::from(e).into()
    }
}

impl From<serde_json::Error> for ResidueWatchError {
    fn from(e: serde_json::Error) -> Self {
        ResidueWatchError::Serialization(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ResidueWatchError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ResidueWatchError::Storage(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe entry point over an injected storage backend.
///
/// Wraps any [`Storage`] implementation behind a lock and exposes the
/// entity operations plus the four dashboard/report queries. Each query
/// fetches the full current collections and hands them to the pure
/// functions in [`reporting`] with today's UTC date.
pub struct ResidueWatchCore {
    storage: Arc<Mutex<dyn Storage>>,
}

impl ResidueWatchCore {
    /// Open (or create) the embedded database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ResidueWatchError> {
        let db = Database::open(path)?;
        Ok(Self {
            storage: Arc::new(Mutex::new(db)),
        })
    }

    /// Run over in-memory maps (for tests, or when no database is
    /// configured).
    pub fn in_memory() -> Self {
        Self {
            storage: Arc::new(Mutex::new(MemStorage::new())),
        }
    }

    /// Wrap an externally constructed storage backend.
    pub fn with_storage(storage: Arc<Mutex<dyn Storage>>) -> Self {
        Self { storage }
    }

    // =========================================================================
    // User Operations
    // =========================================================================

    /// Register a user account.
    pub fn create_user(&self, new: NewUser) -> Result<User, ResidueWatchError> {
        let mut store = self.storage.lock()?;
        let user = store.create_user(new)?;
        info!(user_id = %user.id, role = user.role.as_str(), "user created");
        Ok(user)
    }

    /// Get a user by ID.
    pub fn get_user(&self, id: &str) -> Result<Option<User>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_user(id)?)
    }

    /// Get a user by username.
    pub fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_user_by_username(username)?)
    }

    /// Get a user by email.
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_user_by_email(email)?)
    }

    /// List all users.
    pub fn list_users(&self) -> Result<Vec<User>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_all_users()?)
    }

    /// Change a user's role.
    pub fn update_user_role(&self, user_id: &str, role: Role) -> Result<(), ResidueWatchError> {
        let mut store = self.storage.lock()?;
        if store.update_user_role(user_id, role)? {
            info!(%user_id, role = role.as_str(), "user role updated");
            Ok(())
        } else {
            Err(ResidueWatchError::NotFound(format!("user: {user_id}")))
        }
    }

    // =========================================================================
    // Farm Operations
    // =========================================================================

    /// Register a farm.
    pub fn create_farm(&self, new: NewFarm) -> Result<Farm, ResidueWatchError> {
        let mut store = self.storage.lock()?;
        let farm = store.create_farm(new)?;
        info!(farm_id = %farm.id, "farm created");
        Ok(farm)
    }

    /// Get a farm by ID.
    pub fn get_farm(&self, id: &str) -> Result<Option<Farm>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_farm_by_id(id)?)
    }

    /// List all farms.
    pub fn list_farms(&self) -> Result<Vec<Farm>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_all_farms()?)
    }

    // =========================================================================
    // Animal Operations
    // =========================================================================

    /// Register an animal. Refreshes the owning farm's animal counter.
    pub fn create_animal(&self, new: NewAnimal) -> Result<Animal, ResidueWatchError> {
        let mut store = self.storage.lock()?;
        let animal = store.create_animal(new)?;
        info!(animal_id = %animal.id, farm_id = %animal.farm_id, "animal created");
        Ok(animal)
    }

    /// Get an animal by ID.
    pub fn get_animal(&self, id: &str) -> Result<Option<Animal>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_animal_by_id(id)?)
    }

    /// List all animals.
    pub fn list_animals(&self) -> Result<Vec<Animal>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_all_animals()?)
    }

    /// List the animals registered to one farm.
    pub fn list_animals_for_farm(&self, farm_id: &str) -> Result<Vec<Animal>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_animals_by_farm_id(farm_id)?)
    }

    // =========================================================================
    // Treatment Record Operations
    // =========================================================================

    /// Record a treatment. Runs the compliance classifier exactly once;
    /// the resulting status is stored with the record.
    pub fn create_treatment_record(
        &self,
        new: NewTreatmentRecord,
    ) -> Result<TreatmentRecord, ResidueWatchError> {
        let mut store = self.storage.lock()?;
        let record = store.create_treatment_record(new)?;
        info!(
            record_id = %record.id,
            status = record.compliance_status.as_str(),
            "treatment recorded"
        );
        Ok(record)
    }

    /// Get a treatment record by ID.
    pub fn get_treatment_record(
        &self,
        id: &str,
    ) -> Result<Option<TreatmentRecord>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_treatment_record_by_id(id)?)
    }

    /// List all treatment records.
    pub fn list_treatment_records(&self) -> Result<Vec<TreatmentRecord>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_all_treatment_records()?)
    }

    /// List the treatment records for one farm.
    pub fn list_treatment_records_for_farm(
        &self,
        farm_id: &str,
    ) -> Result<Vec<TreatmentRecord>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_treatment_records_by_farm_id(farm_id)?)
    }

    /// List the treatment records for one animal.
    pub fn list_treatment_records_for_animal(
        &self,
        animal_id: &str,
    ) -> Result<Vec<TreatmentRecord>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_treatment_records_by_animal_id(animal_id)?)
    }

    // =========================================================================
    // Farm Report Operations
    // =========================================================================

    /// Record uploaded report metadata.
    pub fn create_farm_report(
        &self,
        new: NewFarmReport,
    ) -> Result<FarmReport, ResidueWatchError> {
        let mut store = self.storage.lock()?;
        let report = store.create_farm_report(new)?;
        info!(report_id = %report.id, farm_id = %report.farm_id, "farm report recorded");
        Ok(report)
    }

    /// Get a farm report by ID.
    pub fn get_farm_report(&self, id: &str) -> Result<Option<FarmReport>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_farm_report_by_id(id)?)
    }

    /// List all farm reports.
    pub fn list_farm_reports(&self) -> Result<Vec<FarmReport>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_all_farm_reports()?)
    }

    /// List the reports uploaded for one farm.
    pub fn list_farm_reports_for_farm(
        &self,
        farm_id: &str,
    ) -> Result<Vec<FarmReport>, ResidueWatchError> {
        let store = self.storage.lock()?;
        Ok(store.get_farm_reports_by_farm_id(farm_id)?)
    }

    // =========================================================================
    // Dashboard & Report Queries
    // =========================================================================

    /// Summary statistics for the main dashboard.
    pub fn dashboard_stats(&self) -> Result<DashboardStats, ResidueWatchError> {
        let store = self.storage.lock()?;
        let animals = store.get_all_animals()?;
        let treatments = store.get_all_treatment_records()?;
        Ok(reporting::compute_stats(&animals, &treatments, today()))
    }

    /// Treatment counts for the last six calendar months, oldest first.
    pub fn treatment_trends(&self) -> Result<Vec<TrendPoint>, ResidueWatchError> {
        let store = self.storage.lock()?;
        let treatments = store.get_all_treatment_records()?;
        Ok(reporting::compute_trends(&treatments, today()))
    }

    /// Compliance status distribution, zero-count statuses omitted.
    pub fn compliance_distribution(&self) -> Result<Vec<DistributionSlice>, ResidueWatchError> {
        let store = self.storage.lock()?;
        let treatments = store.get_all_treatment_records()?;
        Ok(reporting::compute_distribution(&treatments))
    }

    /// System-wide statistics for the admin console.
    pub fn system_stats(&self) -> Result<SystemStats, ResidueWatchError> {
        let store = self.storage.lock()?;
        let users = store.get_all_users()?;
        let farms = store.get_all_farms()?;
        let animals = store.get_all_animals()?;
        let treatments = store.get_all_treatment_records()?;
        Ok(reporting::compute_system_stats(
            &users,
            &farms,
            &animals,
            &treatments,
        ))
    }
}

/// The current UTC calendar date, the "now" all sliding windows use.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}
