//! In-memory storage over ordered maps.

use std::collections::BTreeMap;

use super::{Storage, StorageError, StorageResult};
use crate::models::{
    Animal, Farm, FarmReport, NewAnimal, NewFarm, NewFarmReport, NewTreatmentRecord, NewUser,
    Role, TreatmentRecord, User,
};

/// Map-backed storage, keyed by entity ID.
///
/// The default backend for tests and an in-process fallback when no
/// database is configured. Enforces the same uniqueness rules as the
/// SQLite schema so the two backends stay interchangeable.
#[derive(Debug, Default)]
pub struct MemStorage {
    users: BTreeMap<String, User>,
    farms: BTreeMap<String, Farm>,
    animals: BTreeMap<String, Animal>,
    treatments: BTreeMap<String, TreatmentRecord>,
    reports: BTreeMap<String, FarmReport>,
}

impl MemStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemStorage {
    fn get_user(&self, id: &str) -> StorageResult<Option<User>> {
        Ok(self.users.get(id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(self
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    fn get_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        Ok(self.users.values().find(|u| u.email == email).cloned())
    }

    fn create_user(&mut self, new: NewUser) -> StorageResult<User> {
        if self.users.values().any(|u| u.username == new.username) {
            return Err(StorageError::Constraint(format!(
                "username already exists: {}",
                new.username
            )));
        }
        if self.users.values().any(|u| u.email == new.email) {
            return Err(StorageError::Constraint(format!(
                "email already exists: {}",
                new.email
            )));
        }
        let user = User::from_new(new);
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn get_all_users(&self) -> StorageResult<Vec<User>> {
        Ok(self.users.values().cloned().collect())
    }

    fn update_user_role(&mut self, user_id: &str, role: Role) -> StorageResult<bool> {
        match self.users.get_mut(user_id) {
            Some(user) => {
                user.role = role;
                user.updated_at = chrono::Utc::now().to_rfc3339();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get_all_farms(&self) -> StorageResult<Vec<Farm>> {
        Ok(self.farms.values().cloned().collect())
    }

    fn get_farm_by_id(&self, id: &str) -> StorageResult<Option<Farm>> {
        Ok(self.farms.get(id).cloned())
    }

    fn create_farm(&mut self, new: NewFarm) -> StorageResult<Farm> {
        if self
            .farms
            .values()
            .any(|f| f.registration_number == new.registration_number)
        {
            return Err(StorageError::Constraint(format!(
                "registration number already exists: {}",
                new.registration_number
            )));
        }
        let farm = Farm::from_new(new);
        self.farms.insert(farm.id.clone(), farm.clone());
        Ok(farm)
    }

    fn update_farm_animal_count(&mut self, farm_id: &str, count: u32) -> StorageResult<bool> {
        match self.farms.get_mut(farm_id) {
            Some(farm) => {
                farm.total_animals = count;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get_all_animals(&self) -> StorageResult<Vec<Animal>> {
        Ok(self.animals.values().cloned().collect())
    }

    fn get_animal_by_id(&self, id: &str) -> StorageResult<Option<Animal>> {
        Ok(self.animals.get(id).cloned())
    }

    fn get_animals_by_farm_id(&self, farm_id: &str) -> StorageResult<Vec<Animal>> {
        Ok(self
            .animals
            .values()
            .filter(|a| a.farm_id == farm_id)
            .cloned()
            .collect())
    }

    fn create_animal(&mut self, new: NewAnimal) -> StorageResult<Animal> {
        if self.animals.values().any(|a| a.tag_number == new.tag_number) {
            return Err(StorageError::Constraint(format!(
                "tag number already exists: {}",
                new.tag_number
            )));
        }
        let animal = Animal::from_new(new);
        self.animals.insert(animal.id.clone(), animal.clone());

        // Keep the denormalized counter equal to the live count.
        let count = self
            .animals
            .values()
            .filter(|a| a.farm_id == animal.farm_id)
            .count() as u32;
        self.update_farm_animal_count(&animal.farm_id, count)?;

        Ok(animal)
    }

    fn get_all_treatment_records(&self) -> StorageResult<Vec<TreatmentRecord>> {
        Ok(self.treatments.values().cloned().collect())
    }

    fn get_treatment_record_by_id(&self, id: &str) -> StorageResult<Option<TreatmentRecord>> {
        Ok(self.treatments.get(id).cloned())
    }

    fn get_treatment_records_by_farm_id(
        &self,
        farm_id: &str,
    ) -> StorageResult<Vec<TreatmentRecord>> {
        Ok(self
            .treatments
            .values()
            .filter(|t| t.farm_id == farm_id)
            .cloned()
            .collect())
    }

    fn get_treatment_records_by_animal_id(
        &self,
        animal_id: &str,
    ) -> StorageResult<Vec<TreatmentRecord>> {
        Ok(self
            .treatments
            .values()
            .filter(|t| t.animal_id == animal_id)
            .cloned()
            .collect())
    }

    fn create_treatment_record(
        &mut self,
        new: NewTreatmentRecord,
    ) -> StorageResult<TreatmentRecord> {
        // from_new runs the compliance classifier.
        let record = TreatmentRecord::from_new(new);
        self.treatments.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn get_all_farm_reports(&self) -> StorageResult<Vec<FarmReport>> {
        Ok(self.reports.values().cloned().collect())
    }

    fn get_farm_report_by_id(&self, id: &str) -> StorageResult<Option<FarmReport>> {
        Ok(self.reports.get(id).cloned())
    }

    fn get_farm_reports_by_farm_id(&self, farm_id: &str) -> StorageResult<Vec<FarmReport>> {
        Ok(self
            .reports
            .values()
            .filter(|r| r.farm_id == farm_id)
            .cloned()
            .collect())
    }

    fn create_farm_report(&mut self, new: NewFarmReport) -> StorageResult<FarmReport> {
        let report = FarmReport::from_new(new);
        self.reports.insert(report.id.clone(), report.clone());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComplianceStatus, Species};
    use chrono::NaiveDate;

    fn new_farm(registration: &str) -> NewFarm {
        NewFarm {
            name: "Green Valley".into(),
            location: "Somerset".into(),
            owner_name: "T. Howell".into(),
            registration_number: registration.into(),
            contact_email: "office@greenvalley.example".into(),
            contact_phone: "+44 1458 000000".into(),
        }
    }

    fn new_animal(farm_id: &str, tag: &str) -> NewAnimal {
        NewAnimal {
            farm_id: farm_id.into(),
            tag_number: tag.into(),
            name: "Bella".into(),
            species: Species::Cattle,
            breed: None,
            date_of_birth: None,
            weight: None,
            status: None,
        }
    }

    fn new_treatment(farm_id: &str, animal_id: &str, mrl: Option<&str>) -> NewTreatmentRecord {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        NewTreatmentRecord {
            animal_id: animal_id.into(),
            farm_id: farm_id.into(),
            medicine_name: "Amoxicillin".into(),
            antimicrobial_type: "penicillin".into(),
            dosage: "15".into(),
            unit: "mg".into(),
            administered_by: "Dr. Okafor".into(),
            administered_date: date,
            withdrawal_period_days: 14,
            withdrawal_end_date: NaiveDate::from_ymd_opt(2025, 3, 24).unwrap(),
            purpose_of_treatment: "mastitis".into(),
            mrl_level: mrl.map(Into::into),
            compliance_status: None,
            notes: None,
            recorded_by: "user-1".into(),
        }
    }

    #[test]
    fn test_user_lookups() {
        let mut store = MemStorage::new();
        let user = store
            .create_user(NewUser {
                username: "jdoe".into(),
                password_hash: "hash".into(),
                full_name: "Jane Doe".into(),
                role: Role::Farmer,
                email: "jdoe@example.com".into(),
                farm_id: None,
            })
            .unwrap();

        assert_eq!(store.get_user(&user.id).unwrap().unwrap().username, "jdoe");
        assert!(store.get_user_by_username("jdoe").unwrap().is_some());
        assert!(store
            .get_user_by_email("jdoe@example.com")
            .unwrap()
            .is_some());
        assert!(store.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let mut store = MemStorage::new();
        let new = NewUser {
            username: "jdoe".into(),
            password_hash: "hash".into(),
            full_name: "Jane Doe".into(),
            role: Role::Farmer,
            email: "jdoe@example.com".into(),
            farm_id: None,
        };
        store.create_user(new.clone()).unwrap();

        let mut dup = new;
        dup.email = "other@example.com".into();
        assert!(matches!(
            store.create_user(dup),
            Err(StorageError::Constraint(_))
        ));
    }

    #[test]
    fn test_update_user_role() {
        let mut store = MemStorage::new();
        let user = store
            .create_user(NewUser {
                username: "jdoe".into(),
                password_hash: "hash".into(),
                full_name: "Jane Doe".into(),
                role: Role::Farmer,
                email: "jdoe@example.com".into(),
                farm_id: None,
            })
            .unwrap();

        assert!(store.update_user_role(&user.id, Role::Inspector).unwrap());
        assert_eq!(
            store.get_user(&user.id).unwrap().unwrap().role,
            Role::Inspector
        );
        assert!(!store.update_user_role("missing", Role::Admin).unwrap());
    }

    #[test]
    fn test_animal_count_tracks_inserts() {
        let mut store = MemStorage::new();
        let farm = store.create_farm(new_farm("UK-4451")).unwrap();
        assert_eq!(farm.total_animals, 0);

        store.create_animal(new_animal(&farm.id, "TAG-1")).unwrap();
        store.create_animal(new_animal(&farm.id, "TAG-2")).unwrap();

        let farm = store.get_farm_by_id(&farm.id).unwrap().unwrap();
        assert_eq!(farm.total_animals, 2);
        assert_eq!(store.get_animals_by_farm_id(&farm.id).unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut store = MemStorage::new();
        let farm = store.create_farm(new_farm("UK-4451")).unwrap();
        store.create_animal(new_animal(&farm.id, "TAG-1")).unwrap();
        assert!(matches!(
            store.create_animal(new_animal(&farm.id, "TAG-1")),
            Err(StorageError::Constraint(_))
        ));
    }

    #[test]
    fn test_create_treatment_classifies() {
        let mut store = MemStorage::new();
        let record = store
            .create_treatment_record(new_treatment("farm-1", "animal-1", Some("150")))
            .unwrap();
        assert_eq!(record.compliance_status, ComplianceStatus::Violation);

        let stored = store
            .get_treatment_record_by_id(&record.id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.compliance_status, ComplianceStatus::Violation);
    }

    #[test]
    fn test_treatment_filters() {
        let mut store = MemStorage::new();
        store
            .create_treatment_record(new_treatment("farm-1", "animal-1", None))
            .unwrap();
        store
            .create_treatment_record(new_treatment("farm-1", "animal-2", None))
            .unwrap();
        store
            .create_treatment_record(new_treatment("farm-2", "animal-3", None))
            .unwrap();

        assert_eq!(store.get_all_treatment_records().unwrap().len(), 3);
        assert_eq!(
            store.get_treatment_records_by_farm_id("farm-1").unwrap().len(),
            2
        );
        assert_eq!(
            store
                .get_treatment_records_by_animal_id("animal-3")
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_farm_reports() {
        let mut store = MemStorage::new();
        let report = store
            .create_farm_report(NewFarmReport {
                farm_id: "farm-1".into(),
                file_name: "q2-residues.pdf".into(),
                file_type: "pdf".into(),
                file_size: 48_213,
                uploaded_by: "user-1".into(),
                report_type: "compliance".into(),
                description: Some("Quarterly residue screen".into()),
            })
            .unwrap();

        assert!(store.get_farm_report_by_id(&report.id).unwrap().is_some());
        assert_eq!(store.get_farm_reports_by_farm_id("farm-1").unwrap().len(), 1);
        assert!(store.get_farm_reports_by_farm_id("farm-2").unwrap().is_empty());
    }
}
