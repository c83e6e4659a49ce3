//! Animal models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Livestock species tracked by the system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Cattle,
    Sheep,
    Goat,
    Pig,
    Poultry,
}

impl Species {
    /// Canonical lowercase name, as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Cattle => "cattle",
            Species::Sheep => "sheep",
            Species::Goat => "goat",
            Species::Pig => "pig",
            Species::Poultry => "poultry",
        }
    }

    /// Parse the canonical lowercase name.
    pub fn parse(s: &str) -> Option<Species> {
        match s {
            "cattle" => Some(Species::Cattle),
            "sheep" => Some(Species::Sheep),
            "goat" => Some(Species::Goat),
            "pig" => Some(Species::Pig),
            "poultry" => Some(Species::Poultry),
            _ => None,
        }
    }
}

/// Animal lifecycle status, independent of treatment compliance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnimalStatus {
    Active,
    Quarantine,
    Sold,
    Deceased,
}

impl AnimalStatus {
    /// Canonical lowercase name, as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalStatus::Active => "active",
            AnimalStatus::Quarantine => "quarantine",
            AnimalStatus::Sold => "sold",
            AnimalStatus::Deceased => "deceased",
        }
    }

    /// Parse the canonical lowercase name.
    pub fn parse(s: &str) -> Option<AnimalStatus> {
        match s {
            "active" => Some(AnimalStatus::Active),
            "quarantine" => Some(AnimalStatus::Quarantine),
            "sold" => Some(AnimalStatus::Sold),
            "deceased" => Some(AnimalStatus::Deceased),
            _ => None,
        }
    }
}

/// A registered animal. Belongs to exactly one farm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    /// Unique animal ID
    pub id: String,
    /// Owning farm (weak reference by ID)
    pub farm_id: String,
    /// Ear tag number, unique across the herd register
    pub tag_number: String,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Weight in kg
    pub weight: Option<f64>,
    pub status: AnimalStatus,
}

/// Insert data for a new animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimal {
    pub farm_id: String,
    pub tag_number: String,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub weight: Option<f64>,
    /// Defaults to `active` when omitted
    pub status: Option<AnimalStatus>,
}

impl Animal {
    /// Build a stored animal from insert data, minting the ID.
    pub fn from_new(new: NewAnimal) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            farm_id: new.farm_id,
            tag_number: new.tag_number,
            name: new.name,
            species: new.species,
            breed: new.breed,
            date_of_birth: new.date_of_birth,
            weight: new.weight,
            status: new.status.unwrap_or(AnimalStatus::Active),
        }
    }
}
