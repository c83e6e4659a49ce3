//! Farm models.

use serde::{Deserialize, Serialize};

/// A registered farm holding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    /// Unique farm ID
    pub id: String,
    pub name: String,
    pub location: String,
    pub owner_name: String,
    /// Official registration number, unique per farm
    pub registration_number: String,
    pub contact_email: String,
    pub contact_phone: String,
    /// Denormalized live animal count, refreshed on every animal insert
    pub total_animals: u32,
}

/// Insert data for a new farm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFarm {
    pub name: String,
    pub location: String,
    pub owner_name: String,
    pub registration_number: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl Farm {
    /// Build a stored farm from insert data. The animal counter starts at
    /// zero and is owned by the animal insert path from then on.
    pub fn from_new(new: NewFarm) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: new.name,
            location: new.location,
            owner_name: new.owner_name,
            registration_number: new.registration_number,
            contact_email: new.contact_email,
            contact_phone: new.contact_phone,
            total_animals: 0,
        }
    }
}
