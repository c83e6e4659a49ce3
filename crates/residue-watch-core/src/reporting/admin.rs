//! System-wide statistics for the admin console.

use serde::{Deserialize, Serialize};

use super::count_status;
use crate::models::{Animal, ComplianceStatus, Farm, Role, TreatmentRecord, User};

/// User counts per role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleBreakdown {
    pub farmers: usize,
    pub inspectors: usize,
    pub admins: usize,
}

/// Flat entity counts plus compliance standing, system wide.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub total_users: usize,
    pub total_farms: usize,
    pub total_animals: usize,
    pub total_treatments: usize,
    /// All treatments currently in violation status, no time window
    pub active_violations: usize,
    /// All treatments currently in warning status, no time window
    pub active_warnings: usize,
    pub users_by_role: RoleBreakdown,
}

/// Compute system-wide statistics over the full current collections.
pub fn compute_system_stats(
    users: &[User],
    farms: &[Farm],
    animals: &[Animal],
    treatments: &[TreatmentRecord],
) -> SystemStats {
    let count_role = |role: Role| users.iter().filter(|u| u.role == role).count();

    SystemStats {
        total_users: users.len(),
        total_farms: farms.len(),
        total_animals: animals.len(),
        total_treatments: treatments.len(),
        active_violations: count_status(treatments, ComplianceStatus::Violation),
        active_warnings: count_status(treatments, ComplianceStatus::Warning),
        users_by_role: RoleBreakdown {
            farmers: count_role(Role::Farmer),
            inspectors: count_role(Role::Inspector),
            admins: count_role(Role::Admin),
        },
    }
}
