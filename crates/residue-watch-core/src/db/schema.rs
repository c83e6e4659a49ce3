//! SQLite schema definition.

/// Complete database schema for residue-watch.
///
/// Cross-entity references (farm_id, animal_id, recorded_by, ...) are weak
/// references by ID (lookups, not ownership), so no foreign keys are
/// declared.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Users
-- ============================================================================

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    full_name TEXT NOT NULL,
    role TEXT NOT NULL,                          -- farmer, inspector, admin
    email TEXT NOT NULL UNIQUE,
    farm_id TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_users_farm ON users(farm_id);

-- ============================================================================
-- Farms
-- ============================================================================

CREATE TABLE IF NOT EXISTS farms (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    location TEXT NOT NULL,
    owner_name TEXT NOT NULL,
    registration_number TEXT NOT NULL UNIQUE,
    contact_email TEXT NOT NULL,
    contact_phone TEXT NOT NULL,
    total_animals INTEGER NOT NULL DEFAULT 0
);

-- ============================================================================
-- Animals
-- ============================================================================

CREATE TABLE IF NOT EXISTS animals (
    id TEXT PRIMARY KEY,
    farm_id TEXT NOT NULL,
    tag_number TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    species TEXT NOT NULL,                       -- cattle, sheep, goat, pig, poultry
    breed TEXT,
    date_of_birth TEXT,
    weight REAL,
    status TEXT NOT NULL DEFAULT 'active'        -- active, quarantine, sold, deceased
);

CREATE INDEX IF NOT EXISTS idx_animals_farm ON animals(farm_id);

-- ============================================================================
-- Treatment Records (immutable after creation)
-- ============================================================================

CREATE TABLE IF NOT EXISTS treatment_records (
    id TEXT PRIMARY KEY,
    animal_id TEXT NOT NULL,
    farm_id TEXT NOT NULL,
    medicine_name TEXT NOT NULL,
    antimicrobial_type TEXT NOT NULL,
    dosage TEXT NOT NULL,
    unit TEXT NOT NULL,
    administered_by TEXT NOT NULL,
    administered_date TEXT NOT NULL,             -- YYYY-MM-DD
    withdrawal_period_days INTEGER NOT NULL,
    withdrawal_end_date TEXT NOT NULL,           -- YYYY-MM-DD
    purpose_of_treatment TEXT NOT NULL,
    mrl_level TEXT,                              -- measured residue, ppb, decimal text
    compliance_status TEXT NOT NULL DEFAULT 'pending',
    notes TEXT,
    recorded_by TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_treatments_farm ON treatment_records(farm_id);
CREATE INDEX IF NOT EXISTS idx_treatments_animal ON treatment_records(animal_id);
CREATE INDEX IF NOT EXISTS idx_treatments_status ON treatment_records(compliance_status);
CREATE INDEX IF NOT EXISTS idx_treatments_date ON treatment_records(administered_date);

-- ============================================================================
-- Farm Reports (uploaded document metadata)
-- ============================================================================

CREATE TABLE IF NOT EXISTS farm_reports (
    id TEXT PRIMARY KEY,
    farm_id TEXT NOT NULL,
    file_name TEXT NOT NULL,
    file_type TEXT NOT NULL,                     -- pdf, excel, csv
    file_size INTEGER NOT NULL,
    uploaded_by TEXT NOT NULL,
    uploaded_at TEXT NOT NULL,
    report_type TEXT NOT NULL,                   -- compliance, inspection, veterinary
    description TEXT
);

CREATE INDEX IF NOT EXISTS idx_reports_farm ON farm_reports(farm_id);
"#;
