//! Dashboard aggregations: summary stats, monthly trends, status distribution.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::count_status;
use crate::models::{Animal, ComplianceStatus, TreatmentRecord};

/// Month abbreviations for trend labels.
const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// How many calendar months a trend series covers.
const TREND_MONTHS: u32 = 6;

/// Dashboard color tag per status slice, in display order.
const SLICE_ORDER: [(ComplianceStatus, &str); 4] = [
    (ComplianceStatus::Compliant, "hsl(var(--chart-1))"),
    (ComplianceStatus::Warning, "hsl(var(--chart-4))"),
    (ComplianceStatus::Violation, "hsl(var(--destructive))"),
    (ComplianceStatus::Pending, "hsl(var(--muted))"),
];

/// Summary statistics for the main dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_animals: usize,
    /// Treatments whose withdrawal period is still running
    pub active_treatments: usize,
    /// Share of compliant treatments, rounded percentage; 100 for an empty set
    pub compliance_rate: u32,
    pub pending_reports: usize,
    pub violation_count: usize,
    pub warning_count: usize,
}

/// One month's treatment count in the trend series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendPoint {
    /// Month label in `"Mon 'YY"` form
    pub month: String,
    pub treatments: usize,
}

/// One status slice of the compliance distribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributionSlice {
    pub name: String,
    pub value: usize,
    pub color: String,
}

/// Compute the dashboard summary over the full current collections.
///
/// An empty treatment set reports a compliance rate of 100: nothing on
/// record means nothing out of compliance.
pub fn compute_stats(
    animals: &[Animal],
    treatments: &[TreatmentRecord],
    today: NaiveDate,
) -> DashboardStats {
    let total = treatments.len();
    let compliant = count_status(treatments, ComplianceStatus::Compliant);
    let compliance_rate = if total > 0 {
        ((compliant as f64 / total as f64) * 100.0).round() as u32
    } else {
        100
    };

    DashboardStats {
        total_animals: animals.len(),
        active_treatments: treatments
            .iter()
            .filter(|t| t.withdrawal_active(today))
            .count(),
        compliance_rate,
        pending_reports: count_status(treatments, ComplianceStatus::Pending),
        violation_count: count_status(treatments, ComplianceStatus::Violation),
        warning_count: count_status(treatments, ComplianceStatus::Warning),
    }
}

/// Compute the 6-month treatment trend ending at the current month, oldest
/// first. Always exactly six entries; months with no treatments count zero.
///
/// The window slides with `today`: two calls in different calendar months
/// cover different months.
pub fn compute_trends(treatments: &[TreatmentRecord], today: NaiveDate) -> Vec<TrendPoint> {
    (0..TREND_MONTHS)
        .rev()
        .map(|back| {
            let (year, month) = months_back(today, back);
            let count = treatments
                .iter()
                .filter(|t| {
                    t.administered_date.year() == year && t.administered_date.month() == month
                })
                .count();
            TrendPoint {
                month: month_label(year, month),
                treatments: count,
            }
        })
        .collect()
}

/// Compute the status distribution in fixed order (Compliant, Warning,
/// Violation, Pending), dropping statuses with no matching treatments.
pub fn compute_distribution(treatments: &[TreatmentRecord]) -> Vec<DistributionSlice> {
    SLICE_ORDER
        .iter()
        .map(|(status, color)| DistributionSlice {
            name: status.label().to_string(),
            value: count_status(treatments, *status),
            color: (*color).to_string(),
        })
        .filter(|slice| slice.value > 0)
        .collect()
}

/// The calendar month `back` months before the month of `today`.
/// Returns `(year, month)` with month in 1..=12.
pub fn months_back(today: NaiveDate, back: u32) -> (i32, u32) {
    let total = today.year() * 12 + today.month0() as i32 - back as i32;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

/// Format a trend label, e.g. `month_label(2025, 1)` is `"Jan '25"`.
pub fn month_label(year: i32, month: u32) -> String {
    format!(
        "{} '{:02}",
        MONTH_ABBREV[(month - 1) as usize],
        year.rem_euclid(100)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTreatmentRecord, Species};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_treatment(
        status: ComplianceStatus,
        administered: NaiveDate,
        withdrawal_end: NaiveDate,
    ) -> TreatmentRecord {
        // Insert path with an explicit status and no measurement, so the
        // status sticks.
        TreatmentRecord::from_new(NewTreatmentRecord {
            animal_id: "animal-1".into(),
            farm_id: "farm-1".into(),
            medicine_name: "Amoxicillin".into(),
            antimicrobial_type: "penicillin".into(),
            dosage: "15".into(),
            unit: "mg".into(),
            administered_by: "Dr. Okafor".into(),
            administered_date: administered,
            withdrawal_period_days: 14,
            withdrawal_end_date: withdrawal_end,
            purpose_of_treatment: "mastitis".into(),
            mrl_level: None,
            compliance_status: Some(status),
            notes: None,
            recorded_by: "user-1".into(),
        })
    }

    fn make_animal(id: &str) -> Animal {
        Animal {
            id: id.into(),
            farm_id: "farm-1".into(),
            tag_number: format!("TAG-{id}"),
            name: "Bella".into(),
            species: Species::Cattle,
            breed: None,
            date_of_birth: None,
            weight: None,
            status: crate::models::AnimalStatus::Active,
        }
    }

    #[test]
    fn test_stats_empty_set_is_fully_compliant() {
        let stats = compute_stats(&[], &[], date(2025, 6, 1));
        assert_eq!(stats.compliance_rate, 100);
        assert_eq!(stats.total_animals, 0);
        assert_eq!(stats.active_treatments, 0);
        assert_eq!(stats.pending_reports, 0);
    }

    #[test]
    fn test_stats_rounds_compliance_rate() {
        let today = date(2025, 6, 1);
        let treatments = vec![
            make_treatment(ComplianceStatus::Compliant, today, today),
            make_treatment(ComplianceStatus::Warning, today, today),
            make_treatment(ComplianceStatus::Violation, today, today),
        ];
        // 1/3 -> 33.33 rounds to 33
        assert_eq!(compute_stats(&[], &treatments, today).compliance_rate, 33);

        let treatments = vec![
            make_treatment(ComplianceStatus::Compliant, today, today),
            make_treatment(ComplianceStatus::Compliant, today, today),
            make_treatment(ComplianceStatus::Pending, today, today),
        ];
        // 2/3 -> 66.67 rounds to 67
        assert_eq!(compute_stats(&[], &treatments, today).compliance_rate, 67);
    }

    #[test]
    fn test_stats_counts_by_status() {
        let today = date(2025, 6, 1);
        let treatments = vec![
            make_treatment(ComplianceStatus::Compliant, today, today),
            make_treatment(ComplianceStatus::Warning, today, today),
            make_treatment(ComplianceStatus::Violation, today, today),
            make_treatment(ComplianceStatus::Violation, today, today),
            make_treatment(ComplianceStatus::Pending, today, today),
        ];
        let stats = compute_stats(&[make_animal("a1")], &treatments, today);
        assert_eq!(stats.total_animals, 1);
        assert_eq!(stats.warning_count, 1);
        assert_eq!(stats.violation_count, 2);
        assert_eq!(stats.pending_reports, 1);
        assert_eq!(stats.compliance_rate, 20);
    }

    #[test]
    fn test_stats_active_treatments_window() {
        let today = date(2025, 6, 15);
        let treatments = vec![
            // Ends tomorrow: active
            make_treatment(ComplianceStatus::Compliant, date(2025, 6, 1), date(2025, 6, 16)),
            // Ends today: no longer active
            make_treatment(ComplianceStatus::Compliant, date(2025, 6, 1), today),
            // Ended last week
            make_treatment(ComplianceStatus::Compliant, date(2025, 5, 20), date(2025, 6, 8)),
        ];
        assert_eq!(compute_stats(&[], &treatments, today).active_treatments, 1);
    }

    #[test]
    fn test_trends_always_six_entries() {
        let today = date(2025, 6, 1);
        assert_eq!(compute_trends(&[], today).len(), 6);

        let treatments = vec![make_treatment(
            ComplianceStatus::Compliant,
            date(2025, 6, 1),
            today,
        )];
        assert_eq!(compute_trends(&treatments, today).len(), 6);
    }

    #[test]
    fn test_trends_buckets_by_calendar_month() {
        let today = date(2025, 6, 15);
        let treatments = vec![
            make_treatment(ComplianceStatus::Compliant, date(2025, 6, 1), today),
            make_treatment(ComplianceStatus::Warning, date(2025, 6, 30), today),
            make_treatment(ComplianceStatus::Pending, date(2025, 4, 12), today),
            // Outside the window entirely
            make_treatment(ComplianceStatus::Violation, date(2024, 6, 15), today),
        ];
        let trends = compute_trends(&treatments, today);
        let counts: Vec<usize> = trends.iter().map(|p| p.treatments).collect();
        assert_eq!(counts, vec![0, 0, 0, 1, 0, 2]);
    }

    #[test]
    fn test_trends_labels_cross_year_boundary() {
        let trends = compute_trends(&[], date(2025, 2, 15));
        let labels: Vec<&str> = trends.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Sep '24", "Oct '24", "Nov '24", "Dec '24", "Jan '25", "Feb '25"]
        );
    }

    #[test]
    fn test_month_label_format() {
        assert_eq!(month_label(2025, 1), "Jan '25");
        assert_eq!(month_label(2009, 12), "Dec '09");
        assert_eq!(month_label(2100, 7), "Jul '00");
    }

    #[test]
    fn test_months_back() {
        assert_eq!(months_back(date(2025, 6, 15), 0), (2025, 6));
        assert_eq!(months_back(date(2025, 6, 15), 5), (2025, 1));
        assert_eq!(months_back(date(2025, 2, 15), 5), (2024, 9));
        assert_eq!(months_back(date(2025, 1, 1), 1), (2024, 12));
    }

    #[test]
    fn test_distribution_filters_empty_slices() {
        let today = date(2025, 6, 1);
        let treatments = vec![
            make_treatment(ComplianceStatus::Compliant, today, today),
            make_treatment(ComplianceStatus::Compliant, today, today),
        ];
        let distribution = compute_distribution(&treatments);
        assert_eq!(distribution.len(), 1);
        assert_eq!(distribution[0].name, "Compliant");
        assert_eq!(distribution[0].value, 2);
    }

    #[test]
    fn test_distribution_keeps_fixed_order() {
        let today = date(2025, 6, 1);
        let treatments = vec![
            make_treatment(ComplianceStatus::Pending, today, today),
            make_treatment(ComplianceStatus::Violation, today, today),
            make_treatment(ComplianceStatus::Compliant, today, today),
            make_treatment(ComplianceStatus::Warning, today, today),
        ];
        let distribution = compute_distribution(&treatments);
        let names: Vec<&str> = distribution.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Compliant", "Warning", "Violation", "Pending"]);
    }

    #[test]
    fn test_distribution_counts_sum_to_total() {
        let today = date(2025, 6, 1);
        let treatments = vec![
            make_treatment(ComplianceStatus::Warning, today, today),
            make_treatment(ComplianceStatus::Warning, today, today),
            make_treatment(ComplianceStatus::Violation, today, today),
        ];
        let total: usize = compute_distribution(&treatments)
            .iter()
            .map(|s| s.value)
            .sum();
        assert_eq!(total, treatments.len());
    }

    #[test]
    fn test_aggregations_are_idempotent() {
        let today = date(2025, 6, 15);
        let treatments = vec![
            make_treatment(ComplianceStatus::Compliant, date(2025, 5, 2), date(2025, 7, 1)),
            make_treatment(ComplianceStatus::Pending, date(2025, 6, 9), date(2025, 6, 10)),
        ];
        let animals = vec![make_animal("a1"), make_animal("a2")];

        assert_eq!(
            compute_stats(&animals, &treatments, today),
            compute_stats(&animals, &treatments, today)
        );
        assert_eq!(
            compute_trends(&treatments, today),
            compute_trends(&treatments, today)
        );
        assert_eq!(
            compute_distribution(&treatments),
            compute_distribution(&treatments)
        );
    }
}
