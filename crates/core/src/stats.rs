//! Aggregate statistics over triage records for the admin dashboards.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::acuity::AcuityLevel;
use crate::record::TriageRecord;

/// Age bands used on the statistics page: (label, inclusive min, inclusive max).
pub const AGE_BANDS: [(&str, i32, i32); 5] = [
    ("0-17", 0, 17),
    ("18-30", 18, 30),
    ("31-50", 31, 50),
    ("51-70", 51, 70),
    ("71+", 71, i32::MAX),
];

const UNSPECIFIED_GENDER: &str = "unspecified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub level: AcuityLevel,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBandCount {
    pub band: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageStats {
    pub total: usize,
    /// All five levels, most urgent first, zero-filled.
    pub by_level: Vec<LevelCount>,
    /// Red plus orange encounters.
    pub critical: usize,
    pub age_bands: Vec<AgeBandCount>,
    pub by_gender: BTreeMap<String, usize>,
    /// Patients in the youngest band.
    pub children: usize,
    /// Mean target wait across all records, rounded to whole minutes.
    pub average_target_wait_minutes: u32,
}

impl TriageStats {
    /// Ages are computed on `today`. A birth date in the future counts in the
    /// youngest band.
    pub fn from_records(records: &[TriageRecord], today: NaiveDate) -> Self {
        let mut by_level: Vec<LevelCount> = AcuityLevel::ALL
            .into_iter()
            .map(|level| LevelCount { level, count: 0 })
            .collect();
        let mut age_bands: Vec<AgeBandCount> = AGE_BANDS
            .iter()
            .map(|&(band, _, _)| AgeBandCount { band, count: 0 })
            .collect();
        let mut by_gender = BTreeMap::new();

        for record in records {
            if let Some(slot) = by_level.iter_mut().find(|c| c.level == record.level) {
                slot.count += 1;
            }

            let age = record.patient.age_on(today).max(0);
            if let Some(idx) = AGE_BANDS
                .iter()
                .position(|(_, min, max)| (*min..=*max).contains(&age))
            {
                age_bands[idx].count += 1;
            }

            let gender = match record.patient.gender.trim() {
                "" => UNSPECIFIED_GENDER.to_string(),
                g => g.to_lowercase(),
            };
            *by_gender.entry(gender).or_insert(0) += 1;
        }

        let critical = by_level
            .iter()
            .filter(|c| c.level.is_critical())
            .map(|c| c.count)
            .sum();
        let children = age_bands[0].count;
        let total_wait: u64 = records
            .iter()
            .map(|r| u64::from(r.target_wait_minutes))
            .sum();
        let average_target_wait_minutes = match records.len() as u64 {
            0 => 0,
            n => ((total_wait + n / 2) / n) as u32,
        };

        Self {
            total: records.len(),
            by_level,
            critical,
            age_bands,
            by_gender,
            children,
            average_target_wait_minutes,
        }
    }
}
