//! Manchester acuity levels and their static lookup tables.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five Manchester Triage System categories.
///
/// `Ord` follows urgency: `Immediate` is the greatest value, `NonUrgent` the
/// least, so `a.max(b)` always yields the more urgent of two levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcuityLevel {
    #[serde(rename = "red")]
    Immediate,
    #[serde(rename = "orange")]
    VeryUrgent,
    #[serde(rename = "yellow")]
    Urgent,
    #[serde(rename = "green")]
    Standard,
    #[serde(rename = "blue")]
    NonUrgent,
}

impl AcuityLevel {
    /// All levels, most urgent first.
    pub const ALL: [AcuityLevel; 5] = [
        AcuityLevel::Immediate,
        AcuityLevel::VeryUrgent,
        AcuityLevel::Urgent,
        AcuityLevel::Standard,
        AcuityLevel::NonUrgent,
    ];

    /// Level used when a classification label cannot be trusted.
    pub const FALLBACK: AcuityLevel = AcuityLevel::Urgent;

    /// Colour label used on the wire and by the remote classifier.
    pub fn color(&self) -> &'static str {
        match self {
            AcuityLevel::Immediate => "red",
            AcuityLevel::VeryUrgent => "orange",
            AcuityLevel::Urgent => "yellow",
            AcuityLevel::Standard => "green",
            AcuityLevel::NonUrgent => "blue",
        }
    }

    /// Maximum acceptable wait before first clinical contact.
    pub fn target_wait_minutes(&self) -> u32 {
        match self {
            AcuityLevel::Immediate => 0,
            AcuityLevel::VeryUrgent => 10,
            AcuityLevel::Urgent => 60,
            AcuityLevel::Standard => 120,
            AcuityLevel::NonUrgent => 240,
        }
    }

    /// Queue priority (1 = seen first).
    pub fn priority(&self) -> u8 {
        match self {
            AcuityLevel::Immediate => 1,
            AcuityLevel::VeryUrgent => 2,
            AcuityLevel::Urgent => 3,
            AcuityLevel::Standard => 4,
            AcuityLevel::NonUrgent => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AcuityLevel::Immediate => "Immediate",
            AcuityLevel::VeryUrgent => "Very urgent",
            AcuityLevel::Urgent => "Urgent",
            AcuityLevel::Standard => "Standard",
            AcuityLevel::NonUrgent => "Non-urgent",
        }
    }

    /// Red and orange encounters count as critical on the dashboards.
    pub fn is_critical(&self) -> bool {
        matches!(self, AcuityLevel::Immediate | AcuityLevel::VeryUrgent)
    }

    /// Parse a colour label, ignoring surrounding whitespace and case.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        AcuityLevel::ALL
            .into_iter()
            .find(|level| level.color() == normalized)
    }

    /// Parse a colour label, substituting [`AcuityLevel::FALLBACK`] for anything
    /// outside the five known colours.
    pub fn from_label_or_default(label: &str) -> Self {
        Self::from_label(label).unwrap_or(Self::FALLBACK)
    }
}

impl PartialOrd for AcuityLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AcuityLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lower priority number means more urgent, which must compare greater.
        other.priority().cmp(&self.priority())
    }
}

impl fmt::Display for AcuityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color())
    }
}

impl FromStr for AcuityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unknown acuity level: '{}'", s))
    }
}
