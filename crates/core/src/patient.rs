use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Demographics captured at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientData {
    pub name: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl PatientData {
    /// Completed years of age on `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_between(self.birth_date, today)
    }
}

/// Whole years between `birth` and `today`; one less if this year's birthday
/// has not been reached yet.
pub fn age_between(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
