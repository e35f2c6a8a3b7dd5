//! Birth data and the validation done before it reaches any calculator.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::date_utils::CalendarDate;
use crate::error::ProfileError;

pub type TimeOfDay = NaiveTime;

/// Input to every analysis module. Modules that only need the date ignore
/// `time` and `location`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BirthData {
    pub date: CalendarDate,
    pub time: Option<TimeOfDay>,
    pub location: Option<String>,
}

impl BirthData {
    pub fn new(date: CalendarDate) -> Self {
        Self {
            date,
            time: None,
            location: None,
        }
    }

    pub fn with_time(mut self, time: TimeOfDay) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builds birth data from loosely typed strings. Only the date is required.
    pub fn parse(
        date: &str,
        time: Option<&str>,
        location: Option<&str>,
    ) -> Result<Self, ProfileError> {
        let mut birth = Self::new(date.parse()?);
        if let Some(time) = time.filter(|t| !t.trim().is_empty()) {
            birth.time = Some(parse_time(time)?);
        }
        if let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) {
            birth.location = Some(location.to_string());
        }
        Ok(birth)
    }
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_time(input: &str) -> Result<TimeOfDay, ProfileError> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ProfileError::InvalidTime {
            input: input.to_string(),
        })
}

/// JSON body of a profile request: `{ "birthDate", "birthTime", "birthLocation" }`.
///
/// All three fields are required at this boundary even though the
/// calculators only read the date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthRequest {
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub birth_time: Option<String>,
    #[serde(default)]
    pub birth_location: Option<String>,
}

impl BirthRequest {
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        serde_json::from_str(json).map_err(|e| ProfileError::InvalidRequest(e.to_string()))
    }

    pub fn into_birth_data(self) -> Result<BirthData, ProfileError> {
        let present = |field: &Option<String>| {
            field
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        match (
            present(&self.birth_date),
            present(&self.birth_time),
            present(&self.birth_location),
        ) {
            (Some(date), Some(time), Some(location)) => {
                BirthData::parse(&date, Some(time.as_str()), Some(location.as_str()))
            }
            _ => Err(ProfileError::MissingBirthData),
        }
    }
}

impl TryFrom<BirthRequest> for BirthData {
    type Error = ProfileError;

    fn try_from(request: BirthRequest) -> Result<Self, Self::Error> {
        request.into_birth_data()
    }
}
