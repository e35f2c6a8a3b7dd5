//! Calendar dates and Julian Day Number conversion.
//!
//! All arithmetic here works on local calendar fields. There is no time zone
//! and no instant-in-time: a date is a proleptic Gregorian year/month/day
//! triple with astronomical year numbering (year 0 exists, 1 BCE is year 0,
//! the Maya creation date is `-3113-08-11`).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Julian Day Number of the Maya Long Count epoch 0.0.0.0.0
/// (Goodman-Martinez-Thompson correlation).
pub const MAYAN_EPOCH_JDN: i64 = 584_283;

/// Integer division rounding toward negative infinity. `divisor` must be positive.
#[inline]
pub fn floor_div(value: i64, divisor: i64) -> i64 {
    value.div_euclid(divisor)
}

/// Remainder in `[0, modulus)` regardless of the sign of `value`.
#[inline]
pub fn floor_mod(value: i64, modulus: i64) -> i64 {
    value.rem_euclid(modulus)
}

/// A validated proleptic Gregorian date.
///
/// Ordering is calendar order. Serializes as an ISO `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date from calendar fields, rejecting days that do not exist.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ProfileError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ProfileError::InvalidDate {
                input: format!("{year:04}-{month:02}-{day:02}"),
                reason: "no such calendar day".to_string(),
            })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Shifts the date by a signed number of days, `None` past chrono's range.
    pub fn add_days(&self, days: i64) -> Option<Self> {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: &CalendarDate) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Julian Day Number of this date. See [`gregorian_to_jdn`].
    pub fn julian_day_number(&self) -> i64 {
        gregorian_to_jdn(
            i64::from(self.year()),
            i64::from(self.month()),
            i64::from(self.day()),
        )
    }

    /// Days elapsed since the Maya creation date; negative before it.
    pub fn days_since_mayan_epoch(&self) -> i64 {
        days_since_mayan_epoch(self)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for CalendarDate {
    type Err = ProfileError;

    /// Accepts `YYYY-MM-DD`, and full ISO timestamps of which only the date
    /// part is kept.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ProfileError::MissingBirthData);
        }
        let date_part = trimmed
            .split(|c: char| c == 'T' || c == ' ')
            .next()
            .unwrap_or(trimmed);
        date_part
            .parse::<NaiveDate>()
            .map(Self)
            .map_err(|e| ProfileError::InvalidDate {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Converts a proleptic Gregorian date to its Julian Day Number.
///
/// Every division is floor division, so years before 1 (and before -4800,
/// where the intermediate `y` goes negative) come out right.
pub fn gregorian_to_jdn(year: i64, month: i64, day: i64) -> i64 {
    let a = floor_div(14 - month, 12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + floor_div(153 * m + 2, 5) + 365 * y + floor_div(y, 4) - floor_div(y, 100)
        + floor_div(y, 400)
        - 32045
}

/// Inverse of [`gregorian_to_jdn`]. `None` when the year falls outside the
/// range chrono can represent.
pub fn jdn_to_gregorian(jdn: i64) -> Option<CalendarDate> {
    let j = jdn + 32044;
    let g = floor_div(j, 146_097);
    let dg = floor_mod(j, 146_097);
    let c = (dg / 36_524 + 1) * 3 / 4;
    let dc = dg - c * 36_524;
    let b = dc / 1461;
    let db = dc % 1461;
    let a = (db / 365 + 1) * 3 / 4;
    let da = db - a * 365;
    let y = g * 400 + c * 100 + b * 4 + a;
    let m = (da * 5 + 308) / 153 - 2;
    let d = da - (m + 4) * 153 / 5 + 122;

    let year = y - 4800 + (m + 2) / 12;
    let month = (m + 2) % 12 + 1;
    let day = d + 1;

    let year = i32::try_from(year).ok()?;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).map(CalendarDate)
}

/// `JDN(date) - 584283`.
pub fn days_since_mayan_epoch(date: &CalendarDate) -> i64 {
    date.julian_day_number() - MAYAN_EPOCH_JDN
}

/// Length of a month, `None` for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn known_julian_day_numbers() {
        assert_eq!(date(2000, 1, 1).julian_day_number(), 2_451_545);
        assert_eq!(date(1970, 1, 1).julian_day_number(), 2_440_588);
        assert_eq!(date(-4713, 11, 24).julian_day_number(), 0);
    }

    #[test]
    fn mayan_epoch_is_day_zero() {
        let epoch = date(-3113, 8, 11);
        assert_eq!(epoch.julian_day_number(), MAYAN_EPOCH_JDN);
        assert_eq!(epoch.days_since_mayan_epoch(), 0);
        assert_eq!(date(-3113, 8, 10).days_since_mayan_epoch(), -1);
        assert_eq!(date(2012, 12, 21).days_since_mayan_epoch(), 1_872_000);
    }

    #[test]
    fn floor_division_before_year_minus_4800() {
        // y = -1 here; truncating division would give -32409.
        assert_eq!(gregorian_to_jdn(-4801, 3, 1), -32_410);
        assert_eq!(gregorian_to_jdn(-4800, 3, 1), -32_044);
        // -4800 is a leap year, so the two March 1sts are 366 days apart.
        assert_eq!(
            gregorian_to_jdn(-4800, 3, 1) - gregorian_to_jdn(-4801, 3, 1),
            366
        );
    }

    #[test]
    fn floor_helpers_round_down() {
        assert_eq!(floor_div(-1, 4), -1);
        assert_eq!(floor_div(7, 4), 1);
        assert_eq!(floor_mod(-1, 260), 259);
        assert_eq!(floor_mod(-520, 260), 0);
    }

    #[test]
    fn jdn_inverse_known_points() {
        assert_eq!(jdn_to_gregorian(2_451_545), Some(date(2000, 1, 1)));
        assert_eq!(jdn_to_gregorian(MAYAN_EPOCH_JDN), Some(date(-3113, 8, 11)));
        assert_eq!(jdn_to_gregorian(-32_410), Some(date(-4801, 3, 1)));
    }

    #[test]
    fn parses_iso_dates_and_timestamps() {
        assert_eq!("1990-05-15".parse::<CalendarDate>().unwrap(), date(1990, 5, 15));
        assert_eq!(
            "1990-05-15T14:30:00Z".parse::<CalendarDate>().unwrap(),
            date(1990, 5, 15)
        );
        assert_eq!(
            "".parse::<CalendarDate>(),
            Err(ProfileError::MissingBirthData)
        );
        assert!(matches!(
            "1990-02-30".parse::<CalendarDate>(),
            Err(ProfileError::InvalidDate { .. })
        ));
    }

    #[test]
    fn rejects_impossible_fields() {
        assert!(CalendarDate::new(2023, 2, 29).is_err());
        assert!(CalendarDate::new(2024, 13, 1).is_err());
        assert!(CalendarDate::new(2024, 2, 29).is_ok());
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2023, 12), Some(31));
        assert_eq!(days_in_month(2023, 0), None);
    }

    #[test]
    fn add_days_past_chrono_range_is_none() {
        let d = date(2000, 1, 1);
        assert_eq!(d.add_days(i64::MAX / 2), None);
        assert_eq!(d.add_days(i64::MIN), None);
        assert_eq!(d.add_days(1_000_000_000), None);
        assert_eq!(d.add_days(-1), Some(date(1999, 12, 31)));
    }

    #[test]
    fn display_is_iso() {
        assert_eq!(date(1990, 5, 15).to_string(), "1990-05-15");
    }

    proptest! {
        #[test]
        fn jdn_steps_by_one_per_day(offset in -2_000_000i64..2_000_000) {
            let d = date(2000, 1, 1).add_days(offset).unwrap();
            let next = d.add_days(1).unwrap();
            prop_assert_eq!(next.julian_day_number(), d.julian_day_number() + 1);
        }

        #[test]
        fn jdn_inverse_recovers_date(offset in -2_500_000i64..2_500_000) {
            let d = date(2000, 1, 1).add_days(offset).unwrap();
            prop_assert_eq!(jdn_to_gregorian(d.julian_day_number()), Some(d));
        }
    }
}
