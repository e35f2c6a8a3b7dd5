//! Repeatable pseudo-randomness keyed on a birth date.

use crate::date_utils::{floor_mod, CalendarDate};

const DAY_WEIGHT: i64 = 7;
const MONTH_WEIGHT: i64 = 13;
const YEAR_WEIGHT: i64 = 3;

/// `day * 7 + month * 13 + year * 3`.
///
/// A cheap hash of the date, not a uniform PRNG seed. Two equal dates always
/// give the same seed, which is all the classifiers rely on. Negative for
/// early enough years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeterministicSeed(i64);

impl DeterministicSeed {
    pub fn from_date(date: &CalendarDate) -> Self {
        Self(seed(date))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `(seed + offset) mod len`, always a valid index into a table of `len`
    /// entries. `len` must be non-zero.
    pub fn index(&self, offset: i64, len: usize) -> usize {
        floor_mod(self.0 + offset, len as i64) as usize
    }

    /// `seed mod 100` as a percentile bucket in `0..100`.
    pub fn percentile(&self) -> u8 {
        floor_mod(self.0, 100) as u8
    }
}

/// The raw weighted sum behind [`DeterministicSeed`].
pub fn seed(date: &CalendarDate) -> i64 {
    i64::from(date.day()) * DAY_WEIGHT
        + i64::from(date.month()) * MONTH_WEIGHT
        + i64::from(date.year()) * YEAR_WEIGHT
}
