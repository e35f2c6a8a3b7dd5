//! Classic biorhythm curves: sine waves of fixed period started at birth.

use std::f64::consts::TAU;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::birth::BirthData;
use crate::date_utils::{days_in_month, floor_mod, CalendarDate};
use crate::error::ProfileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cycle {
    Physical,
    Emotional,
    Intellectual,
}

impl Cycle {
    pub const ALL: [Cycle; 3] = [Cycle::Physical, Cycle::Emotional, Cycle::Intellectual];

    /// Period in days.
    pub fn period(&self) -> i64 {
        match self {
            Cycle::Physical => 23,
            Cycle::Emotional => 28,
            Cycle::Intellectual => 33,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Cycle::Physical => "physical",
            Cycle::Emotional => "emotional",
            Cycle::Intellectual => "intellectual",
        }
    }

    /// Curve value in `[-1, 1]` after `days_alive` days. Reduced modulo the
    /// period first so the value repeats exactly.
    pub fn value_at(&self, days_alive: i64) -> f64 {
        let period = self.period();
        let phase = floor_mod(days_alive, period);
        (TAU * phase as f64 / period as f64).sin()
    }

    /// Whether the curve crosses zero between `days_alive` and the next day.
    pub fn is_critical(&self, days_alive: i64) -> bool {
        let period = self.period();
        let phase = floor_mod(days_alive, period);
        phase == 0 || (2 * phase <= period && period < 2 * phase + 2)
    }
}

/// All three curves for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiorhythmReading {
    pub date: CalendarDate,
    pub days_alive: i64,
    pub physical: f64,
    pub emotional: f64,
    pub intellectual: f64,
}

impl BiorhythmReading {
    pub fn at(birth: &CalendarDate, on: &CalendarDate) -> Self {
        let days_alive = birth.days_until(on);
        Self {
            date: *on,
            days_alive,
            physical: Cycle::Physical.value_at(days_alive),
            emotional: Cycle::Emotional.value_at(days_alive),
            intellectual: Cycle::Intellectual.value_at(days_alive),
        }
    }

    /// Mean of the three curves.
    pub fn average(&self) -> f64 {
        (self.physical + self.emotional + self.intellectual) / 3.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiorhythmAnalysis {
    pub as_of: CalendarDate,
    pub days_alive: i64,
    pub physical: f64,
    pub emotional: f64,
    pub intellectual: f64,
    pub critical: Vec<Cycle>,
}

/// Reads the curves on a fixed `as_of` date, so repeated calls for the same
/// birth date agree.
#[derive(Debug, Clone, Copy)]
pub struct BiorhythmCalculator {
    as_of: CalendarDate,
}

impl BiorhythmCalculator {
    pub const NAME: &'static str = "biorhythm";

    pub fn new(as_of: CalendarDate) -> Self {
        Self { as_of }
    }

    pub fn as_of(&self) -> CalendarDate {
        self.as_of
    }

    pub fn calculate(&self, birth: &BirthData) -> BiorhythmAnalysis {
        let reading = BiorhythmReading::at(&birth.date, &self.as_of);
        let critical = Cycle::ALL
            .into_iter()
            .filter(|c| c.is_critical(reading.days_alive))
            .collect();
        BiorhythmAnalysis {
            as_of: self.as_of,
            days_alive: reading.days_alive,
            physical: reading.physical,
            emotional: reading.emotional,
            intellectual: reading.intellectual,
            critical,
        }
    }
}

/// One reading per day of `year`-`month`, in date order.
pub fn month_chart(
    birth: &CalendarDate,
    year: i32,
    month: u32,
) -> Result<Vec<BiorhythmReading>, ProfileError> {
    let days = days_in_month(year, month).ok_or_else(|| ProfileError::InvalidDate {
        input: format!("{year:04}-{month:02}"),
        reason: "no such month".to_string(),
    })?;

    let start = Instant::now();
    let readings = (1..=days)
        .into_par_iter()
        .map(|day| CalendarDate::new(year, month, day).map(|on| BiorhythmReading::at(birth, &on)))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        target: "biorhythm",
        "Charted {} days of {:04}-{:02} in {}µs",
        readings.len(),
        year,
        month,
        start.elapsed().as_micros()
    );
    Ok(readings)
}
