//! Maya calendar positions: the 260-day Tzolk'in, the Long Count and the
//! 365-day Haab'.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::birth::BirthData;
use crate::date_utils::{floor_div, floor_mod, CalendarDate};
use crate::reference::ReferenceTables;

pub const TZOLKIN_CYCLE: i64 = 260; // 13 * 20
pub const TONE_CYCLE: i64 = 13;
pub const SIGN_CYCLE: i64 = 20;
pub const HAAB_CYCLE: i64 = 365;
pub const CALENDAR_ROUND: i64 = 18_980; // lcm(260, 365)

// Creation day is Ajaw (index 19) and 8 Kumk'u (day 348 of the Haab').
const SIGN_OFFSET: i64 = 19;
const HAAB_OFFSET: i64 = 348;

pub const BAKTUN_DAYS: i64 = 144_000;
pub const KATUN_DAYS: i64 = 7_200;
pub const TUN_DAYS: i64 = 360;
pub const UINAL_DAYS: i64 = 20;

const HAAB_MONTHS: [&str; 19] = [
    "Pop", "Wo'", "Sip", "Sotz'", "Sek", "Xul", "Yaxk'in", "Mol", "Ch'en", "Yax", "Sak'", "Keh",
    "Mak", "K'ank'in", "Muwan", "Pax", "K'ayab", "Kumk'u", "Wayeb'",
];

/// Position of a day inside the 260-day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TzolkinPosition {
    /// `0..260`
    pub cycle_day: u16,
    /// `1..=13`
    pub tone: u8,
    /// `0..20`
    pub sign_index: u8,
}

impl TzolkinPosition {
    /// Decomposes a signed day count from the Maya epoch.
    ///
    /// Both remainders are floor remainders, so days before the epoch land
    /// inside the cycle instead of going negative.
    pub fn from_days(total_days: i64) -> Self {
        let cycle_day = floor_mod(total_days, TZOLKIN_CYCLE);
        let tone = floor_mod(cycle_day, TONE_CYCLE) + 1;
        let sign_index = floor_mod(total_days + SIGN_OFFSET, SIGN_CYCLE);
        Self {
            cycle_day: cycle_day as u16,
            tone: tone as u8,
            sign_index: sign_index as u8,
        }
    }

    pub fn from_date(date: &CalendarDate) -> Self {
        Self::from_days(date.days_since_mayan_epoch())
    }
}

/// A Long Count date `baktun.katun.tun.uinal.kin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LongCount {
    pub baktun: i64,
    pub katun: i64,
    pub tun: i64,
    pub uinal: i64,
    pub kin: i64,
}

impl LongCount {
    pub fn from_days(days: i64) -> Self {
        let baktun = floor_div(days, BAKTUN_DAYS);
        let rem1 = floor_mod(days, BAKTUN_DAYS);
        let katun = rem1 / KATUN_DAYS;
        let rem2 = rem1 % KATUN_DAYS;
        let tun = rem2 / TUN_DAYS;
        let rem3 = rem2 % TUN_DAYS;
        let uinal = rem3 / UINAL_DAYS;
        let kin = rem3 % UINAL_DAYS;
        Self {
            baktun,
            katun,
            tun,
            uinal,
            kin,
        }
    }

    pub fn to_days(&self) -> i64 {
        self.baktun * BAKTUN_DAYS
            + self.katun * KATUN_DAYS
            + self.tun * TUN_DAYS
            + self.uinal * UINAL_DAYS
            + self.kin
    }
}

impl fmt::Display for LongCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}.{}",
            self.baktun, self.katun, self.tun, self.uinal, self.kin
        )
    }
}

/// A day of the 365-day Haab': 18 months of 20 days plus the 5 days of Wayeb'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HaabDate {
    /// `0..20`, `0..5` in Wayeb'
    pub day: u8,
    /// `0..19`
    pub month_index: u8,
}

impl HaabDate {
    pub fn from_days(days: i64) -> Self {
        let year_position = floor_mod(days + HAAB_OFFSET, HAAB_CYCLE);
        Self {
            day: (year_position % 20) as u8,
            month_index: (year_position / 20) as u8,
        }
    }

    pub fn month_name(&self) -> &'static str {
        HAAB_MONTHS[self.month_index as usize % HAAB_MONTHS.len()]
    }
}

impl fmt::Display for HaabDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.month_name())
    }
}

/// Output of the Tzolk'in module for one birth date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MayanAnalysis {
    /// Display name of the day sign.
    pub sign: String,
    pub tone: u8,
    pub sign_index: u8,
    pub cycle_day: u16,
    pub kiche_sign: String,
    pub tone_name: String,
    pub long_count: String,
    pub haab: String,
}

/// Resolves Tzolk'in positions against the sign and tone tables.
#[derive(Debug, Clone)]
pub struct TzolkinCalculator {
    tables: Arc<ReferenceTables>,
}

impl TzolkinCalculator {
    pub const NAME: &'static str = "mayan";

    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    pub fn calculate(&self, birth: &BirthData) -> MayanAnalysis {
        self.calculate_date(&birth.date)
    }

    pub fn calculate_date(&self, date: &CalendarDate) -> MayanAnalysis {
        let total_days = date.days_since_mayan_epoch();
        let position = TzolkinPosition::from_days(total_days);
        let sign = self.tables.sign(position.sign_index as usize);
        let tone = self.tables.tone(position.tone);

        debug!(
            target: "tzolkin",
            "{} -> day {} of 260: {} {}",
            date,
            position.cycle_day,
            tone.number,
            sign.name
        );

        MayanAnalysis {
            sign: sign.name.clone(),
            tone: tone.number,
            sign_index: position.sign_index,
            cycle_day: position.cycle_day,
            kiche_sign: sign.kiche_name.clone(),
            tone_name: tone.name.clone(),
            long_count: LongCount::from_days(total_days).to_string(),
            haab: HaabDate::from_days(total_days).to_string(),
        }
    }
}
