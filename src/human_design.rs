//! Stable pseudo-classification in Human Design vocabulary.
//!
//! This is NOT a Human Design chart. Nothing here derives gates, lines or
//! centers from planetary positions: type, profile and authority are picked
//! from a hash of the birth date. Changing the thresholds, offsets or table
//! order changes every stored result, so treat them as frozen.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::birth::BirthData;
use crate::date_utils::CalendarDate;
use crate::reference::ReferenceTables;
use crate::seed::DeterministicSeed;

pub const PROFILE_OFFSET: i64 = 17;
pub const AUTHORITY_OFFSET: i64 = 31;

/// The five types, with the exclusive upper bound of each one's percentile range.
const TYPE_THRESHOLDS: [(u8, EnergyType); 5] = [
    (35, EnergyType::Generator),
    (70, EnergyType::ManifestingGenerator),
    (90, EnergyType::Projector),
    (99, EnergyType::Manifestor),
    (100, EnergyType::Reflector),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnergyType {
    Generator,
    ManifestingGenerator,
    Projector,
    Manifestor,
    Reflector,
}

impl EnergyType {
    pub const ALL: [EnergyType; 5] = [
        EnergyType::Generator,
        EnergyType::ManifestingGenerator,
        EnergyType::Projector,
        EnergyType::Manifestor,
        EnergyType::Reflector,
    ];

    /// Name as it appears in the reference table.
    pub fn name(&self) -> &'static str {
        match self {
            EnergyType::Generator => "Generator",
            EnergyType::ManifestingGenerator => "Manifesting Generator",
            EnergyType::Projector => "Projector",
            EnergyType::Manifestor => "Manifestor",
            EnergyType::Reflector => "Reflector",
        }
    }

    /// Maps a percentile bucket `0..100` onto a type:
    /// `[0,35)` Generator, `[35,70)` Manifesting Generator, `[70,90)` Projector,
    /// `[90,99)` Manifestor, `[99,100)` Reflector.
    pub fn from_percentile(bucket: u8) -> Self {
        TYPE_THRESHOLDS
            .iter()
            .find(|(upper, _)| bucket < *upper)
            .map(|(_, t)| *t)
            .unwrap_or(EnergyType::Reflector)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanDesignAnalysis {
    #[serde(rename = "type")]
    pub design_type: String,
    pub profile: String,
    pub authority: String,
    pub strategy: String,
}

#[derive(Debug, Clone)]
pub struct HumanDesignClassifier {
    tables: Arc<ReferenceTables>,
}

impl HumanDesignClassifier {
    pub const NAME: &'static str = "human_design";

    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    pub fn calculate(&self, birth: &BirthData) -> HumanDesignAnalysis {
        self.calculate_date(&birth.date)
    }

    pub fn calculate_date(&self, date: &CalendarDate) -> HumanDesignAnalysis {
        let seed = DeterministicSeed::from_date(date);
        let energy_type = EnergyType::from_percentile(seed.percentile());

        let type_entry = match self.tables.try_design_type(energy_type.name()) {
            Some(entry) => entry,
            None => {
                let len = self.tables.design_types().len();
                warn!(
                    target: "human_design",
                    "Type {:?} missing from table, falling back to seed index",
                    energy_type.name()
                );
                self.tables.design_type_at(seed.index(0, len))
            }
        };
        let profile = self
            .tables
            .profile(seed.index(PROFILE_OFFSET, self.tables.profiles().len()));
        let authority = self
            .tables
            .authority(seed.index(AUTHORITY_OFFSET, self.tables.authorities().len()));

        debug!(
            target: "human_design",
            "{} (seed {}) -> {} {} {}",
            date,
            seed.value(),
            type_entry.name,
            profile.name,
            authority.name
        );

        HumanDesignAnalysis {
            design_type: type_entry.name.clone(),
            profile: profile.name.clone(),
            authority: authority.name.clone(),
            strategy: type_entry.strategy.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classifier() -> HumanDesignClassifier {
        HumanDesignClassifier::new(ReferenceTables::builtin().unwrap())
    }

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn buckets_cover_every_percentile_once() {
        let mut counts = std::collections::HashMap::new();
        for bucket in 0..100u8 {
            *counts.entry(EnergyType::from_percentile(bucket)).or_insert(0) += 1;
        }
        assert_eq!(counts[&EnergyType::Generator], 35);
        assert_eq!(counts[&EnergyType::ManifestingGenerator], 35);
        assert_eq!(counts[&EnergyType::Projector], 20);
        assert_eq!(counts[&EnergyType::Manifestor], 9);
        assert_eq!(counts[&EnergyType::Reflector], 1);
    }

    #[test]
    fn bucket_boundaries() {
        use EnergyType::*;
        assert_eq!(EnergyType::from_percentile(0), Generator);
        assert_eq!(EnergyType::from_percentile(34), Generator);
        assert_eq!(EnergyType::from_percentile(35), ManifestingGenerator);
        assert_eq!(EnergyType::from_percentile(69), ManifestingGenerator);
        assert_eq!(EnergyType::from_percentile(70), Projector);
        assert_eq!(EnergyType::from_percentile(89), Projector);
        assert_eq!(EnergyType::from_percentile(90), Manifestor);
        assert_eq!(EnergyType::from_percentile(98), Manifestor);
        assert_eq!(EnergyType::from_percentile(99), Reflector);
    }

    #[test]
    fn golden_1990_05_15() {
        // seed 6140: bucket 40, profile (6157 mod 12) = 1, authority (6171 mod 7) = 4
        let result = classifier().calculate_date(&date(1990, 5, 15));
        assert_eq!(result.design_type, "Manifesting Generator");
        assert_eq!(result.profile, "1/4");
        assert_eq!(result.authority, "Self-Projected");
        assert_eq!(result.strategy, "To Respond, then Inform");
    }

    #[test]
    fn differs_from_chart_based_reading_for_same_date() {
        // A real bodygraph for 1990-05-15 gives Generator 5/1; this classifier
        // does not attempt to reproduce that.
        let result = classifier().calculate_date(&date(1990, 5, 15));
        assert_ne!(
            (result.design_type.as_str(), result.profile.as_str()),
            ("Generator", "5/1")
        );
    }

    #[test]
    fn golden_2000_01_01() {
        // seed 6020: bucket 20, profile (6037 mod 12) = 1, authority (6051 mod 7) = 3
        let result = classifier().calculate_date(&date(2000, 1, 1));
        assert_eq!(result.design_type, "Generator");
        assert_eq!(result.profile, "1/4");
        assert_eq!(result.authority, "Ego");
    }

    #[test]
    fn reflector_date() {
        // 23*7 + 12*13 + 1994*3 = 6299 lands in bucket 99.
        let result = classifier().calculate_date(&date(1994, 12, 23));
        assert_eq!(result.design_type, "Reflector");
    }

    proptest! {
        #[test]
        fn same_date_same_reading(offset in -1_000_000i64..1_000_000) {
            let c = classifier();
            let d = date(2000, 1, 1).add_days(offset).unwrap();
            prop_assert_eq!(c.calculate_date(&d), c.calculate_date(&d));
        }

        #[test]
        fn every_seed_resolves_a_table_entry(offset in -1_000_000i64..1_000_000) {
            let tables = ReferenceTables::builtin().unwrap();
            let d = date(2000, 1, 1).add_days(offset).unwrap();
            let seed = DeterministicSeed::from_date(&d);
            let t = EnergyType::from_percentile(seed.percentile());
            prop_assert!(tables.try_design_type(t.name()).is_some());
            let profiles = tables.profiles().len();
            let authorities = tables.authorities().len();
            prop_assert!(seed.index(PROFILE_OFFSET, profiles) < profiles);
            prop_assert!(seed.index(AUTHORITY_OFFSET, authorities) < authorities);
        }
    }
}
