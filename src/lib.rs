//! Deterministic birth-date readings: Tzolk'in sign and tone, a Human Design
//! style classification, and biorhythm curves.
//!
//! Every calculation is a pure function of the birth date. The same date
//! always gives the same reading, on any thread, with or without the cache.
//!
//! ```
//! use birth_profile::{BirthData, CalendarDate, EngineConfig, ProfileEngine};
//!
//! let config = EngineConfig::default()
//!     .with_biorhythm_as_of(CalendarDate::new(2024, 1, 1).unwrap());
//! let engine = ProfileEngine::new(&config).unwrap();
//!
//! let birth = BirthData::new(CalendarDate::new(2000, 1, 1).unwrap());
//! let profile = engine.analyze(&birth);
//!
//! let mayan = profile.mayan.unwrap();
//! assert_eq!((mayan.tone, mayan.sign.as_str()), (8, "Ik'"));
//! ```
//!
//! The Human Design module is a stable pseudo-classification keyed on a hash
//! of the date, not a bodygraph calculation. See [`human_design`].

pub mod analysis;
pub mod biorhythm;
pub mod birth;
pub mod cache;
pub mod config;
pub mod date_utils;
pub mod engine;
pub mod error;
pub mod human_design;
pub mod reference;
pub mod seed;
pub mod tzolkin;

pub use analysis::{AnalysisModule, AnalysisResult, ModuleKind, ProfileAnalysis};
pub use biorhythm::{BiorhythmAnalysis, BiorhythmCalculator, BiorhythmReading, Cycle};
pub use birth::{BirthData, BirthRequest, TimeOfDay};
pub use config::EngineConfig;
pub use date_utils::{CalendarDate, MAYAN_EPOCH_JDN};
pub use engine::ProfileEngine;
pub use error::ProfileError;
pub use human_design::{EnergyType, HumanDesignAnalysis, HumanDesignClassifier};
pub use reference::ReferenceTables;
pub use seed::DeterministicSeed;
pub use tzolkin::{HaabDate, LongCount, MayanAnalysis, TzolkinCalculator, TzolkinPosition};
