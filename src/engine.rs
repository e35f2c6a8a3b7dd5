//! Runs the configured modules for one or many people.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisModule, ModuleKind, ProfileAnalysis};
use crate::biorhythm::{month_chart, BiorhythmReading};
use crate::birth::BirthData;
use crate::cache::{Metrics, ProfileCache};
use crate::config::EngineConfig;
use crate::date_utils::CalendarDate;
use crate::error::ProfileError;
use crate::reference::ReferenceTables;

pub struct ProfileEngine {
    modules: Vec<AnalysisModule>,
    cache: Option<Arc<RwLock<ProfileCache>>>,
    metrics: Arc<Metrics>,
}

impl ProfileEngine {
    /// Builds an engine, loading replacement reference tables if configured.
    pub fn new(config: &EngineConfig) -> Result<Self, ProfileError> {
        let tables = match &config.reference_path {
            Some(path) => Arc::new(ReferenceTables::load(path)?),
            None => ReferenceTables::builtin()?,
        };
        Ok(Self::with_tables(config, tables))
    }

    pub fn with_tables(config: &EngineConfig, tables: Arc<ReferenceTables>) -> Self {
        let as_of = config
            .biorhythm_as_of
            .unwrap_or_else(|| CalendarDate::from(Local::now().date_naive()));

        let mut kinds: Vec<ModuleKind> = Vec::with_capacity(config.modules.len());
        for kind in &config.modules {
            if kinds.contains(kind) {
                warn!(target: "profile_engine", "Module {:?} listed twice, ignoring repeat", kind);
            } else {
                kinds.push(*kind);
            }
        }
        if kinds.is_empty() {
            warn!(target: "profile_engine", "No analysis modules configured");
        }
        let modules = kinds
            .into_iter()
            .map(|kind| AnalysisModule::build(kind, &tables, as_of))
            .collect();

        let cache = NonZeroUsize::new(config.cache_capacity)
            .map(|capacity| Arc::new(RwLock::new(ProfileCache::new(capacity))));

        Self {
            modules,
            cache,
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn modules(&self) -> &[AnalysisModule] {
        &self.modules
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Runs every module on `birth` and merges the results.
    ///
    /// A memoized profile is returned when available. It is always equal to
    /// what a fresh calculation would produce.
    pub fn analyze(&self, birth: &BirthData) -> ProfileAnalysis {
        if let Some(cache) = &self.cache {
            if let Some(profile) = cache.write().get(&birth.date) {
                self.metrics.record_cache_hit();
                return profile;
            }
            self.metrics.record_cache_miss();
        }

        let start = Instant::now();
        let profile =
            ProfileAnalysis::merge(self.modules.iter().map(|module| module.calculate(birth)));
        self.metrics.record_calculation(start.elapsed());

        debug!(
            target: "profile_engine",
            "Analyzed {} with {} modules",
            birth.date,
            self.modules.len()
        );

        if let Some(cache) = &self.cache {
            cache.write().put(birth.date, profile.clone());
        }
        profile
    }

    /// Analyzes many people in parallel, preserving input order.
    pub fn analyze_batch(&self, births: &[BirthData]) -> Vec<ProfileAnalysis> {
        let start = Instant::now();
        let profiles: Vec<ProfileAnalysis> =
            births.par_iter().map(|birth| self.analyze(birth)).collect();

        info!(
            target: "profile_engine",
            "Analyzed {} profiles in {}µs",
            profiles.len(),
            start.elapsed().as_micros()
        );
        profiles
    }

    /// Daily biorhythm readings for a calendar month.
    pub fn biorhythm_chart(
        &self,
        birth: &BirthData,
        year: i32,
        month: u32,
    ) -> Result<Vec<BiorhythmReading>, ProfileError> {
        month_chart(&birth.date, year, month)
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.write().clear();
        }
    }
}
