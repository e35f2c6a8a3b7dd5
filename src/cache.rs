//! Memoization of finished profiles and the counters that report on it.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use lru::LruCache;

use crate::analysis::ProfileAnalysis;
use crate::date_utils::CalendarDate;

/// Performance counters. Relaxed atomics: the numbers are for reporting only.
#[derive(Debug, Default)]
pub struct Metrics {
    calculations: AtomicU64,
    calculation_micros: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_calculation(&self, duration: Duration) {
        self.calculations.fetch_add(1, Ordering::Relaxed);
        self.calculation_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn calculations(&self) -> u64 {
        self.calculations.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits() as f64;
        let total = hits + self.cache_misses() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }

    pub fn report(&self) -> String {
        format!(
            "Performance Metrics:\n\
             Calculations: {}\n\
             Calculation Time: {}µs\n\
             Cache Hits: {}\n\
             Cache Misses: {}\n\
             Cache Hit Rate: {:.2}%",
            self.calculations(),
            self.calculation_micros.load(Ordering::Relaxed),
            self.cache_hits(),
            self.cache_misses(),
            self.cache_hit_rate() * 100.0
        )
    }
}

/// Finished profiles keyed by birth date. Every module reads only the date,
/// so the date alone identifies a result within one engine.
pub struct ProfileCache {
    cache: LruCache<CalendarDate, ProfileAnalysis>,
}

impl ProfileCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            cache: LruCache::new(capacity),
        }
    }

    // LruCache::get bumps recency, hence &mut self.
    pub fn get(&mut self, date: &CalendarDate) -> Option<ProfileAnalysis> {
        self.cache.get(date).cloned()
    }

    pub fn put(&mut self, date: CalendarDate, profile: ProfileAnalysis) {
        self.cache.put(date, profile);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = ProfileCache::new(NonZeroUsize::new(2).unwrap());
        cache.put(date(2000, 1, 1), ProfileAnalysis::default());
        cache.put(date(2000, 1, 2), ProfileAnalysis::default());
        assert!(cache.get(&date(2000, 1, 1)).is_some());
        cache.put(date(2000, 1, 3), ProfileAnalysis::default());

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&date(2000, 1, 2)).is_none());
        assert!(cache.get(&date(2000, 1, 1)).is_some());
    }

    #[test]
    fn hit_rate() {
        let metrics = Metrics::new();
        assert_eq!(metrics.cache_hit_rate(), 0.0);
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_miss();
        assert_eq!(metrics.cache_hit_rate(), 0.75);
        assert!(metrics.report().contains("Cache Hit Rate: 75.00%"));
    }

    #[test]
    fn counts_calculations() {
        let metrics = Metrics::new();
        metrics.record_calculation(Duration::from_micros(40));
        metrics.record_calculation(Duration::from_micros(2));
        assert_eq!(metrics.calculations(), 2);
        assert!(metrics.report().contains("Calculation Time: 42µs"));
    }
}
