//! Engine configuration, read from TOML.
//!
//! ```toml
//! modules = ["mayan", "human_design", "biorhythm"]
//! cache_capacity = 256
//! biorhythm_as_of = "2024-06-01"
//! reference_path = "data/reference.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::analysis::ModuleKind;
use crate::date_utils::CalendarDate;
use crate::error::ProfileError;

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Modules to run, in output order.
    #[serde(default = "default_modules")]
    pub modules: Vec<ModuleKind>,

    /// Number of memoized profiles. `0` turns memoization off.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Date the biorhythm curves are read on. Today when unset.
    #[serde(default)]
    pub biorhythm_as_of: Option<CalendarDate>,

    /// Replacement for the built-in reference tables.
    #[serde(default)]
    pub reference_path: Option<PathBuf>,
}

fn default_modules() -> Vec<ModuleKind> {
    ModuleKind::ALL.to_vec()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            modules: default_modules(),
            cache_capacity: default_cache_capacity(),
            biorhythm_as_of: None,
            reference_path: None,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let contents = fs::read_to_string(path).map_err(|e| ProfileError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, origin: &Path) -> Result<Self, ProfileError> {
        toml::from_str(contents).map_err(|e| ProfileError::Config {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn with_modules(mut self, modules: impl IntoIterator<Item = ModuleKind>) -> Self {
        self.modules = modules.into_iter().collect();
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_biorhythm_as_of(mut self, as_of: CalendarDate) -> Self {
        self.biorhythm_as_of = Some(as_of);
        self
    }

    pub fn with_reference_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_path = Some(path.into());
        self
    }
}

impl FromStr for EngineConfig {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Path::new("<inline>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: EngineConfig = "".parse().unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.modules, ModuleKind::ALL.to_vec());
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn full_file() {
        let config: EngineConfig = r#"
            modules = ["human_design", "mayan"]
            cache_capacity = 0
            biorhythm_as_of = "2024-06-01"
            reference_path = "tables/reference.json"
        "#
        .parse()
        .unwrap();
        assert_eq!(config.modules, vec![ModuleKind::HumanDesign, ModuleKind::Mayan]);
        assert_eq!(config.cache_capacity, 0);
        assert_eq!(
            config.biorhythm_as_of,
            Some(CalendarDate::new(2024, 6, 1).unwrap())
        );
        assert_eq!(
            config.reference_path,
            Some(PathBuf::from("tables/reference.json"))
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = "cache_size = 10".parse::<EngineConfig>().unwrap_err();
        assert!(matches!(err, ProfileError::Config { .. }));
    }

    #[test]
    fn unknown_module_is_rejected() {
        assert!("modules = [\"astrology\"]".parse::<EngineConfig>().is_err());
    }

    #[test]
    fn loads_from_disk() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "modules = [\"biorhythm\"]\n").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.modules, vec![ModuleKind::Biorhythm]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = EngineConfig::load(Path::new("/nonexistent/profile.toml")).unwrap_err();
        match err {
            ProfileError::Config { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/profile.toml"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn builders() {
        let as_of = CalendarDate::new(2030, 1, 1).unwrap();
        let config = EngineConfig::default()
            .with_modules([ModuleKind::Mayan])
            .with_cache_capacity(8)
            .with_biorhythm_as_of(as_of)
            .with_reference_path("x.json");
        assert_eq!(config.modules, vec![ModuleKind::Mayan]);
        assert_eq!(config.cache_capacity, 8);
        assert_eq!(config.biorhythm_as_of, Some(as_of));
        assert_eq!(config.reference_path, Some(PathBuf::from("x.json")));
    }
}
