//! Static reference tables: Tzolk'in signs and tones, Human Design types,
//! profiles and authorities.
//!
//! The calculators depend only on the shape and size of these tables, never on
//! their text, so content can change without touching any arithmetic. Order is
//! load-bearing though: signs, profiles and authorities are looked up by
//! position.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ProfileError;
use crate::human_design::EnergyType;

pub const SIGN_COUNT: usize = 20;
pub const TONE_COUNT: usize = 13;
pub const TYPE_COUNT: usize = 5;
pub const PROFILE_COUNT: usize = 12;
pub const AUTHORITY_COUNT: usize = 7;

const BUILTIN_JSON: &str = include_str!("../data/reference.json");

lazy_static! {
    static ref BUILTIN: Result<Arc<ReferenceTables>, ProfileError> =
        ReferenceTables::from_json(BUILTIN_JSON).map(Arc::new);
}

/// One of the 20 Tzolk'in day signs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sign {
    /// Yucatec name, used as the display name.
    pub name: String,
    pub kiche_name: String,
    pub glyph: String,
    pub meaning: String,
}

/// One of the 13 Tzolk'in tones, matched by `number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tone {
    pub number: u8,
    pub name: String,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: String,
    pub strategy: String,
    pub not_self: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityEntry {
    pub name: String,
    pub center: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct TzolkinTables {
    signs: Vec<Sign>,
    tones: Vec<Tone>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct HumanDesignTables {
    types: Vec<TypeEntry>,
    profiles: Vec<ProfileEntry>,
    authorities: Vec<AuthorityEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTables {
    tzolkin: TzolkinTables,
    human_design: HumanDesignTables,
}

/// Validated, read-only reference data shared by every calculator.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    tzolkin: TzolkinTables,
    human_design: HumanDesignTables,
}

impl ReferenceTables {
    /// Tables compiled into the crate from `data/reference.json`, parsed once.
    pub fn builtin() -> Result<Arc<Self>, ProfileError> {
        BUILTIN.clone()
    }

    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let raw: RawTables =
            serde_json::from_str(json).map_err(|e| ProfileError::ReferenceData(e.to_string()))?;
        let tables = Self {
            tzolkin: raw.tzolkin,
            human_design: raw.human_design,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Reads a replacement reference file from disk.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let json = fs::read_to_string(path).map_err(|e| {
            ProfileError::ReferenceData(format!("{}: {}", path.display(), e))
        })?;
        let tables = Self::from_json(&json)?;
        debug!(
            target: "reference",
            "Loaded reference tables from {}",
            path.display()
        );
        Ok(tables)
    }

    fn validate(&self) -> Result<(), ProfileError> {
        check_len("signs", SIGN_COUNT, self.tzolkin.signs.len())?;
        check_len("tones", TONE_COUNT, self.tzolkin.tones.len())?;
        check_len("types", TYPE_COUNT, self.human_design.types.len())?;
        check_len("profiles", PROFILE_COUNT, self.human_design.profiles.len())?;
        check_len("authorities", AUTHORITY_COUNT, self.human_design.authorities.len())?;

        for number in 1..=TONE_COUNT as u8 {
            if self.try_tone(number).is_none() {
                return Err(ProfileError::MissingTableEntry {
                    table: "tones",
                    name: number.to_string(),
                });
            }
        }
        for energy_type in EnergyType::ALL {
            if self.try_design_type(energy_type.name()).is_none() {
                return Err(ProfileError::MissingTableEntry {
                    table: "types",
                    name: energy_type.name().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn signs(&self) -> &[Sign] {
        &self.tzolkin.signs
    }

    pub fn tones(&self) -> &[Tone] {
        &self.tzolkin.tones
    }

    pub fn design_types(&self) -> &[TypeEntry] {
        &self.human_design.types
    }

    pub fn profiles(&self) -> &[ProfileEntry] {
        &self.human_design.profiles
    }

    pub fn authorities(&self) -> &[AuthorityEntry] {
        &self.human_design.authorities
    }

    pub fn try_sign(&self, index: usize) -> Option<&Sign> {
        self.tzolkin.signs.get(index)
    }

    /// Sign at `index`, or the first sign if the index is out of range.
    pub fn sign(&self, index: usize) -> &Sign {
        self.try_sign(index).unwrap_or_else(|| {
            warn!(target: "reference", "Sign index {} out of range, using first sign", index);
            &self.tzolkin.signs[0]
        })
    }

    pub fn try_tone(&self, number: u8) -> Option<&Tone> {
        self.tzolkin.tones.iter().find(|t| t.number == number)
    }

    /// Tone whose `number` field matches, or the first tone.
    pub fn tone(&self, number: u8) -> &Tone {
        self.try_tone(number).unwrap_or_else(|| {
            warn!(target: "reference", "No tone numbered {}, using first tone", number);
            &self.tzolkin.tones[0]
        })
    }

    pub fn try_design_type(&self, name: &str) -> Option<&TypeEntry> {
        self.human_design.types.iter().find(|t| t.name == name)
    }

    /// Type at `index` modulo the table length.
    pub fn design_type_at(&self, index: usize) -> &TypeEntry {
        let types = &self.human_design.types;
        &types[index % types.len()]
    }

    /// Profile at `index` modulo the table length.
    pub fn profile(&self, index: usize) -> &ProfileEntry {
        let profiles = &self.human_design.profiles;
        &profiles[index % profiles.len()]
    }

    /// Authority at `index` modulo the table length.
    pub fn authority(&self, index: usize) -> &AuthorityEntry {
        let authorities = &self.human_design.authorities;
        &authorities[index % authorities.len()]
    }
}

fn check_len(table: &'static str, expected: usize, got: usize) -> Result<(), ProfileError> {
    if expected == got {
        Ok(())
    } else {
        Err(ProfileError::TableCardinality {
            table,
            expected,
            got,
        })
    }
}
