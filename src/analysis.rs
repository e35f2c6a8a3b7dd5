//! The uniform "birth data in, named result out" contract shared by every
//! calculator, and the merged record the rest of the application consumes.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::biorhythm::{BiorhythmAnalysis, BiorhythmCalculator};
use crate::birth::BirthData;
use crate::date_utils::CalendarDate;
use crate::human_design::{HumanDesignAnalysis, HumanDesignClassifier};
use crate::reference::ReferenceTables;
use crate::tzolkin::{MayanAnalysis, TzolkinCalculator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Mayan,
    HumanDesign,
    Biorhythm,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 3] = [
        ModuleKind::Mayan,
        ModuleKind::HumanDesign,
        ModuleKind::Biorhythm,
    ];
}

/// A configured calculator. Every variant is a pure function of the birth
/// date (plus its own fixed settings), so modules never depend on each
/// other and can run in any order or in parallel.
#[derive(Debug, Clone)]
pub enum AnalysisModule {
    Mayan(TzolkinCalculator),
    HumanDesign(HumanDesignClassifier),
    Biorhythm(BiorhythmCalculator),
}

impl AnalysisModule {
    pub fn build(kind: ModuleKind, tables: &Arc<ReferenceTables>, as_of: CalendarDate) -> Self {
        match kind {
            ModuleKind::Mayan => AnalysisModule::Mayan(TzolkinCalculator::new(Arc::clone(tables))),
            ModuleKind::HumanDesign => {
                AnalysisModule::HumanDesign(HumanDesignClassifier::new(Arc::clone(tables)))
            }
            ModuleKind::Biorhythm => AnalysisModule::Biorhythm(BiorhythmCalculator::new(as_of)),
        }
    }

    pub fn kind(&self) -> ModuleKind {
        match self {
            AnalysisModule::Mayan(_) => ModuleKind::Mayan,
            AnalysisModule::HumanDesign(_) => ModuleKind::HumanDesign,
            AnalysisModule::Biorhythm(_) => ModuleKind::Biorhythm,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnalysisModule::Mayan(_) => TzolkinCalculator::NAME,
            AnalysisModule::HumanDesign(_) => HumanDesignClassifier::NAME,
            AnalysisModule::Biorhythm(_) => BiorhythmCalculator::NAME,
        }
    }

    pub fn calculate(&self, birth: &BirthData) -> AnalysisResult {
        match self {
            AnalysisModule::Mayan(calc) => AnalysisResult::Mayan(calc.calculate(birth)),
            AnalysisModule::HumanDesign(calc) => AnalysisResult::HumanDesign(calc.calculate(birth)),
            AnalysisModule::Biorhythm(calc) => AnalysisResult::Biorhythm(calc.calculate(birth)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "module", rename_all = "snake_case")]
pub enum AnalysisResult {
    Mayan(MayanAnalysis),
    HumanDesign(HumanDesignAnalysis),
    Biorhythm(BiorhythmAnalysis),
}

impl AnalysisResult {
    pub fn kind(&self) -> ModuleKind {
        match self {
            AnalysisResult::Mayan(_) => ModuleKind::Mayan,
            AnalysisResult::HumanDesign(_) => ModuleKind::HumanDesign,
            AnalysisResult::Biorhythm(_) => ModuleKind::Biorhythm,
        }
    }
}

/// All module results for one person, one optional slot per module.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mayan: Option<MayanAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_design: Option<HumanDesignAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biorhythm: Option<BiorhythmAnalysis>,
}

impl ProfileAnalysis {
    pub fn merge(results: impl IntoIterator<Item = AnalysisResult>) -> Self {
        let mut profile = Self::default();
        for result in results {
            profile.insert(result);
        }
        profile
    }

    /// Stores a result in its slot, replacing any earlier one of the same kind.
    pub fn insert(&mut self, result: AnalysisResult) {
        match result {
            AnalysisResult::Mayan(r) => self.mayan = Some(r),
            AnalysisResult::HumanDesign(r) => self.human_design = Some(r),
            AnalysisResult::Biorhythm(r) => self.biorhythm = Some(r),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mayan.is_none() && self.human_design.is_none() && self.biorhythm.is_none()
    }
}

impl fmt::Display for ProfileAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(m) = &self.mayan {
            writeln!(
                f,
                "🌞 Tzolk'in: {} {} (K'iche': {}, tone {})",
                m.tone, m.sign, m.kiche_sign, m.tone_name
            )?;
            writeln!(f, "🔢 Day {} of 260", m.cycle_day)?;
            writeln!(f, "📜 Long Count: {}", m.long_count)?;
            writeln!(f, "🌙 Haab': {}", m.haab)?;
        }
        if let Some(h) = &self.human_design {
            writeln!(f, "🧬 Type: {} (strategy: {})", h.design_type, h.strategy)?;
            writeln!(f, "🧬 Profile: {}  Authority: {}", h.profile, h.authority)?;
        }
        if let Some(b) = &self.biorhythm {
            writeln!(f, "📈 Biorhythm on {} (day {}):", b.as_of, b.days_alive)?;
            writeln!(
                f,
                "   physical {:+.2}  emotional {:+.2}  intellectual {:+.2}",
                b.physical, b.emotional, b.intellectual
            )?;
            if !b.critical.is_empty() {
                let names: Vec<&str> = b.critical.iter().map(|c| c.name()).collect();
                writeln!(f, "⚠️ Critical: {}", names.join(", "))?;
            }
        }
        Ok(())
    }
}
