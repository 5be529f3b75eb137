use archrisk_types::{Risk, RiskCategory, RiskSeverity};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub low: u32,
    pub medium: u32,
    pub elevated: u32,
    pub high: u32,
    pub critical: u32,
}

impl SeverityCounts {
    pub fn from_risks(risks: &[Risk]) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for risk in risks {
            match risk.severity {
                RiskSeverity::Low => counts.low += 1,
                RiskSeverity::Medium => counts.medium += 1,
                RiskSeverity::Elevated => counts.elevated += 1,
                RiskSeverity::High => counts.high += 1,
                RiskSeverity::Critical => counts.critical += 1,
            }
        }
        counts
    }
}

/// One isolated rule failure; the rest of the run continued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleFailure {
    pub rule_id: String,
    pub message: String,
}

/// A warning surfaced during an otherwise successful rule run, typically a
/// scripted-rule candidate that had to be skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleWarning {
    pub rule_id: String,
    pub candidate_id: String,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct AnalysisReport {
    /// All emitted risks, stably sorted by synthetic id.
    pub risks: Vec<Risk>,
    /// Categories of every executed rule; every risk's category id resolves
    /// against this list.
    pub categories: Vec<RiskCategory>,
    pub failures: Vec<RuleFailure>,
    pub warnings: Vec<RuleWarning>,
    pub counts: SeverityCounts,
    pub rules_executed: u32,
    pub rules_skipped: u32,
}
