//! Risk rules: one module per built-in rule, plus the scripted variant.
//!
//! Both variants share one contract: static category metadata and a pure
//! `Model -> risks` evaluation. Call sites dispatch solely through the
//! [`RiskRule`] capability, never by concrete type.

use crate::model::Model;
use archrisk_script::EvalError;
use archrisk_types::{Risk, RiskCategory};
use thiserror::Error;

mod missing_authentication;
mod missing_build_infrastructure;
mod missing_hardening;
pub mod scripted;

pub use missing_authentication::MissingAuthenticationRule;
pub use missing_build_infrastructure::MissingBuildInfrastructureRule;
pub use missing_hardening::MissingHardeningRule;
pub use scripted::{ProgramError, ScriptedRiskRule};


/// A rule-level failure. Isolated by the engine: the rule is reported as
/// failed and the rest of the run continues.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("evaluation failed: {source}")]
    Eval {
        #[source]
        source: EvalError,
    },
}

/// A candidate the rule had to skip because its expression program failed
/// on that candidate. The rule itself kept going.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedCandidate {
    pub candidate_id: String,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct RuleOutput {
    pub risks: Vec<Risk>,
    pub skipped_candidates: Vec<SkippedCandidate>,
}

impl RuleOutput {
    pub fn from_risks(risks: Vec<Risk>) -> RuleOutput {
        RuleOutput {
            risks,
            skipped_candidates: Vec::new(),
        }
    }
}

/// The rule capability shared by built-in and scripted rules.
pub trait RiskRule: Send + Sync {
    fn category(&self) -> RiskCategory;
    fn supported_tags(&self) -> Vec<String>;
    fn generate_risks(&self, model: &Model) -> Result<RuleOutput, RuleError>;
}
