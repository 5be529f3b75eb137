//! Static rule metadata.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// STRIDE classification of a risk category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Stride {
    Spoofing,
    Tampering,
    Repudiation,
    InformationDisclosure,
    DenialOfService,
    ElevationOfPrivilege,
}

/// Which function of the organization is responsible for mitigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RiskFunction {
    BusinessSide,
    Architecture,
    Development,
    Operations,
}

/// Constant per rule; constructed once by the rule and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RiskCategory {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub asvs: String,
    pub cheat_sheet: String,
    pub action: String,
    pub mitigation: String,
    pub check: String,
    pub function: RiskFunction,
    pub stride: Stride,
    pub detection_logic: String,
    pub risk_assessment: String,
    pub false_positives: String,
    /// True when a hit may indicate a gap in the model itself rather than
    /// in the modeled architecture.
    pub model_failure_possible_reason: bool,
    pub cwe: u32,
}
