//! The emitted risk record and the severity lookup.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum RiskExploitationLikelihood {
    Unlikely,
    Likely,
    VeryLikely,
    Frequent,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum RiskExploitationImpact {
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum RiskSeverity {
    Low,
    Medium,
    Elevated,
    High,
    Critical,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum DataBreachProbability {
    Improbable,
    Possible,
    Probable,
}

impl RiskExploitationLikelihood {
    pub fn weight(self) -> u32 {
        match self {
            RiskExploitationLikelihood::Unlikely => 1,
            RiskExploitationLikelihood::Likely => 2,
            RiskExploitationLikelihood::VeryLikely => 3,
            RiskExploitationLikelihood::Frequent => 4,
        }
    }
}

impl RiskExploitationImpact {
    pub fn weight(self) -> u32 {
        match self {
            RiskExploitationImpact::Low => 1,
            RiskExploitationImpact::Medium => 2,
            RiskExploitationImpact::High => 3,
            RiskExploitationImpact::VeryHigh => 4,
        }
    }
}

/// Pure lookup over likelihood x impact weights.
///
/// Risk dedup and report ordering rely on this being stable across runs.
pub fn calculate_severity(
    likelihood: RiskExploitationLikelihood,
    impact: RiskExploitationImpact,
) -> RiskSeverity {
    let product = likelihood.weight() * impact.weight();
    if product <= 1 {
        RiskSeverity::Low
    } else if product <= 3 {
        RiskSeverity::Medium
    } else if product <= 8 {
        RiskSeverity::Elevated
    } else if product <= 12 {
        RiskSeverity::High
    } else {
        RiskSeverity::Critical
    }
}

/// A single derived risk, created by a rule and consumed read-only by
/// reporting collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Risk {
    pub category_id: String,
    pub severity: RiskSeverity,
    pub exploitation_likelihood: RiskExploitationLikelihood,
    pub exploitation_impact: RiskExploitationImpact,
    pub title: String,

    /// Stable composite id (`categoryId@assetId`) used to track a risk
    /// instance across model revisions.
    pub synthetic_id: String,

    pub most_relevant_technical_asset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_relevant_trust_boundary_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_relevant_communication_link_id: Option<String>,

    pub data_breach_probability: DataBreachProbability,
    pub data_breach_technical_asset_ids: Vec<String>,
}

impl Risk {
    /// Construct a risk anchored to one technical asset, with the severity
    /// stamped from likelihood and impact.
    pub fn for_asset(
        category_id: &str,
        likelihood: RiskExploitationLikelihood,
        impact: RiskExploitationImpact,
        title: String,
        technical_asset_id: &str,
    ) -> Risk {
        Risk {
            category_id: category_id.to_string(),
            severity: calculate_severity(likelihood, impact),
            exploitation_likelihood: likelihood,
            exploitation_impact: impact,
            title,
            synthetic_id: format!("{category_id}@{technical_asset_id}"),
            most_relevant_technical_asset_id: technical_asset_id.to_string(),
            most_relevant_trust_boundary_id: None,
            most_relevant_communication_link_id: None,
            data_breach_probability: DataBreachProbability::Improbable,
            data_breach_technical_asset_ids: Vec::new(),
        }
    }
}
