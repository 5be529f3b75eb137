//! Sensitivity ratings and capability attributes carried by the model.
//!
//! The CIA enumerations are totally ordered; rules compare against
//! thresholds such as `Confidential` or `Critical` with plain `>=`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Confidentiality {
    #[default]
    Public,
    Internal,
    Restricted,
    Confidential,
    StrictlyConfidential,
}

/// Criticality rates both integrity and availability.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Criticality {
    #[default]
    Archive,
    Operational,
    Important,
    Critical,
    MissionCritical,
}

impl Confidentiality {
    /// Ordinal score used for deterministic sensitivity tie-breaking.
    pub fn score(self) -> u32 {
        self as u32
    }
}

impl Criticality {
    pub fn score(self) -> u32 {
        self as u32
    }
}

/// Capability tags a technical asset may carry.
///
/// Set-valued per asset; rules test for individual attributes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum TechnologyAttribute {
    BuildPipeline,
    SourcecodeRepository,
    DevOpsClient,
    IsHighValueTarget,
    WebServer,
    Database,
    IdentityProvider,
    LoadBalancer,
    Monitoring,
}

/// Authentication scheme declared on a communication link.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Authentication {
    #[default]
    None,
    Credentials,
    SessionId,
    Token,
    ClientCertificate,
}
