//! The parsed architecture model: data only, plus the precomputed
//! containment index and the sensitivity-propagation helpers rules rely on.

use archrisk_types::{Authentication, Confidentiality, Criticality, TechnologyAttribute};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TechnicalAssetType {
    ExternalEntity,
    #[default]
    Process,
    Datastore,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrustBoundaryType {
    #[default]
    NetworkOnPrem,
    NetworkDedicatedHoster,
    NetworkVirtualLan,
    NetworkCloudProvider,
    NetworkCloudSecurityGroup,
    NetworkPolicyNamespaceIsolation,
    ExecutionEnvironment,
}

impl TrustBoundaryType {
    /// Execution environments group co-located processes; everything else
    /// is a network boundary.
    pub fn is_network_boundary(self) -> bool {
        !matches!(self, TrustBoundaryType::ExecutionEnvironment)
    }
}

/// Immutable once the model is indexed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TechnicalAsset {
    pub id: String,
    pub title: String,
    pub asset_type: TechnicalAssetType,
    pub technologies: BTreeSet<TechnologyAttribute>,
    pub confidentiality: Confidentiality,
    pub integrity: Criticality,
    pub availability: Criticality,
    /// Relative attacker attractiveness, supplied by an external scorer.
    pub raa: f64,
    pub out_of_scope: bool,
    pub custom_developed_parts: bool,
    pub data_assets_processed: Vec<String>,
    pub tags: Vec<String>,
}

impl TechnicalAsset {
    pub fn has_attribute(&self, attribute: TechnologyAttribute) -> bool {
        self.technologies.contains(&attribute)
    }

    /// Sum of the CIA ordinal scores; used only for deterministic
    /// tie-breaking between candidate anchor assets.
    pub fn highest_sensitivity_score(&self) -> u32 {
        self.confidentiality.score() + self.integrity.score() + self.availability.score()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DataAsset {
    pub id: String,
    pub title: String,
    pub confidentiality: Confidentiality,
    pub integrity: Criticality,
    pub availability: Criticality,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CommunicationLink {
    pub id: String,
    pub title: String,
    pub source_id: String,
    pub target_id: String,
    pub data_assets_sent: Vec<String>,
    pub data_assets_received: Vec<String>,
    pub authentication: Authentication,
    pub readonly: bool,
}

impl CommunicationLink {
    /// Ids of all data assets touched by this link, in declared order.
    pub fn data_assets_transferred(&self) -> impl Iterator<Item = &str> {
        self.data_assets_sent
            .iter()
            .chain(self.data_assets_received.iter())
            .map(String::as_str)
    }
}

/// Referenced by id everywhere else; nesting forms a tree.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrustBoundary {
    pub id: String,
    pub title: String,
    pub boundary_type: TrustBoundaryType,
    pub technical_assets_inside: Vec<String>,
    pub trust_boundaries_nested: Vec<String>,
}

/// The model graph is inconsistent in a way predicates cannot degrade
/// around. Raised at index time, never during rule evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModelInconsistency {
    #[error("technical asset {asset_id:?} is directly contained in both {first:?} and {second:?}")]
    DuplicateContainment {
        asset_id: String,
        first: String,
        second: String,
    },

    #[error("trust boundary {boundary_id:?} is nested in both {first:?} and {second:?}")]
    DuplicateNesting {
        boundary_id: String,
        first: String,
        second: String,
    },

    #[error("trust boundary nesting contains a cycle through {boundary_id:?}")]
    CyclicNesting { boundary_id: String },
}

/// The fully materialized model, with the asset-to-boundary containment
/// index precomputed at construction.
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub technical_assets: BTreeMap<String, TechnicalAsset>,
    pub trust_boundaries: BTreeMap<String, TrustBoundary>,
    pub data_assets: BTreeMap<String, DataAsset>,
    pub communication_links: Vec<CommunicationLink>,
    pub tags_available: Vec<String>,

    /// Asset id -> id of its direct containing trust boundary.
    direct_containment: BTreeMap<String, String>,
}

impl Model {
    /// Build the model and its containment index. Dangling ids inside
    /// boundaries are tolerated (predicates degrade); duplicate containment
    /// and cyclic or duplicate nesting are rejected.
    pub fn index(
        technical_assets: BTreeMap<String, TechnicalAsset>,
        trust_boundaries: BTreeMap<String, TrustBoundary>,
        data_assets: BTreeMap<String, DataAsset>,
        communication_links: Vec<CommunicationLink>,
        tags_available: Vec<String>,
    ) -> Result<Model, ModelInconsistency> {
        let mut direct_containment: BTreeMap<String, String> = BTreeMap::new();
        let mut parent_of: BTreeMap<&str, &str> = BTreeMap::new();

        for boundary in trust_boundaries.values() {
            for asset_id in &boundary.technical_assets_inside {
                if let Some(first) = direct_containment.get(asset_id) {
                    return Err(ModelInconsistency::DuplicateContainment {
                        asset_id: asset_id.clone(),
                        first: first.clone(),
                        second: boundary.id.clone(),
                    });
                }
                direct_containment.insert(asset_id.clone(), boundary.id.clone());
            }
            for nested_id in &boundary.trust_boundaries_nested {
                if let Some(first) = parent_of.get(nested_id.as_str()) {
                    return Err(ModelInconsistency::DuplicateNesting {
                        boundary_id: nested_id.clone(),
                        first: (*first).to_string(),
                        second: boundary.id.clone(),
                    });
                }
                parent_of.insert(nested_id, &boundary.id);
            }
        }

        // Nesting must be a tree: walking up from any boundary terminates.
        for start in trust_boundaries.keys() {
            let mut seen: BTreeSet<&str> = BTreeSet::new();
            let mut current = start.as_str();
            seen.insert(current);
            while let Some(parent) = parent_of.get(current) {
                if !seen.insert(parent) {
                    return Err(ModelInconsistency::CyclicNesting {
                        boundary_id: start.clone(),
                    });
                }
                current = parent;
            }
        }

        Ok(Model {
            technical_assets,
            trust_boundaries,
            data_assets,
            communication_links,
            tags_available,
            direct_containment,
        })
    }

    /// Stable iteration order for rules that scan all assets.
    pub fn sorted_technical_asset_ids(&self) -> impl Iterator<Item = &str> {
        self.technical_assets.keys().map(String::as_str)
    }

    /// The direct containing trust boundary of an asset, if both the index
    /// entry and the boundary itself resolve.
    pub fn direct_containing_trust_boundary(&self, asset_id: &str) -> Option<&TrustBoundary> {
        let boundary_id = self.direct_containment.get(asset_id)?;
        self.trust_boundaries.get(boundary_id)
    }

    /// Parent of a boundary, found by scanning every boundary's nested list
    /// for membership; there is no stored back-pointer.
    pub fn find_parent_trust_boundary(&self, boundary_id: &str) -> Option<&TrustBoundary> {
        self.trust_boundaries.values().find(|candidate| {
            candidate
                .trust_boundaries_nested
                .iter()
                .any(|nested| nested == boundary_id)
        })
    }

    /// Highest confidentiality among the asset's own rating and the data
    /// assets it processes; unresolved data ids are skipped.
    pub fn highest_processed_confidentiality(&self, asset: &TechnicalAsset) -> Confidentiality {
        asset
            .data_assets_processed
            .iter()
            .filter_map(|id| self.data_assets.get(id))
            .map(|data| data.confidentiality)
            .fold(asset.confidentiality, Confidentiality::max)
    }

    pub fn highest_processed_integrity(&self, asset: &TechnicalAsset) -> Criticality {
        asset
            .data_assets_processed
            .iter()
            .filter_map(|id| self.data_assets.get(id))
            .map(|data| data.integrity)
            .fold(asset.integrity, Criticality::max)
    }

    pub fn highest_processed_availability(&self, asset: &TechnicalAsset) -> Criticality {
        asset
            .data_assets_processed
            .iter()
            .filter_map(|id| self.data_assets.get(id))
            .map(|data| data.availability)
            .fold(asset.availability, Criticality::max)
    }
}
