//! Shared fixture builders for domain tests.

use crate::model::{
    CommunicationLink, DataAsset, Model, TechnicalAsset, TrustBoundary, TrustBoundaryType,
};
use std::collections::BTreeMap;

pub(crate) fn technical_asset(id: &str) -> TechnicalAsset {
    TechnicalAsset {
        id: id.to_string(),
        title: id.to_string(),
        ..TechnicalAsset::default()
    }
}

pub(crate) fn data_asset(id: &str) -> DataAsset {
    DataAsset {
        id: id.to_string(),
        title: id.to_string(),
        ..DataAsset::default()
    }
}

pub(crate) fn boundary(
    id: &str,
    boundary_type: TrustBoundaryType,
    assets_inside: Vec<&str>,
    nested: Vec<&str>,
) -> TrustBoundary {
    TrustBoundary {
        id: id.to_string(),
        title: id.to_string(),
        boundary_type,
        technical_assets_inside: assets_inside.into_iter().map(str::to_string).collect(),
        trust_boundaries_nested: nested.into_iter().map(str::to_string).collect(),
    }
}

pub(crate) fn link(id: &str, source: &str, target: &str) -> CommunicationLink {
    CommunicationLink {
        id: id.to_string(),
        title: id.to_string(),
        source_id: source.to_string(),
        target_id: target.to_string(),
        ..CommunicationLink::default()
    }
}

pub(crate) fn model_with(
    assets: Vec<TechnicalAsset>,
    boundaries: Vec<TrustBoundary>,
    data: Vec<DataAsset>,
    links: Vec<CommunicationLink>,
) -> Model {
    Model::index(
        assets.into_iter().map(|a| (a.id.clone(), a)).collect(),
        boundaries.into_iter().map(|b| (b.id.clone(), b)).collect(),
        data.into_iter().map(|d| (d.id.clone(), d)).collect(),
        links,
        Vec::new(),
    )
    .expect("fixture model must index")
}

/// Two assets, each directly inside its own boundary of the given types.
pub(crate) fn two_boundary_model(
    first_type: TrustBoundaryType,
    second_type: TrustBoundaryType,
) -> Model {
    model_with(
        vec![technical_asset("asset"), technical_asset("other-asset")],
        vec![
            boundary("trust-boundary", first_type, vec!["asset"], vec![]),
            boundary("other-trust-boundary", second_type, vec!["other-asset"], vec![]),
        ],
        vec![],
        vec![],
    )
}

pub(crate) fn empty_model() -> Model {
    Model::index(
        BTreeMap::new(),
        BTreeMap::new(),
        BTreeMap::new(),
        Vec::new(),
        Vec::new(),
    )
    .expect("empty model must index")
}
