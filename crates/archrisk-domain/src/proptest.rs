//! Property-based tests for the domain crate.
//!
//! Invariants covered:
//! - the severity lookup is total and monotone in both inputs
//! - predicates never panic, even with dangling ids in boundaries
//! - the analysis report is deterministically ordered for any model

use crate::model::{Model, TrustBoundaryType};
use crate::policy::AnalysisPolicy;
use crate::predicates::{
    is_across_trust_boundary_network_only, is_same_execution_environment,
    is_same_trust_boundary_network_only,
};
use crate::test_support::{boundary, link, model_with, technical_asset};
use crate::{analyze, builtin_rules};
use archrisk_types::{calculate_severity, RiskExploitationImpact, RiskExploitationLikelihood};
use proptest::prelude::*;

fn arb_likelihood() -> impl Strategy<Value = RiskExploitationLikelihood> {
    prop_oneof![
        Just(RiskExploitationLikelihood::Unlikely),
        Just(RiskExploitationLikelihood::Likely),
        Just(RiskExploitationLikelihood::VeryLikely),
        Just(RiskExploitationLikelihood::Frequent),
    ]
}

fn arb_impact() -> impl Strategy<Value = RiskExploitationImpact> {
    prop_oneof![
        Just(RiskExploitationImpact::Low),
        Just(RiskExploitationImpact::Medium),
        Just(RiskExploitationImpact::High),
        Just(RiskExploitationImpact::VeryHigh),
    ]
}

fn arb_boundary_type() -> impl Strategy<Value = TrustBoundaryType> {
    prop_oneof![
        Just(TrustBoundaryType::NetworkOnPrem),
        Just(TrustBoundaryType::NetworkCloudProvider),
        Just(TrustBoundaryType::ExecutionEnvironment),
    ]
}

/// A small model: up to four assets, up to two boundaries with arbitrary
/// (possibly dangling) membership, one link between the first two ids.
fn arb_model() -> impl Strategy<Value = Model> {
    (
        1usize..4,
        prop::collection::vec((arb_boundary_type(), prop::collection::vec(0usize..6, 0..3)), 0..3),
        prop::collection::vec((0.0f64..100.0, any::<bool>(), any::<bool>()), 1..4),
    )
        .prop_map(|(asset_count, boundary_specs, asset_specs)| {
            let assets: Vec<_> = asset_specs
                .iter()
                .take(asset_count)
                .enumerate()
                .map(|(i, (raa, out_of_scope, custom))| {
                    let mut asset = technical_asset(&format!("asset-{i}"));
                    asset.raa = *raa;
                    asset.out_of_scope = *out_of_scope;
                    asset.custom_developed_parts = *custom;
                    asset
                })
                .collect();

            let mut used: Vec<String> = Vec::new();
            let boundaries: Vec<_> = boundary_specs
                .into_iter()
                .enumerate()
                .map(|(i, (boundary_type, members))| {
                    // Dangling ids are allowed; duplicate containment is not.
                    let inside: Vec<String> = members
                        .into_iter()
                        .map(|m| format!("asset-{m}"))
                        .filter(|id| {
                            if used.contains(id) {
                                false
                            } else {
                                used.push(id.clone());
                                true
                            }
                        })
                        .collect();
                    boundary(
                        &format!("boundary-{i}"),
                        boundary_type,
                        inside.iter().map(String::as_str).collect(),
                        vec![],
                    )
                })
                .collect();

            let links = vec![link("l", "asset-0", "asset-1")];
            model_with(assets, boundaries, vec![], links)
        })
}

proptest! {
    #[test]
    fn severity_is_total_and_monotone(
        l1 in arb_likelihood(),
        l2 in arb_likelihood(),
        i1 in arb_impact(),
        i2 in arb_impact(),
    ) {
        let base = calculate_severity(l1, i1);
        if l2.weight() >= l1.weight() && i2.weight() >= i1.weight() {
            prop_assert!(calculate_severity(l2, i2) >= base);
        }
        // Same inputs, same result.
        prop_assert_eq!(calculate_severity(l1, i1), base);
    }

    #[test]
    fn predicates_never_panic(model in arb_model()) {
        let l = link("l", "asset-0", "asset-1");
        let _ = is_across_trust_boundary_network_only(&model, &l);
        if let Some(asset) = model.technical_assets.values().next() {
            let _ = is_same_execution_environment(&model, asset, "asset-1");
            let _ = is_same_trust_boundary_network_only(&model, asset, "no-such-asset");
        }
    }

    #[test]
    fn analysis_reports_are_sorted_and_reproducible(model in arb_model()) {
        let first = analyze(&model, &AnalysisPolicy::new(), &builtin_rules());
        let second = analyze(&model, &AnalysisPolicy::new(), &builtin_rules());

        let ids: Vec<&String> = first.risks.iter().map(|r| &r.synthetic_id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        prop_assert_eq!(&ids, &sorted);

        let second_ids: Vec<&String> = second.risks.iter().map(|r| &r.synthetic_id).collect();
        prop_assert_eq!(ids, second_ids);
    }
}
