//! Pure structural predicates over the model graph.
//!
//! Every boundary-crossing or co-location rule composes these instead of
//! re-deriving boundary logic. All predicates are total: missing boundary or
//! asset data degrades to the documented default, never a panic.
//!
//! A non-network direct boundary (an execution environment) is first
//! substituted by its parent boundary before network comparisons; processes
//! co-located in one execution environment share whatever network segment
//! the environment sits in.

use crate::model::{CommunicationLink, Model, TechnicalAsset, TrustBoundary};

/// The network boundary an asset effectively sits in: its direct boundary
/// when that is a network kind, otherwise the direct boundary's parent.
fn network_boundary<'a>(model: &'a Model, asset_id: &str) -> Option<&'a TrustBoundary> {
    let direct = model.direct_containing_trust_boundary(asset_id)?;
    if direct.boundary_type.is_network_boundary() {
        Some(direct)
    } else {
        model.find_parent_trust_boundary(&direct.id)
    }
}

/// True iff the link's endpoints sit in different network boundaries.
/// No resolvable network boundary on either side means no evidence of a
/// crossing: false.
pub fn is_across_trust_boundary_network_only(model: &Model, link: &CommunicationLink) -> bool {
    let Some(source) = network_boundary(model, &link.source_id) else {
        return false;
    };
    let Some(target) = network_boundary(model, &link.target_id) else {
        return false;
    };
    source.id != target.id && target.boundary_type.is_network_boundary()
}

/// True iff both assets sit directly in the same execution environment.
/// Vacuously true when neither asset has any direct boundary.
pub fn is_same_execution_environment(
    model: &Model,
    asset: &TechnicalAsset,
    other_asset_id: &str,
) -> bool {
    let mine = model.direct_containing_trust_boundary(&asset.id);
    let other = model.direct_containing_trust_boundary(other_asset_id);
    match (mine, other) {
        (None, None) => true,
        (Some(mine), Some(other)) => {
            !mine.boundary_type.is_network_boundary()
                && !other.boundary_type.is_network_boundary()
                && mine.id == other.id
        }
        _ => false,
    }
}

/// True iff both assets resolve to the same network boundary (after parent
/// substitution). Vacuously true when neither side resolves to one.
pub fn is_same_trust_boundary_network_only(
    model: &Model,
    asset: &TechnicalAsset,
    other_asset_id: &str,
) -> bool {
    let mine = network_boundary(model, &asset.id);
    let other = network_boundary(model, other_asset_id);
    match (mine, other) {
        (None, None) => true,
        (Some(mine), Some(other)) => mine.id == other.id,
        _ => false,
    }
}

/// Basic membership helper used pervasively by rules.
pub fn contains<T: AsRef<str>>(values: &[T], value: &str) -> bool {
    values.iter().any(|candidate| candidate.as_ref() == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrustBoundaryType;
    use crate::test_support::{
        boundary, empty_model, link, model_with, technical_asset, two_boundary_model,
    };

    #[test]
    fn across_network_only_is_false_on_an_empty_model() {
        let model = empty_model();
        assert!(!is_across_trust_boundary_network_only(
            &model,
            &link("l", "source", "target")
        ));
    }

    #[test]
    fn across_network_only_is_false_without_a_source_boundary() {
        let model = model_with(
            vec![technical_asset("source"), technical_asset("target")],
            vec![boundary(
                "tb",
                TrustBoundaryType::NetworkOnPrem,
                vec!["target"],
                vec![],
            )],
            vec![],
            vec![],
        );
        assert!(!is_across_trust_boundary_network_only(
            &model,
            &link("l", "source", "target")
        ));
    }

    #[test]
    fn across_network_only_is_false_for_unparented_execution_environments() {
        // Both sides sit in execution environments with no network parent,
        // so neither resolves to a network boundary.
        let model = two_boundary_model(
            TrustBoundaryType::ExecutionEnvironment,
            TrustBoundaryType::ExecutionEnvironment,
        );
        assert!(!is_across_trust_boundary_network_only(
            &model,
            &link("l", "asset", "other-asset")
        ));
    }

    #[test]
    fn across_network_only_is_false_within_one_boundary() {
        let model = model_with(
            vec![technical_asset("source"), technical_asset("target")],
            vec![boundary(
                "tb",
                TrustBoundaryType::NetworkOnPrem,
                vec!["source", "target"],
                vec![],
            )],
            vec![],
            vec![],
        );
        assert!(!is_across_trust_boundary_network_only(
            &model,
            &link("l", "source", "target")
        ));
    }

    #[test]
    fn across_network_only_is_true_for_different_network_boundaries() {
        let model = two_boundary_model(
            TrustBoundaryType::NetworkOnPrem,
            TrustBoundaryType::NetworkCloudProvider,
        );
        assert!(is_across_trust_boundary_network_only(
            &model,
            &link("l", "asset", "other-asset")
        ));
    }

    #[test]
    fn across_network_only_substitutes_the_parent_for_execution_environments() {
        // source runs in an execution environment nested inside net-a;
        // target sits directly in net-b. The effective crossing is
        // net-a -> net-b.
        let model = model_with(
            vec![technical_asset("source"), technical_asset("target")],
            vec![
                boundary(
                    "exec",
                    TrustBoundaryType::ExecutionEnvironment,
                    vec!["source"],
                    vec![],
                ),
                boundary(
                    "net-a",
                    TrustBoundaryType::NetworkOnPrem,
                    vec![],
                    vec!["exec"],
                ),
                boundary(
                    "net-b",
                    TrustBoundaryType::NetworkCloudProvider,
                    vec!["target"],
                    vec![],
                ),
            ],
            vec![],
            vec![],
        );
        assert!(is_across_trust_boundary_network_only(
            &model,
            &link("l", "source", "target")
        ));

        // And not a crossing when the execution environment is nested in
        // the target's own network boundary.
        let model = model_with(
            vec![technical_asset("source"), technical_asset("target")],
            vec![
                boundary(
                    "exec",
                    TrustBoundaryType::ExecutionEnvironment,
                    vec!["source"],
                    vec![],
                ),
                boundary(
                    "net-a",
                    TrustBoundaryType::NetworkOnPrem,
                    vec!["target"],
                    vec!["exec"],
                ),
            ],
            vec![],
            vec![],
        );
        assert!(!is_across_trust_boundary_network_only(
            &model,
            &link("l", "source", "target")
        ));
    }

    #[test]
    fn same_execution_environment_is_vacuously_true_on_an_empty_model() {
        let model = empty_model();
        let asset = technical_asset("asset");
        assert!(is_same_execution_environment(&model, &asset, "other-asset"));
    }

    #[test]
    fn same_execution_environment_is_false_when_only_one_side_has_a_boundary() {
        let model = model_with(
            vec![technical_asset("asset"), technical_asset("other-asset")],
            vec![boundary(
                "tb",
                TrustBoundaryType::ExecutionEnvironment,
                vec!["other-asset"],
                vec![],
            )],
            vec![],
            vec![],
        );
        let asset = model.technical_assets["asset"].clone();
        assert!(!is_same_execution_environment(&model, &asset, "other-asset"));

        let other_way = model.technical_assets["other-asset"].clone();
        assert!(!is_same_execution_environment(&model, &other_way, "asset"));
    }

    #[test]
    fn same_execution_environment_requires_identical_environments() {
        let model = two_boundary_model(
            TrustBoundaryType::ExecutionEnvironment,
            TrustBoundaryType::ExecutionEnvironment,
        );
        let asset = model.technical_assets["asset"].clone();
        assert!(!is_same_execution_environment(&model, &asset, "other-asset"));

        let model = model_with(
            vec![technical_asset("asset"), technical_asset("other-asset")],
            vec![boundary(
                "shared",
                TrustBoundaryType::ExecutionEnvironment,
                vec!["asset", "other-asset"],
                vec![],
            )],
            vec![],
            vec![],
        );
        let asset = model.technical_assets["asset"].clone();
        assert!(is_same_execution_environment(&model, &asset, "other-asset"));
    }

    #[test]
    fn same_execution_environment_is_false_for_network_boundaries() {
        let cases = [
            (
                TrustBoundaryType::ExecutionEnvironment,
                TrustBoundaryType::NetworkCloudProvider,
            ),
            (
                TrustBoundaryType::NetworkCloudProvider,
                TrustBoundaryType::ExecutionEnvironment,
            ),
            (
                TrustBoundaryType::NetworkCloudProvider,
                TrustBoundaryType::NetworkCloudProvider,
            ),
        ];
        for (first, second) in cases {
            let model = two_boundary_model(first, second);
            let asset = model.technical_assets["asset"].clone();
            assert!(
                !is_same_execution_environment(&model, &asset, "other-asset"),
                "{first:?}/{second:?} must not count as the same execution environment"
            );
        }
    }

    #[test]
    fn same_trust_boundary_network_only_is_vacuously_true_on_an_empty_model() {
        let model = empty_model();
        let asset = technical_asset("asset");
        assert!(is_same_trust_boundary_network_only(
            &model,
            &asset,
            "other-asset"
        ));
    }

    #[test]
    fn same_trust_boundary_network_only_is_false_when_one_side_is_unbounded() {
        let model = model_with(
            vec![technical_asset("asset"), technical_asset("other-asset")],
            vec![boundary(
                "tb",
                TrustBoundaryType::NetworkOnPrem,
                vec!["other-asset"],
                vec![],
            )],
            vec![],
            vec![],
        );
        let asset = model.technical_assets["asset"].clone();
        assert!(!is_same_trust_boundary_network_only(
            &model,
            &asset,
            "other-asset"
        ));

        let other_way = model.technical_assets["other-asset"].clone();
        assert!(!is_same_trust_boundary_network_only(
            &model,
            &other_way,
            "asset"
        ));
    }

    #[test]
    fn same_trust_boundary_network_only_is_reflexive() {
        let model = model_with(
            vec![technical_asset("asset")],
            vec![boundary(
                "tb",
                TrustBoundaryType::NetworkOnPrem,
                vec!["asset"],
                vec![],
            )],
            vec![],
            vec![],
        );
        let asset = model.technical_assets["asset"].clone();
        assert!(is_same_trust_boundary_network_only(&model, &asset, "asset"));
    }

    #[test]
    fn same_trust_boundary_network_only_compares_network_boundary_ids() {
        let model = two_boundary_model(
            TrustBoundaryType::NetworkOnPrem,
            TrustBoundaryType::NetworkOnPrem,
        );
        let asset = model.technical_assets["asset"].clone();
        assert!(!is_same_trust_boundary_network_only(
            &model,
            &asset,
            "other-asset"
        ));

        let model = model_with(
            vec![technical_asset("asset"), technical_asset("other-asset")],
            vec![boundary(
                "shared",
                TrustBoundaryType::NetworkOnPrem,
                vec!["asset", "other-asset"],
                vec![],
            )],
            vec![],
            vec![],
        );
        let asset = model.technical_assets["asset"].clone();
        assert!(is_same_trust_boundary_network_only(
            &model,
            &asset,
            "other-asset"
        ));
    }

    #[test]
    fn sibling_execution_environments_under_one_network_parent_are_the_same() {
        let model = model_with(
            vec![technical_asset("asset"), technical_asset("other-asset")],
            vec![
                boundary(
                    "exec-a",
                    TrustBoundaryType::ExecutionEnvironment,
                    vec!["asset"],
                    vec![],
                ),
                boundary(
                    "exec-b",
                    TrustBoundaryType::ExecutionEnvironment,
                    vec!["other-asset"],
                    vec![],
                ),
                boundary(
                    "parent-net",
                    TrustBoundaryType::NetworkCloudProvider,
                    vec![],
                    vec!["exec-a", "exec-b"],
                ),
            ],
            vec![],
            vec![],
        );
        let asset = model.technical_assets["asset"].clone();
        assert!(is_same_trust_boundary_network_only(
            &model,
            &asset,
            "other-asset"
        ));
    }

    #[test]
    fn unrelated_boundaries_are_not_the_same() {
        let model = model_with(
            vec![technical_asset("asset"), technical_asset("other-asset")],
            vec![
                boundary(
                    "exec-a",
                    TrustBoundaryType::ExecutionEnvironment,
                    vec!["asset"],
                    vec![],
                ),
                boundary(
                    "net-a",
                    TrustBoundaryType::NetworkOnPrem,
                    vec![],
                    vec!["exec-a"],
                ),
                boundary(
                    "net-b",
                    TrustBoundaryType::NetworkOnPrem,
                    vec!["other-asset"],
                    vec![],
                ),
            ],
            vec![],
            vec![],
        );
        let asset = model.technical_assets["asset"].clone();
        assert!(!is_same_trust_boundary_network_only(
            &model,
            &asset,
            "other-asset"
        ));
    }

    #[test]
    fn different_sibling_network_boundaries_stay_different_despite_a_shared_parent() {
        // Parent substitution only applies to non-network boundaries; two
        // network siblings under one parent are still distinct segments.
        let model = model_with(
            vec![technical_asset("asset"), technical_asset("other-asset")],
            vec![
                boundary(
                    "net-a",
                    TrustBoundaryType::NetworkCloudProvider,
                    vec!["asset"],
                    vec![],
                ),
                boundary(
                    "net-b",
                    TrustBoundaryType::NetworkCloudProvider,
                    vec!["other-asset"],
                    vec![],
                ),
                boundary(
                    "parent-net",
                    TrustBoundaryType::NetworkCloudProvider,
                    vec![],
                    vec!["net-a", "net-b"],
                ),
            ],
            vec![],
            vec![],
        );
        let asset = model.technical_assets["asset"].clone();
        assert!(!is_same_trust_boundary_network_only(
            &model,
            &asset,
            "other-asset"
        ));
    }

    #[test]
    fn contains_checks_string_membership() {
        let values = vec!["a".to_string(), "b".to_string()];
        assert!(contains(&values, "b"));
        assert!(!contains(&values, "c"));
        let empty: Vec<String> = Vec::new();
        assert!(!contains(&empty, "c"));
    }
}
