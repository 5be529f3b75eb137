use crate::model::{Model, TechnicalAsset};
use crate::rules::{RiskRule, RuleError, RuleOutput};
use archrisk_types::{
    ids, Confidentiality, Criticality, Risk, RiskCategory, RiskExploitationImpact,
    RiskExploitationLikelihood, RiskFunction, Stride, TechnologyAttribute,
};

/// Flags models that contain custom-developed parts but no modeled build
/// infrastructure (build pipeline, sourcecode repository, devops client).
pub struct MissingBuildInfrastructureRule;

impl MissingBuildInfrastructureRule {
    pub fn new() -> MissingBuildInfrastructureRule {
        MissingBuildInfrastructureRule
    }

    fn create_risk(&self, asset: &TechnicalAsset, impact: RiskExploitationImpact) -> Risk {
        let title = format!(
            "<b>Missing Build Infrastructure</b> in the threat model (referencing asset <b>{}</b> as an example)",
            asset.title
        );
        Risk::for_asset(
            ids::RULE_MISSING_BUILD_INFRASTRUCTURE,
            RiskExploitationLikelihood::Unlikely,
            impact,
            title,
            &asset.id,
        )
    }
}

impl Default for MissingBuildInfrastructureRule {
    fn default() -> Self {
        MissingBuildInfrastructureRule::new()
    }
}

fn asset_cia_escalates(asset: &TechnicalAsset) -> bool {
    asset.confidentiality >= Confidentiality::Confidential
        || asset.integrity >= Criticality::Critical
        || asset.availability >= Criticality::Critical
}

fn processed_cia_escalates(model: &Model, asset: &TechnicalAsset) -> bool {
    model.highest_processed_confidentiality(asset) >= Confidentiality::Confidential
        || model.highest_processed_integrity(asset) >= Criticality::Critical
        || model.highest_processed_availability(asset) >= Criticality::Critical
}

impl RiskRule for MissingBuildInfrastructureRule {
    fn category(&self) -> RiskCategory {
        RiskCategory {
            id: ids::RULE_MISSING_BUILD_INFRASTRUCTURE.to_string(),
            title: "Missing Build Infrastructure".to_string(),
            description: "The modeled architecture does not contain a build infrastructure \
                (devops-client, sourcecode-repo, build-pipeline, etc.), which might be the risk \
                of a model missing critical assets (and thus not seeing their risks). If the \
                architecture contains custom-developed parts, the pipeline where code gets \
                developed and built needs to be part of the model."
                .to_string(),
            impact: "If this risk is unmitigated, attackers might be able to exploit risks unseen \
                in this threat model due to critical build infrastructure components missing in \
                the model."
                .to_string(),
            asvs: "V1 - Architecture, Design and Threat Modeling Requirements".to_string(),
            cheat_sheet:
                "https://cheatsheetseries.owasp.org/cheatsheets/Attack_Surface_Analysis_Cheat_Sheet.html"
                    .to_string(),
            action: "Build Pipeline Hardening".to_string(),
            mitigation: "Include the build infrastructure in the model.".to_string(),
            check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter \
                applied?"
                .to_string(),
            function: RiskFunction::Architecture,
            stride: Stride::Tampering,
            detection_logic: "Models with in-scope custom-developed parts missing in-scope \
                development (code creation) and build infrastructure components (devops-client, \
                sourcecode-repo, build-pipeline, etc.)."
                .to_string(),
            risk_assessment: "The risk rating depends on the highest sensitivity of the in-scope \
                assets running custom-developed parts."
                .to_string(),
            false_positives: "Models not having any custom-developed parts can be considered as \
                false positives after individual review."
                .to_string(),
            model_failure_possible_reason: true,
            cwe: 1127,
        }
    }

    fn supported_tags(&self) -> Vec<String> {
        Vec::new()
    }

    fn generate_risks(&self, model: &Model) -> Result<RuleOutput, RuleError> {
        let mut has_custom_developed_parts = false;
        let mut has_build_pipeline = false;
        let mut has_sourcecode_repo = false;
        let mut has_devops_client = false;
        let mut impact = RiskExploitationImpact::Low;
        let mut most_relevant_asset: Option<&TechnicalAsset> = None;

        // Sorted iteration keeps the example asset deterministic across runs.
        for asset in model.technical_assets.values() {
            // Infrastructure presence is a model-wide fact, checked across
            // all assets including out-of-scope ones, before the skip filter.
            has_build_pipeline |= asset.has_attribute(TechnologyAttribute::BuildPipeline);
            has_sourcecode_repo |= asset.has_attribute(TechnologyAttribute::SourcecodeRepository);
            has_devops_client |= asset.has_attribute(TechnologyAttribute::DevOpsClient);

            if !asset.custom_developed_parts || asset.out_of_scope {
                continue;
            }

            has_custom_developed_parts = true;
            if impact == RiskExploitationImpact::Low {
                most_relevant_asset = Some(asset);
                if processed_cia_escalates(model, asset) {
                    impact = RiskExploitationImpact::Medium;
                }
            }
            if asset_cia_escalates(asset) {
                impact = RiskExploitationImpact::Medium;
            }

            // Reference the most sensitive asset as the example.
            match most_relevant_asset {
                Some(current)
                    if asset.highest_sensitivity_score() <= current.highest_sensitivity_score() => {}
                _ => most_relevant_asset = Some(asset),
            }
        }

        let has_build_infrastructure =
            has_build_pipeline && has_sourcecode_repo && has_devops_client;

        let mut risks = Vec::new();
        if has_custom_developed_parts && !has_build_infrastructure {
            if let Some(asset) = most_relevant_asset {
                risks.push(self.create_risk(asset, impact));
            }
        }
        Ok(RuleOutput::from_risks(risks))
    }
}
