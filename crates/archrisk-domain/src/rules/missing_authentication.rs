use crate::model::{CommunicationLink, Model, TechnicalAsset};
use crate::predicates::is_across_trust_boundary_network_only;
use crate::rules::{RiskRule, RuleError, RuleOutput};
use archrisk_types::{
    ids, Authentication, Confidentiality, Criticality, DataBreachProbability, Risk, RiskCategory,
    RiskExploitationImpact, RiskExploitationLikelihood, RiskFunction, Stride,
};

/// Flags unauthenticated communication into sensitive in-scope assets when
/// the link crosses a network trust boundary.
pub struct MissingAuthenticationRule;

impl MissingAuthenticationRule {
    pub fn new() -> MissingAuthenticationRule {
        MissingAuthenticationRule
    }

    fn create_risk(&self, model: &Model, target: &TechnicalAsset, link: &CommunicationLink) -> Risk {
        let impact = if model.highest_processed_confidentiality(target)
            == Confidentiality::StrictlyConfidential
            || model.highest_processed_integrity(target) == Criticality::MissionCritical
        {
            RiskExploitationImpact::Medium
        } else {
            RiskExploitationImpact::Low
        };
        let title = format!(
            "<b>Missing Authentication</b> covering communication link <b>{}</b> to <b>{}</b>",
            link.title, target.title
        );
        let mut risk = Risk::for_asset(
            ids::RULE_MISSING_AUTHENTICATION,
            RiskExploitationLikelihood::Likely,
            impact,
            title,
            &target.id,
        );
        // One risk per offending link, so the link id participates in the
        // synthetic id to keep instances distinguishable.
        risk.synthetic_id = format!(
            "{}@{}@{}",
            ids::RULE_MISSING_AUTHENTICATION,
            link.id,
            target.id
        );
        risk.most_relevant_communication_link_id = Some(link.id.clone());
        risk.data_breach_probability = DataBreachProbability::Possible;
        risk.data_breach_technical_asset_ids = vec![target.id.clone()];
        risk
    }
}

impl Default for MissingAuthenticationRule {
    fn default() -> Self {
        MissingAuthenticationRule::new()
    }
}

impl RiskRule for MissingAuthenticationRule {
    fn category(&self) -> RiskCategory {
        RiskCategory {
            id: ids::RULE_MISSING_AUTHENTICATION.to_string(),
            title: "Missing Authentication".to_string(),
            description: "Technical assets processing sensitive data should not accept \
                communication links without authentication when the caller connects across a \
                network trust boundary."
                .to_string(),
            impact: "If this risk is unmitigated, attackers reaching the network segment might be \
                able to access the asset's functionality or data without any authentication."
                .to_string(),
            asvs: "V2 - Authentication Verification Requirements".to_string(),
            cheat_sheet:
                "https://cheatsheetseries.owasp.org/cheatsheets/Authentication_Cheat_Sheet.html"
                    .to_string(),
            action: "Authentication of Incoming Requests".to_string(),
            mitigation: "Apply an authentication method to the communication link.".to_string(),
            check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter \
                applied?"
                .to_string(),
            function: RiskFunction::Architecture,
            stride: Stride::ElevationOfPrivilege,
            detection_logic: "In-scope technical assets of sensitivity Confidential (or higher) \
                or Critical (or higher) integrity with incoming communication links without \
                authentication that cross a network trust boundary and transfer data assets."
                .to_string(),
            risk_assessment: "The risk rating depends on the sensitivity of the data transferred \
                to and processed in the target technical asset."
                .to_string(),
            false_positives: "Communication links from intentionally public endpoints can be \
                considered as false positives after individual review."
                .to_string(),
            model_failure_possible_reason: false,
            cwe: 306,
        }
    }

    fn supported_tags(&self) -> Vec<String> {
        Vec::new()
    }

    fn generate_risks(&self, model: &Model) -> Result<RuleOutput, RuleError> {
        let mut risks = Vec::new();
        for asset in model.technical_assets.values() {
            if asset.out_of_scope {
                continue;
            }
            if asset.confidentiality < Confidentiality::Confidential
                && asset.integrity < Criticality::Critical
            {
                continue;
            }
            for link in &model.communication_links {
                if link.target_id != asset.id {
                    continue;
                }
                if link.authentication != Authentication::None {
                    continue;
                }
                if link.data_assets_transferred().next().is_none() {
                    continue;
                }
                if is_across_trust_boundary_network_only(model, link) {
                    risks.push(self.create_risk(model, asset, link));
                }
            }
        }
        Ok(RuleOutput::from_risks(risks))
    }
}
