use crate::model::{Model, TechnicalAsset, TechnicalAssetType};
use crate::rules::{RiskRule, RuleError, RuleOutput};
use archrisk_types::{
    ids, Confidentiality, Criticality, Risk, RiskCategory, RiskExploitationImpact,
    RiskExploitationLikelihood, RiskFunction, Stride, TechnologyAttribute,
};

/// Flags in-scope assets attractive enough to attackers that explicit
/// hardening is expected, with a reduced threshold for high-value targets.
pub struct MissingHardeningRule {
    raa_limit: u32,
    raa_limit_reduced: u32,
}

impl MissingHardeningRule {
    pub fn new() -> MissingHardeningRule {
        MissingHardeningRule {
            raa_limit: 55,
            raa_limit_reduced: 40,
        }
    }

    fn create_risk(&self, model: &Model, asset: &TechnicalAsset) -> Risk {
        let impact = if model.highest_processed_confidentiality(asset)
            == Confidentiality::StrictlyConfidential
            || model.highest_processed_integrity(asset) == Criticality::MissionCritical
        {
            RiskExploitationImpact::Medium
        } else {
            RiskExploitationImpact::Low
        };
        let title = format!("<b>Missing Hardening</b> risk at <b>{}</b>", asset.title);
        let mut risk = Risk::for_asset(
            ids::RULE_MISSING_HARDENING,
            RiskExploitationLikelihood::Likely,
            impact,
            title,
            &asset.id,
        );
        risk.data_breach_technical_asset_ids = vec![asset.id.clone()];
        risk
    }
}

impl Default for MissingHardeningRule {
    fn default() -> Self {
        MissingHardeningRule::new()
    }
}

impl RiskRule for MissingHardeningRule {
    fn category(&self) -> RiskCategory {
        RiskCategory {
            id: ids::RULE_MISSING_HARDENING.to_string(),
            title: "Missing Hardening".to_string(),
            description: format!(
                "Technical assets with a Relative Attacker Attractiveness (RAA) value of {} % or \
                 higher should be explicitly hardened taking best practices and vendor hardening \
                 guides into account.",
                self.raa_limit
            ),
            impact: "If this risk remains unmitigated, attackers might be able to easier attack \
                high-value targets."
                .to_string(),
            asvs: "V14 - Configuration Verification Requirements".to_string(),
            cheat_sheet:
                "https://cheatsheetseries.owasp.org/cheatsheets/Attack_Surface_Analysis_Cheat_Sheet.html"
                    .to_string(),
            action: "System Hardening".to_string(),
            mitigation: "Try to apply all hardening best practices (like CIS benchmarks, OWASP \
                recommendations, vendor recommendations, DevSec Hardening Framework, DBSAT for \
                Oracle databases, and others)."
                .to_string(),
            check: "Are recommendations from the linked cheat sheet and referenced ASVS chapter \
                applied?"
                .to_string(),
            function: RiskFunction::Operations,
            stride: Stride::Tampering,
            detection_logic: format!(
                "In-scope technical assets with RAA values of {} % or higher. Generally for \
                 high-value targets like data stores, application servers, identity providers and \
                 ERP systems this limit is reduced to {} %",
                self.raa_limit, self.raa_limit_reduced
            ),
            risk_assessment: "The risk rating depends on the sensitivity of the data processed in \
                the technical asset."
                .to_string(),
            false_positives: "Usually no false positives.".to_string(),
            model_failure_possible_reason: false,
            cwe: 16,
        }
    }

    fn supported_tags(&self) -> Vec<String> {
        vec!["tomcat".to_string()]
    }

    fn generate_risks(&self, model: &Model) -> Result<RuleOutput, RuleError> {
        let mut risks = Vec::new();
        for asset in model.technical_assets.values() {
            if asset.out_of_scope {
                continue;
            }
            let reduced_limit_applies = asset.asset_type == TechnicalAssetType::Datastore
                || asset.has_attribute(TechnologyAttribute::IsHighValueTarget);
            if asset.raa >= f64::from(self.raa_limit)
                || (asset.raa >= f64::from(self.raa_limit_reduced) && reduced_limit_applies)
            {
                risks.push(self.create_risk(model, asset));
            }
        }
        Ok(RuleOutput::from_risks(risks))
    }
}
