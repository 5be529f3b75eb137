//! Data-driven rules: category metadata plus an expression program.
//!
//! A program arrives as an already-decoded literal tree with three fields:
//! `match` (boolean expression, evaluated once per candidate asset),
//! `likelihood`, `impact`, and optionally `data-breach-probability`. The
//! program is compiled once at construction; a compile failure drops only
//! that rule.

use crate::model::{Model, TechnicalAsset};
use crate::rules::{RiskRule, RuleError, RuleOutput, SkippedCandidate};
use archrisk_script::{Expr, ParseError, Scope, Value};
use archrisk_types::{
    DataBreachProbability, Risk, RiskCategory, RiskExploitationImpact, RiskExploitationLikelihood,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// A scripted-rule source that could not be compiled. The rule is excluded;
/// the rest of the system continues.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error("program is missing required field {field:?}")]
    MissingField { field: &'static str },

    #[error("program field {field:?} is invalid: {message}")]
    InvalidField { field: &'static str, message: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug)]
pub struct ScriptedRiskRule {
    category: RiskCategory,
    supported_tags: Vec<String>,
    match_expr: Expr,
    likelihood: RiskExploitationLikelihood,
    impact: RiskExploitationImpact,
    data_breach_probability: DataBreachProbability,
}

impl ScriptedRiskRule {
    /// Compile a program against its category metadata.
    pub fn new(
        category: RiskCategory,
        supported_tags: Vec<String>,
        program: &JsonValue,
    ) -> Result<ScriptedRiskRule, ProgramError> {
        let match_source = field(program, "match")?;
        let match_expr = Expr::parse_bool(match_source)?;

        let likelihood: RiskExploitationLikelihood = enum_field(program, "likelihood")?;
        let impact: RiskExploitationImpact = enum_field(program, "impact")?;
        let data_breach_probability = match program.get("data-breach-probability") {
            Some(value) => decode("data-breach-probability", value)?,
            None => DataBreachProbability::Improbable,
        };

        Ok(ScriptedRiskRule {
            category,
            supported_tags,
            match_expr,
            likelihood,
            impact,
            data_breach_probability,
        })
    }

    fn create_risk(&self, asset: &TechnicalAsset) -> Risk {
        let title = format!(
            "<b>{}</b> risk at <b>{}</b>",
            self.category.title, asset.title
        );
        let mut risk = Risk::for_asset(
            &self.category.id,
            self.likelihood,
            self.impact,
            title,
            &asset.id,
        );
        risk.data_breach_probability = self.data_breach_probability;
        risk
    }
}

impl RiskRule for ScriptedRiskRule {
    fn category(&self) -> RiskCategory {
        self.category.clone()
    }

    fn supported_tags(&self) -> Vec<String> {
        self.supported_tags.clone()
    }

    fn generate_risks(&self, model: &Model) -> Result<RuleOutput, RuleError> {
        let mut output = RuleOutput::default();
        for asset in model.technical_assets.values() {
            if asset.out_of_scope {
                continue;
            }
            let scope = scope_for_asset(model, asset);
            match self.match_expr.eval_bool(&scope) {
                Ok(true) => output.risks.push(self.create_risk(asset)),
                Ok(false) => {}
                // A failing candidate is skipped; the rule keeps going.
                Err(err) => output.skipped_candidates.push(SkippedCandidate {
                    candidate_id: asset.id.clone(),
                    message: err.to_string(),
                }),
            }
        }
        Ok(output)
    }
}

/// Bindings visible to a program while one asset is under evaluation.
pub fn scope_for_asset(model: &Model, asset: &TechnicalAsset) -> Scope {
    let technologies = asset
        .technologies
        .iter()
        .map(|t| Value::String(kebab(t)))
        .collect::<Vec<Value>>();
    let tags = asset
        .tags
        .iter()
        .map(|t| Value::from(t.as_str()))
        .collect::<Vec<Value>>();
    let data_processed = asset
        .data_assets_processed
        .iter()
        .map(|id| Value::from(id.as_str()))
        .collect::<Vec<Value>>();
    let tags_available = model
        .tags_available
        .iter()
        .map(|t| Value::from(t.as_str()))
        .collect::<Vec<Value>>();

    Scope::new()
        .with("asset.id", Value::from(asset.id.as_str()))
        .with("asset.title", Value::from(asset.title.as_str()))
        .with("asset.type", Value::String(kebab(&asset.asset_type)))
        .with("asset.raa", Value::String(format!("{}", asset.raa)))
        .with(
            "asset.custom_developed_parts",
            Value::Bool(asset.custom_developed_parts),
        )
        .with("asset.confidentiality", Value::String(kebab(&asset.confidentiality)))
        .with("asset.integrity", Value::String(kebab(&asset.integrity)))
        .with("asset.availability", Value::String(kebab(&asset.availability)))
        .with("asset.technologies", Value::List(technologies))
        .with("asset.tags", Value::List(tags))
        .with("asset.data_assets_processed", Value::List(data_processed))
        .with(
            "asset.highest_processed_confidentiality",
            Value::String(kebab(&model.highest_processed_confidentiality(asset))),
        )
        .with(
            "asset.highest_processed_integrity",
            Value::String(kebab(&model.highest_processed_integrity(asset))),
        )
        .with(
            "asset.highest_processed_availability",
            Value::String(kebab(&model.highest_processed_availability(asset))),
        )
        .with("model.tags_available", Value::List(tags_available))
}

/// Kebab-case rendering of an enum, matching its serde serialization.
fn kebab<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(JsonValue::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

fn field<'a>(program: &'a JsonValue, name: &'static str) -> Result<&'a JsonValue, ProgramError> {
    program
        .get(name)
        .ok_or(ProgramError::MissingField { field: name })
}

fn decode<T: DeserializeOwned>(
    name: &'static str,
    value: &JsonValue,
) -> Result<T, ProgramError> {
    serde_json::from_value(value.clone()).map_err(|err| ProgramError::InvalidField {
        field: name,
        message: err.to_string(),
    })
}

fn enum_field<T: DeserializeOwned>(
    program: &JsonValue,
    name: &'static str,
) -> Result<T, ProgramError> {
    decode(name, field(program, name)?)
}
