use crate::model::Model;
use crate::policy::AnalysisPolicy;
use crate::report::{AnalysisReport, RuleFailure, RuleWarning, SeverityCounts};
use crate::rules::{
    MissingAuthenticationRule, MissingBuildInfrastructureRule, MissingHardeningRule, RiskRule,
};
use rayon::prelude::*;

/// The built-in rule set, in no particular order; the report is sorted
/// deterministically regardless.
pub fn builtin_rules() -> Vec<Box<dyn RiskRule>> {
    vec![
        Box::new(MissingBuildInfrastructureRule::new()),
        Box::new(MissingHardeningRule::new()),
        Box::new(MissingAuthenticationRule::new()),
    ]
}

/// Evaluate all enabled rules against the model.
///
/// Rules run independently over the immutable model and may run in
/// parallel; per-rule failures are isolated into the report instead of
/// aborting the run. Risks are stably sorted by synthetic id before any
/// external consumption.
pub fn analyze(
    model: &Model,
    policy: &AnalysisPolicy,
    rules: &[Box<dyn RiskRule>],
) -> AnalysisReport {
    let (enabled, skipped): (Vec<&Box<dyn RiskRule>>, Vec<&Box<dyn RiskRule>>) = rules
        .iter()
        .partition(|rule| !policy.is_skipped(&rule.category().id));

    let results: Vec<_> = enabled
        .par_iter()
        .map(|rule| {
            let category = rule.category();
            let outcome = rule.generate_risks(model);
            (category, outcome)
        })
        .collect();

    let mut report = AnalysisReport {
        rules_executed: enabled.len() as u32,
        rules_skipped: skipped.len() as u32,
        ..AnalysisReport::default()
    };

    for (category, outcome) in results {
        let rule_id = category.id.clone();
        report.categories.push(category);
        match outcome {
            Ok(output) => {
                report.risks.extend(output.risks);
                report
                    .warnings
                    .extend(output.skipped_candidates.into_iter().map(|skipped| {
                        RuleWarning {
                            rule_id: rule_id.clone(),
                            candidate_id: skipped.candidate_id,
                            message: skipped.message,
                        }
                    }));
            }
            Err(err) => report.failures.push(RuleFailure {
                rule_id,
                message: err.to_string(),
            }),
        }
    }

    report.risks.sort_by(|a, b| a.synthetic_id.cmp(&b.synthetic_id));
    report.counts = SeverityCounts::from_risks(&report.risks);
    report
}
