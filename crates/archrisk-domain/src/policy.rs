use std::collections::BTreeSet;

/// Which rules an analysis run executes.
///
/// Rules are identified purely by the `id` field of their category.
#[derive(Clone, Debug, Default)]
pub struct AnalysisPolicy {
    skip_rules: BTreeSet<String>,
}

impl AnalysisPolicy {
    pub fn new() -> AnalysisPolicy {
        AnalysisPolicy::default()
    }

    pub fn skip(mut self, rule_id: &str) -> AnalysisPolicy {
        self.skip_rules.insert(rule_id.to_string());
        self
    }

    pub fn is_skipped(&self, rule_id: &str) -> bool {
        self.skip_rules.contains(rule_id)
    }
}
