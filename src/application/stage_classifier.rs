// Stage classifier - Map proposal stage labels to funnel buckets
use crate::domain::funnel::Stage;
use serde::Deserialize;

/// What to do with a label that matches keywords of several stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiMatchPolicy {
    /// Count the label in every stage it matches.
    Duplicate,
    /// Count the label only in the stage of the first matching rule.
    #[default]
    FirstMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StageRule {
    pub stage: Stage,
    pub keyword: String,
}

impl StageRule {
    pub fn new(stage: Stage, keyword: &str) -> Self {
        Self {
            stage,
            keyword: keyword.to_string(),
        }
    }

    /// Furthest stage first, English labels alongside the Ploomes
    /// Portuguese vocabulary.
    pub fn defaults() -> Vec<StageRule> {
        vec![
            StageRule::new(Stage::Negotiation, "Negotiation"),
            StageRule::new(Stage::Negotiation, "Negociação"),
            StageRule::new(Stage::Proposal, "Proposal"),
            StageRule::new(Stage::Proposal, "Proposta"),
            StageRule::new(Stage::Scheduled, "Scheduled"),
            StageRule::new(Stage::Scheduled, "Agendados"),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct StageClassifier {
    rules: Vec<StageRule>,
    policy: MultiMatchPolicy,
}

impl Default for StageClassifier {
    fn default() -> Self {
        Self::new(StageRule::defaults(), MultiMatchPolicy::default())
    }
}

impl StageClassifier {
    pub fn new(rules: Vec<StageRule>, policy: MultiMatchPolicy) -> Self {
        let rules = rules
            .into_iter()
            .filter(|rule| {
                let usable = rule.stage != Stage::Sale && !rule.keyword.is_empty();
                if !usable {
                    tracing::warn!("Ignoring stage rule {:?} -> '{}'", rule.stage, rule.keyword);
                }
                usable
            })
            .collect();

        Self { rules, policy }
    }

    /// Stages a label belongs to, in rule order, each at most once.
    /// Matching is a case-sensitive substring test.
    pub fn classify(&self, label: &str) -> Vec<Stage> {
        let mut matched = Vec::new();

        for rule in &self.rules {
            if !label.contains(rule.keyword.as_str()) || matched.contains(&rule.stage) {
                continue;
            }
            matched.push(rule.stage);
            if self.policy == MultiMatchPolicy::FirstMatch {
                break;
            }
        }

        matched
    }
}
