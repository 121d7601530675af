// Funnel aggregator - Cumulative Scheduled -> Proposal -> Negotiation -> Sale funnel
use crate::application::stage_classifier::StageClassifier;
use crate::domain::funnel::{FunnelResult, StageBuckets};
use crate::domain::table::Table;
use std::collections::BTreeMap;

pub const DEFAULT_RESPONSIBLE_FIELD: &str = "Responsável";
pub const DEFAULT_STAGE_FIELD: &str = "Estágio do Processo";

#[derive(Debug, Clone)]
pub struct FunnelAggregator {
    classifier: StageClassifier,
    responsible_field: String,
    stage_field: String,
}

impl Default for FunnelAggregator {
    fn default() -> Self {
        Self::new(
            StageClassifier::default(),
            DEFAULT_RESPONSIBLE_FIELD.to_string(),
            DEFAULT_STAGE_FIELD.to_string(),
        )
    }
}

impl FunnelAggregator {
    pub fn new(classifier: StageClassifier, responsible_field: String, stage_field: String) -> Self {
        Self {
            classifier,
            responsible_field,
            stage_field,
        }
    }

    /// Build the cumulative funnel for one salesperson.
    ///
    /// `proposals` is that salesperson's open pipeline; `sales` is the shared
    /// closed-deals table, attributed by a case-insensitive substring match
    /// on the responsible-party column. Missing columns and empty tables
    /// count as zero.
    pub fn compute_funnel(&self, salesperson_name: &str, proposals: &Table, sales: &Table) -> FunnelResult {
        if proposals.is_empty() && sales.is_empty() {
            return FunnelResult::empty();
        }

        let sale_count = self.count_sales(salesperson_name, sales);
        let buckets = self.stage_buckets(proposals);

        tracing::debug!(
            "Funnel buckets for {}: scheduled={} proposal={} negotiation={} sales={}",
            salesperson_name,
            buckets.scheduled,
            buckets.proposal,
            buckets.negotiation,
            sale_count
        );

        FunnelResult::roll_up(buckets, sale_count)
    }

    fn count_sales(&self, salesperson_name: &str, sales: &Table) -> u64 {
        if sales.is_empty() || !sales.has_column(&self.responsible_field) {
            return 0;
        }

        let needle = salesperson_name.to_lowercase();
        sales
            .records()
            .iter()
            .filter_map(|r| r.get(&self.responsible_field))
            .filter(|responsible| responsible.to_lowercase().contains(&needle))
            .count() as u64
    }

    fn stage_buckets(&self, proposals: &Table) -> StageBuckets {
        let mut buckets = StageBuckets::default();
        if proposals.is_empty() || !proposals.has_column(&self.stage_field) {
            return buckets;
        }

        let mut label_counts: BTreeMap<&str, u64> = BTreeMap::new();
        for label in proposals.records().iter().filter_map(|r| r.get(&self.stage_field)) {
            *label_counts.entry(label).or_insert(0) += 1;
        }

        for (label, count) in label_counts {
            for stage in self.classifier.classify(label) {
                buckets.add(stage, count);
            }
        }

        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stage_classifier::{MultiMatchPolicy, StageRule};
    use crate::domain::funnel::Stage;

    fn sales_table(responsibles: &[&str]) -> Table {
        Table::from_rows(
            vec!["Nome do Cliente".to_string(), DEFAULT_RESPONSIBLE_FIELD.to_string()],
            responsibles.iter().map(|r| vec!["Cliente", *r]),
        )
    }

    fn proposals_table(stages: &[&str]) -> Table {
        Table::from_rows(
            vec![DEFAULT_STAGE_FIELD.to_string()],
            stages.iter().map(|s| vec![*s]),
        )
    }

    fn quantities(funnel: &FunnelResult) -> Vec<u64> {
        funnel.stages().iter().map(|(_, q)| *q).collect()
    }

    #[test]
    fn test_empty_inputs_give_zero_funnel() {
        let funnel = FunnelAggregator::default().compute_funnel("Paulo Silva", &Table::default(), &Table::default());
        assert_eq!(
            funnel.stages(),
            &[
                (Stage::Scheduled, 0),
                (Stage::Proposal, 0),
                (Stage::Negotiation, 0),
                (Stage::Sale, 0),
            ]
        );
    }

    #[test]
    fn test_cumulative_funnel_for_salesperson() {
        let sales = sales_table(&[
            "Paulo Silva Jr",
            "Claudenia Castro",
            "PAULO SILVA JR",
            "Claudenia Castro",
            "paulo silva jr",
        ]);
        let proposals = proposals_table(&[
            "Negotiation - Final",
            "Proposal Sent",
            "Scheduled Call",
            "Scheduled Call",
        ]);

        let funnel = FunnelAggregator::default().compute_funnel("Paulo Silva", &proposals, &sales);

        assert_eq!(quantities(&funnel), vec![7, 5, 4, 3]);
    }

    #[test]
    fn test_other_salesperson_shares_sales_table() {
        let sales = sales_table(&["Paulo Silva Jr", "Claudenia Castro", "Claudenia Castro"]);
        let funnel = FunnelAggregator::default().compute_funnel("claudenia castro", &Table::default(), &sales);
        assert_eq!(quantities(&funnel), vec![2, 2, 2, 2]);
    }

    #[test]
    fn test_missing_responsible_values_never_match() {
        let mut sales = sales_table(&["Paulo Silva"]);
        sales.push(crate::domain::table::Record::new().with("Nome do Cliente", "Sem dono"));

        let funnel = FunnelAggregator::default().compute_funnel("", &Table::default(), &sales);
        assert_eq!(funnel.quantity(Stage::Sale), 1);
    }

    #[test]
    fn test_missing_columns_degrade_to_zero() {
        let sales = Table::from_rows(vec!["Vendedor".to_string()], vec![vec!["Paulo Silva"]]);
        let proposals = Table::from_rows(vec!["Status".to_string()], vec![vec!["Proposal Sent"]]);

        let funnel = FunnelAggregator::default().compute_funnel("Paulo Silva", &proposals, &sales);
        assert_eq!(funnel, FunnelResult::empty());
    }

    #[test]
    fn test_unclassified_and_blank_stages_are_ignored() {
        let mut proposals = proposals_table(&["Lost", "Proposal Sent"]);
        proposals.push(crate::domain::table::Record::new());

        let funnel = FunnelAggregator::default().compute_funnel("x", &proposals, &Table::default());
        assert_eq!(quantities(&funnel), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_multi_match_policy_controls_double_counting() {
        let proposals = proposals_table(&["Proposal Scheduled", "Proposal Scheduled"]);

        let first = FunnelAggregator::default().compute_funnel("x", &proposals, &Table::default());
        assert_eq!(quantities(&first), vec![2, 2, 0, 0]);

        let duplicate = FunnelAggregator::new(
            StageClassifier::new(StageRule::defaults(), MultiMatchPolicy::Duplicate),
            DEFAULT_RESPONSIBLE_FIELD.to_string(),
            DEFAULT_STAGE_FIELD.to_string(),
        )
        .compute_funnel("x", &proposals, &Table::default());
        assert_eq!(quantities(&duplicate), vec![4, 2, 0, 0]);
    }

    #[test]
    fn test_compute_funnel_is_repeatable() {
        let sales = sales_table(&["Paulo Silva", "Paulo Silva"]);
        let proposals = proposals_table(&["Negotiation", "Scheduled"]);
        let aggregator = FunnelAggregator::default();

        assert_eq!(
            aggregator.compute_funnel("Paulo", &proposals, &sales),
            aggregator.compute_funnel("Paulo", &proposals, &sales)
        );
    }
}
