// Funnel domain model - Cumulative stage counts per salesperson
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Scheduled,
    Proposal,
    Negotiation,
    Sale,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Scheduled,
        Stage::Proposal,
        Stage::Negotiation,
        Stage::Sale,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Scheduled => "Scheduled",
            Stage::Proposal => "Proposal",
            Stage::Negotiation => "Negotiation",
            Stage::Sale => "Sale",
        }
    }
}

/// Open-proposal counts per current stage, before the roll-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageBuckets {
    pub scheduled: u64,
    pub proposal: u64,
    pub negotiation: u64,
}

impl StageBuckets {
    pub fn add(&mut self, stage: Stage, count: u64) {
        match stage {
            Stage::Scheduled => self.scheduled += count,
            Stage::Proposal => self.proposal += count,
            Stage::Negotiation => self.negotiation += count,
            // Sales come from the closed-deals table, never from proposals.
            Stage::Sale => {}
        }
    }
}

/// Four stages in funnel order. Each quantity includes every later stage,
/// so quantities never increase from Scheduled down to Sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunnelResult {
    stages: [(Stage, u64); 4],
}

impl FunnelResult {
    pub fn roll_up(buckets: StageBuckets, sales: u64) -> Self {
        let sale = sales;
        let negotiation = buckets.negotiation + sale;
        let proposal = buckets.proposal + negotiation;
        let scheduled = buckets.scheduled + proposal;

        let quantities = [scheduled, proposal, negotiation, sale];
        Self {
            stages: std::array::from_fn(|i| (Stage::ALL[i], quantities[i])),
        }
    }

    pub fn empty() -> Self {
        Self::roll_up(StageBuckets::default(), 0)
    }

    pub fn stages(&self) -> &[(Stage, u64); 4] {
        &self.stages
    }

    pub fn quantity(&self, stage: Stage) -> u64 {
        self.stages()
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, q)| *q)
            .unwrap_or(0)
    }

    pub fn conversion_rate(&self) -> f64 {
        conversion_rate(self)
    }
}

/// Scheduled-to-sale conversion as a percentage; 0 when nothing was scheduled.
pub fn conversion_rate(funnel: &FunnelResult) -> f64 {
    let scheduled = funnel.quantity(Stage::Scheduled);
    if scheduled == 0 {
        return 0.0;
    }
    funnel.quantity(Stage::Sale) as f64 / scheduled as f64 * 100.0
}

#[derive(Serialize)]
struct StageQuantity {
    stage: Stage,
    label: &'static str,
    quantity: u64,
}

impl Serialize for FunnelResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.stages().iter().map(|(stage, quantity)| StageQuantity {
            stage: *stage,
            label: stage.label(),
            quantity: *quantity,
        }))
    }
}
