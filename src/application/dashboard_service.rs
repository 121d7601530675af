// Dashboard service - Use case for building the sales conversion dashboard
use crate::application::date_filter::{DateFilter, DateParser};
use crate::application::funnel_aggregator::FunnelAggregator;
use crate::application::snapshot_service::{DataSnapshot, SnapshotService};
use crate::application::stage_classifier::StageClassifier;
use crate::domain::dashboard::{Dashboard, SalesTable, SalespersonFunnel, SdrNotice};
use crate::domain::period::{PeriodSelector, TimePeriod};
use crate::domain::table::Table;
use crate::infrastructure::config::{AppConfig, SalespersonConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    snapshots: SnapshotService,
    aggregator: Arc<FunnelAggregator>,
    date_filter: Arc<DateFilter>,
    salespeople: Vec<SalespersonConfig>,
    sales_date_field: String,
    proposal_date_field: String,
    display_columns: Vec<String>,
}

impl DashboardService {
    pub fn new(snapshots: SnapshotService, config: &AppConfig) -> Self {
        let classifier = StageClassifier::new(
            config.funnel.stage_rules.clone(),
            config.funnel.multi_match,
        );
        let aggregator = FunnelAggregator::new(
            classifier,
            config.columns.responsible.clone(),
            config.columns.stage.clone(),
        );

        Self {
            snapshots,
            aggregator: Arc::new(aggregator),
            date_filter: Arc::new(DateFilter::new(DateParser::new(
                config.funnel.date_formats.clone(),
            ))),
            salespeople: config.data.salespeople.clone(),
            sales_date_field: config.columns.sales_date.clone(),
            proposal_date_field: config.columns.proposal_date.clone(),
            display_columns: config.columns.display_columns(),
        }
    }

    pub async fn get_dashboard(&self, selector: PeriodSelector) -> Dashboard {
        let snapshot = self.snapshots.snapshot().await;
        let period = selector.period();
        let sales = self
            .date_filter
            .filter(&snapshot.sales, &self.sales_date_field, period);

        let funnels = self
            .salespeople
            .iter()
            .map(|person| self.salesperson_funnel(person, &snapshot, &sales, period))
            .collect();

        let table = SalesTable {
            columns: self.display_columns.clone(),
            rows: sales.select(&self.display_columns),
        };

        tracing::info!(
            "Built dashboard for {}: {} sales rows, {} funnels",
            selector.label(),
            table.rows.len(),
            self.salespeople.len()
        );

        Dashboard::new(
            selector.option(),
            funnels,
            table,
            SdrNotice::new(snapshot.sdr.len()),
            snapshot.load_errors.clone(),
            snapshot.loaded_at,
        )
    }

    /// Funnel for one configured salesperson, looked up by name ignoring case.
    pub async fn get_salesperson_funnel(
        &self,
        name: &str,
        selector: PeriodSelector,
    ) -> Option<SalespersonFunnel> {
        let wanted = name.trim().to_lowercase();
        let person = self
            .salespeople
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)?;

        let snapshot = self.snapshots.snapshot().await;
        let period = selector.period();
        let sales = self
            .date_filter
            .filter(&snapshot.sales, &self.sales_date_field, period);

        Some(self.salesperson_funnel(person, &snapshot, &sales, period))
    }

    pub async fn refresh(&self) {
        self.snapshots.invalidate().await;
    }

    fn salesperson_funnel(
        &self,
        person: &SalespersonConfig,
        snapshot: &DataSnapshot,
        filtered_sales: &Table,
        period: TimePeriod,
    ) -> SalespersonFunnel {
        let empty = Table::default();
        let proposals = snapshot.proposals_for(&person.name).unwrap_or(&empty);
        let proposals = self
            .date_filter
            .filter(proposals, &self.proposal_date_field, period);

        let funnel = self
            .aggregator
            .compute_funnel(person.match_name(), &proposals, filtered_sales);

        SalespersonFunnel::new(person.name.clone(), funnel)
    }
}
