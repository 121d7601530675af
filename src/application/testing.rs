// In-memory repository used by service and handler tests
use crate::application::table_repository::{LoadError, TableRepository};
use crate::domain::table::Table;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct InMemoryRepository {
    sales: Table,
    proposals: HashMap<String, Table>,
    sdr: Option<Table>,
    sales_loads: AtomicUsize,
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl InMemoryRepository {
    /// Two salespeople across December 2025 and January 2026; no SDR sheet.
    pub fn sample() -> Self {
        let sales = Table::from_rows(
            columns(&[
                "Nome do Cliente",
                "Origem do Processo",
                "Data",
                "Responsável",
                "Valor do Proposta origem",
            ]),
            vec![
                vec!["Alfa", "Site", "2025-12-02", "Paulo Silva Jr", "1000"],
                vec!["Beta", "Indicação", "2025-12-15", "Paulo Silva Jr", "2500"],
                vec!["Gama", "Site", "2026-01-07", "Paulo Silva Jr", "900"],
                vec!["Delta", "Instagram", "2025-12-20", "Claudenia Castro", "3100"],
                vec!["Épsilon", "Site", "2026-01-28", "Claudenia Castro", "1200"],
                vec!["Zeta", "Site", "sem data", "Claudenia Castro", "800"],
            ],
        );

        let stage_columns = columns(&["Data da criação", "Estágio do Processo"]);
        let paulo = Table::from_rows(
            stage_columns.clone(),
            vec![
                vec!["2025-12-01", "Negotiation - Final"],
                vec!["2025-12-03", "Proposal Sent"],
                vec!["2025-12-09", "Scheduled Call"],
                vec!["2026-01-10", "Scheduled Call"],
            ],
        );
        let claudenia = Table::from_rows(
            stage_columns,
            vec![
                vec!["2025-12-11", "Proposal Sent"],
                vec!["2026-01-05", "Scheduled Call"],
            ],
        );

        let mut proposals = HashMap::new();
        proposals.insert("Paulo Silva".to_string(), paulo);
        proposals.insert("Claudenia Castro".to_string(), claudenia);

        Self {
            sales,
            proposals,
            sdr: None,
            sales_loads: AtomicUsize::new(0),
        }
    }

    pub fn sales_loads(&self) -> usize {
        self.sales_loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TableRepository for InMemoryRepository {
    async fn load_sales(&self) -> Result<Table, LoadError> {
        self.sales_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.sales.clone())
    }

    async fn load_proposals(&self, salesperson: &str) -> Result<Table, LoadError> {
        self.proposals
            .get(salesperson)
            .cloned()
            .ok_or_else(|| LoadError::UnknownSalesperson(salesperson.to_string()))
    }

    async fn load_sdr(&self) -> Result<Table, LoadError> {
        self.sdr.clone().ok_or_else(|| LoadError::NotFound {
            path: PathBuf::from("sdr.csv"),
        })
    }
}
