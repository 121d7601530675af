// Snapshot service - Load every source once and share immutable snapshots
use crate::application::table_repository::{LoadError, TableRepository};
use crate::domain::table::Table;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct DataSnapshot {
    pub sales: Table,
    pub proposals: HashMap<String, Table>,
    pub sdr: Table,
    /// Sources that failed to load and were replaced by empty tables
    pub load_errors: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

impl DataSnapshot {
    pub fn proposals_for(&self, salesperson: &str) -> Option<&Table> {
        self.proposals.get(salesperson)
    }
}

#[derive(Clone)]
pub struct SnapshotService {
    repository: Arc<dyn TableRepository>,
    salespeople: Vec<String>,
    cache: Arc<RwLock<Option<Arc<DataSnapshot>>>>,
}

impl SnapshotService {
    pub fn new(repository: Arc<dyn TableRepository>, salespeople: Vec<String>) -> Self {
        Self {
            repository,
            salespeople,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Cached snapshot, loading it on first use.
    pub async fn snapshot(&self) -> Arc<DataSnapshot> {
        if let Some(snapshot) = self.cache.read().await.as_ref() {
            return snapshot.clone();
        }

        let mut cache = self.cache.write().await;
        // Another request may have loaded it while we waited for the lock
        if let Some(snapshot) = cache.as_ref() {
            return snapshot.clone();
        }

        let snapshot = Arc::new(self.load().await);
        *cache = Some(snapshot.clone());
        snapshot
    }

    /// Drop the cached snapshot so the next request reloads from the repository.
    pub async fn invalidate(&self) {
        self.cache.write().await.take();
        tracing::info!("Data snapshot invalidated");
    }

    async fn load(&self) -> DataSnapshot {
        let mut load_errors = Vec::new();

        let sales = or_empty("sales", self.repository.load_sales().await, &mut load_errors);

        let mut proposals = HashMap::new();
        for salesperson in &self.salespeople {
            let table = or_empty(
                &format!("proposals for {}", salesperson),
                self.repository.load_proposals(salesperson).await,
                &mut load_errors,
            );
            proposals.insert(salesperson.clone(), table);
        }

        let sdr = or_empty("SDR", self.repository.load_sdr().await, &mut load_errors);

        tracing::info!(
            "Loaded snapshot: {} sales, {} proposal tables, {} SDR rows, {} errors",
            sales.len(),
            proposals.len(),
            sdr.len(),
            load_errors.len()
        );

        DataSnapshot {
            sales,
            proposals,
            sdr,
            load_errors,
            loaded_at: Utc::now(),
        }
    }
}

fn or_empty(source: &str, result: Result<Table, LoadError>, errors: &mut Vec<String>) -> Table {
    match result {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("Error loading {}: {}", source, e);
            errors.push(format!("{}: {}", source, e));
            Table::default()
        }
    }
}
