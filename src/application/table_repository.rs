// Repository trait for spreadsheet table access
use crate::domain::table::Table;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("no proposals source configured for salesperson '{0}'")]
    UnknownSalesperson(String),
}

#[async_trait]
pub trait TableRepository: Send + Sync {
    /// Closed deals shared by every salesperson
    async fn load_sales(&self) -> Result<Table, LoadError>;

    /// Open proposals owned by one salesperson
    async fn load_proposals(&self, salesperson: &str) -> Result<Table, LoadError>;

    /// Raw SDR sheet, not reshaped
    async fn load_sdr(&self) -> Result<Table, LoadError>;
}
