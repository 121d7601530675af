// CSV repository implementation for Ploomes / KPI spreadsheet exports
use crate::application::table_repository::{LoadError, TableRepository};
use crate::domain::table::Table;
use crate::infrastructure::config::{DataSettings, SourceConfig};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CsvTableRepository {
    data_dir: PathBuf,
    sales: SourceConfig,
    proposals: HashMap<String, SourceConfig>,
    sdr: Option<SourceConfig>,
}

impl CsvTableRepository {
    pub fn new(settings: &DataSettings) -> Self {
        Self {
            data_dir: settings.dir.clone(),
            sales: settings.sales.clone(),
            proposals: settings
                .salespeople
                .iter()
                .map(|p| (p.name.clone(), p.proposals.clone()))
                .collect(),
            sdr: settings.sdr.clone(),
        }
    }

    async fn read_table(&self, source: &SourceConfig) -> Result<Table, LoadError> {
        let path = self.data_dir.join(&source.file);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound { path });
            }
            Err(e) => return Err(LoadError::Io { path, source: e }),
        };

        let text = decode_utf8(bytes, &path)?;
        let table = parse_csv(&text, source.skip_rows, &path)?;

        tracing::info!(
            "Loaded {} rows and {} columns from {}",
            table.len(),
            table.columns().len(),
            path.display()
        );
        Ok(table)
    }
}

/// Exports must be UTF-8. A Latin-1 file would otherwise load with mangled
/// accented headers and every column lookup would miss.
fn decode_utf8(bytes: Vec<u8>, path: &Path) -> Result<String, LoadError> {
    String::from_utf8(bytes).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        message: format!(
            "file is not valid UTF-8 (invalid byte at offset {}); re-export it as UTF-8",
            e.utf8_error().valid_up_to()
        ),
    })
}

/// Parse CSV text into a table, skipping `skip_rows` preamble lines before
/// the header. Malformed rows are logged and skipped.
pub fn parse_csv(text: &str, skip_rows: usize, path: &Path) -> Result<Table, LoadError> {
    // Strip UTF-8 BOM if present
    let mut rest = text.trim_start_matches('\u{FEFF}');
    for _ in 0..skip_rows {
        rest = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => "",
        };
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rest.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            message: format!("failed to read CSV headers: {}", e),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect::<Vec<_>>()),
            Err(e) => {
                tracing::warn!("Skipping malformed CSV record in {}: {}", path.display(), e);
            }
        }
    }

    Ok(Table::from_rows(headers, rows))
}

#[async_trait]
impl TableRepository for CsvTableRepository {
    async fn load_sales(&self) -> Result<Table, LoadError> {
        self.read_table(&self.sales).await
    }

    async fn load_proposals(&self, salesperson: &str) -> Result<Table, LoadError> {
        let source = self
            .proposals
            .get(salesperson)
            .ok_or_else(|| LoadError::UnknownSalesperson(salesperson.to_string()))?;
        self.read_table(source).await
    }

    async fn load_sdr(&self) -> Result<Table, LoadError> {
        match &self.sdr {
            Some(source) => self.read_table(source).await,
            None => Ok(Table::default()),
        }
    }
}
