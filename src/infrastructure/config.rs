use crate::application::date_filter::DEFAULT_DATE_FORMATS;
use crate::application::stage_classifier::{MultiMatchPolicy, StageRule};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub columns: ColumnSettings,
    #[serde(default)]
    pub funnel: FunnelSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub file: String,
    /// Preamble lines above the header row
    #[serde(default)]
    pub skip_rows: usize,
}

impl SourceConfig {
    fn new(file: &str, skip_rows: usize) -> Self {
        Self {
            file: file.to_string(),
            skip_rows,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SalespersonConfig {
    pub name: String,
    /// Text searched for in the sales table's responsible column; defaults to `name`
    pub match_name: Option<String>,
    pub proposals: SourceConfig,
}

impl SalespersonConfig {
    pub fn match_name(&self) -> &str {
        self.match_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_sales_source")]
    pub sales: SourceConfig,
    #[serde(default = "default_sdr_source")]
    pub sdr: Option<SourceConfig>,
    #[serde(default = "default_salespeople")]
    pub salespeople: Vec<SalespersonConfig>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            sales: default_sales_source(),
            sdr: default_sdr_source(),
            salespeople: default_salespeople(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ColumnSettings {
    pub sales_date: String,
    pub proposal_date: String,
    pub responsible: String,
    pub stage: String,
    pub client: String,
    pub origin: String,
    pub value: String,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            sales_date: "Data".to_string(),
            proposal_date: "Data da criação".to_string(),
            responsible: "Responsável".to_string(),
            stage: "Estágio do Processo".to_string(),
            client: "Nome do Cliente".to_string(),
            origin: "Origem do Processo".to_string(),
            value: "Valor do Proposta origem".to_string(),
        }
    }
}

impl ColumnSettings {
    /// Sales table columns shown on the dashboard, in display order
    pub fn display_columns(&self) -> Vec<String> {
        vec![
            self.client.clone(),
            self.origin.clone(),
            self.sales_date.clone(),
            self.responsible.clone(),
            self.value.clone(),
        ]
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FunnelSettings {
    pub multi_match: MultiMatchPolicy,
    pub stage_rules: Vec<StageRule>,
    pub date_formats: Vec<String>,
}

impl Default for FunnelSettings {
    fn default() -> Self {
        Self {
            multi_match: MultiMatchPolicy::default(),
            stage_rules: StageRule::defaults(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_sales_source() -> SourceConfig {
    SourceConfig::new("DRE_Dezembro Origem Sun Janeiro e Fervereiro.xlsx - Ploomes.csv", 0)
}

fn default_sdr_source() -> Option<SourceConfig> {
    Some(SourceConfig::new("KPI Marketing - 2026.xlsx - SDR.csv", 2))
}

fn default_salespeople() -> Vec<SalespersonConfig> {
    vec![
        SalespersonConfig {
            name: "Paulo Silva".to_string(),
            match_name: None,
            proposals: SourceConfig::new("Propostas em aberto sun Paulo.xlsx - Ploomes.csv", 0),
        },
        SalespersonConfig {
            name: "Claudenia Castro".to_string(),
            match_name: None,
            proposals: SourceConfig::new("Propostas em aberto sun CLau.xlsx - Ploomes.csv", 0),
        },
    ]
}

/// Load `config/dashboard.{toml,yaml,json}` if present, overridden by
/// `FUNNEL__SECTION__KEY` environment variables.
pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from("config/dashboard")
}

pub fn load_config_from(path: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("FUNNEL").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
