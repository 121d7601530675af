// Dashboard domain model - Everything the presentation layer renders
use super::funnel::FunnelResult;
use super::period::PeriodOption;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SalespersonFunnel {
    pub name: String,
    pub funnel: FunnelResult,
    pub conversion_rate: f64,
}

impl SalespersonFunnel {
    pub fn new(name: String, funnel: FunnelResult) -> Self {
        let conversion_rate = funnel.conversion_rate();
        Self {
            name,
            funnel,
            conversion_rate,
        }
    }
}

/// Closed sales for the selected period, projected to the display columns.
#[derive(Debug, Clone, Serialize)]
pub struct SalesTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// The SDR sheet is loaded but its lead-to-scheduled conversion is not
/// computed until its layout is reshaped into dated rows.
#[derive(Debug, Clone, Serialize)]
pub struct SdrNotice {
    pub rows_loaded: usize,
    pub processed: bool,
    pub note: &'static str,
}

impl SdrNotice {
    pub fn new(rows_loaded: usize) -> Self {
        Self {
            rows_loaded,
            processed: false,
            note: "SDR conversion needs the sheet's date columns transposed into rows before it can be charted",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub period: PeriodOption,
    pub funnels: Vec<SalespersonFunnel>,
    pub sales: SalesTable,
    pub sdr: SdrNotice,
    pub warnings: Vec<String>,
    pub data_loaded_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn new(
        period: PeriodOption,
        funnels: Vec<SalespersonFunnel>,
        sales: SalesTable,
        sdr: SdrNotice,
        warnings: Vec<String>,
        data_loaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            period,
            funnels,
            sales,
            sdr,
            warnings,
            data_loaded_at,
        }
    }
}
