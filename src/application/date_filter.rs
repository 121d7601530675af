// Date filter - Restrict a table to the rows dated inside a period
use crate::domain::period::{TimePeriod, YearMonth};
use crate::domain::table::Table;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats tried in order when a cell is not RFC 3339.
pub const DEFAULT_DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect())
    }
}

impl DateParser {
    pub fn new(formats: Vec<String>) -> Self {
        Self { formats }
    }

    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }

        self.formats.iter().find_map(|format| {
            NaiveDateTime::parse_from_str(raw, format)
                .map(|dt| dt.date())
                .or_else(|_| NaiveDate::parse_from_str(raw, format))
                .ok()
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DateFilter {
    parser: DateParser,
}

impl DateFilter {
    pub fn new(parser: DateParser) -> Self {
        Self { parser }
    }

    /// Rows whose `date_field` falls in `period`, in their original order.
    ///
    /// An empty table, or one without `date_field`, comes back unchanged.
    /// Rows with a missing or unparseable date never match.
    pub fn filter(&self, records: &Table, date_field: &str, period: TimePeriod) -> Table {
        if records.is_empty() || !records.has_column(date_field) {
            tracing::debug!(
                "Skipping date filter on '{}': {} rows, column present: {}",
                date_field,
                records.len(),
                records.has_column(date_field)
            );
            return records.clone();
        }

        let filtered = records.retain_rows(|record| {
            record
                .get(date_field)
                .and_then(|raw| self.parser.parse(raw))
                .is_some_and(|date| period.contains(YearMonth::of(&date)))
        });

        tracing::debug!(
            "Date filter on '{}' kept {} of {} rows for {:?}",
            date_field,
            filtered.len(),
            records.len(),
            period
        );

        filtered
    }
}
