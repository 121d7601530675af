// Table domain model - Rows loaded from spreadsheet exports
use std::collections::HashMap;

/// A single row. Blank cells are not stored, so a missing column and an
/// empty cell both read back as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    cells: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl AsRef<str>) {
        let value = value.as_ref().trim();
        let column = column.into();
        if value.is_empty() {
            self.cells.remove(&column);
        } else {
            self.cells.insert(column, value.to_string());
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// An ordered set of records sharing one header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Build a table from a header and positional rows. Short rows leave the
    /// trailing columns empty; extra cells beyond the header are dropped.
    pub fn from_rows<R, S>(columns: Vec<String>, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            let record = table
                .columns
                .iter()
                .zip(row)
                .fold(Record::new(), |record, (column, value)| {
                    record.with(column, value.as_ref())
                });
            table.push(record);
        }
        table
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Keep the rows matching `keep`, preserving their order and the header.
    pub fn retain_rows(&self, mut keep: impl FnMut(&Record) -> bool) -> Table {
        Table {
            columns: self.columns.clone(),
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Project every row onto `columns`. Unknown columns read as `None`.
    pub fn select(&self, columns: &[String]) -> Vec<Vec<Option<String>>> {
        self.records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).map(str::to_string))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_blank_cells_read_as_missing() {
        let record = Record::new().with("Responsável", "   ").with("Data", "2025-12-01");
        assert_eq!(record.get("Responsável"), None);
        assert_eq!(record.get("Data"), Some("2025-12-01"));
        assert_eq!(record.get("Origem do Processo"), None);
    }

    #[test]
    fn test_from_rows_handles_ragged_rows() {
        let table = Table::from_rows(
            header(&["a", "b", "c"]),
            vec![vec!["1", "2"], vec!["4", "5", "6", "7"]],
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].get("c"), None);
        assert_eq!(table.records()[1].get("c"), Some("6"));
        assert!(table.has_column("b"));
        assert!(!table.has_column("d"));
    }

    #[test]
    fn test_retain_rows_keeps_order_and_header() {
        let table = Table::from_rows(
            header(&["n"]),
            vec![vec!["1"], vec!["2"], vec!["3"], vec!["4"]],
        );
        let even = table.retain_rows(|r| {
            r.get("n")
                .and_then(|v| v.parse::<u32>().ok())
                .is_some_and(|n| n % 2 == 0)
        });

        assert_eq!(even.columns(), table.columns());
        let values: Vec<_> = even.records().iter().filter_map(|r| r.get("n")).collect();
        assert_eq!(values, vec!["2", "4"]);
    }

    #[test]
    fn test_select_projects_unknown_columns_to_none() {
        let table = Table::from_rows(header(&["client", "value"]), vec![vec!["ACME", "10"]]);
        let rows = table.select(&header(&["value", "missing"]));
        assert_eq!(rows, vec![vec![Some("10".to_string()), None]]);
    }
}
