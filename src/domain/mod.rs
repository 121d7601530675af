// Domain layer - Tabular records, periods and funnel results
pub mod dashboard;
pub mod funnel;
pub mod period;
pub mod table;
