// Period domain model - Month selections offered by the dashboard
use chrono::Datelike;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of<D: Datelike>(date: &D) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Months covered by the combined selection.
const BOTH_MONTHS: [YearMonth; 2] = [YearMonth::new(2025, 12), YearMonth::new(2026, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    Month(YearMonth),
    /// December 2025 and January 2026, nothing else.
    Both,
}

impl TimePeriod {
    pub fn contains(&self, month: YearMonth) -> bool {
        match self {
            TimePeriod::Month(target) => *target == month,
            TimePeriod::Both => BOTH_MONTHS.contains(&month),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown period '{0}', expected one of: 2025-12, 2026-01, both")]
pub struct PeriodParseError(pub String);

/// The period choices exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodSelector {
    #[default]
    December2025,
    January2026,
    Both,
}

impl PeriodSelector {
    pub fn all() -> [PeriodSelector; 3] {
        [
            PeriodSelector::December2025,
            PeriodSelector::January2026,
            PeriodSelector::Both,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PeriodSelector::December2025 => "December 2025",
            PeriodSelector::January2026 => "January 2026",
            PeriodSelector::Both => "Both",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            PeriodSelector::December2025 => "2025-12",
            PeriodSelector::January2026 => "2026-01",
            PeriodSelector::Both => "both",
        }
    }

    pub fn period(&self) -> TimePeriod {
        match self {
            PeriodSelector::December2025 => TimePeriod::Month(YearMonth::new(2025, 12)),
            PeriodSelector::January2026 => TimePeriod::Month(YearMonth::new(2026, 1)),
            PeriodSelector::Both => TimePeriod::Both,
        }
    }

    pub fn option(&self) -> PeriodOption {
        PeriodOption {
            slug: self.slug(),
            label: self.label(),
        }
    }
}

impl FromStr for PeriodSelector {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(wanted) || p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PeriodParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodOption {
    pub slug: &'static str,
    pub label: &'static str,
}
