//! Row cleaning
//!
//! Turns the string-typed upload into typed `Record`s. Rows without both
//! state names, or whose scans are not a finite number, are dropped and
//! counted in a `CleanReport` instead of failing the run.

use super::colors::FlowKind;
use super::data::{DISTRIBUTOR_COL, FLAG_COL, RETAILER_COL, SCANS_COL};
use super::error::Result;
use polars::prelude::*;
use std::fmt;
use tracing::{debug, warn};

/// One valid upload row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub distributor_state: String,
    pub retailer_state: String,
    pub scans: f64,
    pub flag: FlowKind,
}

impl Record {
    pub fn new(
        distributor_state: impl Into<String>,
        retailer_state: impl Into<String>,
        scans: f64,
        flag: FlowKind,
    ) -> Self {
        Record {
            distributor_state: distributor_state.into(),
            retailer_state: retailer_state.into(),
            scans,
            flag,
        }
    }
}

/// Row counts from a cleaning pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows with a null or blank distributor or retailer state
    pub missing_state: usize,
    /// Rows with both states but a null, unparseable or non-finite scans value
    pub non_numeric_scans: usize,
}

impl CleanReport {
    pub fn dropped(&self) -> usize {
        self.missing_state + self.non_numeric_scans
    }
}

impl fmt::Display for CleanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CleanReport {{ read: {}, kept: {}, missing state: {}, non-numeric scans: {} }}",
            self.rows_read, self.rows_kept, self.missing_state, self.non_numeric_scans
        )
    }
}

/// Output of [`clean`]
#[derive(Debug, Clone, Default)]
pub struct Cleaned {
    pub records: Vec<Record>,
    pub report: CleanReport,
}

/// Parse a raw scans cell; None for null, unparseable, NaN or infinite values
pub fn parse_scans(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Non-blank state name, trimmed
fn state_name(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Clean a loaded upload into valid records, preserving row order
///
/// # Errors
/// Only column access errors (a required column missing or not string-typed),
/// which cannot happen for frames produced by `load_csv`.
pub fn clean(df: &DataFrame) -> Result<Cleaned> {
    let distributors = df.column(DISTRIBUTOR_COL)?.str()?;
    let retailers = df.column(RETAILER_COL)?.str()?;
    let scans = df.column(SCANS_COL)?.str()?;
    let flags = df.column(FLAG_COL)?.str()?;

    let mut report = CleanReport {
        rows_read: df.height(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(df.height());

    let rows = distributors
        .into_iter()
        .zip(retailers)
        .zip(scans.into_iter().zip(flags));

    for ((distributor, retailer), (raw_scans, flag)) in rows {
        let (Some(distributor), Some(retailer)) = (state_name(distributor), state_name(retailer))
        else {
            report.missing_state += 1;
            continue;
        };

        let Some(value) = parse_scans(raw_scans) else {
            debug!(
                "Dropping row {} → {}: non-numeric scans {:?}",
                distributor, retailer, raw_scans
            );
            report.non_numeric_scans += 1;
            continue;
        };

        records.push(Record::new(
            distributor,
            retailer,
            value,
            FlowKind::from_optional_flag(flag),
        ));
    }

    report.rows_kept = records.len();
    if report.dropped() > 0 {
        warn!("Dropped {} malformed row(s): {}", report.dropped(), report);
    } else {
        debug!("{}", report);
    }

    Ok(Cleaned { records, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sankey::data::load_csv;

    fn clean_csv(body: &str) -> Cleaned {
        let csv = format!("distributor_state,retailer_state,scans,flag\n{}", body);
        clean(&load_csv(csv.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn test_parse_scans() {
        assert_eq!(parse_scans(Some("80")), Some(80.0));
        assert_eq!(parse_scans(Some(" 12.5 ")), Some(12.5));
        assert_eq!(parse_scans(Some("1e3")), Some(1000.0));
        assert_eq!(parse_scans(Some("abc")), None);
        assert_eq!(parse_scans(Some("")), None);
        assert_eq!(parse_scans(Some("NaN")), None);
        assert_eq!(parse_scans(Some("inf")), None);
        assert_eq!(parse_scans(None), None);
    }

    #[test]
    fn test_valid_rows_kept_in_order() {
        let cleaned = clean_csv("CA,CA,80,WITHIN SAME STATE\nCA,NV,20,OUTSIDE STATE\n");

        assert_eq!(
            cleaned.records,
            vec![
                Record::new("CA", "CA", 80.0, FlowKind::WithinState),
                Record::new("CA", "NV", 20.0, FlowKind::OutsideState),
            ]
        );
        assert_eq!(cleaned.report.dropped(), 0);
    }

    #[test]
    fn test_non_numeric_scans_dropped() {
        let cleaned = clean_csv("CA,NV,abc,OUTSIDE STATE\nCA,CA,5,WITHIN SAME STATE\n");

        assert_eq!(cleaned.records.len(), 1);
        assert_eq!(cleaned.records[0].retailer_state, "CA");
        assert_eq!(cleaned.report.non_numeric_scans, 1);
        assert_eq!(cleaned.report.missing_state, 0);
    }

    #[test]
    fn test_missing_states_dropped() {
        let cleaned = clean_csv(
            ",NV,10,OUTSIDE STATE\nCA,,10,OUTSIDE STATE\n  ,NV,oops,OUTSIDE STATE\nOR,WA,3,OUTSIDE STATE\n",
        );

        assert_eq!(cleaned.report.rows_read, 4);
        assert_eq!(cleaned.report.missing_state, 3);
        assert_eq!(cleaned.report.non_numeric_scans, 0);
        assert_eq!(cleaned.report.rows_kept, 1);
        assert_eq!(cleaned.records[0].distributor_state, "OR");
    }

    #[test]
    fn test_drop_count_matches_bad_rows() {
        let cleaned = clean_csv(
            "CA,CA,1,WITHIN SAME STATE\n,CA,1,x\nCA,,1,x\nCA,NV,?,x\nNV,NV,2,WITHIN SAME STATE\n",
        );
        assert_eq!(cleaned.report.rows_read - cleaned.records.len(), 3);
        assert_eq!(cleaned.report.dropped(), 3);
    }

    #[test]
    fn test_missing_flag_is_other() {
        let cleaned = clean_csv("CA,NV,10,\n");
        assert_eq!(cleaned.records[0].flag, FlowKind::Other(String::new()));
    }

    #[test]
    fn test_state_names_trimmed() {
        let cleaned = clean_csv(" CA , NV ,10,OUTSIDE STATE\n");
        assert_eq!(cleaned.records[0].distributor_state, "CA");
        assert_eq!(cleaned.records[0].retailer_state, "NV");
    }

    #[test]
    fn test_header_only_upload() {
        let cleaned = clean_csv("");
        assert!(cleaned.records.is_empty());
        assert_eq!(cleaned.report, CleanReport::default());
    }
}
