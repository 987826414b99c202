//! Percentage distribution per distributor
//!
//! Each record's scans are expressed as a share of its distributor's total:
//! build `distributor → sum(scans)`, then divide.
//!
//! A distributor whose scans sum to exactly zero has no defined share. Its
//! rows are kept with a 0% share so the nodes still appear in the diagram.

use super::clean::Record;
use super::layout::distinct_in_order;
use std::collections::HashMap;
use tracing::warn;

/// A record with its share of the distributor's total, in percent
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedRecord {
    pub record: Record,
    pub percentage: f64,
}

/// Sum of scans per distributor state
pub fn distributor_totals(records: &[Record]) -> HashMap<&str, f64> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in records {
        *totals.entry(record.distributor_state.as_str()).or_insert(0.0) += record.scans;
    }
    totals
}

/// Compute every record's percentage of its distributor's total
///
/// Order of the input is preserved.
pub fn aggregate(records: &[Record]) -> Vec<WeightedRecord> {
    let totals = distributor_totals(records);

    // Distributors in first-appearance order
    for distributor in distinct_in_order(records.iter().map(|r| r.distributor_state.as_str())) {
        if totals.get(distributor.as_str()) == Some(&0.0) {
            warn!(
                "Distributor '{}' has zero total scans, its flows are shown as 0%",
                distributor
            );
        }
    }

    records
        .iter()
        .map(|record| {
            let total = totals
                .get(record.distributor_state.as_str())
                .copied()
                .unwrap_or(0.0);
            let percentage = if total == 0.0 {
                0.0
            } else {
                record.scans / total * 100.0
            };
            WeightedRecord {
                record: record.clone(),
                percentage,
            }
        })
        .collect()
}
