//! Collapse-and-resum over an existing frequency table.
//!
//! Rows matching the ignore spec are dropped first, judged on their
//! original values. The remaining rows have the aggregated columns cleared
//! and are summed into a new table. The input table is never modified, so
//! one cached base can be re-aggregated any number of ways.

use crate::config::{AggregationSpec, IgnoreSpec, ReportConfig};
use crate::summary::table::FrequencyTable;
use tracing::debug;

pub struct Aggregator {
    aggregation: AggregationSpec,
    ignore: IgnoreSpec,
}

impl Aggregator {
    pub fn new(aggregation: AggregationSpec, ignore: IgnoreSpec) -> Self {
        Self {
            aggregation,
            ignore,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.aggregation.clone(), config.ignore.clone())
    }

    /// True when applying this aggregator would return an equal table.
    pub fn is_identity(&self) -> bool {
        self.aggregation.is_empty() && self.ignore.is_empty()
    }

    pub fn apply(&self, table: &FrequencyTable) -> FrequencyTable {
        let mut out = FrequencyTable::new();
        let mut dropped = 0;

        for (summary, &count) in table {
            if self.ignore.matches(summary) {
                dropped += count;
                continue;
            }
            out.add(self.aggregation.apply(summary), count);
        }

        debug!(
            input_rows = table.len(),
            output_rows = out.len(),
            ignored_events = dropped,
            "Aggregated summary table"
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::types::{Field, Summary};

    fn summary(user: &str, namespace: &str, verb: &str) -> Summary {
        Summary {
            user: user.to_string(),
            namespace: namespace.to_string(),
            verb: verb.to_string(),
            resource: "pods".to_string(),
            ..Summary::default()
        }
    }

    fn base_table() -> FrequencyTable {
        [
            (summary("alice", "default", "get"), 3),
            (summary("alice", "kube-system", "get"), 2),
            (summary("bob", "default", "list"), 4),
            (summary("kubelet", "default", "watch"), 10),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_aggregate_namespace() {
        let table: FrequencyTable = [
            (summary("alice", "default", "get"), 3),
            (summary("alice", "kube-system", "get"), 2),
        ]
        .into_iter()
        .collect();

        let agg = Aggregator::new(AggregationSpec::new([Field::Namespace]), IgnoreSpec::default());
        let out = agg.apply(&table);

        assert_eq!(out.len(), 1);
        assert_eq!(out.get(&summary("alice", "", "get")), 5);
    }

    #[test]
    fn test_input_not_mutated() {
        let table = base_table();
        let before = table.clone();
        let agg = Aggregator::new(AggregationSpec::new([Field::User]), IgnoreSpec::default());
        let _ = agg.apply(&table);
        assert_eq!(table, before);
    }

    #[test]
    fn test_aggregation_idempotent() {
        let agg = Aggregator::new(
            AggregationSpec::new([Field::Namespace, Field::Verb]),
            IgnoreSpec::default(),
        );
        let once = agg.apply(&base_table());
        let twice = agg.apply(&once);
        assert_eq!(once, twice);
        assert_eq!(once.total(), base_table().total());
    }

    #[test]
    fn test_ignore_drops_rows() {
        let agg = Aggregator::new(
            AggregationSpec::default(),
            IgnoreSpec::new([(Field::User, "alice".to_string())]),
        );
        let out = agg.apply(&base_table());

        assert_eq!(out.total(), 14);
        assert!(out.iter().all(|(s, _)| s.user != "alice"));
    }

    #[test]
    fn test_ignore_differs_from_aggregate() {
        // Ignoring discards alice; aggregating on user would fold her rows
        // into a blank-user bucket instead.
        let ignore = Aggregator::new(
            AggregationSpec::new([Field::Namespace]),
            IgnoreSpec::new([(Field::User, "alice".to_string())]),
        );
        let out = ignore.apply(&base_table());
        assert_eq!(out.get(&summary("", "", "get")), 0);
        assert_eq!(out.get(&summary("alice", "", "get")), 0);
        assert_eq!(out.get(&summary("bob", "", "list")), 4);

        let merge = Aggregator::new(
            AggregationSpec::new([Field::User, Field::Namespace]),
            IgnoreSpec::default(),
        );
        let out = merge.apply(&base_table());
        assert_eq!(out.get(&summary("", "", "get")), 5);
    }

    #[test]
    fn test_ignore_judged_before_clearing() {
        // The ignored value is in an aggregated column; the row must still go.
        let agg = Aggregator::new(
            AggregationSpec::new([Field::Namespace]),
            IgnoreSpec::new([(Field::Namespace, "kube-system".to_string())]),
        );
        let out = agg.apply(&base_table());
        assert_eq!(out.get(&summary("alice", "", "get")), 3);
    }

    #[test]
    fn test_disjoint_modes_commute() {
        let ignore_only = Aggregator::new(
            AggregationSpec::default(),
            IgnoreSpec::new([(Field::User, "kubelet".to_string())]),
        );
        let agg_only = Aggregator::new(AggregationSpec::new([Field::Namespace]), IgnoreSpec::default());

        let a = agg_only.apply(&ignore_only.apply(&base_table()));
        let b = ignore_only.apply(&agg_only.apply(&base_table()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_identity() {
        let agg = Aggregator::new(AggregationSpec::default(), IgnoreSpec::default());
        assert!(agg.is_identity());
        assert_eq!(agg.apply(&base_table()), base_table());
    }
}
