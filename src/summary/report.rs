//! Ranked report rendering.
//!
//! # Output
//!
//! ```text
//!  Count  User   Verb  Namespace  Group  Resource  Subresource  Name  URI
//!  -----  ----   ----  ---------  -----  --------  -----------  ----  ---
//!  1,204  alice  get   default    core   pods                   web-0
//! ```
//!
//! Columns in the aggregation set hold the same blank value on every row,
//! so they are left out of the layout entirely.

use crate::audit::types::{Field, Summary};
use crate::config::{AggregationSpec, ReportConfig, SortKey, SortSpec};
use crate::summary::table::FrequencyTable;
use crate::utils::format::format_number;
use std::io::{self, Write};

const COUNT_TITLE: &str = "Count";
const COLUMN_GAP: &str = "  ";

/// One ranked row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub summary: Summary,
    pub count: usize,
}

/// Sorted, possibly truncated rows ready to render.
#[derive(Debug, Clone)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    /// Rows in the table before truncation.
    pub total_rows: usize,
    hidden: AggregationSpec,
}

pub struct Reporter {
    sort: SortSpec,
    limit: Option<usize>,
    hidden: AggregationSpec,
}

impl Reporter {
    pub fn new(sort: SortSpec, limit: Option<usize>, hidden: AggregationSpec) -> Self {
        Self {
            sort,
            limit,
            hidden,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.sort, config.limit, config.aggregation.clone())
    }

    /// Orders `table` and applies the row limit. Rows that tie on the sort
    /// key keep whatever order the table yielded them in.
    pub fn rank(&self, table: &FrequencyTable) -> Report {
        let mut rows: Vec<ReportRow> = table
            .iter()
            .map(|(summary, &count)| ReportRow {
                summary: summary.clone(),
                count,
            })
            .collect();

        match (self.sort.key, self.sort.descending) {
            (SortKey::Count, false) => rows.sort_by_key(|r| r.count),
            (SortKey::Count, true) => rows.sort_by(|a, b| b.count.cmp(&a.count)),
            (SortKey::User, false) => rows.sort_by(|a, b| a.summary.user.cmp(&b.summary.user)),
            (SortKey::User, true) => rows.sort_by(|a, b| b.summary.user.cmp(&a.summary.user)),
        }

        let total_rows = rows.len();
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }

        Report {
            rows,
            total_rows,
            hidden: self.hidden.clone(),
        }
    }
}

impl Report {
    /// Columns shown in the text layout, in report order.
    pub fn visible_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.hidden.contains(*field))
            .collect()
    }

    /// Writes an aligned text table.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let fields = self.visible_fields();
        let counts: Vec<String> = self.rows.iter().map(|r| format_number(r.count)).collect();

        let count_width = counts
            .iter()
            .map(String::len)
            .chain([COUNT_TITLE.len()])
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = fields
            .iter()
            .map(|field| {
                self.rows
                    .iter()
                    .map(|r| r.summary.get(*field).chars().count())
                    .chain([field.title().len()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<&str> = fields.iter().map(|f| f.title()).collect();
        write_line(out, COUNT_TITLE, count_width, &header, &widths)?;

        let dashes: Vec<String> = header.iter().map(|h| "-".repeat(h.len())).collect();
        let dashes: Vec<&str> = dashes.iter().map(String::as_str).collect();
        write_line(out, &"-".repeat(COUNT_TITLE.len()), count_width, &dashes, &widths)?;

        for (row, count) in self.rows.iter().zip(&counts) {
            let values: Vec<&str> = fields.iter().map(|f| row.summary.get(*f)).collect();
            write_line(out, count, count_width, &values, &widths)?;
        }
        Ok(())
    }

    /// Writes the rows as CSV with every column present.
    pub fn write_csv<W: Write>(&self, out: W) -> csv::Result<()> {
        let mut writer = csv::Writer::from_writer(out);

        let mut header = vec!["count"];
        header.extend(Field::ALL.iter().map(|f| f.as_str()));
        writer.write_record(&header)?;

        for row in &self.rows {
            let count = row.count.to_string();
            let mut record = vec![count.as_str()];
            record.extend(row.summary.columns());
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_line<W: Write>(
    out: &mut W,
    count: &str,
    count_width: usize,
    values: &[&str],
    widths: &[usize],
) -> io::Result<()> {
    let mut line = format!("{:>width$}", count, width = count_width);
    for (value, width) in values.iter().zip(widths) {
        line.push_str(COLUMN_GAP);
        let pad = width.saturating_sub(value.chars().count());
        line.push_str(value);
        line.extend(std::iter::repeat(' ').take(pad));
    }
    writeln!(out, "{}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(user: &str, verb: &str, namespace: &str) -> Summary {
        Summary {
            user: user.to_string(),
            verb: verb.to_string(),
            namespace: namespace.to_string(),
            group: "core".to_string(),
            resource: "pods".to_string(),
            ..Summary::default()
        }
    }

    fn table() -> FrequencyTable {
        [
            (summary("carol", "get", "default"), 7),
            (summary("alice", "list", "default"), 1500),
            (summary("bob", "watch", "kube-system"), 42),
        ]
        .into_iter()
        .collect()
    }

    fn reporter(sort: &str, limit: Option<usize>) -> Reporter {
        Reporter::new(sort.parse().unwrap(), limit, AggregationSpec::default())
    }

    fn users(report: &Report) -> Vec<&str> {
        report.rows.iter().map(|r| r.summary.user.as_str()).collect()
    }

    #[test]
    fn test_sort_by_count() {
        assert_eq!(users(&reporter("-count", None).rank(&table())), ["alice", "bob", "carol"]);
        assert_eq!(users(&reporter("count", None).rank(&table())), ["carol", "bob", "alice"]);
    }

    #[test]
    fn test_sort_by_user() {
        assert_eq!(users(&reporter("user", None).rank(&table())), ["alice", "bob", "carol"]);
        assert_eq!(users(&reporter("-user", None).rank(&table())), ["carol", "bob", "alice"]);
    }

    #[test]
    fn test_limit() {
        let report = reporter("-count", Some(2)).rank(&table());
        assert_eq!(users(&report), ["alice", "bob"]);
        assert_eq!(report.total_rows, 3);

        let report = reporter("-count", Some(10)).rank(&table());
        assert_eq!(report.rows.len(), 3);
    }

    #[test]
    fn test_render_layout() {
        let report = reporter("-count", None).rank(&table());
        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Count  User   Verb   Namespace"));
        assert!(lines[0].ends_with("URI"));
        assert!(lines[1].starts_with("-----  ----   ----"));
        assert!(lines[2].starts_with("1,500  alice  list   default"));
        assert!(lines[4].starts_with("    7  carol  get"));
    }

    #[test]
    fn test_render_hides_aggregated_columns() {
        let agg = AggregationSpec::new([Field::Namespace, Field::Uri]);
        let report = Reporter::new(SortSpec::default(), None, agg).rank(&table());

        assert_eq!(
            report.visible_fields(),
            vec![
                Field::User,
                Field::Verb,
                Field::Group,
                Field::Resource,
                Field::Subresource,
                Field::Name
            ]
        );

        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Namespace"));
        assert!(!text.contains("URI"));
        assert!(text.contains("Subresource"));
    }

    #[test]
    fn test_render_empty_table() {
        let report = reporter("-count", None).rank(&FrequencyTable::new());
        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_write_csv() {
        let report = reporter("-count", Some(1)).rank(&table());
        let mut out = Vec::new();
        report.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "count,user,verb,namespace,group,resource,subresource,name,uri\n\
             1500,alice,list,default,core,pods,,,\n"
        );
    }
}
