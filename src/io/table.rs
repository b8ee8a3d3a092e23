//! Result tables: CSV writers for sweep output, plus the parse/diff side
//! used by the comparison utility.
//!
//! Floats are written with their shortest round-trip representation, so a
//! table read back and diffed against itself is exactly zero everywhere.

use std::collections::HashMap;

use crate::core::aggregate::SummaryRow;
use crate::core::sweep::GridRow;

pub const RESULTS_HEADER: &str =
    "pass,mode,alpha,k,theta,w_min,w_max,w_max_abs,denom_min_abs,scale_max_abs,a_avg,s_avg";

pub const AGG_HEADER: &str = "mode,alpha,k,theta,\
w_max_abs_mean,w_max_abs_std,denom_min_abs_mean,denom_min_abs_std,\
scale_max_abs_mean,scale_max_abs_std,a_avg_mean,a_avg_std,s_avg_mean,s_avg_std";

/// Metrics the comparator diffs, in report order. Aggregate tables use the
/// same names with a `_mean` suffix.
pub const DIFF_METRICS: [&str; 4] = ["scale_max_abs", "denom_min_abs", "a_avg", "s_avg"];

pub fn results_csv(rows: &[GridRow]) -> String {
    let mut out = String::from(RESULTS_HEADER);
    out.push('\n');
    for row in rows {
        let st = &row.stats;
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{}\n",
            row.pass,
            row.mode,
            row.alpha,
            row.k,
            row.theta,
            st.w_min,
            st.w_max,
            st.w_max_abs,
            st.denom_min_abs,
            st.scale_max_abs,
            st.a_avg,
            st.s_avg
        ));
    }
    out
}

pub fn agg_csv(rows: &[SummaryRow]) -> String {
    let mut out = String::from(AGG_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
            row.mode,
            row.alpha,
            row.k,
            row.theta,
            row.w_max_abs_mean,
            row.w_max_abs_std,
            row.denom_min_abs_mean,
            row.denom_min_abs_std,
            row.scale_max_abs_mean,
            row.scale_max_abs_std,
            row.a_avg_mean,
            row.a_avg_std,
            row.s_avg_mean,
            row.s_avg_std
        ));
    }
    out
}

/// A parsed CSV kept as strings; the comparator matches keys textually and
/// only parses the metric cells it diffs.
#[derive(Clone, Debug)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn col(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Aggregate tables are recognized by their `*_mean` columns.
    pub fn is_aggregated(&self) -> bool {
        self.col("scale_max_abs_mean").is_some() || self.col("denom_min_abs_mean").is_some()
    }
}

pub fn parse_csv(text: &str) -> Result<Table, String> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header_line = lines.next().ok_or_else(|| "empty CSV".to_string())?;
    let header: Vec<String> = header_line.split(',').map(|c| c.trim().to_string()).collect();
    let mut rows = Vec::new();
    for (line_no, line) in lines.enumerate() {
        let cols: Vec<String> = line.split(',').map(|c| c.trim().to_string()).collect();
        if cols.len() != header.len() {
            return Err(format!(
                "line {}: expected {} columns, got {}",
                line_no + 2,
                header.len(),
                cols.len()
            ));
        }
        rows.push(cols);
    }
    Ok(Table { header, rows })
}

/// Mean absolute difference for one metric across matched rows.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricDiff {
    pub name: String,
    /// `None` when no matched row had the metric parseable on both sides.
    pub mean_abs_diff: Option<f64>,
    pub n: usize,
    pub missing: usize,
}

#[derive(Clone, Debug)]
pub struct DiffReport {
    pub rows_a: usize,
    pub rows_b: usize,
    pub matched_keys: usize,
    pub metrics: Vec<MetricDiff>,
}

fn key_columns(aggregated: bool) -> &'static [&'static str] {
    if aggregated {
        &["mode", "alpha", "k", "theta"]
    } else {
        &["pass", "mode", "alpha", "k", "theta"]
    }
}

fn row_key(table: &Table, row: &[String], cols: &[&str]) -> Vec<String> {
    cols.iter()
        .map(|c| {
            table
                .col(c)
                .and_then(|i| row.get(i).cloned())
                .unwrap_or_default()
        })
        .collect()
}

/// Diff two result tables: rows are matched by key (`mode,alpha,k,theta`,
/// plus `pass` for per-pass tables) and each metric reports the mean
/// absolute difference over the key intersection.
///
/// Mixing an aggregated table with a per-pass table is rejected; the two
/// schemas measure different things.
pub fn diff_tables(a: &Table, b: &Table) -> Result<DiffReport, String> {
    if a.rows.is_empty() || b.rows.is_empty() {
        return Err("one or both inputs are empty".to_string());
    }
    let a_agg = a.is_aggregated();
    let b_agg = b.is_aggregated();
    if a_agg != b_agg {
        return Err(
            "one file looks aggregated, the other per-pass; compare like with like".to_string(),
        );
    }

    let keys = key_columns(a_agg);
    let map_a: HashMap<Vec<String>, &Vec<String>> =
        a.rows.iter().map(|r| (row_key(a, r, keys), r)).collect();
    let map_b: HashMap<Vec<String>, &Vec<String>> =
        b.rows.iter().map(|r| (row_key(b, r, keys), r)).collect();

    let mut matched: Vec<&Vec<String>> = map_a.keys().filter(|k| map_b.contains_key(*k)).collect();
    matched.sort();

    let suffix = if a_agg { "_mean" } else { "" };
    let mut metrics = Vec::with_capacity(DIFF_METRICS.len());
    for base in DIFF_METRICS {
        let name = format!("{base}{suffix}");
        let col_a = a.col(&name);
        let col_b = b.col(&name);
        let mut sum = 0.0f64;
        let mut n = 0usize;
        let mut missing = 0usize;
        for key in &matched {
            let va = col_a
                .and_then(|i| map_a[*key].get(i))
                .and_then(|s| s.parse::<f64>().ok());
            let vb = col_b
                .and_then(|i| map_b[*key].get(i))
                .and_then(|s| s.parse::<f64>().ok());
            match (va, vb) {
                (Some(va), Some(vb)) => {
                    sum += (va - vb).abs();
                    n += 1;
                }
                _ => missing += 1,
            }
        }
        metrics.push(MetricDiff {
            name,
            mean_abs_diff: (n > 0).then(|| sum / n as f64),
            n,
            missing,
        });
    }

    Ok(DiffReport {
        rows_a: a.rows.len(),
        rows_b: b.rows.len(),
        matched_keys: matched.len(),
        metrics,
    })
}

impl std::fmt::Display for DiffReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "rows a: {}  rows b: {}  matched keys: {}",
            self.rows_a, self.rows_b, self.matched_keys
        )?;
        writeln!(f, "mean absolute differences across matched rows:")?;
        for m in &self.metrics {
            match m.mean_abs_diff {
                Some(d) => writeln!(f, "  {:24} {:.6}  (n={})", m.name, d, m.n)?,
                None => writeln!(f, "  {:24} n/a (missing in {} rows)", m.name, m.missing)?,
            }
        }
        Ok(())
    }
}
