use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::types::{AggregateMode, GroupKey, GroupSummary, HitSummary};

/// Result table columns, in the sorted order rows are written with
pub const RESULT_COLUMNS: [&str; 16] = [
    "collection",
    "p_align_len",
    "p_gaps",
    "p_hit",
    "p_identity",
    "p_n_hsp",
    "p_positive",
    "p_score",
    "query",
    "t_align_len",
    "t_gaps",
    "t_hit",
    "t_identity",
    "t_n_hsp",
    "t_positive",
    "t_score",
];

const PATH_COLUMNS: [&str; 7] = [
    "p_gaps",
    "p_positive",
    "p_identity",
    "p_score",
    "p_align_len",
    "p_n_hsp",
    "p_hit",
];

const TOTAL_COLUMNS: [&str; 7] = [
    "t_gaps",
    "t_positive",
    "t_identity",
    "t_score",
    "t_align_len",
    "t_n_hsp",
    "t_hit",
];

/// A single cell of a result row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Int(u64),
    Real(f64),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}

/// One output row per (collection, query): path columns (`p_*`) and total
/// columns (`t_*`), each tagged with its own winning hit.
///
/// Cells are kept in a sorted map so column order is fixed and always aligned
/// with the values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestHitRow {
    #[serde(skip)]
    key: GroupKey,
    #[serde(flatten)]
    cells: BTreeMap<&'static str, Value>,
}

impl BestHitRow {
    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Column names in sorted order
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.keys().copied()
    }

    /// Cell values, aligned with [`Self::columns`]
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.cells.values()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    /// Render the row as delimiter-separated values in column order
    pub fn to_delimited(&self, delimiter: char) -> String {
        self.values()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(&delimiter.to_string())
    }
}

impl From<&GroupSummary> for BestHitRow {
    fn from(summary: &GroupSummary) -> Self {
        let mut cells = BTreeMap::new();
        cells.insert("collection", Value::Text(summary.key.collection.clone()));
        cells.insert("query", Value::Text(summary.key.query.clone()));

        for mode in [AggregateMode::Path, AggregateMode::Total] {
            let names = match mode {
                AggregateMode::Path => &PATH_COLUMNS,
                AggregateMode::Total => &TOTAL_COLUMNS,
            };
            insert_summary(&mut cells, names, summary.get(mode));
        }

        Self {
            key: summary.key.clone(),
            cells,
        }
    }
}

fn insert_summary(
    cells: &mut BTreeMap<&'static str, Value>,
    names: &[&'static str; 7],
    summary: &HitSummary,
) {
    let result = &summary.result;
    let values = [
        Value::Real(result.fields.gaps),
        Value::Real(result.fields.positive),
        Value::Real(result.fields.identity),
        Value::Real(result.fields.score),
        Value::Int(result.align_len),
        Value::Int(result.n_hsp as u64),
        Value::Text(summary.hit.to_string()),
    ];
    cells.extend(names.iter().copied().zip(values));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AggregateResult, FieldSums, HitKey};

    fn summary() -> GroupSummary {
        GroupSummary {
            key: GroupKey::new("db", "q1"),
            total: HitSummary {
                hit: HitKey::new("2"),
                result: AggregateResult {
                    fields: FieldSums {
                        gaps: 3.0,
                        positive: 28.0,
                        identity: 25.0,
                        score: 12.0,
                    },
                    align_len: 36,
                    n_hsp: 2,
                },
            },
            path: HitSummary {
                hit: HitKey::new("1"),
                result: AggregateResult {
                    fields: FieldSums {
                        gaps: 2.0,
                        positive: 20.0,
                        identity: 18.0,
                        score: 7.5,
                    },
                    align_len: 26,
                    n_hsp: 1,
                },
            },
        }
    }

    #[test]
    fn test_result_columns_are_sorted() {
        let mut sorted = RESULT_COLUMNS;
        sorted.sort_unstable();
        assert_eq!(sorted, RESULT_COLUMNS);
    }

    #[test]
    fn test_row_columns_match_result_columns() {
        let row = BestHitRow::from(&summary());
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, RESULT_COLUMNS.to_vec());
    }

    #[test]
    fn test_row_values_are_aligned() {
        let row = BestHitRow::from(&summary());
        assert_eq!(row.get("p_hit"), Some(&Value::Text("1".to_string())));
        assert_eq!(row.get("t_hit"), Some(&Value::Text("2".to_string())));
        assert_eq!(row.get("p_align_len"), Some(&Value::Int(26)));
        assert_eq!(row.get("t_n_hsp"), Some(&Value::Int(2)));
        assert_eq!(row.get("p_score"), Some(&Value::Real(7.5)));

        assert_eq!(
            row.to_delimited('\t'),
            "db\t26\t2\t1\t18\t1\t20\t7.5\tq1\t36\t3\t2\t25\t2\t28\t12"
        );
    }

    #[test]
    fn test_row_json_uses_column_names() {
        let row = BestHitRow::from(&summary());
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["collection"], "db");
        assert_eq!(json["p_align_len"], 26);
        assert_eq!(json["t_score"], 12.0);
    }
}
