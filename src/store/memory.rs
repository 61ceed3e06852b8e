use std::collections::BTreeMap;
use std::io::Write;

use crate::core::types::GroupKey;
use crate::store::row::{BestHitRow, RESULT_COLUMNS};

/// Destination for best-hit result rows.
///
/// Rows are keyed by `(collection, query)`; writing a row for an existing key
/// replaces the earlier one.
pub trait ResultStore {
    /// Insert or replace a row, returning the row it replaced
    fn replace(&mut self, row: BestHitRow) -> Option<BestHitRow>;

    /// Insert or replace many rows, returning how many were newly inserted
    fn replace_all(&mut self, rows: impl IntoIterator<Item = BestHitRow>) -> usize {
        let mut inserted = 0;
        for row in rows {
            if self.replace(row).is_none() {
                inserted += 1;
            }
        }
        inserted
    }
}

/// In-memory result table ordered by `(collection, query)`
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: BTreeMap<GroupKey, BestHitRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &GroupKey) -> Option<&BestHitRow> {
        self.rows.get(key)
    }

    /// Rows in key order
    pub fn rows(&self) -> impl Iterator<Item = &BestHitRow> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write all rows as a delimited table with a sorted header line
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_delimited<W: Write>(&self, writer: &mut W, delimiter: char) -> std::io::Result<()> {
        writeln!(writer, "{}", RESULT_COLUMNS.join(&delimiter.to_string()))?;
        for row in self.rows() {
            writeln!(writer, "{}", row.to_delimited(delimiter))?;
        }
        Ok(())
    }
}

impl ResultStore for MemoryStore {
    fn replace(&mut self, row: BestHitRow) -> Option<BestHitRow> {
        self.rows.insert(row.key().clone(), row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AggregateResult, GroupSummary, HitKey, HitSummary};

    fn row(collection: &str, query: &str, hit: &str, n_hsp: usize) -> BestHitRow {
        let summary = HitSummary {
            hit: HitKey::new(hit),
            result: AggregateResult {
                n_hsp,
                ..AggregateResult::default()
            },
        };
        BestHitRow::from(&GroupSummary {
            key: GroupKey::new(collection, query),
            total: summary.clone(),
            path: summary,
        })
    }

    #[test]
    fn test_replace_on_conflict() {
        let mut store = MemoryStore::new();
        assert!(store.replace(row("db", "q1", "1", 1)).is_none());
        let replaced = store.replace(row("db", "q1", "2", 3)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(replaced.get("p_hit").unwrap().to_string(), "1");
        let current = store.get(&GroupKey::new("db", "q1")).unwrap();
        assert_eq!(current.get("p_hit").unwrap().to_string(), "2");
    }

    #[test]
    fn test_replace_all_counts_new_rows() {
        let mut store = MemoryStore::new();
        let inserted = store.replace_all(vec![
            row("db", "q1", "1", 1),
            row("db", "q2", "1", 1),
            row("db", "q1", "3", 1),
        ]);
        assert_eq!(inserted, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_rows_are_ordered_by_key() {
        let mut store = MemoryStore::new();
        store.replace_all(vec![
            row("db2", "q1", "1", 1),
            row("db1", "q2", "1", 1),
            row("db1", "q1", "1", 1),
        ]);
        let keys: Vec<String> = store.rows().map(|r| r.key().to_string()).collect();
        assert_eq!(keys, vec!["db1:q1", "db1:q2", "db2:q1"]);
    }

    #[test]
    fn test_write_delimited() {
        let mut store = MemoryStore::new();
        store.replace(row("db", "q1", "7", 2));

        let mut out = Vec::new();
        store.write_delimited(&mut out, '\t').unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next().unwrap(), RESULT_COLUMNS.join("\t"));
        assert_eq!(
            lines.next().unwrap(),
            "db\t0\t0\t7\t0\t2\t0\t0\tq1\t0\t0\t7\t0\t2\t0\t0"
        );
        assert!(lines.next().is_none());
    }
}
