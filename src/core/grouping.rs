use std::collections::HashMap;

use crate::core::error::BestHitError;
use crate::core::segment::Segment;
use crate::core::types::{GroupKey, HitKey};

/// Column order of a flat segment row
pub const ROW_COLUMNS: [&str; 12] = [
    "collection",
    "query",
    "hit",
    "hsp",
    "query_start",
    "query_end",
    "hit_start",
    "hit_end",
    "gaps",
    "positive",
    "identity",
    "score",
];

/// One flat row as handed over by the store, before any numeric conversion.
///
/// Cells are positional (see [`ROW_COLUMNS`]); `None` marks an absent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<Option<String>>,
}

impl RawRow {
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    /// Build a row from string cells; empty strings become absent values.
    pub fn from_strs(cells: &[&str]) -> Self {
        Self {
            cells: cells
                .iter()
                .map(|c| {
                    let c = c.trim();
                    (!c.is_empty()).then(|| c.to_string())
                })
                .collect(),
        }
    }

    fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.as_deref())
    }
}

/// All segments of one (collection, query) group, partitioned by hit.
///
/// Hits keep the order in which they first appeared; segments keep arrival
/// order within their hit.
#[derive(Debug, Clone)]
pub struct HitGroup {
    pub key: GroupKey,
    hits: Vec<(HitKey, Vec<Segment>)>,
    hit_to_index: HashMap<HitKey, usize>,
}

impl HitGroup {
    fn new(key: GroupKey) -> Self {
        Self {
            key,
            hits: Vec::new(),
            hit_to_index: HashMap::new(),
        }
    }

    fn push(&mut self, hit: HitKey, segment: Segment) {
        if let Some(&idx) = self.hit_to_index.get(&hit) {
            self.hits[idx].1.push(segment);
        } else {
            self.hit_to_index.insert(hit.clone(), self.hits.len());
            self.hits.push((hit, vec![segment]));
        }
    }

    /// Candidate hits in arrival order
    pub fn hits(&self) -> impl Iterator<Item = (&HitKey, &[Segment])> {
        self.hits.iter().map(|(h, s)| (h, s.as_slice()))
    }

    pub fn segments(&self, hit: &HitKey) -> Option<&[Segment]> {
        self.hit_to_index
            .get(hit)
            .map(|&idx| self.hits[idx].1.as_slice())
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Segments grouped by (collection, query) and then by hit
#[derive(Debug, Clone, Default)]
pub struct GroupedHits {
    groups: Vec<HitGroup>,
    key_to_index: HashMap<GroupKey, usize>,
}

impl GroupedHits {
    /// Group flat rows in a single pass.
    ///
    /// # Errors
    ///
    /// Returns `BestHitError::MalformedRow` if any key cell is absent or any numeric
    /// cell is absent or not a number, and `BestHitError::DegenerateInterval` if a
    /// row's query interval is inverted, starts at 0 or is out of range.
    pub fn from_rows(rows: impl IntoIterator<Item = RawRow>) -> Result<Self, BestHitError> {
        let mut grouped = Self::default();
        for (i, row) in rows.into_iter().enumerate() {
            let (key, hit, segment) = parse_row(&row, i + 1)?;
            grouped.push(key, hit, segment);
        }
        Ok(grouped)
    }

    /// Group already-typed segments.
    ///
    /// # Errors
    ///
    /// Returns `BestHitError::DegenerateInterval` if a segment has an inverted
    /// query interval.
    pub fn from_segments(
        segments: impl IntoIterator<Item = (GroupKey, HitKey, Segment)>,
    ) -> Result<Self, BestHitError> {
        let mut grouped = Self::default();
        for (key, hit, segment) in segments {
            segment.validate()?;
            grouped.push(key, hit, segment);
        }
        Ok(grouped)
    }

    fn push(&mut self, key: GroupKey, hit: HitKey, segment: Segment) {
        let idx = match self.key_to_index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.key_to_index.insert(key.clone(), idx);
                self.groups.push(HitGroup::new(key));
                idx
            }
        };
        self.groups[idx].push(hit, segment);
    }

    /// Groups in arrival order
    pub fn groups(&self) -> &[HitGroup] {
        &self.groups
    }

    pub fn get(&self, key: &GroupKey) -> Option<&HitGroup> {
        self.key_to_index.get(key).map(|&idx| &self.groups[idx])
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of segments across all groups
    pub fn segment_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(HitGroup::hits)
            .map(|(_, segments)| segments.len())
            .sum()
    }
}

fn parse_row(row: &RawRow, row_num: usize) -> Result<(GroupKey, HitKey, Segment), BestHitError> {
    let text = |column: usize| -> Result<String, BestHitError> {
        row.cell(column)
            .map(str::to_string)
            .ok_or_else(|| malformed(row, row_num, column))
    };
    let int = |column: usize| -> Result<u64, BestHitError> {
        row.cell(column)
            .and_then(|c| c.parse::<u64>().ok())
            .ok_or_else(|| malformed(row, row_num, column))
    };

    let key = GroupKey::new(text(0)?, text(1)?);
    let hit = HitKey::new(text(2)?);

    // Struct fields are evaluated in column order, so the first bad cell is reported
    let segment = Segment {
        hsp_index: int(3)?,
        query_start: int(4)?,
        query_end: int(5)?,
        hit_start: int(6)?,
        hit_end: int(7)?,
        gaps: int(8)?,
        positive: int(9)?,
        identity: int(10)?,
        score: row
            .cell(11)
            .and_then(|c| c.parse::<f64>().ok())
            .filter(|s| s.is_finite() && *s >= 0.0)
            .ok_or_else(|| malformed(row, row_num, 11))?,
    };
    segment.validate()?;

    Ok((key, hit, segment))
}

fn malformed(row: &RawRow, row_num: usize, column: usize) -> BestHitError {
    BestHitError::MalformedRow {
        row: row_num,
        column: ROW_COLUMNS[column],
        value: row.cell(column).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        RawRow::from_strs(cells)
    }

    #[test]
    fn test_groups_preserve_arrival_order() {
        let rows = vec![
            row(&["db1", "q1", "3", "1", "1", "10", "1", "10", "0", "9", "8", "20.5"]),
            row(&["db1", "q1", "1", "1", "5", "50", "5", "50", "1", "40", "38", "80"]),
            row(&["db2", "q1", "1", "1", "1", "10", "1", "10", "0", "9", "8", "20"]),
            row(&["db1", "q1", "3", "2", "30", "60", "30", "60", "0", "25", "20", "40"]),
        ];

        let grouped = GroupedHits::from_rows(rows).unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.segment_count(), 4);

        let first = &grouped.groups()[0];
        assert_eq!(first.key, GroupKey::new("db1", "q1"));
        let hits: Vec<&str> = first.hits().map(|(h, _)| h.as_str()).collect();
        assert_eq!(hits, vec!["3", "1"]);

        let segments = first.segments(&HitKey::new("3")).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].hsp_index, 1);
        assert_eq!(segments[1].hsp_index, 2);

        assert_eq!(grouped.groups()[1].key, GroupKey::new("db2", "q1"));
    }

    #[test]
    fn test_non_numeric_field_is_reported() {
        let rows = vec![
            row(&["db1", "q1", "1", "1", "1", "10", "1", "10", "0", "9", "8", "20"]),
            row(&["db1", "q1", "1", "2", "abc", "10", "1", "10", "0", "9", "8", "20"]),
        ];

        let err = GroupedHits::from_rows(rows).unwrap_err();
        assert_eq!(
            err,
            BestHitError::MalformedRow {
                row: 2,
                column: "query_start",
                value: Some("abc".to_string()),
            }
        );
    }

    #[test]
    fn test_absent_field_is_reported() {
        let rows = vec![row(&["db1", "q1", "1", "1", "1", "10", "1", "10", "", "9", "8", "20"])];
        let err = GroupedHits::from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            BestHitError::MalformedRow {
                row: 1,
                column: "gaps",
                value: None,
            }
        ));

        // Short row: trailing cells missing entirely
        let rows = vec![row(&["db1", "q1", "1", "1", "1", "10"])];
        let err = GroupedHits::from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            BestHitError::MalformedRow {
                column: "hit_start",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_or_nan_score_is_malformed() {
        for bad in ["-1.5", "NaN", "inf"] {
            let rows = vec![row(&["db1", "q1", "1", "1", "1", "10", "1", "10", "0", "9", "8", bad])];
            let err = GroupedHits::from_rows(rows).unwrap_err();
            assert!(
                matches!(err, BestHitError::MalformedRow { column: "score", .. }),
                "score {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_inverted_interval_is_degenerate() {
        let rows = vec![row(&["db1", "q1", "1", "4", "30", "10", "1", "10", "0", "9", "8", "20"])];
        let err = GroupedHits::from_rows(rows).unwrap_err();
        assert_eq!(
            err,
            BestHitError::DegenerateInterval {
                hsp: 4,
                query_start: 30,
                query_end: 10,
            }
        );
    }

    #[test]
    fn test_unbounded_interval_is_degenerate() {
        let rows = vec![row(&[
            "db1",
            "q1",
            "1",
            "1",
            "0",
            "18446744073709551615",
            "1",
            "10",
            "0",
            "9",
            "8",
            "20",
        ])];
        let err = GroupedHits::from_rows(rows).unwrap_err();
        assert_eq!(
            err,
            BestHitError::DegenerateInterval {
                hsp: 1,
                query_start: 0,
                query_end: u64::MAX,
            }
        );

        let key = GroupKey::new("db1", "q1");
        let from_segments = GroupedHits::from_segments(vec![(
            key,
            HitKey::new("1"),
            Segment::new(1, 1, u64::MAX, 20.0),
        )]);
        assert!(matches!(
            from_segments,
            Err(BestHitError::DegenerateInterval { .. })
        ));
    }

    #[test]
    fn test_from_segments() {
        let key = GroupKey::new("db", "q");
        let grouped = GroupedHits::from_segments(vec![
            (key.clone(), HitKey::new("a"), Segment::new(1, 1, 10, 1.0)),
            (key.clone(), HitKey::new("b"), Segment::new(1, 1, 10, 2.0)),
            (key.clone(), HitKey::new("a"), Segment::new(2, 20, 30, 3.0)),
        ])
        .unwrap();

        let group = grouped.get(&key).unwrap();
        assert_eq!(group.hit_count(), 2);
        assert_eq!(group.segments(&HitKey::new("a")).unwrap().len(), 2);
        assert!(grouped.get(&GroupKey::new("db", "other")).is_none());
    }
}
