//! Row data and batch evaluation of compiled filters.

use std::sync::Arc;

use serde::Serialize;

use crate::directory::ColumnDirectory;
use crate::filter::CompiledFilter;

/// A row's normalized text.
///
/// Offset 0 holds the whole-row text: the column texts joined by single
/// spaces, in column order. Offsets `1..=N` hold the trimmed text of each
/// filterable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowData {
    fields: Vec<String>,
}

impl RowData {
    /// Builds row data from the raw text of each filterable column.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = cells
            .into_iter()
            .map(|cell| cell.as_ref().trim().to_string())
            .collect();
        let mut fields = Vec::with_capacity(columns.len() + 1);
        fields.push(columns.join(" "));
        fields.extend(columns);
        Self { fields }
    }

    /// Builds row data for `row` of `source`, reading the cells the
    /// directory marks as filterable. Missing cells read as empty.
    pub fn from_source<S: RowSource + ?Sized>(
        directory: &ColumnDirectory,
        source: &S,
        row: usize,
    ) -> Self {
        Self::from_cells(
            directory
                .columns()
                .iter()
                .map(|column| source.cell(row, column.position).unwrap_or("")),
        )
    }

    /// Returns the whole-row text.
    pub fn whole_row(&self) -> &str {
        &self.fields[0]
    }

    /// Returns the text at a row-data offset.
    pub fn get(&self, offset: usize) -> Option<&str> {
        self.fields.get(offset).map(String::as_str)
    }

    /// Returns the number of column fields, excluding the whole-row text.
    pub fn column_count(&self) -> usize {
        self.fields.len() - 1
    }
}

/// An ordered collection of rows whose cells can be read as text.
pub trait RowSource {
    /// Returns the number of rows.
    fn row_count(&self) -> usize;

    /// Returns the raw display text of the cell at `position` in `row`.
    fn cell(&self, row: usize, position: usize) -> Option<&str>;
}

impl<S: AsRef<str>> RowSource for [Vec<S>] {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn cell(&self, row: usize, position: usize) -> Option<&str> {
        self.get(row)?.get(position).map(|cell| AsRef::<str>::as_ref(cell))
    }
}

impl<S: AsRef<str>> RowSource for Vec<Vec<S>> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn cell(&self, row: usize, position: usize) -> Option<&str> {
        self.as_slice().cell(row, position)
    }
}

/// Memoized [`RowData`], one slot per row.
///
/// Entries live until the host invalidates them; the cache cannot tell when
/// a row's underlying content changed.
#[derive(Debug, Default, Clone)]
pub struct RowCache {
    rows: Vec<Option<RowData>>,
}

impl RowCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached data for `row`, building it on first use.
    pub fn get_or_build<S: RowSource + ?Sized>(
        &mut self,
        directory: &ColumnDirectory,
        source: &S,
        row: usize,
    ) -> &RowData {
        if row >= self.rows.len() {
            self.rows.resize(row + 1, None);
        }
        self.rows[row].get_or_insert_with(|| RowData::from_source(directory, source, row))
    }

    /// Forgets the cached data for `row`.
    pub fn invalidate(&mut self, row: usize) {
        if let Some(slot) = self.rows.get_mut(row) {
            *slot = None;
        }
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Returns the number of rows currently cached.
    pub fn cached(&self) -> usize {
        self.rows.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Per-row decisions from applying a filter to a batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Evaluation {
    /// Whether each row, in source order, passed the filter.
    pub decisions: Vec<bool>,
    /// The number of rows that passed.
    pub matched: usize,
}

impl Evaluation {
    /// Returns the number of rows evaluated.
    pub fn total(&self) -> usize {
        self.decisions.len()
    }

    /// Returns the indices of the rows that passed.
    pub fn matched_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.decisions
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
    }
}

/// Applies compiled filters to batches of rows.
///
/// The evaluator owns a [`RowCache`], so evaluating the same rows against
/// successive filters normalizes each row only once.
#[derive(Debug)]
pub struct RowEvaluator {
    directory: Arc<ColumnDirectory>,
    cache: RowCache,
}

impl RowEvaluator {
    /// Creates an evaluator for rows described by `directory`.
    pub fn new(directory: Arc<ColumnDirectory>) -> Self {
        Self {
            directory,
            cache: RowCache::new(),
        }
    }

    /// Evaluates `filter` against every row of `source`.
    pub fn evaluate<S: RowSource + ?Sized>(
        &mut self,
        source: &S,
        filter: &CompiledFilter,
    ) -> Evaluation {
        let total = source.row_count();
        if filter.accepts_all() {
            return Evaluation {
                decisions: vec![true; total],
                matched: total,
            };
        }

        let mut decisions = Vec::with_capacity(total);
        let mut matched = 0;
        for row in 0..total {
            let data = self.cache.get_or_build(&self.directory, source, row);
            let keep = filter.matches(data);
            if keep {
                matched += 1;
            }
            decisions.push(keep);
        }
        tracing::debug!(total, matched, "evaluated filter");
        Evaluation { decisions, matched }
    }

    /// Returns the row cache, e.g. to invalidate edited rows.
    pub fn cache_mut(&mut self) -> &mut RowCache {
        &mut self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterCompiler;

    fn table() -> Vec<Vec<&'static str>> {
        vec![
            vec!["1", " alice ", "30", "x"],
            vec!["2", "bob", "130", "y"],
            vec!["3", "carol", "30"],
        ]
    }

    fn directory() -> Arc<ColumnDirectory> {
        Arc::new(
            ColumnDirectory::builder()
                .skip()
                .indexed_column("name", 1)
                .indexed_column("age", 2)
                .indexed_column("tag", 3)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_row_data_layout() {
        let row = RowData::from_cells([" a ", "b", "  c"]);
        assert_eq!(row.whole_row(), "a b c");
        assert_eq!(row.get(1), Some("a"));
        assert_eq!(row.get(3), Some("c"));
        assert_eq!(row.get(4), None);
        assert_eq!(row.column_count(), 3);
    }

    #[test]
    fn test_row_data_from_source_skips_unfilterable_cells() {
        let rows = table();
        let row = RowData::from_source(&directory(), &rows, 0);
        assert_eq!(row.whole_row(), "alice 30 x");
        assert_eq!(row.get(1), Some("alice"));
    }

    #[test]
    fn test_row_data_missing_cells_are_empty() {
        let rows = table();
        let row = RowData::from_source(&directory(), &rows, 2);
        assert_eq!(row.get(3), Some(""));
        assert_eq!(row.whole_row(), "carol 30 ");
    }

    #[test]
    fn test_cache_builds_once_and_invalidates() {
        let dir = directory();
        let mut rows = table();
        let mut cache = RowCache::new();

        assert_eq!(cache.get_or_build(&dir, &rows, 1).get(1), Some("bob"));
        rows[1][1] = "robert";
        assert_eq!(cache.get_or_build(&dir, &rows, 1).get(1), Some("bob"));
        assert_eq!(cache.cached(), 1);

        cache.invalidate(1);
        assert_eq!(cache.get_or_build(&dir, &rows, 1).get(1), Some("robert"));

        cache.clear();
        assert_eq!(cache.cached(), 0);
    }

    #[test]
    fn test_evaluate_counts_matches() {
        let dir = directory();
        let compiler = FilterCompiler::new(Arc::clone(&dir)).unwrap();
        let mut evaluator = RowEvaluator::new(dir);

        let filter = compiler.compile(r#":age "30""#).unwrap();
        let result = evaluator.evaluate(&table(), &filter);
        assert_eq!(result.decisions, vec![true, false, true]);
        assert_eq!(result.matched, 2);
        assert_eq!(result.total(), 3);
        assert_eq!(result.matched_rows().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_evaluate_accept_all() {
        let mut evaluator = RowEvaluator::new(directory());
        let result = evaluator.evaluate(&table(), &CompiledFilter::AcceptAll);
        assert_eq!(result.matched, 3);
        assert!(result.decisions.iter().all(|&d| d));
    }

    #[test]
    fn test_evaluate_empty_batch() {
        let mut evaluator = RowEvaluator::new(directory());
        let rows: Vec<Vec<String>> = Vec::new();
        let result = evaluator.evaluate(&rows, &CompiledFilter::AcceptAll);
        assert_eq!(result, Evaluation::default());
    }
}
