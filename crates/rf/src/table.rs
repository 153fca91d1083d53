//! Delimited text tables.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use rowfilter_rs::{ColumnDirectory, DirectoryError, RowSource};

/// A table read from delimited text: an optional header line plus rows of
/// cells. Rows may be ragged.
///
/// Every delimiter splits a cell. Quotes carry no meaning, so a CSV field
/// such as `"a,b"` becomes the two cells `"a` and `b"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    delimiter: char,
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Splits `text` into lines and cells. Blank lines are skipped.
    pub fn parse(text: &str, delimiter: char, has_header: bool) -> Self {
        let mut lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split(delimiter).map(str::to_string).collect::<Vec<_>>());

        let header = if has_header { lines.next() } else { None };
        Self {
            delimiter,
            header,
            rows: lines.collect(),
        }
    }

    /// Reads a table from `path`, or from stdin when `path` is `None`.
    pub fn read(path: Option<&Path>, delimiter: char, has_header: bool) -> io::Result<Self> {
        let text = match path {
            Some(path) => fs::read_to_string(path)?,
            None => {
                let mut text = String::new();
                io::stdin().lock().read_to_string(&mut text)?;
                text
            }
        };
        let table = Self::parse(&text, delimiter, has_header);
        tracing::debug!(
            rows = table.rows.len(),
            columns = table.width(),
            "read table"
        );
        Ok(table)
    }

    /// Builds the column directory queries are resolved against.
    ///
    /// Header cells become column names with declared indices 1, 2, ...
    /// Without a header, or for an empty header cell, the column is named
    /// by its index.
    pub fn directory(&self) -> Result<ColumnDirectory, DirectoryError> {
        let names: Vec<String> = match &self.header {
            Some(header) => header
                .iter()
                .enumerate()
                .map(|(i, name)| match name.trim() {
                    "" => (i + 1).to_string(),
                    name => name.to_string(),
                })
                .collect(),
            None => (1..=self.width()).map(|i| i.to_string()).collect(),
        };
        ColumnDirectory::from_names(names)
    }

    /// Returns the header cells, if the table has a header.
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Returns the data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the number of columns: the header width, or the widest row
    /// when there is no header.
    pub fn width(&self) -> usize {
        match &self.header {
            Some(header) => header.len(),
            None => self.rows.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    /// Joins a row's cells back into a line.
    pub fn join(&self, cells: &[String]) -> String {
        let mut buf = [0; 4];
        let delimiter: &str = self.delimiter.encode_utf8(&mut buf);
        cells.join(delimiter)
    }
}

impl RowSource for Table {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, position: usize) -> Option<&str> {
        self.rows.get(row)?.get(position).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE: &str = "name\tage\nalice\t30\n\nbob\t130\r\ncarol\n";

    #[test]
    fn test_parse_with_header() {
        let table = Table::parse(PEOPLE, '\t', true);
        assert_eq!(
            table.header(),
            Some(&["name".to_string(), "age".to_string()][..])
        );
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[1], vec!["bob", "130"]);
        assert_eq!(table.rows()[2], vec!["carol"]);
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_parse_without_header() {
        let table = Table::parse("a,b,c\nd,e\n", ',', false);
        assert!(table.header().is_none());
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.width(), 3);

        let dir = table.directory().unwrap();
        assert_eq!(dir.names().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(dir.offset("3"), Some(3));
    }

    #[test]
    fn test_quotes_do_not_protect_delimiters() {
        let table = Table::parse("name,note\nalice,\"a,b\"\n", ',', true);
        assert_eq!(table.rows()[0], vec!["alice", "\"a", "b\""]);
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_directory_from_header() {
        let table = Table::parse(PEOPLE, '\t', true);
        let dir = table.directory().unwrap();
        assert_eq!(dir.offset("age"), Some(2));
        assert_eq!(dir.offset("2"), Some(2));
    }

    #[test]
    fn test_empty_header_cell_named_by_index() {
        let table = Table::parse("id| |name\n1|x|y\n", '|', true);
        let dir = table.directory().unwrap();
        assert_eq!(dir.names().collect::<Vec<_>>(), vec!["id", "2", "name"]);
    }

    #[test]
    fn test_duplicate_header_is_error() {
        let table = Table::parse("a\ta\n1\t2\n", '\t', true);
        assert!(matches!(
            table.directory(),
            Err(DirectoryError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn test_row_source_missing_cells() {
        let table = Table::parse(PEOPLE, '\t', true);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell(0, 1), Some("30"));
        assert_eq!(table.cell(2, 1), None);
        assert_eq!(table.cell(9, 0), None);
    }

    #[test]
    fn test_join_round_trips_line() {
        let table = Table::parse("a|b\n1|2\n", '|', true);
        assert_eq!(table.join(&table.rows()[0]), "1|2");
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.tsv");
        fs::write(&path, PEOPLE).unwrap();
        let table = Table::read(Some(&path), '\t', true).unwrap();
        assert_eq!(table.rows().len(), 3);
    }

    #[test]
    fn test_read_missing_file() {
        let err = Table::read(Some(Path::new("/nonexistent/rf/table.tsv")), '\t', true);
        assert_eq!(err.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
