//! Column directory: column names and indices to row-data offsets.
//!
//! The directory is built once per table by the host and is read-only
//! afterwards. Row-data offset 0 is reserved for the whole-row text, so the
//! first filterable column lives at offset 1.

use std::collections::HashMap;

use serde::Serialize;
use strsim::levenshtein;
use thiserror::Error;

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Errors raised while building a [`ColumnDirectory`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// Two columns share a name (or full name).
    #[error("duplicate column name: {name}")]
    DuplicateColumn {
        /// The repeated name.
        name: String,
    },

    /// Two columns declare the same index.
    #[error("duplicate column index: {index}")]
    DuplicateIndex {
        /// The repeated index.
        index: usize,
    },

    /// A column name is empty.
    #[error("column at position {position} has an empty name")]
    EmptyName {
        /// Raw cell position of the column.
        position: usize,
    },
}

/// A filterable column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Short name used in queries (`:name`).
    pub name: String,
    /// Optional longer name, also accepted in queries (`:"full name"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Declared column index, usable in queries as `:3`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Position of the column's cell in a raw row.
    pub position: usize,
    /// Offset of the column's text in [`RowData`](crate::rows::RowData).
    pub offset: usize,
}

/// Read-only mapping between column names, declared indices and row-data
/// offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDirectory {
    columns: Vec<Column>,
    by_name: HashMap<String, usize>,
    by_full_name: HashMap<String, usize>,
    by_index: HashMap<usize, usize>,
}

impl ColumnDirectory {
    /// Starts building a directory.
    pub fn builder() -> DirectoryBuilder {
        DirectoryBuilder::default()
    }

    /// Builds a directory where every raw cell is a filterable column.
    ///
    /// Columns get declared indices 1, 2, 3, ... in order.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on duplicate or empty names.
    pub fn from_names<I, S>(names: I) -> Result<Self, DirectoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .enumerate()
            .fold(Self::builder(), |builder, (i, name)| {
                builder.indexed_column(name, i + 1)
            })
            .build()
    }

    /// Resolves a query key to a column.
    ///
    /// Tries the exact name, then the exact full name, then the key as a
    /// declared column index. Only plain ASCII digits count as an index, so
    /// `+1` or ` 1` resolve to nothing. There is no other fallback.
    pub fn resolve(&self, key: &str) -> Option<&Column> {
        self.by_name
            .get(key)
            .or_else(|| self.by_full_name.get(key))
            .or_else(|| {
                if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                key.parse::<usize>()
                    .ok()
                    .and_then(|index| self.by_index.get(&index))
            })
            .map(|&i| &self.columns[i])
    }

    /// Resolves a query key to its row-data offset.
    pub fn offset(&self, key: &str) -> Option<usize> {
        self.resolve(key).map(|c| c.offset)
    }

    /// Returns the column stored at a row-data offset.
    pub fn by_offset(&self, offset: usize) -> Option<&Column> {
        offset.checked_sub(1).and_then(|i| self.columns.get(i))
    }

    /// Returns all filterable columns in row-data order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column names in row-data order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns the number of filterable columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no filterable columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Finds the column name closest to `key`, for "did you mean" hints.
    ///
    /// Distance ignores case, so `Status` suggests `status`. Returns `None`
    /// for exact matches or when nothing is close enough.
    pub fn suggest(&self, key: &str) -> Option<&str> {
        let key_lower = key.to_lowercase();
        let (best, distance) = self
            .columns
            .iter()
            .flat_map(|c| std::iter::once(c.name.as_str()).chain(c.full_name.as_deref()))
            .map(|name| (name, levenshtein(&key_lower, &name.to_lowercase())))
            .min_by_key(|(_, d)| *d)?;

        if best != key && distance <= MAX_SUGGESTION_DISTANCE {
            Some(best)
        } else {
            None
        }
    }
}

/// Builder for [`ColumnDirectory`].
///
/// Calls are made in raw cell order: every call (including
/// [`skip`](Self::skip)) advances the raw position by one.
#[derive(Debug, Default)]
pub struct DirectoryBuilder {
    specs: Vec<ColumnSpec>,
    position: usize,
}

#[derive(Debug)]
struct ColumnSpec {
    name: String,
    full_name: Option<String>,
    index: Option<usize>,
    position: usize,
}

impl DirectoryBuilder {
    /// Adds a filterable column without a declared index.
    pub fn column(self, name: impl Into<String>) -> Self {
        self.push(name.into(), None, None)
    }

    /// Adds a filterable column with a declared index.
    pub fn indexed_column(self, name: impl Into<String>, index: usize) -> Self {
        self.push(name.into(), None, Some(index))
    }

    /// Adds a filterable column with a full name and an optional index.
    pub fn full_column(
        self,
        name: impl Into<String>,
        full_name: impl Into<String>,
        index: Option<usize>,
    ) -> Self {
        self.push(name.into(), Some(full_name.into()), index)
    }

    /// Skips a raw cell that is not filterable.
    pub fn skip(mut self) -> Self {
        self.position += 1;
        self
    }

    fn push(mut self, name: String, full_name: Option<String>, index: Option<usize>) -> Self {
        self.specs.push(ColumnSpec {
            name,
            full_name,
            index,
            position: self.position,
        });
        self.position += 1;
        self
    }

    /// Builds the directory.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if a name is empty, or if a name or
    /// declared index is used twice.
    pub fn build(self) -> Result<ColumnDirectory, DirectoryError> {
        let mut directory = ColumnDirectory::default();

        for (i, spec) in self.specs.into_iter().enumerate() {
            if spec.name.is_empty() {
                return Err(DirectoryError::EmptyName {
                    position: spec.position,
                });
            }
            for name in std::iter::once(&spec.name).chain(spec.full_name.as_ref()) {
                if directory.by_name.contains_key(name) || directory.by_full_name.contains_key(name)
                {
                    return Err(DirectoryError::DuplicateColumn { name: name.clone() });
                }
            }
            if let Some(index) = spec.index {
                if directory.by_index.insert(index, i).is_some() {
                    return Err(DirectoryError::DuplicateIndex { index });
                }
            }

            directory.by_name.insert(spec.name.clone(), i);
            if let Some(full_name) = &spec.full_name {
                directory.by_full_name.insert(full_name.clone(), i);
            }
            directory.columns.push(Column {
                name: spec.name,
                full_name: spec.full_name,
                index: spec.index,
                position: spec.position,
                offset: i + 1,
            });
        }

        Ok(directory)
    }
}
