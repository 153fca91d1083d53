//! Keeps the last valid filter in effect while a query is being edited.

use crate::filter::{CompiledFilter, FilterCompiler, FilterError};

/// What happened to a submitted query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    /// The query compiled and is now in effect.
    Applied,
    /// The query is invalid; the previous filter stays in effect.
    Invalid(FilterError),
}

impl QueryStatus {
    /// Returns true if the query was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, QueryStatus::Applied)
    }
}

/// The filter state of one table.
///
/// Each [`submit`](Self::submit) recompiles from scratch. An invalid query
/// is reported but does not replace the filter in effect, so the host can
/// keep showing the rows it was showing.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rowfilter_rs::{ColumnDirectory, FilterCompiler, FilterSession, QueryStatus};
///
/// let directory = Arc::new(ColumnDirectory::from_names(["a"]).unwrap());
/// let mut session = FilterSession::new(FilterCompiler::new(directory).unwrap());
///
/// assert!(session.submit("foo").is_applied());
/// assert!(matches!(session.submit("/[/"), QueryStatus::Invalid(_)));
/// assert_eq!(session.query(), "foo");
/// ```
#[derive(Debug, Clone)]
pub struct FilterSession {
    compiler: FilterCompiler,
    query: String,
    filter: CompiledFilter,
    error: Option<FilterError>,
}

impl FilterSession {
    /// Creates a session with an empty query, accepting every row.
    pub fn new(compiler: FilterCompiler) -> Self {
        Self {
            compiler,
            query: String::new(),
            filter: CompiledFilter::AcceptAll,
            error: None,
        }
    }

    /// Compiles `query` and, if it is valid, puts it into effect.
    pub fn submit(&mut self, query: &str) -> QueryStatus {
        let query = query.trim();
        match self.compiler.compile(query) {
            Ok(filter) => {
                self.query = query.to_string();
                self.filter = filter;
                self.error = None;
                QueryStatus::Applied
            }
            Err(e) => {
                tracing::debug!(query, error = %e, "keeping previous filter");
                self.error = Some(e.clone());
                QueryStatus::Invalid(e)
            }
        }
    }

    /// Resets to the empty query.
    pub fn clear(&mut self) {
        self.query.clear();
        self.filter = CompiledFilter::AcceptAll;
        self.error = None;
    }

    /// Returns the query currently in effect.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the filter currently in effect.
    pub fn filter(&self) -> &CompiledFilter {
        &self.filter
    }

    /// Returns the error from the most recent submission, if it was invalid.
    pub fn last_error(&self) -> Option<&FilterError> {
        self.error.as_ref()
    }

    /// Returns the compiler.
    pub fn compiler(&self) -> &FilterCompiler {
        &self.compiler
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::directory::ColumnDirectory;
    use crate::rows::RowData;

    fn session() -> FilterSession {
        let directory = Arc::new(ColumnDirectory::from_names(["name", "age"]).unwrap());
        FilterSession::new(FilterCompiler::new(directory).unwrap())
    }

    #[test]
    fn test_new_session_accepts_all() {
        let session = session();
        assert!(session.filter().accepts_all());
        assert_eq!(session.query(), "");
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_invalid_query_keeps_previous_filter() {
        let mut session = session();
        assert!(session.submit(r#":age "30""#).is_applied());

        let status = session.submit(":unknowncol foo");
        assert!(matches!(
            status,
            QueryStatus::Invalid(FilterError::UnknownColumn { .. })
        ));
        assert_eq!(session.query(), r#":age "30""#);
        assert!(session.filter().matches(&RowData::from_cells(["x", "30"])));
        assert!(!session.filter().matches(&RowData::from_cells(["x", "130"])));
        assert!(session.last_error().is_some());

        assert!(matches!(session.submit("/[/"), QueryStatus::Invalid(_)));
        assert_eq!(session.query(), r#":age "30""#);
    }

    #[test]
    fn test_valid_query_clears_error() {
        let mut session = session();
        let _ = session.submit("/[/");
        assert!(session.submit("  alice ").is_applied());
        assert_eq!(session.query(), "alice");
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_empty_query_is_applied() {
        let mut session = session();
        session.submit("foo");
        assert!(session.submit("   ").is_applied());
        assert!(session.filter().accepts_all());
    }

    #[test]
    fn test_clear() {
        let mut session = session();
        session.submit("foo");
        session.clear();
        assert!(session.filter().accepts_all());
        assert_eq!(session.query(), "");
    }
}
