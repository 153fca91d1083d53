//! Parsed and compiled forms of filter terms.

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::rows::RowData;

/// How a term's pattern text is turned into a regular expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// A bare word, matched as a literal substring.
    Word,
    /// A `"quoted"` phrase: substring when unqualified, exact value when
    /// column-qualified.
    Quote,
    /// A `/regex/` used verbatim.
    Regex,
}

impl PatternKind {
    fn label(self) -> &'static str {
        match self {
            PatternKind::Word => "WORD",
            PatternKind::Quote => "QUOTE",
            PatternKind::Regex => "REGEX",
        }
    }
}

/// A single term of a filter query, as written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTerm {
    /// The column qualifier, if any, as written in the query.
    pub column: Option<String>,
    /// The pattern kind.
    pub kind: PatternKind,
    /// The pattern text: the word, the unescaped quoted text, or the regex
    /// body.
    pub text: String,
    /// Whether the term was prefixed with `NOT`.
    pub negate: bool,
}

impl ParsedTerm {
    /// Creates a bare term.
    pub fn bare(kind: PatternKind, text: impl Into<String>) -> Self {
        Self {
            column: None,
            kind,
            text: text.into(),
            negate: false,
        }
    }

    /// Creates a column-qualified term.
    pub fn in_column(column: impl Into<String>, kind: PatternKind, text: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            ..Self::bare(kind, text)
        }
    }

    /// Returns the same term with `NOT` applied.
    pub fn negated(self) -> Self {
        Self {
            negate: true,
            ..self
        }
    }

    /// Returns true if the term has no column qualifier.
    pub fn is_bare(&self) -> bool {
        self.column.is_none()
    }

    /// Describes the pattern alone, e.g. `QUOTE("30")`.
    pub(crate) fn pattern_description(&self) -> String {
        format!("{}({:?})", self.kind.label(), self.text)
    }
}

/// Selects the text a compiled term is matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extractor {
    /// The whole-row text at offset 0.
    Row,
    /// One column's text.
    Column {
        /// The column name from the directory.
        name: String,
        /// The column's row-data offset.
        offset: usize,
    },
}

impl Extractor {
    /// Returns the target text of `row`. Missing offsets read as empty.
    pub fn extract<'r>(&self, row: &'r RowData) -> &'r str {
        match self {
            Extractor::Row => row.whole_row(),
            Extractor::Column { offset, .. } => row.get(*offset).unwrap_or(""),
        }
    }
}

/// A term ready for matching: its source terms, derived regex and target.
#[derive(Debug, Clone)]
pub struct CompiledTerm {
    pub(crate) terms: Vec<ParsedTerm>,
    pub(crate) source: String,
    pub(crate) regex: Regex,
    pub(crate) extractor: Extractor,
    pub(crate) negate: bool,
}

impl CompiledTerm {
    /// Returns the parsed terms this term was built from. Only the
    /// synthetic bare term has more than one.
    pub fn terms(&self) -> &[ParsedTerm] {
        &self.terms
    }

    /// Returns the derived regular expression source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the compiled regular expression.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns what the term is matched against.
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Returns true if the match result is inverted.
    pub fn is_negated(&self) -> bool {
        self.negate
    }

    /// Returns true if `row` satisfies this term.
    pub fn matches(&self, row: &RowData) -> bool {
        self.regex.is_match(self.extractor.extract(row)) != self.negate
    }

    /// Describes the term, e.g. `NOT(COLUMN("age"=2,QUOTE("30")))`.
    pub fn description(&self) -> String {
        let pattern = match self.terms.as_slice() {
            [single] => single.pattern_description(),
            many => format!(
                "THEN({})",
                many.iter()
                    .map(ParsedTerm::pattern_description)
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        };
        let target = match &self.extractor {
            Extractor::Row => format!("ROW({})", pattern),
            Extractor::Column { name, offset } => {
                format!("COLUMN({:?}={},{})", name, offset, pattern)
            }
        };
        if self.negate {
            format!("NOT({})", target)
        } else {
            target
        }
    }
}

impl fmt::Display for CompiledTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// The conjunction of compiled terms, evaluated in source order.
#[derive(Debug, Clone)]
pub struct CompiledPredicate {
    pub(crate) terms: Vec<CompiledTerm>,
}

impl CompiledPredicate {
    /// Returns the compiled terms in evaluation order.
    pub fn terms(&self) -> &[CompiledTerm] {
        &self.terms
    }

    /// Returns true if every term accepts `row`. Stops at the first
    /// rejecting term.
    pub fn matches(&self, row: &RowData) -> bool {
        self.terms.iter().all(|term| term.matches(row))
    }

    /// Describes the predicate, e.g. `AND(ROW(WORD("foo")))`.
    pub fn description(&self) -> String {
        format!(
            "AND({})",
            self.terms
                .iter()
                .map(CompiledTerm::description)
                .collect::<Vec<_>>()
                .join(",")
        )
    }
}

/// The result of compiling a valid query.
#[derive(Debug, Clone, Default)]
pub enum CompiledFilter {
    /// The query was empty: every row is accepted.
    #[default]
    AcceptAll,
    /// A predicate built from at least one term.
    Predicate(CompiledPredicate),
}

impl CompiledFilter {
    /// Returns true if `row` passes the filter.
    pub fn matches(&self, row: &RowData) -> bool {
        match self {
            CompiledFilter::AcceptAll => true,
            CompiledFilter::Predicate(predicate) => predicate.matches(row),
        }
    }

    /// Returns true if this filter accepts every row.
    pub fn accepts_all(&self) -> bool {
        matches!(self, CompiledFilter::AcceptAll)
    }

    /// Describes the filter. The empty filter is `TRUE`.
    pub fn description(&self) -> String {
        match self {
            CompiledFilter::AcceptAll => "TRUE".to_string(),
            CompiledFilter::Predicate(predicate) => predicate.description(),
        }
    }
}

impl fmt::Display for CompiledFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
