//! Compiles parsed terms into a row predicate.

use std::sync::{Arc, OnceLock};

use regex::{Regex, RegexBuilder};
use rowfilter_combinator::Engine;

use super::ast::{CompiledFilter, CompiledPredicate, CompiledTerm, Extractor, ParsedTerm, PatternKind};
use super::error::{FilterError, FilterResult};
use super::grammar::Grammar;
use crate::directory::ColumnDirectory;

/// Upper bound on the compiled size of a single user pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Upper bound on the lazy DFA cache of a single user pattern.
const PATTERN_DFA_SIZE_LIMIT: usize = 2 << 20;

/// Separator joining bare terms: at least one character in between.
const THEN: &str = ".+";

/// Parses and compiles filter queries against one column directory.
///
/// Compilation never panics and never returns a partial predicate: a query
/// either compiles completely or yields a [`FilterError`].
///
/// Patterns are compiled with the `regex` crate, whose matching time is
/// linear in the input, so user-supplied `/regex/` terms cannot cause
/// catastrophic backtracking. Patterns whose compiled form would exceed a
/// fixed size budget are rejected as invalid.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rowfilter_rs::filter::FilterCompiler;
/// use rowfilter_rs::rows::RowData;
/// use rowfilter_rs::ColumnDirectory;
///
/// let directory = Arc::new(ColumnDirectory::from_names(["a", "b"]).unwrap());
/// let compiler = FilterCompiler::new(directory).unwrap();
///
/// let filter = compiler.compile("foo bar").unwrap();
/// assert!(filter.matches(&RowData::from_cells(["foo", "x bar"])));
/// assert!(!filter.matches(&RowData::from_cells(["bar", "foo"])));
///
/// assert!(compiler.compile(":nope foo").is_err());
/// assert!(compiler.compile("").unwrap().accepts_all());
/// ```
#[derive(Debug, Clone)]
pub struct FilterCompiler {
    directory: Arc<ColumnDirectory>,
    grammar: Grammar,
}

impl FilterCompiler {
    /// Creates a compiler for `directory` with diagnostics disabled.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Grammar`] if the grammar cannot be built.
    pub fn new(directory: Arc<ColumnDirectory>) -> FilterResult<Self> {
        Self::with_engine(directory, &Engine::new())
    }

    /// Creates a compiler whose grammar reports through `engine`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Grammar`] if the grammar cannot be built.
    pub fn with_engine(directory: Arc<ColumnDirectory>, engine: &Engine) -> FilterResult<Self> {
        let grammar = Grammar::new(Arc::clone(&directory), engine)?;
        Ok(Self { directory, grammar })
    }

    /// Returns the column directory queries are resolved against.
    pub fn directory(&self) -> &ColumnDirectory {
        &self.directory
    }

    /// Returns the grammar.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Parses `query` into terms without compiling them.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyExpression`] for a blank query,
    /// [`FilterError::UnknownColumn`] when a `:name` qualifier is not in
    /// the directory, and [`FilterError::Syntax`] otherwise.
    pub fn parse(&self, query: &str) -> FilterResult<Vec<ParsedTerm>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(FilterError::EmptyExpression);
        }
        match self.grammar.parse(trimmed) {
            Some(terms) if !terms.is_empty() => Ok(terms),
            _ => Err(self.explain_parse_failure(trimmed)),
        }
    }

    /// Compiles `query` into a filter.
    ///
    /// A blank query compiles to [`CompiledFilter::AcceptAll`].
    ///
    /// # Errors
    ///
    /// Returns a [`FilterError`] if the query does not parse, names an
    /// unknown column, or contains a pattern that does not compile.
    pub fn compile(&self, query: &str) -> FilterResult<CompiledFilter> {
        if query.trim().is_empty() {
            return Ok(CompiledFilter::AcceptAll);
        }
        let terms = self.parse(query)?;
        let predicate = self.compile_terms(&terms)?;
        tracing::debug!(query, predicate = %predicate.description(), "compiled filter");
        Ok(CompiledFilter::Predicate(predicate))
    }

    /// Compiles already-parsed terms into a predicate.
    ///
    /// Column-qualified terms and negated bare terms each compile to their
    /// own term. The remaining bare terms collapse into one whole-row term
    /// requiring their patterns in the order written, placed where the
    /// first of them appeared.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyExpression`] for an empty slice,
    /// [`FilterError::UnknownColumn`] for an unresolvable column and
    /// [`FilterError::InvalidPattern`] if any derived regex fails to
    /// compile.
    pub fn compile_terms(&self, terms: &[ParsedTerm]) -> FilterResult<CompiledPredicate> {
        if terms.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        let ordered: Vec<&ParsedTerm> = terms
            .iter()
            .filter(|term| term.is_bare() && !term.negate)
            .collect();

        let mut compiled = Vec::with_capacity(terms.len());
        let mut ordered_emitted = false;
        for term in terms {
            if term.is_bare() && !term.negate {
                if !ordered_emitted {
                    compiled.push(self.compile_ordered(&ordered)?);
                    ordered_emitted = true;
                }
            } else {
                compiled.push(self.compile_single(term)?);
            }
        }

        Ok(CompiledPredicate { terms: compiled })
    }

    fn compile_single(&self, term: &ParsedTerm) -> FilterResult<CompiledTerm> {
        let source = derive_source(term);
        let regex = compile_pattern(&source)?;
        Ok(CompiledTerm {
            extractor: self.extractor(term)?,
            terms: vec![term.clone()],
            source,
            regex,
            negate: term.negate,
        })
    }

    fn compile_ordered(&self, terms: &[&ParsedTerm]) -> FilterResult<CompiledTerm> {
        let source = match terms {
            [single] => derive_source(single),
            many => many
                .iter()
                .map(|term| format!("(?:{})", derive_source(term)))
                .collect::<Vec<_>>()
                .join(THEN),
        };
        let regex = compile_pattern(&source)?;
        Ok(CompiledTerm {
            terms: terms.iter().map(|&term| term.clone()).collect(),
            source,
            regex,
            extractor: Extractor::Row,
            negate: false,
        })
    }

    fn extractor(&self, term: &ParsedTerm) -> FilterResult<Extractor> {
        let Some(key) = term.column.as_deref() else {
            return Ok(Extractor::Row);
        };
        let column = self
            .directory
            .resolve(key)
            .ok_or_else(|| FilterError::unknown_column(key, self.directory.suggest(key)))?;
        Ok(Extractor::Column {
            name: column.name.clone(),
            offset: column.offset,
        })
    }

    /// Finds the most specific reason `query` failed to parse.
    ///
    /// The grammar only reports success or failure, so the query is scanned
    /// for column qualifiers the directory does not know.
    fn explain_parse_failure(&self, query: &str) -> FilterError {
        let Some(qualifier) = column_qualifier() else {
            return FilterError::syntax(query);
        };
        qualifier
            .captures_iter(query)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|name| name.as_str())
            .find(|name| self.directory.resolve(name).is_none())
            .map(|name| FilterError::unknown_column(name, self.directory.suggest(name)))
            .unwrap_or_else(|| FilterError::syntax(query))
    }
}

/// Derives the regex source for a single term.
///
/// Words match as literal substrings. Quoted text matches as a literal
/// substring, or as the exact value when column-qualified. Regex bodies are
/// used as written.
pub(crate) fn derive_source(term: &ParsedTerm) -> String {
    match term.kind {
        PatternKind::Word => regex::escape(&term.text),
        PatternKind::Quote if term.column.is_some() => {
            format!("^{}$", regex::escape(&term.text))
        }
        PatternKind::Quote => regex::escape(&term.text),
        PatternKind::Regex => term.text.clone(),
    }
}

fn compile_pattern(source: &str) -> FilterResult<Regex> {
    RegexBuilder::new(source)
        .size_limit(PATTERN_SIZE_LIMIT)
        .dfa_size_limit(PATTERN_DFA_SIZE_LIMIT)
        .build()
        .map_err(|e| FilterError::invalid_pattern(source, e))
}

/// Matches `:name` / `:"full name"` qualifiers at the start of a token.
fn column_qualifier() -> Option<&'static Regex> {
    static QUALIFIER: OnceLock<Option<Regex>> = OnceLock::new();
    QUALIFIER
        .get_or_init(|| Regex::new(r#"(?:^|\s)(?:NOT\s+)?:(?:"([^"]+)"|([^\s:"]+))"#).ok())
        .as_ref()
}
