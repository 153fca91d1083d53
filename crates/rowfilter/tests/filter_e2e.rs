//! End-to-end tests: a host table filtered through a session.

use std::sync::Arc;

use rowfilter_rs::filter::PatternKind;
use rowfilter_rs::{
    ColumnDirectory, FilterCompiler, FilterError, FilterSession, QueryStatus, RowEvaluator,
};

fn table() -> Vec<Vec<String>> {
    [
        ["#", "title", "state", "age"],
        ["1", "Fix parser", "open", "30"],
        ["2", "draft: new docs", "open", "130"],
        ["3", "Alpha release", "closed", "30"],
        ["4", "parser cleanup", "closed", "7"],
    ]
    .iter()
    .skip(1)
    .map(|row| row.iter().map(|cell| cell.to_string()).collect())
    .collect()
}

fn directory() -> Arc<ColumnDirectory> {
    Arc::new(
        ColumnDirectory::builder()
            .skip()
            .indexed_column("title", 1)
            .indexed_column("state", 2)
            .indexed_column("age", 3)
            .build()
            .unwrap(),
    )
}

struct Host {
    rows: Vec<Vec<String>>,
    session: FilterSession,
    evaluator: RowEvaluator,
}

impl Host {
    fn new() -> Self {
        let directory = directory();
        Self {
            rows: table(),
            session: FilterSession::new(FilterCompiler::new(Arc::clone(&directory)).unwrap()),
            evaluator: RowEvaluator::new(directory),
        }
    }

    fn visible(&mut self) -> Vec<usize> {
        self.evaluator
            .evaluate(&self.rows, self.session.filter())
            .matched_rows()
            .collect()
    }
}

#[test]
fn test_filter_lifecycle() {
    let mut host = Host::new();
    assert_eq!(host.visible(), vec![0, 1, 2, 3]);

    assert!(host.session.submit("parser").is_applied());
    assert_eq!(host.visible(), vec![0, 3]);

    assert!(host.session.submit(r#":age "30""#).is_applied());
    assert_eq!(host.visible(), vec![0, 2]);

    assert!(host.session.submit(r#":age "30" NOT /^draft/ NOT /^A/"#).is_applied());
    assert_eq!(host.visible(), vec![0]);

    // Invalid edits leave the last filter in effect.
    assert!(matches!(
        host.session.submit(":unknowncol foo"),
        QueryStatus::Invalid(FilterError::UnknownColumn { .. })
    ));
    assert_eq!(host.visible(), vec![0]);
    assert!(matches!(host.session.submit("/[/"), QueryStatus::Invalid(_)));
    assert_eq!(host.visible(), vec![0]);

    assert!(host.session.submit("").is_applied());
    assert_eq!(host.visible(), vec![0, 1, 2, 3]);
}

#[test]
fn test_ordered_words_across_columns() {
    let mut host = Host::new();
    host.session.submit("parser open");
    assert_eq!(host.visible(), vec![0]);

    host.session.submit("open parser");
    assert_eq!(host.visible(), Vec::<usize>::new());
}

#[test]
fn test_column_by_index() {
    let mut host = Host::new();
    host.session.submit(":2 closed :3 /^\\d$/");
    assert_eq!(host.visible(), vec![3]);
}

#[test]
fn test_edited_row_needs_invalidation() {
    let mut host = Host::new();
    host.session.submit(":state closed");
    assert_eq!(host.visible(), vec![2, 3]);

    host.rows[0][2] = "closed".to_string();
    assert_eq!(host.visible(), vec![2, 3]);

    host.evaluator.cache_mut().invalidate(0);
    assert_eq!(host.visible(), vec![0, 2, 3]);
}

#[test]
fn test_parsed_terms_serialize() {
    let compiler = FilterCompiler::new(directory()).unwrap();
    let terms = compiler.parse(r#"NOT :state "open""#).unwrap();
    assert_eq!(terms[0].kind, PatternKind::Quote);

    let json = serde_json::to_value(&terms).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "column": "state", "kind": "quote", "text": "open", "negate": true }
        ])
    );
}

#[test]
fn test_evaluation_serializes() {
    let mut host = Host::new();
    host.session.submit(":age 30");
    let evaluation = host.evaluator.evaluate(&host.rows, host.session.filter());

    let json = serde_json::to_value(&evaluation).unwrap();
    assert_eq!(json["matched"], 3);
    assert_eq!(json["decisions"], serde_json::json!([true, true, true, false]));
}
