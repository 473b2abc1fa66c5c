use api_crawler::core::{
    ApiDiffer, ClassChange, ClassSymbols, Direction, ModuleChange, Snapshot, SymbolTable,
};
use api_crawler::formatters::ReportFormatter;

fn module(functions: &[&str], classes: &[(&str, &[&str])]) -> SymbolTable {
    SymbolTable {
        functions: functions.iter().map(|f| f.to_string()).collect(),
        classes: classes
            .iter()
            .map(|(name, methods)| {
                (
                    name.to_string(),
                    ClassSymbols {
                        methods: methods.iter().map(|m| m.to_string()).collect(),
                    },
                )
            })
            .collect(),
    }
}

fn snapshot(modules: Vec<(&str, SymbolTable)>) -> Snapshot {
    modules
        .into_iter()
        .map(|(path, symbols)| (path.to_string(), symbols))
        .collect()
}

fn render(former: &Snapshot, latter: &Snapshot, direction: Direction) -> Vec<String> {
    let diff = ApiDiffer::new().diff(former, latter, direction);
    ReportFormatter::new().render(&diff)
}

#[test]
fn identical_snapshots_have_empty_diffs() {
    let a = snapshot(vec![
        ("pkg/a.py", module(&["foo"], &[("Widget", &["bar"])])),
        ("pkg/b.py", module(&[], &[])),
    ]);
    let differ = ApiDiffer::new();

    assert!(differ.diff(&a, &a, Direction::Removed).is_empty());
    assert!(differ.diff(&a, &a, Direction::Added).is_empty());
}

#[test]
fn removed_module_is_reported_whole() {
    let former = snapshot(vec![("pkg/a.py", module(&["foo"], &[("Widget", &["bar"])]))]);
    let latter = Snapshot::new();

    let diff = ApiDiffer::new().diff(&former, &latter, Direction::Removed);
    assert_eq!(diff.len(), 1);
    assert_eq!(diff.get("pkg/a.py"), Some(&ModuleChange::Whole));
    assert_eq!(
        render(&former, &latter, Direction::Removed),
        vec!["DELETED pkg.a"]
    );
    assert!(render(&former, &latter, Direction::Added).is_empty());
}

#[test]
fn added_method_on_common_class() {
    let former = snapshot(vec![("pkg/a.py", module(&[], &[("Widget", &["bar"])]))]);
    let latter = snapshot(vec![("pkg/a.py", module(&[], &[("Widget", &["bar", "baz"])]))]);

    let diff = ApiDiffer::new().diff(&former, &latter, Direction::Added);
    match diff.get("pkg/a.py") {
        Some(ModuleChange::Symbols(changes)) => {
            assert!(changes.functions.is_empty());
            assert_eq!(
                changes.classes.get("Widget"),
                Some(&ClassChange::Methods(vec!["baz".to_string()]))
            );
        }
        other => panic!("unexpected change: {other:?}"),
    }
    assert_eq!(
        render(&former, &latter, Direction::Added),
        vec!["ADDED pkg.a.Widget.baz"]
    );
    assert!(render(&former, &latter, Direction::Removed).is_empty());
}

#[test]
fn added_top_level_function() {
    let former = snapshot(vec![
        ("pkg/a.py", module(&["foo"], &[])),
        ("pkg/b.py", module(&["run"], &[])),
    ]);
    let latter = snapshot(vec![
        ("pkg/a.py", module(&["foo"], &[])),
        ("pkg/b.py", module(&["helper", "run"], &[])),
    ]);

    assert_eq!(
        render(&former, &latter, Direction::Added),
        vec!["ADDED pkg.b.helper"]
    );
}

#[test]
fn new_class_is_reported_without_its_methods() {
    let former = snapshot(vec![("pkg/c.py", module(&[], &[]))]);
    let latter = snapshot(vec![("pkg/c.py", module(&[], &[("NewThing", &["go", "stop"])]))]);

    let diff = ApiDiffer::new().diff(&former, &latter, Direction::Added);
    match diff.get("pkg/c.py") {
        Some(ModuleChange::Symbols(changes)) => {
            assert_eq!(changes.classes.get("NewThing"), Some(&ClassChange::Whole));
        }
        other => panic!("unexpected change: {other:?}"),
    }
    assert_eq!(
        render(&former, &latter, Direction::Added),
        vec!["ADDED pkg.c.NewThing"]
    );
}

#[test]
fn methods_are_compared_only_when_both_sides_have_some() {
    let former = snapshot(vec![("pkg/a.py", module(&[], &[("Plain", &[])]))]);
    let latter = snapshot(vec![("pkg/a.py", module(&[], &[("Plain", &["method"])]))]);

    assert!(ApiDiffer::new()
        .diff(&former, &latter, Direction::Added)
        .is_empty());
}

#[test]
fn removal_mirrors_addition_in_the_other_direction() {
    let a = snapshot(vec![
        ("pkg/a.py", module(&["foo", "gone"], &[("Widget", &["bar", "old"])])),
        ("pkg/only_a.py", module(&["x"], &[])),
    ]);
    let b = snapshot(vec![
        ("pkg/a.py", module(&["foo"], &[("Widget", &["bar"]), ("Fresh", &["m"])])),
        ("pkg/only_b.py", module(&[], &[])),
    ]);

    let removed = render(&a, &b, Direction::Removed);
    let added_reverse = render(&b, &a, Direction::Added);

    assert_eq!(
        removed,
        vec!["DELETED pkg.only_a", "DELETED pkg.a.Widget.old", "DELETED pkg.a.gone"]
    );
    let strip = |lines: Vec<String>| -> Vec<String> {
        lines
            .into_iter()
            .map(|l| l.split_once(' ').unwrap().1.to_string())
            .collect()
    };
    assert_eq!(strip(removed), strip(added_reverse));
}

#[test]
fn class_and_method_changes_share_one_module_entry() {
    let former = snapshot(vec![(
        "pkg/a.py",
        module(&["keep"], &[("Widget", &["bar"]), ("Legacy", &["run"])]),
    )]);
    let latter = snapshot(vec![("pkg/a.py", module(&["keep"], &[("Widget", &["baz"])]))]);

    assert_eq!(
        render(&former, &latter, Direction::Removed),
        vec!["DELETED pkg.a.Legacy", "DELETED pkg.a.Widget.bar"]
    );
    assert_eq!(
        render(&former, &latter, Direction::Added),
        vec!["ADDED pkg.a.Widget.baz"]
    );
}

#[test]
fn diffing_is_repeatable() {
    let former = snapshot(vec![("pkg/a.py", module(&["a", "b"], &[("W", &["x"])]))]);
    let latter = snapshot(vec![("pkg/a.py", module(&["b", "c"], &[("W", &["y"])]))]);
    let differ = ApiDiffer::new();

    for direction in [Direction::Removed, Direction::Added] {
        assert_eq!(
            differ.diff(&former, &latter, direction),
            differ.diff(&former, &latter, direction)
        );
    }
}

#[test]
fn heterogeneous_snapshot_shapes_are_tolerated() {
    let former = Snapshot::from_json(
        r#"{"pkg/a.py": {"functions": ["foo"]}, "pkg/b.py": {"classes": {"W": {}}}}"#,
    )
    .unwrap();
    let latter = Snapshot::from_json(
        r#"{"pkg/a.py": {"classes": {"W": {"methods": ["m"]}}}, "pkg/b.py": {}}"#,
    )
    .unwrap();

    assert_eq!(
        render(&former, &latter, Direction::Removed),
        vec!["DELETED pkg.a.foo", "DELETED pkg.b.W"]
    );
    assert_eq!(
        render(&former, &latter, Direction::Added),
        vec!["ADDED pkg.a.W"]
    );
}
