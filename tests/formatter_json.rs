use api_crawler::core::{ApiDiffer, ClassSymbols, Direction, Snapshot, SymbolTable};
use api_crawler::formatters::JsonDiffFormatter;
use serde_json::{json, Value};

fn widget_module(methods: &[&str]) -> SymbolTable {
    let mut symbols = SymbolTable::default();
    symbols.classes.insert(
        "Widget".to_string(),
        ClassSymbols {
            methods: methods.iter().map(|m| m.to_string()).collect(),
        },
    );
    symbols
}

#[test]
fn json_formatter_uses_nested_mapping_shape() {
    let mut former = Snapshot::new();
    former.insert("pkg/a.py", widget_module(&["bar"]));
    former.insert("pkg/old.py", SymbolTable::default());

    let mut latter = Snapshot::new();
    latter.insert("pkg/a.py", widget_module(&["bar", "baz"]));

    let differ = ApiDiffer::new();
    let added = differ.diff(&former, &latter, Direction::Added);
    let removed = differ.diff(&former, &latter, Direction::Removed);
    let formatter = JsonDiffFormatter::compact();

    let v: Value = serde_json::from_str(&formatter.format(&added).unwrap()).unwrap();
    assert_eq!(
        v,
        json!({"pkg/a.py": {"classes": {"Widget": {"methods": ["baz"]}}, "functions": []}})
    );

    let report: Value =
        serde_json::from_str(&formatter.format_report(&removed, &added).unwrap()).unwrap();
    assert_eq!(report["removed"], json!({"pkg/old.py": {}}));
    assert_eq!(report["added"], v);
}
