use serde_json::{json, Map, Value};

use crate::core::{ClassChange, ModuleChange, StructuralDiff};
use crate::error::Result;

/// Nested-mapping rendering of a structural diff: `{}` marks a whole module or
/// class, otherwise `{"classes": {..}, "functions": [..]}` and `{"methods": [..]}`.
pub struct JsonDiffFormatter {
    pretty: bool,
}

impl JsonDiffFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn diff_value(&self, diff: &StructuralDiff) -> Value {
        let modules: Map<String, Value> = diff
            .modules()
            .map(|(path, change)| (path.to_string(), self.module_value(change)))
            .collect();
        Value::Object(modules)
    }

    pub fn format(&self, diff: &StructuralDiff) -> Result<String> {
        self.serialize(&self.diff_value(diff))
    }

    pub fn format_report(&self, removed: &StructuralDiff, added: &StructuralDiff) -> Result<String> {
        let output = json!({
            "removed": self.diff_value(removed),
            "added": self.diff_value(added),
        });
        self.serialize(&output)
    }

    fn module_value(&self, change: &ModuleChange) -> Value {
        match change {
            ModuleChange::Whole => json!({}),
            ModuleChange::Symbols(changes) => {
                let classes: Map<String, Value> = changes
                    .classes
                    .iter()
                    .map(|(name, class_change)| {
                        let value = match class_change {
                            ClassChange::Whole => json!({}),
                            ClassChange::Methods(methods) => json!({ "methods": methods }),
                        };
                        (name.clone(), value)
                    })
                    .collect();
                json!({
                    "classes": classes,
                    "functions": changes.functions,
                })
            }
        }
    }

    fn serialize(&self, value: &Value) -> Result<String> {
        let output = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(output)
    }
}

impl Default for JsonDiffFormatter {
    fn default() -> Self {
        Self::new()
    }
}
