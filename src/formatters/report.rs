use std::fs;
use std::path::Path;

use crate::core::{ClassChange, ModuleChange, StructuralDiff};
use crate::error::{CrawlError, Result};

/// Flattens a structural diff into `"<LABEL> dotted.path"` change lines.
///
/// Whole-module lines come first, then symbol lines grouped by module in
/// path order; within a module classes precede functions.
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, diff: &StructuralDiff) -> Vec<String> {
        let label = diff.direction().label();
        let mut whole_modules = Vec::new();
        let mut symbol_lines = Vec::new();

        for (path, change) in diff.modules() {
            let module = dotted_module(path);
            match change {
                ModuleChange::Whole => whole_modules.push(format!("{} {}", label, module)),
                ModuleChange::Symbols(changes) => {
                    for (class_name, class_change) in &changes.classes {
                        match class_change {
                            ClassChange::Whole => {
                                symbol_lines.push(format!("{} {}.{}", label, module, class_name));
                            }
                            ClassChange::Methods(methods) => {
                                symbol_lines.extend(methods.iter().map(|method| {
                                    format!("{} {}.{}.{}", label, module, class_name, method)
                                }));
                            }
                        }
                    }
                    symbol_lines.extend(
                        changes
                            .functions
                            .iter()
                            .map(|function| format!("{} {}.{}", label, module, function)),
                    );
                }
            }
        }

        whole_modules.extend(symbol_lines);
        whole_modules
    }

    pub fn format_to_file(&self, lines: &[String], output_path: &Path) -> Result<()> {
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(output_path, content).map_err(|e| CrawlError::io(output_path, e))
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// `pkg/sub/mod.py` -> `pkg.sub.mod`
pub fn dotted_module(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let normalized = normalized.trim_start_matches('/');
    let base_start = normalized.rfind('/').map_or(0, |i| i + 1);
    let stem_end = normalized[base_start..]
        .rfind('.')
        .filter(|&i| i > 0)
        .map_or(normalized.len(), |i| base_start + i);
    normalized[..stem_end].replace('/', ".")
}

#[cfg(test)]
mod tests {
    use super::dotted_module;

    #[test]
    fn dotted_module_strips_extension_and_separators() {
        assert_eq!(dotted_module("pkg/a.py"), "pkg.a");
        assert_eq!(dotted_module("bokeh/util/api_crawler.py"), "bokeh.util.api_crawler");
        assert_eq!(dotted_module("pkg\\models\\glyphs.py"), "pkg.models.glyphs");
        assert_eq!(dotted_module("top.py"), "top");
        assert_eq!(dotted_module("noext"), "noext");
    }
}
