//! Three-tier structural diff between two snapshots.
//!
//! Tiers are only entered when the parent container exists on both sides:
//! a module missing from one snapshot is reported whole and never probed for
//! symbols, and a class missing from one side is reported whole and never
//! probed for methods.

use std::collections::{BTreeMap, BTreeSet};

use super::snapshot::{Snapshot, SymbolTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Present in the former snapshot only
    Removed,
    /// Present in the latter snapshot only
    Added,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Removed => "DELETED",
            Direction::Added => "ADDED",
        }
    }

    /// `former - latter` for removals, `latter - former` for additions
    pub fn apply<'a>(self, former: &BTreeSet<&'a str>, latter: &BTreeSet<&'a str>) -> Vec<&'a str> {
        let (from, against) = match self {
            Direction::Removed => (former, latter),
            Direction::Added => (latter, former),
        };
        from.difference(against).copied().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassChange {
    /// The class exists on one side only
    Whole,
    Methods(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolChanges {
    pub classes: BTreeMap<String, ClassChange>,
    pub functions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleChange {
    /// The module exists on one side only
    Whole,
    Symbols(SymbolChanges),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralDiff {
    direction: Direction,
    modules: BTreeMap<String, ModuleChange>,
}

impl StructuralDiff {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            modules: BTreeMap::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn get(&self, module_path: &str) -> Option<&ModuleChange> {
        self.modules.get(module_path)
    }

    /// Changed modules in lexicographic path order
    pub fn modules(&self) -> impl Iterator<Item = (&str, &ModuleChange)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Symbol-tier entry for `module_path`; `None` if the module is already a whole change
    fn symbols_mut(&mut self, module_path: &str) -> Option<&mut SymbolChanges> {
        match self
            .modules
            .entry(module_path.to_string())
            .or_insert_with(|| ModuleChange::Symbols(SymbolChanges::default()))
        {
            ModuleChange::Symbols(changes) => Some(changes),
            ModuleChange::Whole => None,
        }
    }
}

pub struct ApiDiffer;

impl ApiDiffer {
    pub fn new() -> Self {
        Self
    }

    pub fn diff(&self, former: &Snapshot, latter: &Snapshot, direction: Direction) -> StructuralDiff {
        let mut diff = StructuralDiff::new(direction);

        let former_paths: BTreeSet<&str> = former.module_paths().collect();
        let latter_paths: BTreeSet<&str> = latter.module_paths().collect();

        for path in direction.apply(&former_paths, &latter_paths) {
            diff.modules.insert(path.to_string(), ModuleChange::Whole);
        }

        for path in former_paths.intersection(&latter_paths) {
            let (Some(before), Some(after)) = (former.get(path), latter.get(path)) else {
                continue;
            };
            self.diff_symbols(&mut diff, path, before, after);
            self.diff_methods(&mut diff, path, before, after);
        }

        diff
    }

    fn diff_symbols(
        &self,
        diff: &mut StructuralDiff,
        path: &str,
        before: &SymbolTable,
        after: &SymbolTable,
    ) {
        let direction = diff.direction;
        let functions = direction.apply(
            &string_set(&before.functions),
            &string_set(&after.functions),
        );
        let classes = direction.apply(&key_set(&before.classes), &key_set(&after.classes));

        if functions.is_empty() && classes.is_empty() {
            return;
        }

        let Some(changes) = diff.symbols_mut(path) else {
            return;
        };
        changes.functions = functions.into_iter().map(str::to_string).collect();
        changes.classes = classes
            .into_iter()
            .map(|name| (name.to_string(), ClassChange::Whole))
            .collect();
    }

    fn diff_methods(
        &self,
        diff: &mut StructuralDiff,
        path: &str,
        before: &SymbolTable,
        after: &SymbolTable,
    ) {
        let direction = diff.direction;

        for (class_name, after_class) in &after.classes {
            let Some(before_class) = before.classes.get(class_name) else {
                continue;
            };
            // Method tier applies only when both sides list public methods
            if before_class.methods.is_empty() || after_class.methods.is_empty() {
                continue;
            }

            let methods = direction.apply(
                &string_set(&before_class.methods),
                &string_set(&after_class.methods),
            );
            if methods.is_empty() {
                continue;
            }

            if let Some(changes) = diff.symbols_mut(path) {
                changes.classes.insert(
                    class_name.clone(),
                    ClassChange::Methods(methods.into_iter().map(str::to_string).collect()),
                );
            }
        }
    }
}

impl Default for ApiDiffer {
    fn default() -> Self {
        Self::new()
    }
}

fn string_set(set: &BTreeSet<String>) -> BTreeSet<&str> {
    set.iter().map(String::as_str).collect()
}

fn key_set<V>(map: &BTreeMap<String, V>) -> BTreeSet<&str> {
    map.keys().map(String::as_str).collect()
}
