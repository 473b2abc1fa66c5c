pub mod crawler;
pub mod differ;
pub mod scanner;
pub mod snapshot;

pub use crawler::{ApiCrawler, ApiReport};
pub use differ::{ApiDiffer, ClassChange, Direction, ModuleChange, StructuralDiff, SymbolChanges};
pub use scanner::{FileInfo, FileScanner};
pub use snapshot::{ClassSymbols, Snapshot, SnapshotBuilder, SymbolTable};
