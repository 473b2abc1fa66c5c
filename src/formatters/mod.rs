pub mod json;
pub mod report;

pub use json::JsonDiffFormatter;
pub use report::{dotted_module, ReportFormatter};
