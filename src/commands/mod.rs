pub mod backup;
pub mod completions;
pub mod pipeline;
pub mod report;
