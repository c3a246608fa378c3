pub mod entry_processor;
pub mod report;
pub mod workspace;

pub use entry_processor::{EntryEvent, EntryOutcome, EntryProcessor, EntryReport};
pub use report::RunReport;
pub use workspace::Workspace;
