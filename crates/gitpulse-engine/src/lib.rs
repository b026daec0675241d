pub mod aggregator;
pub mod source;

pub use aggregator::{aggregate, run, RunError, RunParams};
pub use source::{EventSource, EventsPage, ProjectMeta, SourceError, PAGE_SIZE};
