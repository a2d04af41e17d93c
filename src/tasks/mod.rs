//! TASKS.md operations: classification, completion, archiving and snapshots.

pub mod archive;
pub mod complete;
pub mod line;
pub mod snapshot;

pub use archive::{archive_completed, separate_tasks, ArchiveOutcome, Separation};
pub use complete::complete_task;
pub use line::TaskLine;
pub use snapshot::snapshot_tasks;
