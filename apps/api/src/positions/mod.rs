// Job profile catalog: the static reference data every evaluation is scored against.
// Read-only for the lifetime of the process.

pub mod catalog;
pub mod handlers;

pub use catalog::{catalog, infer_from_message, resolve, JobProfile, PositionKey};
