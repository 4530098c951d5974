//! Worker pool and the helpers that spread row work across it.

pub(crate) mod bands;
pub mod pool;

pub use pool::{Scope, TaskId, ThreadPool};
