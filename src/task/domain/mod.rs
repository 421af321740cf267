//! Domain model for the task list.
//!
//! Holds the task entity, the unpersisted task candidate, identifiers and the
//! pagination contract. Infrastructure concerns stay outside this module.

mod error;
mod ids;
mod pagination;
mod task;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use pagination::{PageNavigation, PageRequest, PaginatedResult};
pub use task::{PersistedTaskData, Task, TaskDraft, mutation_stamp};
