//! Application services for task orchestration.

mod tasks;

pub use tasks::{TaskOutcome, TaskService, TaskServiceError, TaskServiceResult};
