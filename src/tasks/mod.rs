//! # Task abstractions and specifications.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for implementing async cancelable tasks
//! - [`TaskFn`] - function-based task implementation
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task>`)
//! - [`TaskSpec`] - task bundled with its [`ExitPolicy`](crate::ExitPolicy)

mod spec;
mod task;
mod task_fn;

pub use spec::TaskSpec;
pub use task::{Task, TaskRef};
pub use task_fn::TaskFn;
