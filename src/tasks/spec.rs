//! # Task specification for grouped execution.
//!
//! Defines [`TaskSpec`]: a task plus the [`ExitPolicy`] that decides what its
//! completion means for the rest of the group.

use crate::policies::ExitPolicy;
use crate::tasks::task::TaskRef;

/// Task and exit policy, as handed to [`Group::add`](crate::Group::add).
///
/// ## Example
/// ```rust
/// use runvisor::{Context, ExitPolicy, TaskError, TaskFn, TaskRef, TaskSpec};
///
/// let demo: TaskRef = TaskFn::arc("demo", |_ctx: Context| async move {
///     Ok::<(), TaskError>(())
/// });
///
/// let spec = TaskSpec::new(demo, ExitPolicy::Exit);
/// assert_eq!(spec.name(), "demo");
/// assert_eq!(spec.exit(), ExitPolicy::Exit);
/// ```
#[derive(Clone)]
pub struct TaskSpec {
    task: TaskRef,
    exit: ExitPolicy,
}

impl TaskSpec {
    /// Creates a new task specification.
    pub fn new(task: TaskRef, exit: ExitPolicy) -> Self {
        Self { task, exit }
    }

    /// Returns reference to the task.
    pub fn task(&self) -> &TaskRef {
        &self.task
    }

    /// Convenience: returns the task name.
    pub fn name(&self) -> &str {
        self.task.name()
    }

    /// Returns the exit policy.
    pub fn exit(&self) -> ExitPolicy {
        self.exit
    }

    /// Returns a new spec with updated exit policy.
    pub fn with_exit(mut self, exit: ExitPolicy) -> Self {
        self.exit = exit;
        self
    }
}

impl std::fmt::Debug for TaskSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSpec")
            .field("name", &self.name())
            .field("exit", &self.exit)
            .finish()
    }
}
