//! # Task abstraction.
//!
//! A [`Task`] receives a [`Context`] and should race its work against
//! [`Context::cancelled`] to stop cooperatively during shutdown.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::Context;
use crate::error::TaskError;

/// Shared handle to a task.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cancelable unit.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use runvisor::{Context, Task, TaskError};
///
/// struct Demo;
///
/// #[async_trait]
/// impl Task for Demo {
///     fn name(&self) -> &str { "demo" }
///
///     async fn run(&self, ctx: Context) -> Result<(), TaskError> {
///         if ctx.is_cancelled() {
///             return Err(TaskError::Canceled);
///         }
///         // do work...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Task name used in logs; may be empty.
    fn name(&self) -> &str;

    /// Executes the task until completion or cancellation.
    ///
    /// Tasks that stop because their context was cancelled should return
    /// [`TaskError::Canceled`].
    async fn run(&self, ctx: Context) -> Result<(), TaskError>;
}
