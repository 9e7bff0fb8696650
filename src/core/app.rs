//! # Application task.
//!
//! [`AppTask`] is the unnamed task that runs the application's entry point
//! exactly once.
//!
//! ## Flow
//! ```text
//! run(ctx)
//!   ├─► arm flush guard (Logger::sync on every exit path)
//!   ├─► container.singleton(ctx)      (entry point sees this task's context)
//!   ├─► entry.call(ctx, container)    (result = task result)
//!   └─► guard dropped → logger flushed → result handed to the group
//! ```
//!
//! The flush also happens when the future is dropped mid-way or unwinds from
//! a panic. Flush errors are ignored.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::{
    container::Container, context::Context, error::TaskError, logging::Logger, tasks::Task,
};

/// Application entry point.
///
/// Implemented for every `Fn(Context, Arc<Container>) -> impl Future<Output = Result<(), TaskError>>`.
/// The context is the application task's own; the container holds whatever
/// the configure callback registered, plus that context.
pub trait Entry: Send + Sync + 'static {
    /// Starts one run of the application.
    fn call(
        &self,
        ctx: Context,
        container: Arc<Container>,
    ) -> BoxFuture<'static, Result<(), TaskError>>;
}

impl<F, Fut> Entry for F
where
    F: Fn(Context, Arc<Container>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn call(
        &self,
        ctx: Context,
        container: Arc<Container>,
    ) -> BoxFuture<'static, Result<(), TaskError>> {
        Box::pin(self(ctx, container))
    }
}

/// Runs the entry point with the container bound to the task's context.
pub struct AppTask {
    entry: Box<dyn Entry>,
    container: Arc<Container>,
}

impl AppTask {
    /// Application task over `entry`, resolving dependencies from `container`.
    pub fn new(entry: impl Entry, container: Arc<Container>) -> Self {
        Self {
            entry: Box::new(entry),
            container,
        }
    }
}

#[async_trait]
impl Task for AppTask {
    fn name(&self) -> &str {
        ""
    }

    async fn run(&self, ctx: Context) -> Result<(), TaskError> {
        let _flush = FlushOnDrop(ctx.logger().clone());

        self.container.singleton(ctx.clone());
        self.entry.call(ctx, Arc::clone(&self.container)).await
    }
}

/// Flushes the logger when dropped.
struct FlushOnDrop(Logger);

impl Drop for FlushOnDrop {
    fn drop(&mut self) {
        let _ = self.0.sync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_entry_sees_task_context() {
        let container = Arc::new(Container::new());
        let outer = Context::default();
        container.singleton(outer.clone());

        let task = AppTask::new(
            |ctx: Context, deps: Arc<Container>| async move {
                let registered = deps.require::<Context>()?;
                // Same scope as the context handed to the entry point.
                ctx.cancel();
                assert!(registered.is_cancelled());
                Ok::<(), TaskError>(())
            },
            container.clone(),
        );

        let task_ctx = outer.child();
        task.run(task_ctx).await.unwrap();
        assert!(!outer.is_cancelled());
        assert!(container.context().unwrap().is_cancelled());
    }

    #[tokio::test]
    async fn test_entry_error_is_task_result() {
        let task = AppTask::new(
            |_ctx: Context, _deps: Arc<Container>| async {
                Err::<(), _>(TaskError::fail("disk full"))
            },
            Arc::new(Container::new()),
        );
        let err = task.run(Context::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(task.name(), "");
    }

    #[tokio::test]
    async fn test_entry_resolves_configured_dependency() {
        struct Greeting(&'static str);

        let container = Arc::new(Container::new());
        container.singleton(Greeting("hello"));

        let task = AppTask::new(
            |_ctx: Context, deps: Arc<Container>| async move {
                let greeting = deps.require::<Greeting>()?;
                if greeting.0 == "hello" {
                    Ok(())
                } else {
                    Err(TaskError::fail("wrong greeting"))
                }
            },
            container,
        );
        task.run(Context::default()).await.unwrap();
    }
}
