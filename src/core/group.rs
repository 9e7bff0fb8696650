//! # Group: runs tasks under one cancellation scope and resolves one outcome.
//!
//! A [`Group`] owns a child scope of the context it was created from. Every
//! added [`TaskSpec`] runs as its own tokio task in that scope; the group
//! waits for all of them before returning.
//!
//! ## Teardown
//! ```text
//! task finishes ──► ExitPolicy::tears_down(&result)?
//!                       ├─ Exit (any result)         ─► cancel scope
//!                       ├─ Fail + Err                ─► cancel scope
//!                       └─ Fail + Ok
//!                            └─ last Fail task done? ─► cancel scope
//! ```
//! The first task that cancels the scope is the *trigger*; later triggers
//! change nothing. Cancelled tasks are still awaited.
//!
//! A task result is normalized before it counts:
//! - a tokio task that ends abnormally (a panic outside the task body) yields
//!   [`TaskError::Panicked`] for that task;
//! - `Canceled` returned while the scope is still live becomes
//!   [`TaskError::UnexpectedCancel`].
//!
//! ## Resolution
//! - the trigger failed → its error;
//! - otherwise the first error in spawn order among the tasks up to and
//!   including the trigger, else `Ok(())`;
//! - no task ever triggered (empty group) → `Ok(())`.
//!
//! So with `[app, signals]`: a signal makes `signals` the trigger and the
//! outcome is whatever `app` returned while winding down (usually
//! `Canceled`); an `app` that finishes first decides the outcome itself.
//!
//! ## Example
//! ```rust
//! use runvisor::{Context, ExitPolicy, Group, TaskError, TaskFn, TaskSpec};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut group = Group::new(&Context::default());
//! group.add(TaskSpec::new(
//!     TaskFn::arc("work", |_ctx: Context| async { Err::<(), _>(TaskError::fail("disk full")) }),
//!     ExitPolicy::Fail,
//! ));
//! group.add(TaskSpec::new(
//!     TaskFn::arc("guard", |ctx: Context| async move {
//!         ctx.cancelled().await;
//!         Err::<(), _>(TaskError::Canceled)
//!     }),
//!     ExitPolicy::Exit,
//! ));
//!
//! let outcome = group.run().await;
//! assert_eq!(outcome.unwrap_err().to_string(), "disk full");
//! # }
//! ```

use std::collections::HashMap;

use tokio::task::{Id, JoinError, JoinSet};
use tracing::{debug, warn, Instrument};

use crate::core::runner::{panic_message, run_once};
use crate::{context::Context, error::TaskError, policies::ExitPolicy, tasks::TaskSpec};

/// Tasks sharing one cancellation scope.
pub struct Group {
    scope: Context,
    specs: Vec<TaskSpec>,
}

impl Group {
    /// Creates an empty group whose scope is a child of `parent`.
    pub fn new(parent: &Context) -> Self {
        Self {
            scope: parent.child(),
            specs: Vec::new(),
        }
    }

    /// Adds a task; tasks start, in the order added, when [`Group::run`] is called.
    pub fn add(&mut self, spec: TaskSpec) -> &mut Self {
        self.specs.push(spec);
        self
    }

    /// The group's scope; cancelling it tears the group down.
    pub fn context(&self) -> &Context {
        &self.scope
    }

    /// Runs every task and resolves the outcome once all of them have returned.
    pub async fn run(self) -> Result<(), TaskError> {
        let Group { scope, specs } = self;
        let policies: Vec<ExitPolicy> = specs.iter().map(TaskSpec::exit).collect();
        let names: Vec<String> = specs.iter().map(|s| s.name().to_string()).collect();

        let mut set = JoinSet::new();
        let ids = spawn_tasks(&mut set, &scope, specs);

        let mut results: Vec<Option<Result<(), TaskError>>> =
            std::iter::repeat_with(|| None).take(policies.len()).collect();
        let mut pending_work = policies.iter().filter(|p| **p == ExitPolicy::Fail).count();
        let mut trigger: Option<usize> = None;

        while let Some(joined) = set.join_next_with_id().await {
            let (idx, res) = match joined {
                Ok((id, res)) => (ids[&id], res),
                Err(err) => {
                    let idx = ids[&err.id()];
                    warn!(task = %names[idx], error = %err, "task join failed");
                    (idx, Err(join_error(&names[idx], err)))
                }
            };
            let res = match res {
                Err(TaskError::Canceled) if !scope.is_cancelled() => {
                    Err(TaskError::UnexpectedCancel {
                        task: names[idx].clone(),
                    })
                }
                other => other,
            };

            let policy = policies[idx];
            if policy == ExitPolicy::Fail && res.is_ok() {
                pending_work -= 1;
            }
            let work_done = policy == ExitPolicy::Fail && res.is_ok() && pending_work == 0;

            if trigger.is_none() && (policy.tears_down(&res) || work_done) {
                debug!(task = %names[idx], ?policy, ok = res.is_ok(), "group teardown");
                trigger = Some(idx);
                scope.cancel();
            }
            results[idx] = Some(res);
        }

        resolve(results, trigger)
    }
}

/// Spawns one tokio task per spec and maps each tokio task id to its spawn index.
fn spawn_tasks(
    set: &mut JoinSet<Result<(), TaskError>>,
    scope: &Context,
    specs: Vec<TaskSpec>,
) -> HashMap<Id, usize> {
    let mut ids = HashMap::with_capacity(specs.len());
    for (idx, spec) in specs.into_iter().enumerate() {
        let ctx = scope.clone();
        let span = ctx.logger().span();
        let task = spec.task().clone();
        let handle = set.spawn(run_once(task, ctx).instrument(span));
        ids.insert(handle.id(), idx);
    }
    ids
}

/// Error for a task whose tokio task ended abnormally (a panic outside the task body).
fn join_error(task: &str, err: JoinError) -> TaskError {
    if err.is_panic() {
        TaskError::Panicked {
            task: task.to_string(),
            message: panic_message(err.into_panic().as_ref()),
        }
    } else {
        TaskError::fail(err)
    }
}

/// Picks the group outcome from per-task results (indexed in spawn order).
fn resolve(
    mut results: Vec<Option<Result<(), TaskError>>>,
    trigger: Option<usize>,
) -> Result<(), TaskError> {
    let Some(trigger) = trigger else {
        return Ok(());
    };
    if matches!(results[trigger], Some(Err(_))) {
        return results.swap_remove(trigger).unwrap_or(Ok(()));
    }
    results
        .into_iter()
        .take(trigger + 1)
        .flatten()
        .find(Result::is_err)
        .unwrap_or(Ok(()))
}
