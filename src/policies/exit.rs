//! # Exit policies for grouped tasks.
//!
//! [`ExitPolicy`] decides what a task's completion means for its siblings.
//!
//! - [`ExitPolicy::Fail`] an error cancels the group and becomes the outcome;
//!   a clean return leaves the group running (see below).
//! - [`ExitPolicy::Exit`] any completion, clean or not, cancels the group.
//!
//! ## Choosing the right policy
//! **Main work of a service** (should run until told to stop):
//! ```text
//! ExitPolicy::Fail  → error → group cancelled, siblings wind down, error reported
//! ```
//!
//! **Guards and short-lived work** (signal watcher, a tool's main function):
//! ```text
//! ExitPolicy::Exit  → returns → group cancelled immediately
//! ```
//!
//! When every `Fail` task of a group has returned cleanly, the group cancels
//! the remaining `Exit` tasks: there is no work left for them to guard.

/// What a task's completion does to the group it runs in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Cancel the group only if the task fails (default).
    #[default]
    Fail,
    /// Cancel the group whenever the task returns.
    Exit,
}

impl ExitPolicy {
    /// Whether a task under this policy that finished with `res` tears its group down.
    #[inline]
    pub fn tears_down<E>(self, res: &Result<(), E>) -> bool {
        match self {
            ExitPolicy::Fail => res.is_err(),
            ExitPolicy::Exit => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_tears_down_on_error_only() {
        assert!(!ExitPolicy::Fail.tears_down::<()>(&Ok(())));
        assert!(ExitPolicy::Fail.tears_down(&Err(())));
    }

    #[test]
    fn test_exit_always_tears_down() {
        assert!(ExitPolicy::Exit.tears_down::<()>(&Ok(())));
        assert!(ExitPolicy::Exit.tears_down(&Err(())));
    }

    #[test]
    fn test_default_is_fail() {
        assert_eq!(ExitPolicy::default(), ExitPolicy::Fail);
    }
}
