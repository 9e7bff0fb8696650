//! Task policies.
//!
//! ## Contents
//! - [`ExitPolicy`] what a task's completion means for its group (fail / exit)
//!
//! ## Quick wiring
//! ```text
//! TaskSpec { task: TaskRef, exit: ExitPolicy }
//!      └─► core::group::Group uses:
//!           - exit.tears_down(&result) to decide whether to cancel siblings
//! ```

mod exit;

pub use exit::ExitPolicy;
