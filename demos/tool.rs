//! Short-lived tool: counts down and exits, or stops early on Ctrl-C.
//!
//! ```text
//! cargo run --example tool -- --from 3
//! cargo run --example tool -- --from 0     # exits with 1
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use runvisor::{Container, Context, LogArgs, TaskError};
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Countdown demo tool")]
struct Cli {
    /// Number to count down from.
    #[arg(long, default_value_t = 5)]
    from: u32,

    #[command(flatten)]
    log: LogArgs,
}

async fn countdown(ctx: Context, _deps: Arc<Container>) -> Result<(), TaskError> {
    let cli = Cli::try_parse().inspect_err(|err| {
        let _ = err.print();
    })?;
    if cli.from == 0 {
        return Err(TaskError::fail("nothing to count"));
    }

    for n in (1..=cli.from).rev() {
        info!(remaining = n, "counting");
        tokio::select! {
            _ = ctx.cancelled() => return Err(TaskError::Canceled),
            _ = tokio::time::sleep(Duration::from_secs(1)) => {}
        }
    }
    info!("done");
    Ok(())
}

fn main() {
    let argv0 = std::env::args().next().unwrap_or_default();
    runvisor::tool(&argv0, |_: &Container| {}, countdown);
}
