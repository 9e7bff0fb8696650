//! Long-running service: ticks until SIGINT/SIGTERM.
//!
//! ```text
//! cargo run --example service -- --interval-ms 500
//! cargo run --example service -- --fail-after 3     # exits with 1
//! cargo run --example service -- --help             # exits with 2
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use runvisor::{Container, Context, LogArgs, TaskError};
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Ticking demo service")]
struct Cli {
    /// Tick interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Fail after this many ticks.
    #[arg(long)]
    fail_after: Option<u64>,

    #[command(flatten)]
    log: LogArgs,
}

struct Ticks(std::sync::atomic::AtomicU64);

async fn serve(ctx: Context, deps: Arc<Container>) -> Result<(), TaskError> {
    let cli = Cli::try_parse().inspect_err(|err| {
        let _ = err.print();
    })?;
    let ticks = deps.require::<Ticks>()?;
    let mut interval = tokio::time::interval(Duration::from_millis(cli.interval_ms));

    loop {
        tokio::select! {
            _ = ctx.cancelled() => {
                info!("shutting down");
                return Err(TaskError::Canceled);
            }
            _ = interval.tick() => {
                let n = ticks.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed) + 1;
                info!(tick = n, "tick");
                if cli.fail_after.is_some_and(|limit| n >= limit) {
                    return Err(TaskError::fail(format!("gave up after {n} ticks")));
                }
            }
        }
    }
}

fn main() {
    let argv0 = std::env::args().next().unwrap_or_default();
    runvisor::service(
        &argv0,
        |c: &Container| c.singleton(Ticks(Default::default())),
        serve,
    );
}
