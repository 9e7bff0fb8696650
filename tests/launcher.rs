mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use runvisor::{
    Container, Context, ExitAction, Launcher, RunConfig, Signal, SignalSource, TaskError,
};

use common::capture_logs;

fn launcher(cfg: RunConfig) -> (tokio::sync::mpsc::Sender<Signal>, Launcher) {
    let (tx, source) = SignalSource::channel();
    (tx, Launcher::builder(cfg).with_signals(source).build())
}

async fn wait_for_cancel(ctx: Context) -> Result<(), TaskError> {
    ctx.cancelled().await;
    Err(TaskError::Canceled)
}

#[tokio::test(start_paused = true)]
async fn test_service_clean_return_exits_normally() {
    let (logs, _guard) = capture_logs();
    let (_tx, launcher) = launcher(RunConfig::service("/usr/bin/svc"));

    let report = launcher
        .run(|_ctx: Context, _deps: Arc<Container>| async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok::<(), TaskError>(())
        })
        .await;

    assert!(report.outcome.is_ok());
    assert_eq!(report.action, ExitAction::Return);
    assert!(logs.lines_with("ERROR").is_empty(), "{}", logs.text());
}

#[tokio::test(start_paused = true)]
async fn test_service_error_logs_once_and_exits_with_one() {
    let (logs, _guard) = capture_logs();
    let (_tx, launcher) = launcher(RunConfig::service("/usr/bin/svc"));

    let report = launcher
        .run(|_ctx: Context, _deps: Arc<Container>| async {
            Err::<(), _>(TaskError::fail("disk full"))
        })
        .await;

    assert_eq!(report.outcome.unwrap_err().to_string(), "disk full");
    assert_eq!(report.action, ExitAction::Exit(1));

    let errors = logs.lines_with("ERROR");
    assert_eq!(errors.len(), 1, "{}", logs.text());
    assert!(errors[0].contains("Application returned error: disk full"));
    assert!(errors[0].contains("name=svc"), "{}", errors[0]);
}

#[tokio::test(start_paused = true)]
async fn test_tool_interrupted_by_signal_returns_normally() {
    let (logs, _guard) = capture_logs();
    let (tx, launcher) = launcher(RunConfig::tool("tool"));

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        let _ = tx.send(Signal::Interrupt).await;
    });

    let report = launcher
        .run(|ctx: Context, _deps: Arc<Container>| wait_for_cancel(ctx))
        .await;

    assert!(matches!(report.outcome, Err(TaskError::Canceled)));
    assert_eq!(report.action, ExitAction::Return);
    assert_eq!(
        logs.lines_with("Signal received, terminating...").len(),
        1,
        "{}",
        logs.text()
    );
    assert!(logs.lines_with("ERROR").is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_service_wound_down_by_signal() {
    let (_logs, _guard) = capture_logs();
    let (tx, launcher) = launcher(RunConfig::service("svc"));
    let observed = Arc::new(AtomicUsize::new(0));
    let seen = observed.clone();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        let _ = tx.send(Signal::Terminate).await;
    });

    let report = launcher
        .run(move |ctx: Context, _deps: Arc<Container>| {
            let seen = seen.clone();
            async move {
                ctx.cancelled().await;
                seen.fetch_add(1, Ordering::SeqCst);
                // Graceful cleanup still completes before the run settles.
                tokio::time::sleep(Duration::from_millis(20)).await;
                seen.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(TaskError::Canceled)
            }
        })
        .await;

    assert_eq!(observed.load(Ordering::SeqCst), 2);
    assert!(matches!(report.outcome, Err(TaskError::Canceled)));
    assert_eq!(report.action, ExitAction::Return);
}

#[tokio::test(start_paused = true)]
async fn test_help_requested_exits_with_two_silently() {
    let (logs, _guard) = capture_logs();
    let (_tx, launcher) = launcher(RunConfig::tool("tool"));

    let report = launcher
        .run(|_ctx: Context, _deps: Arc<Container>| async {
            Err::<(), _>(TaskError::HelpRequested)
        })
        .await;

    assert!(matches!(report.outcome, Err(TaskError::HelpRequested)));
    assert_eq!(report.action, ExitAction::Exit(2));
    assert!(logs.text().is_empty(), "{}", logs.text());
}

#[tokio::test(start_paused = true)]
async fn test_configure_runs_once_and_context_is_registered() {
    struct Settings(&'static str);

    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let (_tx, source) = SignalSource::channel();
    let launcher = Launcher::builder(RunConfig::tool("tool"))
        .with_signals(source)
        .configure(move |c: &Container| {
            counted.fetch_add(1, Ordering::SeqCst);
            c.singleton(Settings("ready"));
        })
        .build();
    let container = launcher.container().clone();

    let report = launcher
        .run(|ctx: Context, deps: Arc<Container>| async move {
            let settings = deps.require::<Settings>()?;
            let registered = deps.context().ok_or(TaskError::fail("no context"))?;
            ctx.cancel();
            if settings.0 == "ready" && registered.is_cancelled() {
                Ok(())
            } else {
                Err(TaskError::fail("unexpected dependencies"))
            }
        })
        .await;

    assert!(report.outcome.is_ok(), "{:?}", report.outcome);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(container.contains::<Context>());
}

#[tokio::test(start_paused = true)]
async fn test_missing_dependency_is_application_error() {
    struct Database;

    let (_logs, _guard) = capture_logs();
    let (_tx, launcher) = launcher(RunConfig::service("svc"));

    let report = launcher
        .run(|_ctx: Context, deps: Arc<Container>| async move {
            deps.require::<Database>()?;
            Ok::<(), TaskError>(())
        })
        .await;

    assert!(matches!(
        report.outcome,
        Err(TaskError::MissingDependency { .. })
    ));
    assert_eq!(report.action, ExitAction::Exit(1));
}

#[tokio::test(start_paused = true)]
async fn test_panicking_entry_is_application_error() {
    let (logs, _guard) = capture_logs();
    let (_tx, launcher) = launcher(RunConfig::tool("tool"));

    let report = launcher
        .run(|ctx: Context, _deps: Arc<Container>| async move {
            if !ctx.is_cancelled() {
                panic!("boom");
            }
            Ok::<(), TaskError>(())
        })
        .await;

    assert!(matches!(report.outcome, Err(TaskError::Panicked { .. })));
    assert_eq!(report.action, ExitAction::Exit(1));
    assert_eq!(logs.lines_with("ERROR").len(), 1, "{}", logs.text());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_reported_without_cancellation_is_failure() {
    let (logs, _guard) = capture_logs();
    let (_tx, launcher) = launcher(RunConfig::service("svc"));

    let report = launcher
        .run(|ctx: Context, _deps: Arc<Container>| async move {
            if ctx.is_cancelled() {
                return Err(TaskError::fail("cancelled too early"));
            }
            Err::<(), _>(TaskError::Canceled)
        })
        .await;

    assert!(matches!(
        report.outcome,
        Err(TaskError::UnexpectedCancel { .. })
    ));
    assert_eq!(report.action, ExitAction::Exit(1));
    assert_eq!(logs.lines_with("ERROR").len(), 1, "{}", logs.text());
}

#[tokio::test(start_paused = true)]
async fn test_shared_container_is_used() {
    struct Marker(u32);

    let shared = Arc::new(Container::new());
    shared.singleton(Marker(7));

    let (_tx, source) = SignalSource::channel();
    let launcher = Launcher::builder(RunConfig::tool("tool"))
        .with_signals(source)
        .with_container(shared.clone())
        .build();
    assert!(Arc::ptr_eq(launcher.container(), &shared));

    let report = launcher
        .run(|_ctx: Context, deps: Arc<Container>| async move {
            match deps.require::<Marker>()?.0 {
                7 => Ok(()),
                other => Err(TaskError::fail(format!("marker {other}"))),
            }
        })
        .await;

    assert!(report.outcome.is_ok(), "{:?}", report.outcome);
    assert!(shared.contains::<Context>());
}
