use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use clap::Args;
use deadline_core::{Config, Snapshot, SystemClock, Ticker};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{mpsc, watch};

use super::print_frame;

/// Quiet period after a file event before the config is re-read, so a save
/// that arrives as several events is read once, after it is complete.
const SETTLE: Duration = Duration::from_millis(50);

/// Modification-time check used only when no file watcher can be started.
const POLL_FALLBACK: Duration = Duration::from_millis(500);

#[derive(Args)]
pub struct WatchArgs {
    /// Print one JSON object per line instead of the label
    #[arg(long)]
    json: bool,
    /// Stop after this many frames
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    count: Option<u64>,
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = Config::path()?;
    let config = Config::load_from(&path)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch_loop(path, config, args))
}

async fn watch_loop(
    path: PathBuf,
    config: Config,
    args: WatchArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = watch::channel(Snapshot::from(&config));
    let reloader = match ConfigWatcher::start(&path) {
        Ok(watcher) => tokio::spawn(reload_on_events(path, tx, watcher)),
        Err(e) => {
            tracing::warn!(error = %e, "file watcher unavailable, polling config instead");
            tokio::spawn(reload_on_mtime(path, tx))
        }
    };

    let ticker = Ticker::new(SystemClock, Duration::from_secs(config.refresh_secs));
    tracing::debug!(period = ?ticker.period(), "watching countdown");

    let mut write_error = None;
    let mut printed = 0u64;
    let emitted = ticker
        .run(rx, shutdown_signal(), |frame| {
            if let Err(e) = print_frame(frame, args.json) {
                write_error = Some(e);
                return ControlFlow::Break(());
            }
            printed += 1;
            if args.count.is_some_and(|limit| printed >= limit) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .await;

    reloader.abort();
    tracing::debug!(emitted, "watch finished");
    match write_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// `notify` watcher on the config file's directory.
///
/// The directory is watched rather than the file so that editors which save
/// by renaming a new file into place keep being seen.
struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    events: mpsc::UnboundedReceiver<notify::Result<Event>>,
}

impl ConfigWatcher {
    fn start(path: &Path) -> notify::Result<Self> {
        let (tx, events) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(dir = %dir.display(), "watching config directory");
        Ok(Self {
            _watcher: watcher,
            events,
        })
    }
}

fn touches_config(event: &Event, path: &Path) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == path.file_name())
}

/// Publish a new snapshot whenever the watcher reports a change to the
/// config file.
///
/// A change to `refresh_secs` only applies after restarting `watch`.
async fn reload_on_events(
    path: PathBuf,
    tx: watch::Sender<Snapshot>,
    mut watcher: ConfigWatcher,
) {
    while let Some(res) = watcher.events.recv().await {
        match res {
            Ok(event) if touches_config(&event, &path) => {}
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(error = %e, "config watcher error");
                continue;
            }
        }

        tokio::time::sleep(SETTLE).await;
        while watcher.events.try_recv().is_ok() {}
        if tx.is_closed() {
            break;
        }
        publish(&path, &tx);
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

async fn reload_on_mtime(path: PathBuf, tx: watch::Sender<Snapshot>) {
    let mut last = modified(&path);
    let mut interval = tokio::time::interval(POLL_FALLBACK);
    loop {
        interval.tick().await;
        if tx.is_closed() {
            break;
        }
        let current = modified(&path);
        if current.is_none() || current == last {
            continue;
        }
        last = current;
        publish(&path, &tx);
    }
}

fn publish(path: &Path, tx: &watch::Sender<Snapshot>) {
    match Config::load_from(path) {
        Ok(config) => {
            let next = Snapshot::from(&config);
            let changed = tx.send_if_modified(|snapshot| {
                if *snapshot == next {
                    return false;
                }
                *snapshot = next;
                true
            });
            if changed {
                tracing::info!(path = %path.display(), "config reloaded");
            }
        }
        Err(e) => tracing::warn!(error = %e, "keeping previous config"),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
