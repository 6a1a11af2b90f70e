//! Periodic countdown refresh.
//!
//! The evaluator is a pure function; this module supplies the repeating
//! schedule around it. A [`Ticker`] re-evaluates on every interval tick and
//! immediately whenever a new [`Snapshot`] is published on its watch
//! channel. The sink decides whether to keep going, the same way a host
//! timer callback returns a continue/stop flag.

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::countdown::{
    evaluate, render, DisplayState, LabelTemplates, Rendered, TimeWindow, UnixTimestamp,
};
use crate::storage::{BarPosition, Config};

/// Source of "now" in whole Unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> UnixTimestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UnixTimestamp {
        crate::dates::now_timestamp()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub UnixTimestamp);

impl Clock for FixedClock {
    fn now(&self) -> UnixTimestamp {
        self.0
    }
}

/// Everything one evaluation needs, swapped as a unit on config changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub window: Option<TimeWindow>,
    pub labels: LabelTemplates,
    pub bar_position: BarPosition,
}

impl Snapshot {
    pub fn new(window: Option<TimeWindow>, labels: LabelTemplates) -> Self {
        Self {
            window,
            labels,
            bar_position: BarPosition::default(),
        }
    }

    pub fn with_bar_position(mut self, bar_position: BarPosition) -> Self {
        self.bar_position = bar_position;
        self
    }

    /// Evaluate and render for `now`.
    pub fn frame(&self, now: UnixTimestamp) -> Frame {
        let state = evaluate(self.window, now);
        Frame {
            at: now,
            rendered: render(&state, &self.labels),
            state,
            bar_position: self.bar_position,
        }
    }
}

impl From<&Config> for Snapshot {
    fn from(config: &Config) -> Self {
        Self::new(config.evaluable_window(), config.labels.clone())
            .with_bar_position(config.bar_position)
    }
}

/// One evaluated instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub at: UnixTimestamp,
    pub state: DisplayState,
    pub rendered: Rendered,
    pub bar_position: BarPosition,
}

/// Repeating evaluation driven by a tokio interval.
#[derive(Debug, Clone)]
pub struct Ticker<C: Clock> {
    clock: C,
    period: Duration,
}

impl<C: Clock> Ticker<C> {
    /// Zero periods are raised to one second.
    pub fn new(clock: C, period: Duration) -> Self {
        let period = if period.is_zero() {
            Duration::from_secs(1)
        } else {
            period
        };
        Self { clock, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Emit frames until the sink breaks, `shutdown` resolves, or the
    /// snapshot sender is dropped. Returns the number of frames emitted.
    ///
    /// The first frame is emitted without waiting for a full period.
    pub async fn run<S, F>(
        &self,
        mut snapshots: watch::Receiver<Snapshot>,
        shutdown: S,
        mut sink: F,
    ) -> u64
    where
        S: Future<Output = ()>,
        F: FnMut(&Frame) -> ControlFlow<()>,
    {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut emitted = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::debug!(emitted, "ticker shut down");
                    break;
                }
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        tracing::debug!(emitted, "snapshot source closed");
                        break;
                    }
                    tracing::debug!("snapshot changed, re-evaluating");
                }
                _ = interval.tick() => {}
            }

            let frame = snapshots.borrow_and_update().frame(self.clock.now());
            tracing::trace!(at = frame.at, label = %frame.rendered.text, "frame");
            emitted += 1;
            if sink(&frame).is_break() {
                break;
            }
        }
        emitted
    }
}
