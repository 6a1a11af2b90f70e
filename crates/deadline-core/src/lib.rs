//! # Deadline Timer Core Library
//!
//! This library provides the core logic for the Deadline Timer countdown
//! indicator. Everything a panel host needs lives here; the CLI binary and
//! any desktop widget are thin layers that resolve the configured window,
//! call the evaluator once per second and draw the result.
//!
//! ## Architecture
//!
//! - **Countdown**: pure evaluation of `(window, now)` into a display state,
//!   plus feeling tiers and label rendering
//! - **Dates**: resolution of configured dates (UTC arrays or `YYYY-MM-DD`)
//! - **Storage**: TOML-based configuration
//! - **Ticker**: tokio-driven periodic refresh with immediate re-evaluation
//!   on configuration changes
//!
//! ## Key Components
//!
//! - [`evaluate`]: the countdown evaluator
//! - [`TimeWindow`]: validated begin/end pair
//! - [`Config`]: application configuration management
//! - [`Ticker`]: periodic refresh loop

pub mod countdown;
pub mod dates;
pub mod error;
pub mod storage;
pub mod ticker;

pub use countdown::{
    evaluate, render, Bucket, DisplayState, FeelingTier, LabelTemplates, Percent, Rendered,
    TimeWindow, UnixTimestamp,
};
pub use dates::{DateSpec, DateZone};
pub use error::{ConfigError, CoreError, DateError, WindowError};
pub use storage::{BarPosition, Config};
pub use ticker::{Clock, FixedClock, Frame, Snapshot, SystemClock, Ticker};
