mod evaluator;
mod feeling;
mod label;
mod window;

pub use evaluator::{
    evaluate, Breakdown, Bucket, DisplayState, Percent, PRECISE_PERCENT_ABOVE, SEC_IN_DAY,
    SEC_IN_HOUR, SEC_IN_MINUTE,
};
pub use feeling::{FeelingTier, FEELING_THRESHOLDS};
pub use label::{format_template, render, LabelTemplates, Rendered};
pub use window::{TimeWindow, UnixTimestamp};
