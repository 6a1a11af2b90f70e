use serde::{Deserialize, Serialize};

use crate::error::WindowError;

/// Unix timestamp in whole seconds.
pub type UnixTimestamp = i64;

/// The begin/end interval being counted down.
///
/// Always satisfies `end > begin` with a length that fits in an `i64`; the
/// only ways to build one check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeWindow {
    begin: UnixTimestamp,
    end: UnixTimestamp,
}

impl TimeWindow {
    /// Build a window from an already ordered pair.
    pub fn new(begin: UnixTimestamp, end: UnixTimestamp) -> Result<Self, WindowError> {
        if end <= begin {
            return Err(WindowError::Empty(begin));
        }
        if end.checked_sub(begin).is_none() {
            return Err(WindowError::TooLong { begin, end });
        }
        Ok(Self { begin, end })
    }

    /// Build a window from two configured instants in either order.
    ///
    /// The earlier instant becomes `begin`. Equal instants are rejected.
    pub fn from_instants(a: UnixTimestamp, b: UnixTimestamp) -> Result<Self, WindowError> {
        if a == b {
            return Err(WindowError::Empty(a));
        }
        Self::new(a.min(b), a.max(b))
    }

    pub fn begin(&self) -> UnixTimestamp {
        self.begin
    }

    pub fn end(&self) -> UnixTimestamp {
        self.end
    }

    /// Length of the window in seconds. Always positive.
    pub fn period(&self) -> i64 {
        self.end - self.begin
    }
}

#[derive(Deserialize)]
struct RawWindow {
    begin: UnixTimestamp,
    end: UnixTimestamp,
}

impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawWindow::deserialize(deserializer)?;
        TimeWindow::new(raw.begin, raw.end).map_err(serde::de::Error::custom)
    }
}
