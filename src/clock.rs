//! Time source and timestamp formatting.
//!
//! The browser build formats with the viewer's locale through JS `Date`;
//! natively we use `time` with a fixed offset and the same day/month/year
//! layout the page shows for `vi-VN`.

use time::{OffsetDateTime, UtcOffset};

use crate::wish::ServerTimestamp;

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

/// Clock seam shared by the renderer and the local backend.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;

    /// The current time as display text.
    fn now_display(&self) -> String;

    /// A server timestamp as display text.
    fn format(&self, ts: ServerTimestamp) -> String;
}

/// Wall clock rendered at a fixed UTC offset.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    #[must_use]
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// Offsets outside the representable range fall back to UTC.
    #[must_use]
    pub fn from_offset_minutes(minutes: i16) -> Self {
        let offset = UtcOffset::from_whole_seconds(i32::from(minutes) * 60).unwrap_or(UtcOffset::UTC);
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        u64::try_from(nanos / 1_000_000).unwrap_or_default()
    }

    fn now_display(&self) -> String {
        display(OffsetDateTime::now_utc().to_offset(self.offset))
    }

    fn format(&self, ts: ServerTimestamp) -> String {
        match OffsetDateTime::from_unix_timestamp(ts.seconds) {
            Ok(at) => display(at.to_offset(self.offset)),
            Err(_) => ts.seconds.to_string(),
        }
    }
}

/// `HH:MM:SS D/M/YYYY`, the `vi-VN` locale layout.
#[must_use]
pub fn display(at: OffsetDateTime) -> String {
    format!(
        "{:02}:{:02}:{:02} {}/{}/{}",
        at.hour(),
        at.minute(),
        at.second(),
        at.day(),
        u8::from(at.month()),
        at.year()
    )
}
