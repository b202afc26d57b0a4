//! Time keeping module

use chrono::{NaiveDate, NaiveDateTime};
use embassy_time::Instant;

/// A wall-clock time paired with the uptime instant it was observed at.
pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: NaiveDateTime::UNIX_EPOCH,
            instant: Instant::from_ticks(0),
        }
    }
}

impl TimeReference {
    /// Create new time reference from NaiveDateTime
    pub fn from_datetime(time: NaiveDateTime) -> Self {
        Self {
            time,
            instant: Instant::now(),
        }
    }

    /// Create new time reference from Current Time Service data.
    ///
    /// Returns `None` when the peer sent fewer bytes than the CTS exact-time
    /// layout carries or fields outside their calendar ranges.
    pub fn from_cts_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 9 {
            return None;
        }

        let year = u16::from_le_bytes([bytes[0], bytes[1]]) as i32;
        let month = bytes[2] as u32;
        let day = bytes[3] as u32;
        let hour = bytes[4] as u32;
        let min = bytes[5] as u32;
        let sec = bytes[6] as u32;
        // bytes[7] carries the day of week, which the date already implies
        let milli = bytes[8] as u32 * 1000 / 256; // Convert fractions_256 to milliseconds

        let time = NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_milli_opt(hour, min, sec, milli)?;

        Some(Self {
            time,
            instant: Instant::now(),
        })
    }
}

/// Wall-clock time derived from the reference plus elapsed uptime.
pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init() -> Self {
        Self {
            reference: TimeReference::default(),
        }
    }

    /// Get current time
    pub fn get_time(&self) -> NaiveDateTime {
        let now = Instant::now();
        NaiveDateTime::from_timestamp_micros(
            self.reference.time.timestamp_micros()
                + now.duration_since(self.reference.instant).as_micros() as i64,
        )
        .unwrap()
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }
}
