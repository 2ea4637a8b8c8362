//! Logical temporal value.
//!
//! [`UtcInstant`] counts milliseconds since the Unix epoch over the whole
//! `i64` range, so every integer a Date or Timestamp field can carry decodes
//! to an instant. Sub-millisecond precision is kept alongside so that a Date
//! can still reject instants a few nanoseconds past midnight.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

const NANOS_PER_MILLI: u32 = 1_000_000;

/// Point on the UTC time line, no timezone attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtcInstant {
    millis: i64,
    /// Always below one millisecond.
    nanos: u32,
}

impl UtcInstant {
    pub const EPOCH: UtcInstant = UtcInstant::from_millis(0);
    pub const MIN: UtcInstant = UtcInstant::from_millis(i64::MIN);
    pub const MAX: UtcInstant = UtcInstant {
        millis: i64::MAX,
        nanos: NANOS_PER_MILLI - 1,
    };

    pub const fn from_millis(millis: i64) -> Self {
        Self { millis, nanos: 0 }
    }

    /// Returns `None` when `nanos` is a millisecond or more.
    pub const fn from_millis_and_nanos(millis: i64, nanos: u32) -> Option<Self> {
        if nanos < NANOS_PER_MILLI {
            Some(Self { millis, nanos })
        } else {
            None
        }
    }

    /// Whole milliseconds since the epoch, rounded towards negative infinity.
    pub const fn millis(self) -> i64 {
        self.millis
    }

    /// Nanoseconds past [`millis`](Self::millis).
    pub const fn sub_millis_nanos(self) -> u32 {
        self.nanos
    }

    /// Whole days since the epoch, rounded towards negative infinity.
    pub const fn days(self) -> i64 {
        self.millis.div_euclid(crate::logical::MILLIS_PER_DAY)
    }

    /// Milliseconds since the UTC midnight starting this instant's day.
    pub const fn millis_of_day(self) -> i64 {
        self.millis.rem_euclid(crate::logical::MILLIS_PER_DAY)
    }

    pub const fn is_midnight(self) -> bool {
        self.millis_of_day() == 0 && self.nanos == 0
    }

    /// Calendar form, when chrono can represent it (roughly ±262,000 years).
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.millis)?
            .checked_add_signed(Duration::nanoseconds(i64::from(self.nanos)))
    }
}

impl From<DateTime<Utc>> for UtcInstant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            millis: dt.timestamp_millis(),
            nanos: dt.timestamp_subsec_nanos() % NANOS_PER_MILLI,
        }
    }
}

impl From<&DateTime<Utc>> for UtcInstant {
    fn from(dt: &DateTime<Utc>) -> Self {
        Self::from(*dt)
    }
}

impl fmt::Display for UtcInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{} ms since epoch", self.millis),
        }
    }
}
