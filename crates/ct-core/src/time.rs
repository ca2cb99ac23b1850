//! Simulation time model.
//!
//! # Design
//!
//! Two clocks run side by side:
//!
//! - [`Tick`] counts iterations of the controller loop.  Pacing decisions
//!   ("dispatch again in 4 ticks") use ticks so they are exact and
//!   independent of the speed multiplier.
//! - [`SimDate`] is the simulated calendar instant, held as Unix
//!   milliseconds.  [`SimClock`] advances it by the wall-clock delta of each
//!   tick multiplied by the current speed factor:
//!
//!   sim_delta_ms = wall_delta_ms * speed
//!
//! Calendar parsing and formatting go through `chrono`; a [`SimDate`] is a
//! `NaiveDateTime` read as UTC.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::CtError;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute controller tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimDate ───────────────────────────────────────────────────────────────────

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted `parse` layouts with a time part, most specific first.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// A simulated calendar instant (UTC), millisecond resolution.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SimDate(NaiveDateTime);

impl SimDate {
    /// Instant `ms` milliseconds after the Unix epoch, saturating at the
    /// ends of the representable range.
    pub fn from_unix_millis(ms: i64) -> Self {
        match DateTime::from_timestamp_millis(ms) {
            Some(dt) => Self(dt.naive_utc()),
            None if ms < 0 => Self(NaiveDateTime::MIN),
            None => Self(NaiveDateTime::MAX),
        }
    }

    #[inline]
    pub fn unix_millis(self) -> i64 {
        self.0.and_utc().timestamp_millis()
    }

    /// Build a date from calendar components, `None` if they name no
    /// real instant.
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, min, sec)
            .map(Self)
    }

    /// Return the instant `ms` milliseconds after `self`.
    pub fn add_millis(self, ms: i64) -> Self {
        let shifted = TimeDelta::try_milliseconds(ms).and_then(|d| self.0.checked_add_signed(d));
        match shifted {
            Some(dt) => Self(dt),
            None if ms < 0 => Self(NaiveDateTime::MIN),
            None => Self(NaiveDateTime::MAX),
        }
    }

    /// Milliseconds from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn millis_since(self, earlier: SimDate) -> i64 {
        self.0.signed_duration_since(earlier.0).num_milliseconds()
    }

    /// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD HH:MM:SS`
    /// (a `T` separator is accepted too).
    pub fn parse(s: &str) -> Result<Self, CtError> {
        let s = s.trim();
        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .map(|d| d.and_time(NaiveTime::MIN))
            })
            .map(Self)
            .ok_or_else(|| CtError::Parse(format!("invalid date {s:?}: expected YYYY-MM-DD[ HH:MM[:SS]]")))
    }

    /// Break into `(year, month, day, hour, minute, second)`.
    pub fn components(self) -> (i32, u32, u32, u32, u32, u32) {
        let d = self.0;
        (d.year(), d.month(), d.day(), d.hour(), d.minute(), d.second())
    }
}

impl fmt::Display for SimDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl Serialize for SimDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SimDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        SimDate::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Advances the simulated date at wall-clock rate scaled by `speed`.
#[derive(Clone, Debug)]
pub struct SimClock {
    now:       SimDate,
    speed:     f32,
    last_wall: Option<Instant>,
    /// Sub-millisecond remainder carried between advances so slow speeds
    /// do not lose time to truncation.
    carry:     f64,
}

impl SimClock {
    /// Create a clock at `epoch` running at `speed`.
    pub fn new(epoch: SimDate, speed: f32) -> Self {
        Self { now: epoch, speed, last_wall: None, carry: 0.0 }
    }

    /// Reset the simulated date to `epoch` and restart wall-clock tracking.
    pub fn initialize(&mut self, epoch: SimDate) {
        self.now       = epoch;
        self.last_wall = Some(Instant::now());
        self.carry     = 0.0;
    }

    #[inline]
    pub fn now(&self) -> SimDate {
        self.now
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Change the multiplier.  Negative and non-finite factors are clamped
    /// to zero (a paused clock).
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
    }

    /// Advance by the wall time elapsed since the previous call.
    ///
    /// The first call only starts wall-clock tracking and returns zero.
    /// Returns the simulated milliseconds added.
    pub fn advance(&mut self) -> i64 {
        let wall_now = Instant::now();
        let delta = match self.last_wall.replace(wall_now) {
            Some(prev) => wall_now.duration_since(prev),
            None       => Duration::ZERO,
        };
        self.advance_by(delta)
    }

    /// Advance by an explicit wall-clock delta.  Returns the simulated
    /// milliseconds added.
    pub fn advance_by(&mut self, wall: Duration) -> i64 {
        let scaled = wall.as_micros() as f64 / 1_000.0 * self.speed as f64 + self.carry;
        let whole  = scaled.floor();
        self.carry = scaled - whole;
        let ms = whole as i64;
        self.now = self.now.add_millis(ms);
        ms
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x{})", self.now, self.speed)
    }
}
