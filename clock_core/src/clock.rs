//! Wall-clock sources
//!
//! The simulation never samples wall time itself. Only the tick detector and
//! the scoring coupler call [`Clock::read`].

use std::cell::Cell;
use std::fmt;

use chrono::{FixedOffset, Timelike, Utc};

use crate::error::ClockError;

/// IST offset from UTC in seconds (+05:30, no daylight saving)
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// An hour/minute pair read from a clock, always in range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClockReading {
    hour: u8,
    minute: u8,
}

impl ClockReading {
    pub fn new(hour: u32, minute: u32) -> Result<Self, ClockError> {
        if hour > 23 || minute > 59 {
            return Err(ClockError::OutOfRange { hour, minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Source of the current wall-clock reading
pub trait Clock {
    fn read(&self) -> Result<ClockReading, ClockError>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn read(&self) -> Result<ClockReading, ClockError> {
        (**self).read()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn read(&self) -> Result<ClockReading, ClockError> {
        (**self).read()
    }
}

/// System clock in India Standard Time, wrapping chrono
#[derive(Debug, Clone, Copy)]
pub struct IstClock {
    offset: FixedOffset,
}

impl IstClock {
    pub fn new() -> Result<Self, ClockError> {
        let offset = FixedOffset::east_opt(IST_OFFSET_SECS)
            .ok_or_else(|| ClockError::Unavailable("invalid IST offset".to_string()))?;
        Ok(Self { offset })
    }
}

impl Clock for IstClock {
    fn read(&self) -> Result<ClockReading, ClockError> {
        let now = Utc::now().with_timezone(&self.offset);
        ClockReading::new(now.hour(), now.minute())
    }
}

/// A clock stopped at one reading
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub ClockReading);

impl Clock for FixedClock {
    fn read(&self) -> Result<ClockReading, ClockError> {
        Ok(self.0)
    }
}

/// A clock whose reading is set by hand, for scripted runs
#[derive(Debug, Default)]
pub struct ManualClock {
    reading: Cell<ClockReading>,
    failing: Cell<bool>,
}

impl ManualClock {
    pub fn new(reading: ClockReading) -> Self {
        Self {
            reading: Cell::new(reading),
            failing: Cell::new(false),
        }
    }

    pub fn set(&self, reading: ClockReading) {
        self.reading.set(reading);
    }

    /// Make subsequent reads fail until cleared
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl Clock for ManualClock {
    fn read(&self) -> Result<ClockReading, ClockError> {
        if self.failing.get() {
            return Err(ClockError::Unavailable("manual clock failure".to_string()));
        }
        Ok(self.reading.get())
    }
}
