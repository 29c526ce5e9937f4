#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use financial_entities::Clock;

/// Clock that advances one minute every time it is read.
#[derive(Debug)]
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }

    /// Returns the instant the next `now()` call will report.
    pub fn peek(&self) -> DateTime<Utc> {
        *self.next.lock().expect("lock clock")
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().expect("lock clock");
        let current = *next;
        *next = current + Duration::minutes(1);
        current
    }
}

pub fn new_year() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

pub fn stepping_clock() -> SteppingClock {
    SteppingClock::starting_at(new_year())
}
