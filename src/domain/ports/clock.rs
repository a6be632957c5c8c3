//! Clock Port

use chrono::{DateTime, Utc};

/// Source of the current time, used to name backups
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
