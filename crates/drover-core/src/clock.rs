//! Time source seam.
//!
//! The backend never calls `Utc::now()` directly; it asks its [`Clock`].
//! Tests substitute a frozen clock to simulate deadline conditions without
//! sleeping.

use chrono::{DateTime, Utc};

/// A source of "now". Object-safe so backends can hold `Arc<dyn Clock>`.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
