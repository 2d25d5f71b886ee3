//! Past-deadline client simulator.
//!
//! Deadline-enforcement tests need a client that has already exceeded its
//! execution window. Rather than sleeping, the simulator pins the backend's
//! soft deadline to a fixed timestamp and freezes its clock one second past
//! it.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use drover_core::{Client, Clock, Config, ExecBackend, SystemTempFiles};

use crate::fake_process::ForbiddenSpawner;

/// A [`Clock`] that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FrozenClock(DateTime<Utc>);

impl FrozenClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The fixed soft deadline used by the simulator.
pub fn soft_deadline() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 1, 2, 3, 4, 6).unwrap()
}

/// Put an existing client past its deadline: arm the backend's soft deadline
/// and freeze its clock one second later.
pub fn push_past_deadline(client: &mut Client) {
    let deadline = soft_deadline();
    let backend = client.backend_mut();
    backend.set_soft_deadline(Some(deadline));
    backend.set_clock(Arc::new(FrozenClock::at(deadline + Duration::seconds(1))));
}

/// A freshly built client that is already past its deadline. Uses default
/// config and a spawner that forbids real processes; tests exercising the
/// post-deadline spawn path should build their own client via
/// [`TestSandbox::client_with`](crate::sandbox::TestSandbox::client_with)
/// and call [`push_past_deadline`] on it.
pub fn client_past_deadline() -> Client {
    let backend = ExecBackend::new(
        Arc::new(ForbiddenSpawner),
        Arc::new(FrozenClock::at(soft_deadline())),
        Arc::new(SystemTempFiles),
    );
    let mut client = Client::new(Config::defaults(), backend);
    push_past_deadline(&mut client);
    client
}
