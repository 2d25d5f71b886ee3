//! Past-deadline simulator harness.
//!
//! # What this covers
//!
//! - **Simulator offset**: the simulated client's backend reports "now" as
//!   exactly one second after its soft deadline.
//! - **Enforcement**: a past-deadline backend refuses to run commands with
//!   `DeadlineExceeded`, before anything is spawned.
//! - **Arming**: `Client::arm_deadline` turns the configured budget into a
//!   concrete deadline counted from the backend's clock, saturating on
//!   budgets too large to represent.
//!
//! # Running
//!
//! ```sh
//! cargo test --test deadline_harness
//! ```

use std::sync::Arc;

use chrono::Duration;
use drover_core::Error;
use drover_testkit::{
    capture_streams, client_past_deadline, push_past_deadline, soft_deadline, FrozenClock,
    RecordingSpawner, TestSandbox,
};
use pretty_assertions::assert_eq;

#[test]
fn simulated_now_is_one_second_past_the_deadline() {
    let client = client_past_deadline();
    let backend = client.backend();
    assert_eq!(backend.soft_deadline(), Some(soft_deadline()));
    assert_eq!(backend.now(), soft_deadline() + Duration::seconds(1));
}

#[test]
fn past_deadline_backend_refuses_to_run() {
    let client = client_past_deadline();
    let (streams, captured) = capture_streams();
    let err = client
        .run(&["drover".to_string(), "status".to_string()], &streams)
        .unwrap_err();
    match err {
        Error::DeadlineExceeded { deadline, now } => {
            assert_eq!(deadline, soft_deadline());
            assert_eq!(now - deadline, Duration::seconds(1));
        }
        other => panic!("expected DeadlineExceeded, got: {other}"),
    }
    // Refused up front: nothing reached the output streams.
    assert_eq!(captured.stdout(), "");
    assert_eq!(captured.stderr(), "");
}

#[test]
fn pushing_an_existing_client_past_its_deadline() {
    let sandbox = TestSandbox::new();
    let spawner = Arc::new(RecordingSpawner::new());
    let mut client = sandbox.client_with(spawner.clone());
    push_past_deadline(&mut client);

    let (streams, _captured) = capture_streams();
    let err = client
        .run(&["drover".to_string(), "status".to_string()], &streams)
        .unwrap_err();
    assert!(matches!(err, Error::DeadlineExceeded { .. }));
    // The spawner was never consulted.
    assert!(spawner.calls().is_empty());
}

#[test]
fn arm_deadline_counts_from_the_backend_clock() {
    let sandbox = TestSandbox::new();
    let mut client = sandbox.client();
    client.config_mut().run.soft_deadline_secs = Some(30);
    let start = soft_deadline();
    client.backend_mut().set_clock(Arc::new(FrozenClock::at(start)));

    client.arm_deadline();
    assert_eq!(
        client.backend().soft_deadline(),
        Some(start + Duration::seconds(30))
    );
    // Still inside the window.
    client.backend().check_deadline().unwrap();

    // One second past the armed deadline: refused.
    client
        .backend_mut()
        .set_clock(Arc::new(FrozenClock::at(start + Duration::seconds(31))));
    assert!(matches!(
        client.backend().check_deadline().unwrap_err(),
        Error::DeadlineExceeded { .. }
    ));
}

#[test]
fn arm_deadline_saturates_on_absurd_budgets() {
    let sandbox = TestSandbox::new();
    let mut client = sandbox.client();
    client.config_mut().run.soft_deadline_secs = Some(u64::MAX);
    client
        .backend_mut()
        .set_clock(Arc::new(FrozenClock::at(soft_deadline())));

    client.arm_deadline();
    let deadline = client.backend().soft_deadline().unwrap();
    assert!(deadline > soft_deadline());
    // Far enough out that the window never closes.
    client.backend().check_deadline().unwrap();
}
