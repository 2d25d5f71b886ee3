//! Process double harness.
//!
//! # What this covers
//!
//! - **FakeProcess contract**: `poll` and `communicate` report the return
//!   code supplied at construction; the code is recorded as the handle's
//!   returncode by `communicate`.
//! - **Client over fakes**: a client wired to a `RecordingSpawner` runs
//!   commands without touching the system, forwarding captured output to its
//!   streams and mapping non-zero statuses to `CommandFailed`.
//! - **Call assertions**: `assert_call!` checks the recorded argv by index,
//!   defaulting to "exactly one call".
//! - **Payload staging**: `ExecBackend::stage_payload` writes through the
//!   temp-file seam, so an `ObservableTempFile` factory sees the payload.
//!
//! # Running
//!
//! ```sh
//! cargo test --test process_harness
//! ```

use std::sync::Arc;

use drover_core::{Error, ProcessHandle};
use drover_testkit::{
    assert_call, capture_streams, FakeProcess, ObservableTempFile, RecordingSpawner, TestSandbox,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// FakeProcess contract
// ---------------------------------------------------------------------------

#[rstest]
#[case(0)]
#[case(2)]
#[case(137)]
fn poll_and_communicate_report_the_constructed_code(#[case] code: i32) {
    let mut process = FakeProcess::new("out text", "err text", code);
    assert_eq!(process.poll(), Some(code));
    assert_eq!(
        process.communicate().unwrap(),
        ("out text".to_string(), "err text".to_string())
    );
    assert_eq!(process.returncode(), Some(code));
    // No state transitions: still reports as completed with the same code.
    assert_eq!(process.poll(), Some(code));
}

// ---------------------------------------------------------------------------
// Client over fakes
// ---------------------------------------------------------------------------

#[test]
fn client_runs_through_the_fake_and_forwards_output() {
    let sandbox = TestSandbox::new();
    let spawner = Arc::new(RecordingSpawner::new());
    spawner.push_result(FakeProcess::new("machine: up\n", "", 0));
    let client = sandbox.client_with(spawner.clone());

    let (streams, captured) = capture_streams();
    let out = client
        .run(&argv(&["drover", "status", "-m", "ci"]), &streams)
        .unwrap();

    assert_eq!(out, "machine: up\n");
    assert_eq!(captured.stdout(), "machine: up\n");
    assert_eq!(captured.stderr(), "");
    assert_call!(spawner, ["drover", "status", "-m", "ci"]);
}

#[test]
fn nonzero_status_maps_to_command_failed() {
    let sandbox = TestSandbox::new();
    let spawner = Arc::new(RecordingSpawner::new());
    spawner.push_result(FakeProcess::new("", "no such model\n", 1));
    let client = sandbox.client_with(spawner);

    let (streams, captured) = capture_streams();
    let err = client
        .run(&argv(&["drover", "status", "-m", "missing"]), &streams)
        .unwrap_err();

    match err {
        Error::CommandFailed { code, stderr, .. } => {
            assert_eq!(code, 1);
            assert_eq!(stderr, "no such model\n");
        }
        other => panic!("expected CommandFailed, got: {other}"),
    }
    assert_eq!(captured.stderr(), "no such model\n");
}

#[test]
fn assert_call_checks_calls_by_index() {
    let sandbox = TestSandbox::new();
    let spawner = Arc::new(RecordingSpawner::new());
    let client = sandbox.client_with(spawner.clone());
    let (streams, _captured) = capture_streams();

    client.run(&argv(&["drover", "bootstrap"]), &streams).unwrap();
    client.run(&argv(&["drover", "destroy"]), &streams).unwrap();

    assert_call!(spawner, 0, ["drover", "bootstrap"]);
    assert_call!(spawner, 1, ["drover", "destroy"]);
}

// ---------------------------------------------------------------------------
// Payload staging through the temp-file seam
// ---------------------------------------------------------------------------

#[test]
fn staged_payload_lands_in_the_observable_file() {
    let sandbox = TestSandbox::new();
    let observable = ObservableTempFile::new().unwrap();
    let mut client = sandbox.client();
    client.backend_mut().set_temp_files(observable.factory());

    let handle = client.backend().stage_payload(b"series: jammy\n").unwrap();
    assert_eq!(handle.path(), observable.path());
    assert_eq!(observable.contents().unwrap(), "series: jammy\n");

    // The handle is borrowed; dropping it leaves the file for the test.
    drop(handle);
    assert!(observable.path().exists());
}
