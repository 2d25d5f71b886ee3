//! Assertion helpers for recorded spawner calls.
//!
//! These panic with context-rich messages in the style of the harness
//! macros, so a failed expectation shows the full recorded call list.

use crate::fake_process::RecordingSpawner;

/// Backing implementation for [`assert_call!`].
///
/// With `call_index = None`, requires exactly one recorded call and checks
/// it; otherwise checks the call at the given index.
pub fn assert_call(spawner: &RecordingSpawner, call_index: Option<usize>, expected: &[&str]) {
    let calls = spawner.calls();
    let index = match call_index {
        Some(index) => index,
        None => {
            if calls.len() != 1 {
                panic!(
                    "assert_call! failed: expected exactly one spawn, got {}.\n  Recorded calls: {:?}",
                    calls.len(),
                    calls
                );
            }
            0
        }
    };
    let Some(actual) = calls.get(index) else {
        panic!(
            "assert_call! failed: no call at index {index} ({} recorded).\n  Recorded calls: {:?}",
            calls.len(),
            calls
        );
    };
    if actual.iter().map(String::as_str).ne(expected.iter().copied()) {
        panic!(
            "assert_call! failed at index {index}:\n  expected: {:?}\n  actual:   {:?}",
            expected, actual
        );
    }
}

/// Assert that a [`RecordingSpawner`] recorded a call with exactly the
/// expected argv.
///
/// ```rust,no_run
/// # use drover_testkit::{assert_call, RecordingSpawner};
/// # let spawner = RecordingSpawner::new();
/// // The sole call:
/// assert_call!(spawner, ["drover", "status", "-m", "ci"]);
/// // A specific call:
/// assert_call!(spawner, 1, ["drover", "destroy", "-m", "ci"]);
/// ```
#[macro_export]
macro_rules! assert_call {
    ($spawner:expr, [$($arg:expr),* $(,)?]) => {
        $crate::assertions::assert_call(&$spawner, None, &[$($arg),*])
    };
    ($spawner:expr, $index:expr, [$($arg:expr),* $(,)?]) => {
        $crate::assertions::assert_call(&$spawner, Some($index), &[$($arg),*])
    };
}
