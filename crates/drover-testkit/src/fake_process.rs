//! Process doubles: a canned [`ProcessHandle`], a spawner that records
//! calls, and a spawner that forbids spawning outright.

use std::collections::VecDeque;
use std::sync::Mutex;

use drover_core::{Error, ProcessHandle, Spawner};

/// A stand-in for an external process handle. Built with the output, error
/// text, and return code it should report; always reports as already
/// completed, with no state transitions.
#[derive(Debug, Clone)]
pub struct FakeProcess {
    out: String,
    err: String,
    code: i32,
    returncode: Option<i32>,
}

impl FakeProcess {
    pub fn new(out: impl Into<String>, err: impl Into<String>, code: i32) -> Self {
        Self {
            out: out.into(),
            err: err.into(),
            code,
            returncode: None,
        }
    }

    /// A successful, silent process.
    pub fn succeeding() -> Self {
        Self::new("", "", 0)
    }
}

impl ProcessHandle for FakeProcess {
    fn communicate(&mut self) -> Result<(String, String), Error> {
        self.returncode = Some(self.code);
        Ok((self.out.clone(), self.err.clone()))
    }

    fn poll(&mut self) -> Option<i32> {
        Some(self.code)
    }

    fn returncode(&self) -> Option<i32> {
        self.returncode
    }
}

/// A [`Spawner`] that records every argv it is asked to launch and answers
/// from a queue of preset [`FakeProcess`] results. An empty queue yields
/// [`FakeProcess::succeeding`]. The recorded calls feed
/// [`assert_call!`](crate::assert_call).
#[derive(Debug, Default)]
pub struct RecordingSpawner {
    calls: Mutex<Vec<Vec<String>>>,
    results: Mutex<VecDeque<FakeProcess>>,
}

impl RecordingSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result for the next spawn.
    pub fn push_result(&self, process: FakeProcess) {
        self.results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(process);
    }

    /// Every argv spawned so far, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Spawner for RecordingSpawner {
    fn spawn(&self, argv: &[String]) -> Result<Box<dyn ProcessHandle>, Error> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(argv.to_vec());
        let process = self
            .results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(FakeProcess::succeeding);
        Ok(Box::new(process))
    }
}

/// A [`Spawner`] that fails the test the moment anything tries to launch a
/// real process. The default spawner inside a
/// [`TestSandbox`](crate::sandbox::TestSandbox).
#[derive(Debug, Clone, Copy, Default)]
pub struct ForbiddenSpawner;

impl Spawner for ForbiddenSpawner {
    fn spawn(&self, argv: &[String]) -> Result<Box<dyn ProcessHandle>, Error> {
        panic!("process spawned inside test sandbox: {argv:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(137)]
    fn poll_and_communicate_agree_on_code(#[case] code: i32) {
        let mut process = FakeProcess::new("out", "err", code);
        assert_eq!(process.poll(), Some(code));
        let (out, err) = process.communicate().unwrap();
        assert_eq!((out.as_str(), err.as_str()), ("out", "err"));
        assert_eq!(process.returncode(), Some(code));
    }

    #[test]
    fn returncode_is_unset_until_communicate() {
        let process = FakeProcess::new("", "", 3);
        assert_eq!(process.returncode(), None);
    }

    #[test]
    fn recording_spawner_replays_queued_results() {
        let spawner = RecordingSpawner::new();
        spawner.push_result(FakeProcess::new("first", "", 0));
        let argv = vec!["drover".to_string(), "status".to_string()];

        let mut first = spawner.spawn(&argv).unwrap();
        assert_eq!(first.communicate().unwrap().0, "first");

        // Queue exhausted: a silent success.
        let mut second = spawner.spawn(&argv).unwrap();
        assert_eq!(second.communicate().unwrap(), (String::new(), String::new()));

        assert_eq!(spawner.calls().len(), 2);
    }
}
