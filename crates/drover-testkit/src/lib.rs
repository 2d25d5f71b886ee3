//! drover-testkit — isolation scaffolding for the drover test suite.
//!
//! Import it from any harness that touches process-wide state:
//!
//! ```rust,no_run
//! use drover_testkit::TestSandbox;
//!
//! let sandbox = TestSandbox::builder().env("ENV_NAME", "ci").build();
//! sandbox.set_env("DROVER_MODEL", "lxd");
//! // ... test body; everything is restored when `sandbox` drops.
//! ```
//!
//! Every helper here is a single acquire/use/release cycle: acquisition
//! happens in a constructor, release in `Drop`, so restoration is guaranteed
//! even when the test body panics. Process spawning inside a sandbox is
//! forbidden by default; tests that need a process hand the client a
//! [`FakeProcess`] via a [`RecordingSpawner`].

pub mod assertions;
pub mod deadline;
pub mod env;
pub mod fake_process;
pub mod home;
pub mod logging;
pub mod output;
pub mod sandbox;
pub mod temp_file;

pub use deadline::{client_past_deadline, push_past_deadline, soft_deadline, FrozenClock};
pub use env::EnvVarGuard;
pub use fake_process::{FakeProcess, ForbiddenSpawner, RecordingSpawner};
pub use home::FakeHome;
pub use logging::LogCapture;
pub use output::{capture_streams, expect_exit, CapturedOutput, StdoutGuard};
pub use sandbox::{SandboxBuilder, TestSandbox};
pub use temp_file::ObservableTempFile;
