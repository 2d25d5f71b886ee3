//! drover-core — client and execution backend for drover.
//!
//! This crate exposes the injection seams that let the rest of the workspace
//! (and the test suite in particular) substitute capabilities instead of
//! patching process-wide globals:
//!
//! ```text
//! Client ──► ExecBackend ──► Spawner ──► ProcessHandle
//!                 │
//!                 ├──► Clock       (deadline checks)
//!                 ├──► TempFiles   (payload staging)
//!                 └──► OutputStreams
//! ```
//!
//! Everything is synchronous; a backend runs one external command at a time
//! and tracks a soft deadline past which it refuses to run more.

pub mod backend;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod process;
pub mod stream;
pub mod tempfiles;

pub use backend::ExecBackend;
pub use client::Client;
pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use error::Error;
pub use process::{ProcessHandle, Spawner, SystemSpawner};
pub use stream::{OutputStreams, Sink};
pub use tempfiles::{SystemTempFiles, TempFiles, TempHandle};
