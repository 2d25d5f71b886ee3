//! drover — command-line automation for driving external tools.
//!
//! The binary is a thin shell: argument parsing lives in [`cli`], everything
//! else in `drover-core`. The CLI layer writes usage errors to the client's
//! error stream and reports them as [`drover_core::Error::Exit`], so the
//! test suite can capture both without touching the real process streams.

pub mod cli;

pub use drover_core::{Client, Config, Error, OutputStreams};
