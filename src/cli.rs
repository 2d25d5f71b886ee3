//! Command-line interface for the `drover` binary.

use clap::{Parser, Subcommand};
use drover_core::{Client, Error, OutputStreams};

#[derive(Parser)]
#[command(name = "drover", about = "Drive external tools with deadlines")]
pub struct Cli {
    /// Write debug logs to /tmp/drover-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one external command through the execution backend.
    Exec {
        /// Command and arguments to run.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        argv: Vec<String>,
    },
    /// Print the configured target environment.
    Status,
}

/// Parse `args` and dispatch. Usage errors (and `--help`/`--version`) are
/// written to `streams` and reported as [`Error::Exit`] so callers — the
/// binary and the test suite alike — decide what to do with the status.
pub fn run(args: &[String], client: &mut Client, streams: &OutputStreams) -> Result<(), Error> {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let rendered = err.render().to_string();
            let code = if err.use_stderr() {
                streams.err.write_line(&rendered)?;
                2
            } else {
                streams.out.write_line(&rendered)?;
                0
            };
            return Err(Error::Exit { code });
        }
    };

    match cli.command {
        Command::Exec { argv } => {
            client.arm_deadline();
            client.run(&argv, streams)?;
            Ok(())
        }
        Command::Status => {
            streams
                .out
                .write_line(&format!("environment: {}", client.config().env.name))?;
            Ok(())
        }
    }
}
