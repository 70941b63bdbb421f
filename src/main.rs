mod config;
mod data;
mod error;
mod input;
mod report;
mod session;
mod stats;

use std::io;
use std::process;

use anyhow::Context;
use log::info;

use config::Config;
use error::PromptError;
use input::TerminalInput;
use session::Session;

/// Exit status after Ctrl-C, as a shell reports SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env();
    info!("reading city files from {}", config.data_dir.display());

    let input = TerminalInput::spawn()?;
    let stdout = io::stdout();
    let mut session = Session::new(config, input, stdout.lock());

    match session.run() {
        Ok(()) => Ok(()),
        Err(PromptError::Interrupted) => process::exit(EXIT_INTERRUPTED),
        Err(PromptError::InputClosed) => {
            eprintln!("Input closed before filters were chosen, exiting");
            process::exit(1)
        }
        Err(PromptError::Io(err)) => Err(err).context("writing to the terminal"),
    }
}
