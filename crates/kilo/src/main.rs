#![forbid(unsafe_code)]

//! Editor binary entry point.
//!
//! Wiring only: logging, the raw-mode session guard, file loading, and the
//! run loop live behind library APIs.

use std::io;
use std::process;

use kilo::cli;
use kilo::editor::Editor;
use kilo::{Error, Result};
use kilo_core::input::{ByteStream, KeyReader};
use kilo_core::terminal::TerminalSession;

fn main() {
    let opts = cli::Opts::parse();
    init_logging();

    if let Err(e) = run(&opts) {
        // The session guard has restored the terminal by the time we get
        // here, so stderr lands on a usable screen.
        eprintln!("kilo: {e}");
        process::exit(1);
    }
}

fn run(opts: &cli::Opts) -> Result<()> {
    // Held for the whole loop: dropping it restores the terminal on every
    // exit path out of this function.
    let session = TerminalSession::new()?;
    let (cols, rows) = terminal_size(&session)?;

    let mut editor = Editor::new(cols, rows);
    if let Some(path) = &opts.file {
        editor.open(path)?;
    }

    let mut keys = KeyReader::new(ByteStream::stdin());
    let mut stdout = io::stdout();
    editor.run(&mut keys, &mut stdout)?;
    Ok(())
}

fn terminal_size(session: &TerminalSession) -> Result<(u16, u16)> {
    let (cols, rows) = session.size()?;
    if cols == 0 || rows == 0 {
        return Err(Error::Terminal(
            "terminal reports a zero-sized window".into(),
        ));
    }
    tracing::debug!(cols, rows, "terminal size");
    Ok((cols, rows))
}

/// Route structured logs to the file named by `KILO_LOG`. The terminal
/// itself belongs to the renderer, so logs never go to stdout or stderr.
fn init_logging() {
    let Ok(path) = std::env::var("KILO_LOG") else {
        return;
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(e) => {
            // Logging is best-effort; a bad log path should not stop the
            // editor from starting.
            eprintln!("kilo: cannot open log file {path}: {e}");
        }
    }
}
