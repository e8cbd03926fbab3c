#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII-based raw-mode management that ensures the terminal is restored on
//! every exit path.
//!
//! # Lifecycle Guarantees
//!
//! 1. **Drop restores the terminal** - when the [`TerminalSession`] is
//!    dropped, the screen is cleared, the cursor is shown, and raw mode is
//!    disabled.
//!
//! 2. **Panic safety** - a process-wide panic hook performs the same
//!    best-effort cleanup before the panic message is printed, so the
//!    message lands on a usable terminal.
//!
//! 3. **Signal safety (Unix)** - a watcher thread handles SIGINT/SIGTERM by
//!    restoring the terminal and exiting with the conventional `128 + n`
//!    status.
//!
//! # Contract
//!
//! Only one `TerminalSession` should exist at a time; creating a session
//! enters raw mode, which disables line buffering and echo.

use std::io::{self, Write};
use std::sync::OnceLock;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// A terminal session that owns raw mode and cleanup.
#[derive(Debug)]
pub struct TerminalSession {
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled or the signal watcher
    /// cannot be installed.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        #[cfg(feature = "tracing")]
        tracing::info!("terminal raw mode enabled");

        Ok(Self {
            #[cfg(unix)]
            signal_guard: Some(SignalGuard::new()?),
        })
    }

    /// Current terminal size as (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Cleanup helper (shared between drop and the panic/signal paths).
    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        restore_terminal();
        #[cfg(feature = "tracing")]
        tracing::info!("terminal raw mode disabled");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Clear the screen, park and show the cursor, and leave raw mode.
///
/// Errors are ignored: this runs on paths where there is nothing left to
/// report them to.
fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(
        stdout,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0),
        crossterm::cursor::Show,
    );
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            previous(info);
        }));
    });
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            for signal in signals.forever() {
                if matches!(signal, SIGINT | SIGTERM) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(signal, "termination signal received, cleaning up");
                    restore_terminal();
                    std::process::exit(128 + signal);
                }
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

// Note: tests that actually enter raw mode would interfere with the test
// runner's terminal state, so session construction is exercised only via
// the binary.
