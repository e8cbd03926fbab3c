#![forbid(unsafe_code)]

//! Timeout-bounded byte input.
//!
//! Raw mode delivers unbuffered bytes, but decoding escape sequences needs a
//! *bounded* read: after an ESC byte the decoder waits a short moment for
//! continuation bytes, and a read that comes back empty is what identifies a
//! lone Escape keypress.
//!
//! A dedicated reader thread owns the input stream and forwards bytes over a
//! channel; `recv_timeout` then provides the bounded read without any raw
//! termios configuration. The thread never touches editor state.
//!
//! # Failure model
//!
//! A timed-out read is normal operation, not an error. The only fatal
//! condition is the byte stream itself dying: an underlying read error or
//! end-of-input, both surfaced as `Err` from [`ByteStream::next_byte`].

use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::decoder::KeyDecoder;
use crate::event::KeyEvent;

/// How long to wait for escape-sequence continuation bytes.
pub const ESCAPE_TIMEOUT: Duration = Duration::from_millis(100);

/// A byte source with a bounded read, fed by a background reader thread.
#[derive(Debug)]
pub struct ByteStream {
    rx: Receiver<io::Result<u8>>,
}

impl ByteStream {
    /// Spawn a reader thread over stdin.
    #[must_use]
    pub fn stdin() -> Self {
        Self::from_reader(io::stdin())
    }

    /// Spawn a reader thread over an arbitrary byte reader.
    pub fn from_reader<R: Read + Send + 'static>(mut reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = [0u8; 1];
            loop {
                match reader.read(&mut buf) {
                    // End of input: drop the sender so the receiver observes
                    // the disconnect.
                    Ok(0) => break,
                    Ok(_) => {
                        if tx.send(Ok(buf[0])).is_err() {
                            break;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        break;
                    }
                }
            }
        });
        Self { rx }
    }

    /// Wait up to `timeout` for the next byte.
    ///
    /// `Ok(None)` means the read timed out with no byte available; `Err`
    /// means the stream is unrecoverably gone.
    pub fn next_byte(&self, timeout: Duration) -> io::Result<Option<u8>> {
        match self.rx.recv_timeout(timeout) {
            Ok(Ok(byte)) => Ok(Some(byte)),
            Ok(Err(e)) => Err(e),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            )),
        }
    }
}

/// Blocking key reader: couples a [`ByteStream`] with the decoder machine.
#[derive(Debug)]
pub struct KeyReader {
    stream: ByteStream,
    decoder: KeyDecoder,
    timeout: Duration,
}

impl KeyReader {
    /// Create a reader with the standard escape timeout.
    #[must_use]
    pub fn new(stream: ByteStream) -> Self {
        Self::with_timeout(stream, ESCAPE_TIMEOUT)
    }

    /// Create a reader with a custom escape timeout.
    #[must_use]
    pub fn with_timeout(stream: ByteStream, timeout: Duration) -> Self {
        Self {
            stream,
            decoder: KeyDecoder::new(),
            timeout,
        }
    }

    /// Block until one complete key is available.
    ///
    /// A timed-out read while no sequence is pending is "no key yet" and
    /// retried; a timeout mid-sequence resolves to a bare Escape.
    ///
    /// # Errors
    ///
    /// Fails only on an unrecoverable input-stream error, never on timeout.
    pub fn read_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            let byte = self.stream.next_byte(self.timeout)?;
            if let Some(key) = self.decoder.feed(byte) {
                return Ok(key);
            }
        }
    }
}
