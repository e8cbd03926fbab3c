#![forbid(unsafe_code)]

//! Escape-sequence decoder state machine.
//!
//! Decodes raw terminal input bytes into [`crate::event::KeyEvent`] values.
//!
//! # Design
//!
//! The decoder is a small state machine that handles:
//! - Printable ASCII characters
//! - Control codes (reported as `Char` + `CTRL`, with Tab/Enter/Backspace
//!   mapped to their named keys)
//! - CSI navigation sequences (`ESC [ A` etc. and the VT `ESC [ n ~` family)
//! - SS3 sequences (`ESC O H` / `ESC O F`)
//!
//! The decoder itself performs no I/O. Each call to [`KeyDecoder::feed`]
//! advances the machine by one read result, where `None` stands for a read
//! that timed out with no byte available. The timeout is what disambiguates
//! a lone Escape keypress from the start of a multi-byte sequence: a pending
//! sequence that sees a timeout resolves to a bare `Escape`.
//!
//! Malformed or unrecognized sequences are never errors; they collapse to a
//! bare `Escape` and the lost bytes are accepted as information loss.

use crate::event::{KeyCode, KeyEvent, Modifiers};

/// Decoder state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DecoderState {
    /// Normal character input.
    #[default]
    Ground,
    /// After ESC (0x1B).
    Escape,
    /// After ESC [ (CSI introducer).
    Bracket,
    /// After ESC [ and one digit, waiting for the `~` terminator.
    BracketDigit(u8),
    /// After ESC O (SS3 introducer).
    Ss3,
}

/// Terminal input decoder.
///
/// Feed it read results one at a time; a completed key comes back as
/// `Some`:
///
/// ```
/// use kilo_core::decoder::KeyDecoder;
/// use kilo_core::event::KeyCode;
///
/// let mut decoder = KeyDecoder::new();
/// assert_eq!(decoder.feed(Some(0x1B)), None);
/// assert_eq!(decoder.feed(Some(b'[')), None);
/// let key = decoder.feed(Some(b'A')).unwrap();
/// assert_eq!(key.code, KeyCode::Up);
/// ```
#[derive(Debug, Default)]
pub struct KeyDecoder {
    state: DecoderState,
}

impl KeyDecoder {
    /// Create a new decoder in the ground state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the decoder is mid-way through an escape sequence.
    #[must_use]
    pub fn in_sequence(&self) -> bool {
        self.state != DecoderState::Ground
    }

    /// Advance the machine by one read result.
    ///
    /// `None` means the read timed out with no byte available: in the ground
    /// state that is "no key yet" (the caller retries), while mid-sequence
    /// it resolves the pending bytes to a bare `Escape`.
    pub fn feed(&mut self, input: Option<u8>) -> Option<KeyEvent> {
        let Some(byte) = input else {
            return match self.state {
                DecoderState::Ground => None,
                _ => self.resolve_escape(),
            };
        };

        match self.state {
            DecoderState::Ground => self.feed_ground(byte),
            DecoderState::Escape => self.feed_escape(byte),
            DecoderState::Bracket => self.feed_bracket(byte),
            DecoderState::BracketDigit(digit) => self.feed_bracket_digit(digit, byte),
            DecoderState::Ss3 => self.feed_ss3(byte),
        }
    }

    /// Process a byte in the ground state.
    fn feed_ground(&mut self, byte: u8) -> Option<KeyEvent> {
        match byte {
            // ESC - start escape sequence
            0x1B => {
                self.state = DecoderState::Escape;
                None
            }
            // Tab (Ctrl+I) - check before generic Ctrl range
            0x09 => Some(KeyEvent::new(KeyCode::Tab)),
            // Enter (Ctrl+M) - check before generic Ctrl range
            0x0D => Some(KeyEvent::new(KeyCode::Enter)),
            // Other Ctrl+A through Ctrl+Z
            0x01..=0x08 | 0x0A..=0x0C | 0x0E..=0x1A => {
                let c = (byte + b'a' - 1) as char;
                Some(KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL))
            }
            // Backspace (DEL)
            0x7F => Some(KeyEvent::new(KeyCode::Backspace)),
            // Printable ASCII
            0x20..=0x7E => Some(KeyEvent::new(KeyCode::Char(byte as char))),
            // Raw mode is configured 7-bit clean; anything else is ignored.
            _ => None,
        }
    }

    /// Process the byte after ESC.
    fn feed_escape(&mut self, byte: u8) -> Option<KeyEvent> {
        match byte {
            b'[' => {
                self.state = DecoderState::Bracket;
                None
            }
            b'O' => {
                self.state = DecoderState::Ss3;
                None
            }
            _ => self.resolve_escape(),
        }
    }

    /// Process the byte after ESC [.
    fn feed_bracket(&mut self, byte: u8) -> Option<KeyEvent> {
        match byte {
            b'0'..=b'9' => {
                self.state = DecoderState::BracketDigit(byte);
                None
            }
            b'A' => self.resolve(KeyCode::Up),
            b'B' => self.resolve(KeyCode::Down),
            b'C' => self.resolve(KeyCode::Right),
            b'D' => self.resolve(KeyCode::Left),
            b'H' => self.resolve(KeyCode::Home),
            b'F' => self.resolve(KeyCode::End),
            _ => self.resolve_escape(),
        }
    }

    /// Process the byte after ESC [ digit, expecting the `~` terminator.
    fn feed_bracket_digit(&mut self, digit: u8, byte: u8) -> Option<KeyEvent> {
        if byte != b'~' {
            return self.resolve_escape();
        }
        match digit {
            b'1' | b'7' => self.resolve(KeyCode::Home),
            b'3' => self.resolve(KeyCode::Delete),
            b'4' | b'8' => self.resolve(KeyCode::End),
            b'5' => self.resolve(KeyCode::PageUp),
            b'6' => self.resolve(KeyCode::PageDown),
            _ => self.resolve_escape(),
        }
    }

    /// Process the byte after ESC O.
    fn feed_ss3(&mut self, byte: u8) -> Option<KeyEvent> {
        match byte {
            b'H' => self.resolve(KeyCode::Home),
            b'F' => self.resolve(KeyCode::End),
            _ => self.resolve_escape(),
        }
    }

    /// Terminate the current sequence with a named key.
    fn resolve(&mut self, code: KeyCode) -> Option<KeyEvent> {
        self.state = DecoderState::Ground;
        Some(KeyEvent::new(code))
    }

    /// Collapse the current sequence to a bare Escape.
    fn resolve_escape(&mut self) -> Option<KeyEvent> {
        self.state = DecoderState::Ground;
        Some(KeyEvent::new(KeyCode::Escape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the decoder with a byte slice and collect the resolved keys.
    fn decode_all(bytes: &[u8]) -> Vec<KeyEvent> {
        let mut decoder = KeyDecoder::new();
        bytes.iter().filter_map(|&b| decoder.feed(Some(b))).collect()
    }

    #[test]
    fn ascii_characters_decoded() {
        let keys = decode_all(b"abc");
        assert_eq!(keys.len(), 3);
        assert!(matches!(keys[0].code, KeyCode::Char('a')));
        assert!(matches!(keys[1].code, KeyCode::Char('b')));
        assert!(matches!(keys[2].code, KeyCode::Char('c')));
    }

    #[test]
    fn control_characters() {
        // Ctrl+Q (0x11) - the quit chord
        let keys = decode_all(&[0x11]);
        assert_eq!(keys.len(), 1);
        assert!(keys[0].is_char('q'));
        assert!(keys[0].ctrl());

        // Backspace
        let keys = decode_all(&[0x7F]);
        assert!(matches!(keys[0].code, KeyCode::Backspace));

        // Tab and Enter keep their named keys
        let keys = decode_all(&[0x09, 0x0D]);
        assert!(matches!(keys[0].code, KeyCode::Tab));
        assert!(matches!(keys[1].code, KeyCode::Enter));
    }

    #[test]
    fn arrow_keys() {
        assert!(matches!(decode_all(b"\x1b[A")[0].code, KeyCode::Up));
        assert!(matches!(decode_all(b"\x1b[B")[0].code, KeyCode::Down));
        assert!(matches!(decode_all(b"\x1b[C")[0].code, KeyCode::Right));
        assert!(matches!(decode_all(b"\x1b[D")[0].code, KeyCode::Left));
    }

    #[test]
    fn csi_home_end_letters() {
        assert!(matches!(decode_all(b"\x1b[H")[0].code, KeyCode::Home));
        assert!(matches!(decode_all(b"\x1b[F")[0].code, KeyCode::End));
    }

    #[test]
    fn vt_tilde_sequences() {
        assert!(matches!(decode_all(b"\x1b[1~")[0].code, KeyCode::Home));
        assert!(matches!(decode_all(b"\x1b[3~")[0].code, KeyCode::Delete));
        assert!(matches!(decode_all(b"\x1b[4~")[0].code, KeyCode::End));
        assert!(matches!(decode_all(b"\x1b[5~")[0].code, KeyCode::PageUp));
        assert!(matches!(decode_all(b"\x1b[6~")[0].code, KeyCode::PageDown));
        assert!(matches!(decode_all(b"\x1b[7~")[0].code, KeyCode::Home));
        assert!(matches!(decode_all(b"\x1b[8~")[0].code, KeyCode::End));
    }

    #[test]
    fn ss3_sequences() {
        assert!(matches!(decode_all(b"\x1bOH")[0].code, KeyCode::Home));
        assert!(matches!(decode_all(b"\x1bOF")[0].code, KeyCode::End));
    }

    #[test]
    fn lone_escape_resolved_by_timeout() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(decoder.feed(Some(0x1B)), None);
        assert!(decoder.in_sequence());

        let key = decoder.feed(None).unwrap();
        assert!(matches!(key.code, KeyCode::Escape));
        assert!(!decoder.in_sequence());
    }

    #[test]
    fn timeout_mid_sequence_resolves_to_escape() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(decoder.feed(Some(0x1B)), None);
        assert_eq!(decoder.feed(Some(b'[')), None);

        let key = decoder.feed(None).unwrap();
        assert!(matches!(key.code, KeyCode::Escape));
    }

    #[test]
    fn timeout_before_tilde_resolves_to_escape() {
        let mut decoder = KeyDecoder::new();
        decoder.feed(Some(0x1B));
        decoder.feed(Some(b'['));
        assert_eq!(decoder.feed(Some(b'5')), None);

        let key = decoder.feed(None).unwrap();
        assert!(matches!(key.code, KeyCode::Escape));
    }

    #[test]
    fn unrecognized_sequences_collapse_to_escape() {
        assert!(matches!(decode_all(b"\x1bx")[0].code, KeyCode::Escape));
        assert!(matches!(decode_all(b"\x1b[Z")[0].code, KeyCode::Escape));
        assert!(matches!(decode_all(b"\x1b[9~")[0].code, KeyCode::Escape));
        assert!(matches!(decode_all(b"\x1b[5x")[0].code, KeyCode::Escape));
        assert!(matches!(decode_all(b"\x1bOP")[0].code, KeyCode::Escape));
    }

    #[test]
    fn timeout_in_ground_state_is_no_key() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(decoder.feed(None), None);
        assert!(!decoder.in_sequence());
    }

    #[test]
    fn decoder_returns_to_ground_after_each_key() {
        let mut decoder = KeyDecoder::new();
        for &b in b"\x1b[A" {
            decoder.feed(Some(b));
        }
        assert!(!decoder.in_sequence());

        // And the next sequence decodes cleanly.
        decoder.feed(Some(0x1B));
        decoder.feed(Some(b'['));
        let key = decoder.feed(Some(b'D')).unwrap();
        assert!(matches!(key.code, KeyCode::Left));
    }

    #[test]
    fn high_bytes_ignored() {
        let keys = decode_all(&[0xFF, 0x80, b'a']);
        assert_eq!(keys.len(), 1);
        assert!(keys[0].is_char('a'));
    }
}
