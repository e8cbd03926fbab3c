//! Property tests for the key decoder state machine.
//!
//! The decoder is fed adversarial byte soup; the invariants are that it
//! never panics, that a timeout always drains it back to the ground state,
//! and that plain printable input is decoded losslessly.

use kilo_core::decoder::KeyDecoder;
use kilo_core::event::KeyCode;
use proptest::prelude::*;

proptest! {
    #[test]
    fn decoder_survives_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut decoder = KeyDecoder::new();
        for b in bytes {
            let _ = decoder.feed(Some(b));
        }
        let _ = decoder.feed(None);
        prop_assert!(!decoder.in_sequence());
    }

    #[test]
    fn timeout_drains_exactly_pending_sequences(bytes in proptest::collection::vec(any::<u8>(), 0..16)) {
        let mut decoder = KeyDecoder::new();
        for b in bytes {
            let _ = decoder.feed(Some(b));
        }
        let pending = decoder.in_sequence();
        let key = decoder.feed(None);
        // A timeout yields a key exactly when a sequence was pending, and
        // that key is always a bare Escape.
        prop_assert_eq!(key.is_some(), pending);
        if let Some(key) = key {
            prop_assert_eq!(key.code, KeyCode::Escape);
        }
        prop_assert!(!decoder.in_sequence());
    }

    #[test]
    fn printable_ascii_decodes_to_itself(byte in 0x20u8..=0x7E) {
        let mut decoder = KeyDecoder::new();
        let key = decoder.feed(Some(byte)).expect("printable byte must decode");
        prop_assert_eq!(key.code, KeyCode::Char(byte as char));
        prop_assert!(key.modifiers.is_empty());
    }

    #[test]
    fn arrow_sequences_decode_regardless_of_preceding_noise(
        noise in proptest::collection::vec(0x20u8..=0x7E, 0..8),
    ) {
        let mut decoder = KeyDecoder::new();
        for b in noise {
            let _ = decoder.feed(Some(b));
        }
        decoder.feed(Some(0x1B));
        decoder.feed(Some(b'['));
        let key = decoder.feed(Some(b'A')).expect("arrow must decode");
        prop_assert_eq!(key.code, KeyCode::Up);
    }
}
