//! Property tests for viewport scrolling and the row render model.

use kilo_render::row::{Row, TAB_STOP};
use kilo_render::viewport::{Screen, Viewport};
use proptest::prelude::*;

/// Lines made of printable ASCII and tabs, the decoder's natural diet.
fn line_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![proptest::char::range(' ', '~'), Just('\t')],
        0..120,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn cursor_stays_inside_window_after_any_scroll_sequence(
        moves in proptest::collection::vec((0usize..500, 0usize..500), 1..64),
        rows in 1usize..100,
        cols in 1usize..250,
    ) {
        let screen = Screen { rows, cols };
        let mut vp = Viewport::default();
        for (cy, rx) in moves {
            vp.scroll(cy, rx, screen);
            prop_assert!(vp.contains(cy, rx, screen));
        }
    }

    #[test]
    fn cx_to_rx_is_monotonic_and_unit_step_on_non_tabs(line in line_strategy()) {
        let row = Row::new(line);
        let chars: Vec<char> = row.raw().chars().collect();
        let mut prev = row.cx_to_rx(0);
        prop_assert_eq!(prev, 0);
        for cx in 1..=chars.len() {
            let rx = row.cx_to_rx(cx);
            prop_assert!(rx >= prev);
            if chars[cx - 1] != '\t' {
                prop_assert_eq!(rx, prev + 1);
            } else {
                let advance = rx - prev;
                prop_assert!(advance >= 1 && advance <= TAB_STOP);
                prop_assert_eq!(rx % TAB_STOP, 0);
            }
            prev = rx;
        }
    }

    #[test]
    fn rendered_length_matches_final_render_column(line in line_strategy()) {
        let row = Row::new(line);
        prop_assert_eq!(row.render_len(), row.cx_to_rx(row.len()));
    }

    #[test]
    fn rendered_form_never_contains_tabs(line in line_strategy()) {
        let row = Row::new(line);
        prop_assert!(!row.rendered().contains('\t'));
    }

    #[test]
    fn update_render_is_idempotent(line in line_strategy()) {
        let mut row = Row::new(line);
        let first = row.rendered().to_owned();
        row.update_render();
        prop_assert_eq!(row.rendered(), first);
    }
}
