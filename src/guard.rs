//! Start, center, and end guard pattern recognition.

use crate::ratio::decode_e;
use crate::symbol::Color;
use crate::width_window::WidthWindow;

/// Outcome of [`aux_start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StartGuard {
    /// A normal symbol start, or a start right after a center guard.
    Normal,
    /// A 2/5-digit add-on start.
    AddOn,
}

/// Recognize a start, center, or add-on-start guard ending at the current
/// edge. The pair five and six edges back must classify to exactly zero
/// (a canonical two-module guard bar) before anything else is considered.
/// From there a BAR edge checks the quiet zone and the inner pair at
/// offsets (4, 5); a SPACE edge instead requires the inner pair and the
/// pair at (6, 7) to both read as the center guard.
pub(crate) fn aux_start(window: &WidthWindow, s4: u32) -> Option<StartGuard> {
    let outer = window.width(5) + window.width(6);
    if decode_e(outer, s4, 7) != Some(0) {
        return None;
    }

    let inner = window.width(4) + window.width(5);
    let inner_class = decode_e(inner, s4, 7);

    match window.color() {
        Color::Bar => {
            let quiet = s4 != 0 && (window.width(7) * 14 + 1) / s4 >= 3;
            if quiet {
                match inner_class {
                    Some(0) => return Some(StartGuard::Normal),
                    Some(1) => return Some(StartGuard::AddOn),
                    _ => {}
                }
            }
            None
        }
        Color::Space => {
            if inner_class == Some(0) {
                let trailing = window.width(6) + window.width(7);
                if decode_e(trailing, s4, 7) == Some(0) {
                    return Some(StartGuard::Normal);
                }
            }
            None
        }
    }
}

/// Recognize an end guard. `n` is 3 in reverse phase, 4 in forward phase;
/// it selects both how many edge-pairs are examined (`n - 1`) and where
/// the reference scale is recomputed from (the four widths starting `n`
/// edges back — the character just before the guard). Valid only when
/// every pair classifies to exactly zero.
pub(crate) fn aux_end(window: &WidthWindow, n: u32) -> bool {
    let s = window.sum4(n as usize);
    for i in 0..n - 1 {
        let e = window.width(i as usize) + window.width(i as usize + 1);
        if decode_e(e, s, 7) != Some(0) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_of(widths: &[u32], color: Color) -> WidthWindow {
        let mut w = WidthWindow::new();
        for &width in widths.iter().rev() {
            w.push(width, color);
        }
        w
    }

    #[test]
    fn forward_start_guard_is_bar_colored_with_quiet_zone() {
        // widths indexed 0..7: the first character at 0..3, the unit-module
        // guard bar/space/bar at 4..6, then a wide quiet zone at 7.
        let w = window_of(&[1, 1, 1, 1, 1, 1, 1, 10], Color::Bar);
        assert_eq!(aux_start(&w, 7), Some(StartGuard::Normal));
    }

    #[test]
    fn end_guard_requires_all_unit_pairs() {
        let w = window_of(&[1, 1, 1, 1, 2, 2, 2, 1], Color::Bar);
        assert!(aux_end(&w, 4));
    }

    #[test]
    fn end_guard_rejects_skewed_pairs() {
        let w = window_of(&[1, 9, 1, 1, 2, 2, 2, 1], Color::Bar);
        assert!(!aux_end(&w, 4));
    }
}
