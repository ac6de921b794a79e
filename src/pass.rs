//! One of four parallel phase-aligned decode attempts.
//!
//! Four `Pass` instances track four hypotheses about where a character
//! boundary falls in the incoming edge stream. Exactly one, at most, is
//! phase-aligned with a real symbol at any given time; the others either
//! sit inactive waiting for their next turn or abort quickly when a ratio
//! or guard check fails.

use crate::character::decode4;
use crate::guard::{aux_end, aux_start, StartGuard};
use crate::symbol::{Color, SymbolType};
use crate::width_window::WidthWindow;

/// 32-entry parity-vector lookup. Indexed by the vector's upper 5 bits;
/// bit 0 of the vector then selects the high or low nibble. `0xff` marks
/// an unassigned pattern.
const PARITY_DECODE: [u8; 32] = [
    0xf0, // BBBBBB = right half of an EAN-13
    // UPC-E check digit encoding
    0xff, 0xff, 0x0f, 0xff, 0x1f, 0x2f, 0xf3, 0xff, 0x4f, 0x7f, 0xf8, 0x5f, 0xf9, 0xf6, 0xff,
    // left-half EAN-13 leading digit
    0xff, 0x6f, 0x9f, 0xf5, 0x8f, 0xf7, 0xf4, 0xff, 0x3f, 0xf2, 0xf1, 0xff, 0xff, 0xff, 0xff,
    0x0f,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PassState {
    Inactive,
    /// Decoding a main symbol: `idx` advances by 4 per character, `rev`
    /// latches the phase parity observed at the start guard.
    Active { idx: i16, rev: bool },
    /// Decoding a 2/5-digit add-on, one character per 4-tick slot. `tick`
    /// counts edges since the last digit landed; a decode is only attempted
    /// when it wraps back to a multiple of 4, mirroring `Active`'s `idx`
    /// cadence.
    AddOn { slot: u8, rev: bool, tick: u8 },
}

#[derive(Debug, Clone)]
pub(crate) struct Pass {
    state: PassState,
    /// `raw[0]` holds the decoded leading digit / UPC-E check nibble;
    /// `raw[1..=6]` hold up to six sampled characters.
    raw: [u8; 7],
    addon_raw: [u8; 5],
}

impl Pass {
    pub(crate) fn new() -> Self {
        Self {
            state: PassState::Inactive,
            raw: [0; 7],
            addon_raw: [0; 5],
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.state != PassState::Inactive
    }

    pub(crate) fn activate(&mut self) {
        self.state = PassState::Active { idx: -1, rev: false };
    }

    pub(crate) fn deactivate(&mut self) {
        self.state = PassState::Inactive;
    }

    /// Advance this pass by one edge. Returns a partial-symbol tag when a
    /// half (or add-on) finishes decoding this edge, `SymbolType::NONE`
    /// otherwise.
    pub(crate) fn advance(&mut self, window: &WidthWindow, s4: u32, decode_addons: bool) -> SymbolType {
        match self.state {
            PassState::Inactive => SymbolType::NONE,
            PassState::AddOn { .. } => self.advance_addon(window, s4),
            PassState::Active { idx, .. } => self.advance_main(window, s4, idx, decode_addons),
        }
    }

    fn advance_main(&mut self, window: &WidthWindow, s4: u32, idx: i16, decode_addons: bool) -> SymbolType {
        let idx = idx + 1;
        let rev = idx & 1 != 0;
        self.state = PassState::Active { idx, rev };

        if window.color() == Color::Bar && (idx == 0x10 || idx == 0x0f) && aux_end(window, if rev { 3 } else { 4 }) {
            let part = self.end4(rev);
            self.deactivate();
            return part;
        }

        if idx & 0x03 == 0 && idx <= 0x14 {
            if s4 == 0 {
                return SymbolType::NONE;
            }
            if idx == 0 {
                match aux_start(window, s4) {
                    None => {
                        self.deactivate();
                        return SymbolType::NONE;
                    }
                    Some(StartGuard::AddOn) if !decode_addons => {
                        self.deactivate();
                        return SymbolType::NONE;
                    }
                    Some(StartGuard::AddOn) => {
                        return match decode4(window, s4) {
                            None => {
                                self.deactivate();
                                SymbolType::NONE
                            }
                            Some(pddd) => {
                                self.addon_raw[0] = pddd;
                                self.state = PassState::AddOn { slot: 1, rev, tick: 0 };
                                SymbolType::NONE
                            }
                        };
                    }
                    Some(StartGuard::Normal) => {}
                }
            }
            match decode4(window, s4) {
                None => self.deactivate(),
                Some(pddd) => self.raw[(idx >> 2) as usize + 1] = pddd,
            }
        }

        if window.color() == Color::Bar && (idx == 0x18 || idx == 0x17) {
            let part = if aux_end(window, if rev { 3 } else { 4 }) {
                self.end7(rev)
            } else {
                SymbolType::NONE
            };
            self.deactivate();
            return part;
        }

        SymbolType::NONE
    }

    fn advance_addon(&mut self, window: &WidthWindow, s4: u32) -> SymbolType {
        let PassState::AddOn { slot, rev, tick } = self.state else {
            unreachable!()
        };
        let tick = tick.wrapping_add(1);

        // A character is four edges wide; only attempt a decode once every
        // four ticks, the same cadence `advance_main` enforces via `idx &
        // 0x03 == 0`. Without this gate, `decode4` would run against a
        // window still three-quarters filled with the previous digit's
        // widths and fail its ratio check every time.
        if tick & 0x03 != 0 {
            self.state = PassState::AddOn { slot, rev, tick };
            return SymbolType::NONE;
        }

        if s4 == 0 {
            self.state = PassState::AddOn { slot, rev, tick };
            return SymbolType::NONE;
        }

        match decode4(window, s4) {
            None => {
                self.deactivate();
                SymbolType::NONE
            }
            Some(pddd) => {
                self.addon_raw[slot as usize] = pddd;
                let next = slot + 1;
                if next == 2 {
                    // Two digits in: an add-on guard separator (same unit
                    // pair classification as a normal end guard) signals
                    // three more digits follow; its absence finalizes a
                    // 2-digit add-on.
                    if aux_end(window, if rev { 3 } else { 4 }) {
                        self.state = PassState::AddOn { slot: next, rev, tick: 0 };
                        SymbolType::NONE
                    } else {
                        self.deactivate();
                        SymbolType::ADDON2
                    }
                } else if next == 5 {
                    self.deactivate();
                    SymbolType::ADDON5
                } else {
                    self.state = PassState::AddOn { slot: next, rev, tick: 0 };
                    SymbolType::NONE
                }
            }
        }
    }

    pub(crate) fn addon_digits(&self, count: usize) -> &[u8] {
        &self.addon_raw[..count]
    }

    /// EAN-8 half: four characters of uniform parity.
    fn end4(&mut self, rev: bool) -> SymbolType {
        let par = (self.raw[1] & 0x10) >> 1
            | (self.raw[2] & 0x10) >> 2
            | (self.raw[3] & 0x10) >> 3
            | (self.raw[4] & 0x10) >> 4;

        if par != 0 && par != 0xf {
            return SymbolType::NONE;
        }

        if (par == 0) == !rev {
            self.raw.swap(1, 4);
            self.raw.swap(2, 3);
        }

        if par == 0 {
            SymbolType::EAN8 | SymbolType::EAN_RIGHT
        } else {
            SymbolType::EAN8
        }
    }

    /// EAN-13/UPC-E half: six characters, parity pattern selects the
    /// leading digit via [`PARITY_DECODE`].
    fn end7(&mut self, rev: bool) -> SymbolType {
        let bit = |i: usize| (self.raw[i] & 0x10) as u16;
        let par = if !rev {
            bit(1) << 1 | bit(2) | bit(3) >> 1 | bit(4) >> 2 | bit(5) >> 3 | bit(6) >> 4
        } else {
            bit(1) >> 4 | bit(2) >> 3 | bit(3) >> 2 | bit(4) >> 1 | bit(5) | bit(6) << 1
        };

        let mut leading = PARITY_DECODE[(par >> 1) as usize];
        if par & 1 != 0 {
            leading >>= 4;
        }
        leading &= 0x0f;
        self.raw[0] = leading;

        if leading == 0xf {
            return SymbolType::NONE;
        }

        if (par == 0) == !rev {
            for i in 1..4 {
                self.raw.swap(i, 7 - i);
            }
        }

        if par == 0 {
            SymbolType::EAN13 | SymbolType::EAN_RIGHT
        } else if par & 0x20 != 0 {
            SymbolType::EAN13
        } else {
            // UPC-E check-digit pattern, decoded but not emitted (see
            // the accumulator's handling of this case).
            SymbolType::NONE
        }
    }

    pub(crate) fn raw(&self) -> &[u8; 7] {
        &self.raw
    }

    #[cfg(test)]
    pub(crate) fn with_raw(raw: [u8; 7]) -> Self {
        Self { state: PassState::Inactive, raw, addon_raw: [0; 5] }
    }

    #[cfg(test)]
    pub(crate) fn with_addon_raw(addon_raw: [u8; 5]) -> Self {
        Self { state: PassState::Inactive, raw: [0; 7], addon_raw }
    }

    #[cfg(test)]
    pub(crate) fn with_state_and_raw(state: PassState, raw: [u8; 7]) -> Self {
        Self { state, raw, addon_raw: [0; 5] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pass_is_inactive() {
        let p = Pass::new();
        assert!(!p.is_active());
    }

    #[test]
    fn activation_starts_at_idx_minus_one() {
        let mut p = Pass::new();
        p.activate();
        assert!(p.is_active());
    }

    #[test]
    fn addon_digit_decodes_only_every_fourth_edge() {
        let mut p = Pass {
            state: PassState::AddOn { slot: 1, rev: false, tick: 0 },
            raw: [0; 7],
            addon_raw: [0; 5],
        };
        let mut w = WidthWindow::new();

        // Three edges after the seed digit: the window is still only
        // partially refilled, so a premature decode attempt would fail its
        // ratio check and abort the pass. The gate must hold it inactive
        // instead of deactivating.
        for _ in 0..3 {
            w.push(1, Color::Bar);
            assert_eq!(p.advance(&w, 7, true), SymbolType::NONE);
            assert!(p.is_active());
        }

        // The fourth edge completes the window for one full character;
        // the gate now permits the decode, and it succeeds.
        w.push(1, Color::Bar);
        assert_eq!(p.advance(&w, 7, true), SymbolType::ADDON2);
        assert_eq!(p.addon_raw[1] & 0x0f, 6);
    }
}
