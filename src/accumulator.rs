//! Collects left/right/add-on partial decodes into one symbol buffer,
//! enforcing cross-scan consistency and validating the checksum.

use crate::pass::Pass;
use crate::symbol::SymbolType;

/// `buf[0..6]`: EAN-13 left half (or `buf[0..3]` for an EAN-8 left half).
/// `buf[7..12]`: EAN-13 right half (or `buf[4..6]` for an EAN-8 right half).
/// `buf[13..17]`: add-on digits. `None` is the "unset" sentinel.
#[derive(Debug, Clone)]
pub(crate) struct EanAccumulator {
    buf: [Option<u8>; 18],
    left: SymbolType,
    right: SymbolType,
    addon: SymbolType,
}

impl EanAccumulator {
    pub(crate) fn new() -> Self {
        Self {
            buf: [None; 18],
            left: SymbolType::NONE,
            right: SymbolType::NONE,
            addon: SymbolType::NONE,
        }
    }

    fn reset_labels(&mut self) {
        self.left = SymbolType::NONE;
        self.right = SymbolType::NONE;
        self.addon = SymbolType::NONE;
    }

    /// Integrate one pass's result. `part` is the tag a pass produced
    /// (e.g. `EAN13`, `EAN13 | EAN_RIGHT`, `ADDON2`). Returns `PARTIAL`
    /// when no complete symbol exists yet, `NONE` on checksum failure, or
    /// the composite symbol type (with add-on bits OR-ed in) on success.
    pub(crate) fn integrate(&mut self, pass: &Pass, part: SymbolType) -> SymbolType {
        if part.has_addon() {
            self.integrate_addon(pass, part);
        } else {
            self.integrate_half(pass, part);
        }

        let completed = self.left.symbology() & self.right.symbology();
        let mut result = if completed.is_empty() {
            SymbolType::PARTIAL
        } else {
            completed
        };

        if (result == SymbolType::EAN13 && !self.check_parity(12))
            || (result == SymbolType::EAN8 && !self.check_parity(7))
        {
            result = SymbolType::NONE;
        }

        if result.bits() > SymbolType::PARTIAL.bits() {
            result |= self.addon;
        }
        result
    }

    fn integrate_addon(&mut self, pass: &Pass, part: SymbolType) {
        let count = if part == SymbolType::ADDON5 { 5 } else { 2 };
        for (i, &pddd) in pass.addon_digits(count).iter().enumerate() {
            let digit = pddd & 0x0f;
            if self.addon != SymbolType::NONE && self.buf[i + 13] != Some(digit) {
                self.reset_labels();
            }
            self.buf[i + 13] = Some(digit);
        }
        self.addon = part;
    }

    fn integrate_half(&mut self, pass: &Pass, part: SymbolType) {
        let symbology = part.symbology();
        if (self.left != SymbolType::NONE && symbology != self.left)
            || (self.right != SymbolType::NONE && symbology != self.right)
        {
            self.reset_labels();
        }

        let raw = pass.raw();
        let is_13 = symbology == SymbolType::EAN13;
        if part.is_right() {
            // EAN-13 right half: raw[1..=6] -> buf[7..=12].
            // EAN-8 right half: raw[1..=4] -> buf[4..=7].
            let (last, mut j) = if is_13 { (6, 12) } else { (4, 7) };
            for i in (1..=last).rev() {
                let digit = raw[i] & 0x0f;
                if self.right != SymbolType::NONE && self.buf[j] != Some(digit) {
                    self.reset_labels();
                }
                self.buf[j] = Some(digit);
                j -= 1;
            }
            self.right = symbology;
        } else {
            // EAN-13 left half: raw[0..=6] -> buf[0..=6] (raw[0] is the
            // parity-derived leading digit). EAN-8 left half: raw[1..=4]
            // -> buf[0..=3].
            let (first, last, mut j) = if is_13 { (0, 6, 6) } else { (1, 4, 3) };
            for i in (first..=last).rev() {
                let digit = raw[i] & 0x0f;
                if self.left != SymbolType::NONE && self.buf[j] != Some(digit) {
                    self.reset_labels();
                }
                self.buf[j] = Some(digit);
                if j == 0 {
                    break;
                }
                j -= 1;
            }
            self.left = symbology;
        }
    }

    /// Carry-relative mod-20/mod-10 weighted checksum over `buf[0..n]`
    /// against the check digit at `buf[n]`. This reproduces the original
    /// reduction steps exactly rather than computing an equivalent closed
    /// form, so intermediate values stay traceable.
    fn check_parity(&self, n: usize) -> bool {
        let mut chk: u32 = 0;
        for i in 0..n {
            let Some(d) = self.buf[i] else { return false };
            let d = d as u32;
            chk += d;
            if (i ^ n) & 1 != 0 {
                chk += d << 1;
                if chk >= 20 {
                    chk -= 20;
                }
            }
            if chk >= 10 {
                chk -= 10;
            }
        }
        if chk != 0 {
            chk = 10 - chk;
        }
        let Some(check_digit) = self.buf[n] else {
            return false;
        };
        chk == check_digit as u32
    }

    pub(crate) fn buf(&self) -> &[Option<u8>; 18] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_accumulator_has_no_labels() {
        let acc = EanAccumulator::new();
        assert_eq!(acc.left, SymbolType::NONE);
        assert_eq!(acc.right, SymbolType::NONE);
    }

    #[test]
    fn checksum_matches_known_ean13() {
        let mut acc = EanAccumulator::new();
        for (i, d) in "400638133393".chars().enumerate() {
            acc.buf[i] = Some(d.to_digit(10).unwrap() as u8);
        }
        acc.buf[12] = Some(1);
        assert!(acc.check_parity(12));
    }

    #[test]
    fn checksum_rejects_corrupted_digit() {
        let mut acc = EanAccumulator::new();
        for (i, d) in "400638133393".chars().enumerate() {
            acc.buf[i] = Some(d.to_digit(10).unwrap() as u8);
        }
        acc.buf[12] = Some(2);
        assert!(!acc.check_parity(12));
    }

    #[test]
    fn left_and_right_halves_combine_into_a_complete_ean13() {
        let mut acc = EanAccumulator::new();
        let left = Pass::with_raw([4, 0, 0, 6, 3, 8, 1]);
        let right = Pass::with_raw([0, 3, 3, 3, 9, 3, 1]);

        assert_eq!(acc.integrate(&left, SymbolType::EAN13), SymbolType::PARTIAL);
        let result = acc.integrate(&right, SymbolType::EAN13 | SymbolType::EAN_RIGHT);

        assert_eq!(result, SymbolType::EAN13);
        let digits: Vec<u8> = acc.buf[0..13].iter().map(|d| d.unwrap()).collect();
        assert_eq!(digits, vec![4, 0, 0, 6, 3, 8, 1, 3, 3, 3, 9, 3, 1]);
    }

    #[test]
    fn checksum_failure_keeps_the_buffer_for_a_later_rescan() {
        let mut acc = EanAccumulator::new();
        let left = Pass::with_raw([4, 0, 0, 6, 3, 8, 1]);
        // Corrupted check digit (2 instead of 1).
        let right_bad = Pass::with_raw([0, 3, 3, 3, 9, 3, 2]);

        acc.integrate(&left, SymbolType::EAN13);
        let result = acc.integrate(&right_bad, SymbolType::EAN13 | SymbolType::EAN_RIGHT);
        assert_eq!(result, SymbolType::NONE);

        // A full subsequent scan re-presents both halves. The corrected
        // right half disagrees with the stored (wrong) check digit, which
        // resets every label — including the untouched left half — before
        // writing the fresh digits; the left half then needs one more
        // rescan to re-establish its label.
        let right_good = Pass::with_raw([0, 3, 3, 3, 9, 3, 1]);
        let result = acc.integrate(&right_good, SymbolType::EAN13 | SymbolType::EAN_RIGHT);
        assert_eq!(result, SymbolType::PARTIAL);

        let result = acc.integrate(&left, SymbolType::EAN13);
        assert_eq!(result, SymbolType::EAN13);
    }

    #[test]
    fn addon_digits_are_or_ed_into_a_completed_symbol() {
        let mut acc = EanAccumulator::new();
        let left = Pass::with_raw([4, 0, 0, 6, 3, 8, 1]);
        let right = Pass::with_raw([0, 3, 3, 3, 9, 3, 1]);
        let addon = Pass::with_addon_raw([1, 2, 0, 0, 0]);

        acc.integrate(&left, SymbolType::EAN13);
        acc.integrate(&right, SymbolType::EAN13 | SymbolType::EAN_RIGHT);
        let result = acc.integrate(&addon, SymbolType::ADDON2);

        assert_eq!(result, SymbolType::EAN13 | SymbolType::ADDON2);
        assert_eq!(acc.buf[13], Some(1));
        assert_eq!(acc.buf[14], Some(2));
    }
}
