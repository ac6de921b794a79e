//! Single-character decode: four edges in, a 5-bit parity+digit code out.
//!
//! The lookup table is the compacted `(E1, E2)` edge-pair map shared by
//! every character position in this family, whether it belongs to the left
//! or right half of an EAN-13, the left half of an EAN-8, or a UPC-E digit.

use crate::ratio::decode_e;
use crate::symbol::Color;
use crate::width_window::WidthWindow;

/// `digits[code]`, `code = (E1 << 2) | E2` after the D2 disambiguation
/// step. Bit 4 of each entry is the parity bit (A = 0, B = 1); bits 0-3
/// are the digit.
const DIGITS: [u8; 20] = [
    0x06, 0x10, 0x04, 0x13, // E1=2, E2=2..5
    0x19, 0x08, 0x11, 0x05, // E1=3, E2=2..5 (d2 <= threshold)
    0x09, 0x12, 0x07, 0x15, // E1=4, E2=2..5 (d2 <= threshold)
    0x16, 0x00, 0x14, 0x03, // E1=5, E2=2..5
    0x18, 0x01, 0x02, 0x17, // E1E2 in {43, 44, 33, 34}, d2 > threshold
];

/// Decode the most recent four widths into a `PDDD` byte (parity bit in
/// bit 4, digit in bits 0-3). Returns `None` when either edge-pair ratio
/// falls outside tolerance.
pub(crate) fn decode4(window: &WidthWindow, s4: u32) -> Option<u8> {
    let e1 = match window.color() {
        Color::Bar => window.width(0) + window.width(1),
        Color::Space => window.width(2) + window.width(3),
    };
    let e2 = window.width(1) + window.width(2);

    let c1 = decode_e(e1, s4, 7)?;
    let c2 = decode_e(e2, s4, 7)?;
    let mut code = (c1 << 2) | c2;

    // E1E2 in {33, 44, 34, 43} need a tie-break against the diagonal pair.
    if (1u32 << code) & 0x0660 != 0 {
        let d2 = (match window.color() {
            Color::Bar => window.width(0) + window.width(2),
            Color::Space => window.width(1) + window.width(3),
        }) * 7;
        let mid = if (1u32 << code) & 0x0420 != 0 { 3 } else { 4 };
        if d2 > mid * s4 {
            code = ((code >> 1) & 0x03) | 0x10;
        }
    }

    debug_assert!(code < 0x14);
    Some(DIGITS[code as usize])
}
