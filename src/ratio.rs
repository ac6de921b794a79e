//! Edge-pair ratio classification.
//!
//! A character in the EAN family is seven modules wide; every edge-pair sum
//! sampled within one character falls on one of four module counts: 2, 3, 4,
//! or 5. [`decode_e`] maps a raw width sum onto that small alphabet using the
//! live reference scale `s`, rather than any absolute width, so the same
//! code works for symbols scanned at any size or speed.

/// Width-unit codes returned by [`decode_e`]: `Two` through `Five` modules.
pub(crate) type Code = u8;

/// Classify edge-pair width `e` against reference scale `s` (the width of
/// `n` modules, usually a four-width character sum scaled to seven
/// modules). Returns `Some(code)` with `code` in `0..=3` standing for
/// 2..=5 modules, or `None` when `e` falls outside tolerance (roughly
/// `[1.5, 5.5]` module-widths).
///
/// `s == 0` is always invalid: there is no reference yet to measure against.
pub(crate) fn decode_e(e: u32, s: u32, n: u32) -> Option<Code> {
    if s == 0 {
        return None;
    }
    // round(e * n / s) - 2, clamped to the valid unit range. The `* 2 + 1`
    // / `* 2` dance rounds to nearest instead of truncating.
    let numerator = (e as i64) * (n as i64) * 2 + 1;
    let denominator = (s as i64) * 2;
    let rounded = numerator / denominator - 2;
    if (0..=3).contains(&rounded) {
        Some(rounded as u8)
    } else {
        None
    }
}
