//! Result tags: the color of an element and the bit-packed symbol type.

/// Current scan-direction color of the most recently reported edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Bar,
    Space,
}

bitflags::bitflags! {
    /// A decoded symbol's type, OR-ed with add-on and direction bits the way
    /// a host report consumes it. Low nibble is the symbology; the add-on
    /// bits and the direction bit are independent flags that ride alongside
    /// it in the same value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SymbolType: u16 {
        const NONE = 0x0000;
        const PARTIAL = 0x0001;
        const EAN8 = 0x0008;
        const UPCE = 0x0009;
        const EAN13 = 0x000d;
        const ADDON2 = 0x0020;
        const ADDON5 = 0x0050;
        const EAN_RIGHT = 0x1000;
    }
}

impl SymbolType {
    /// Mask covering the symbology sub-field (`NONE`/`PARTIAL`/`EAN8`/
    /// `UPCE`/`EAN13`); every symbology value fits in the low nibble.
    const SYMBOLOGY_MASK: u16 = 0x000f;
    /// Mask covering both add-on flags.
    const ADDON_MASK: u16 = 0x0070;

    pub const EAN_LEFT: SymbolType = SymbolType::empty();

    pub fn symbology(self) -> SymbolType {
        SymbolType::from_bits_truncate(self.bits() & Self::SYMBOLOGY_MASK)
    }

    pub fn has_addon(self) -> bool {
        self.bits() & Self::ADDON_MASK != 0
    }

    pub fn is_right(self) -> bool {
        self.contains(SymbolType::EAN_RIGHT)
    }
}
