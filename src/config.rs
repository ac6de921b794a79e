//! Host-tunable decoder settings.
//!
//! Mirrors the teacher's settings-struct-with-`Default` pattern, minus the
//! on-device persistence round-trip (storage is an external collaborator,
//! out of scope here).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Attempt to decode a 2/5-digit add-on after a primary symbol.
    /// Disabling this keeps every pass in the main state machine and
    /// never seeds a `PassState::AddOn`.
    pub decode_addons: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self { decode_addons: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_addons() {
        assert!(DecoderConfig::default().decode_addons);
    }

    #[test]
    fn round_trips_through_json() {
        let cfg = DecoderConfig { decode_addons: false };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: DecoderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
