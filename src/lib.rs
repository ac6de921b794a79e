//! Streaming decoder core for EAN-13, EAN-8, and UPC-E-family linear
//! barcodes, with provisional 2/5-digit add-on support.
//!
//! The decoder consumes one bar/space run-length width at a time through
//! [`Decoder::process_edge`] and recognizes a symbol regardless of scan
//! direction by running four phase-aligned decode attempts in parallel.
//! Everything upstream of a width stream — the image scanner, the edge
//! extractor, the symbology demultiplexer — is an external collaborator;
//! this crate only owns the decode state machine itself.

mod accumulator;
mod character;
mod config;
mod decoder;
mod error;
mod format;
mod guard;
mod pass;
mod ratio;
mod symbol;
mod width_window;

pub use config::DecoderConfig;
pub use decoder::Decoder;
pub use error::DecodeError;
pub use symbol::{Color, SymbolType};
