//! Top-level decoder: owns the width window, the four parallel passes, and
//! the shared accumulator, and exposes the single `process_edge` entry
//! point a host calls once per detected edge.

use crate::accumulator::EanAccumulator;
use crate::config::DecoderConfig;
use crate::format::format_output;
use crate::pass::Pass;
#[cfg(test)]
use crate::pass::PassState;
use crate::symbol::{Color, SymbolType};
use crate::width_window::WidthWindow;

pub struct Decoder {
    window: WidthWindow,
    s4: u32,
    passes: [Pass; 4],
    accumulator: EanAccumulator,
    edge_count: u32,
    lock: bool,
    config: DecoderConfig,
    output: [u8; 18],
    output_len: usize,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            window: WidthWindow::new(),
            s4: 0,
            passes: [Pass::new(), Pass::new(), Pass::new(), Pass::new()],
            accumulator: EanAccumulator::new(),
            edge_count: 0,
            lock: false,
            config,
            output: [0; 18],
            output_len: 0,
        }
    }

    /// Suppress output after a match until cleared. The only form of flow
    /// control this decoder offers.
    pub fn set_lock(&mut self, lock: bool) {
        self.lock = lock;
    }

    /// The most recently formatted output, or an empty slice if nothing
    /// has been emitted (or the last emission was suppressed by the lock).
    pub fn output(&self) -> &[u8] {
        &self.output[..self.output_len]
    }

    /// Advance every pass by one reported edge. Returns `NONE`, `PARTIAL`,
    /// or a completed symbol tag (optionally OR-ed with add-on bits).
    pub fn process_edge(&mut self, width: u32, color: Color) -> SymbolType {
        self.window.push(width, color);
        self.s4 = self.s4 + self.window.width(0) - self.window.width(4);

        let pass_idx = (self.edge_count & 3) as usize;
        self.edge_count = self.edge_count.wrapping_add(1);

        let mut emitted = SymbolType::NONE;
        for i in 0..4 {
            if !self.passes[i].is_active() {
                if i != pass_idx {
                    continue;
                }
                self.passes[i].activate();
            }

            let part = self.passes[i].advance(&self.window, self.s4, self.config.decode_addons);
            if part == SymbolType::NONE {
                continue;
            }

            let result = self.accumulator.integrate(&self.passes[i], part);
            log::trace!("pass {i} produced {part:?}, integrator returned {result:?}");

            if result != SymbolType::NONE {
                // Any successful integration — a stored half (`PARTIAL`)
                // or a completed symbol — resets every pass so a stale
                // phase slot never outlives the edge that resolved it.
                for pass in &mut self.passes {
                    pass.deactivate();
                }
                if result.bits() > SymbolType::PARTIAL.bits() {
                    emitted = result;
                }
            } else {
                log::debug!("checksum mismatch on pass {i}, accumulator left intact");
            }
        }

        if emitted == SymbolType::NONE {
            return SymbolType::NONE;
        }

        if self.lock {
            return SymbolType::PARTIAL;
        }

        match format_output(self.accumulator.buf(), emitted, &mut self.output) {
            Ok(len) => self.output_len = len,
            Err(err) => {
                log::warn!("failed to format decoded symbol: {err}");
                return SymbolType::NONE;
            }
        }

        emitted
    }
}
