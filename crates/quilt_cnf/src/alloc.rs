//! Variable allocation over three disjoint id ranges.

use crate::bus::Bus;
use crate::lit::Lit;
use serde::{Deserialize, Serialize};

/// First id of the configuration range; variable 1 is the truth sentinel.
const FIRST_CONFIG: u32 = 2;
/// First id of the input range.
const FIRST_INPUT: u32 = 0x3F00_0000;
/// First id of the internal-signal range.
const FIRST_SIGNAL: u32 = 0x4000_0000;
/// One past the last usable variable id.
const ID_LIMIT: u32 = 1 << 31;

/// Issues fresh variable ids from three disjoint, monotonically increasing
/// ranges: configuration bits, circuit inputs, and internal signals.
///
/// The allocator is owned by the root of a compilation; ids are never
/// reused or released, so every literal issued over the lifetime of one
/// allocator refers to a distinct variable. The per-range counts are part
/// of the finished problem hand-off.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VarAlloc {
    next_config: u32,
    next_input: u32,
    next_signal: u32,
}

impl VarAlloc {
    /// Creates an allocator with all three ranges untouched.
    pub fn new() -> Self {
        Self {
            next_config: FIRST_CONFIG,
            next_input: FIRST_INPUT,
            next_signal: FIRST_SIGNAL,
        }
    }

    /// Allocates a configuration-range bus of `width` fresh variables.
    pub fn alloc_config(&mut self, width: usize) -> Bus {
        Self::take(&mut self.next_config, FIRST_INPUT, width)
    }

    /// Allocates an input-range bus of `width` fresh variables.
    pub fn alloc_input(&mut self, width: usize) -> Bus {
        Self::take(&mut self.next_input, FIRST_SIGNAL, width)
    }

    /// Allocates an internal-signal-range bus of `width` fresh variables.
    pub fn alloc_signal(&mut self, width: usize) -> Bus {
        Self::take(&mut self.next_signal, ID_LIMIT, width)
    }

    fn take(next: &mut u32, limit: u32, width: usize) -> Bus {
        let bits = (0..width)
            .map(|_| {
                let var = *next;
                assert!(var < limit, "variable range exhausted at id {var}");
                *next += 1;
                Lit::positive(var)
            })
            .collect();
        Bus::new(bits)
    }

    /// Number of configuration variables allocated so far.
    pub fn config_count(&self) -> u32 {
        self.next_config - FIRST_CONFIG
    }

    /// Number of input variables allocated so far.
    pub fn input_count(&self) -> u32 {
        self.next_input - FIRST_INPUT
    }

    /// Number of internal-signal variables allocated so far.
    pub fn signal_count(&self) -> u32 {
        self.next_signal - FIRST_SIGNAL
    }
}

impl Default for VarAlloc {
    fn default() -> Self {
        Self::new()
    }
}
