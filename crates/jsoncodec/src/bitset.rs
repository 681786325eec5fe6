//! Required-field coverage tracking for one decode call.

use alloc::{vec, vec::Vec};

/// A fixed-size bitset sized to the number of required fields.
///
/// Schemas with up to 64 required fields stay on one inline word; larger
/// schemas spill to the heap. Allocated fresh per decode call.
#[derive(Debug)]
pub(crate) enum Bitset {
    Inline(u64),
    Heap(Vec<u64>),
}

impl Bitset {
    pub(crate) fn new(size: usize) -> Self {
        if size <= 64 {
            Bitset::Inline(0)
        } else {
            Bitset::Heap(vec![0; size.div_ceil(64)])
        }
    }

    /// Sets bit `index` and returns whether it was already set.
    pub(crate) fn test_and_set(&mut self, index: usize) -> bool {
        let mask = 1u64 << (index % 64);
        let word = match self {
            Bitset::Inline(word) => {
                debug_assert!(index < 64);
                word
            }
            Bitset::Heap(words) => &mut words[index / 64],
        };
        let seen = (*word & mask) != 0;
        *word |= mask;
        seen
    }
}
