//! Multi-tensor range partitioner.
//!
//! A foreach kernel treats its ragged tensor list as one flattened stream and
//! gives every core an equal share of aligned blocks. Quotas are counted in
//! block-rounded units so each tensor fragment starts on a block boundary;
//! the recorded range ends are exact element offsets.

use snafu::ensure;

use crate::error::*;
use crate::math::ceil_div;

/// Inclusive slice of the flattened tensor list handled by one core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeAssignment {
    pub start_tensor: usize,
    pub start_offset: i64,
    pub end_tensor: usize,
    pub end_offset: i64,
}

/// Result of distributing a tensor list over the vector cores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Cores that receive work; equals `ranges.len()`.
    pub needed_cores: u32,
    /// Block-rounded element count of the whole list, floored at 1.
    pub total_blocks: u64,
    pub elements_per_block: u64,
    /// At least one tensor in the list has no elements.
    pub has_empty_tensor: bool,
    /// One range per core, in core order.
    pub ranges: Vec<RangeAssignment>,
}

impl Partition {
    /// Blocks every core receives before the remainder is spread.
    pub fn blocks_per_core(&self) -> u64 {
        self.total_blocks / u64::from(self.needed_cores)
    }

    /// Number of leading cores that take one extra block.
    pub fn remainder(&self) -> u64 {
        self.total_blocks % u64::from(self.needed_cores)
    }

    /// Block quota of `core`.
    pub fn quota_blocks(&self, core: usize) -> u64 {
        self.blocks_per_core() + u64::from((core as u64) < self.remainder())
    }
}

/// Split `lengths` (element counts, in list order) across at most `core_count` cores.
///
/// An all-empty list still yields one core holding the zero-length range
/// `(0, 0)..=(last, -1)`.
pub fn partition(lengths: &[u64], elements_per_block: u64, core_count: u32) -> Result<Partition> {
    ensure!(elements_per_block > 0, ZeroDivisorSnafu { what: "elements per block" });
    ensure!(core_count > 0, ZeroDivisorSnafu { what: "core count" });
    ensure!(!lengths.is_empty(), EmptyInputListSnafu { op: "partition" });

    let epb = elements_per_block;
    let total_blocks = lengths.iter().map(|&len| ceil_div(len, epb)).sum::<u64>().max(1);
    let needed = total_blocks.min(u64::from(core_count));
    let per_core = total_blocks / needed * epb;
    let remainder = total_blocks % needed;
    let last = lengths.len() - 1;

    let mut ranges = Vec::with_capacity(needed as usize);
    let mut start = (0usize, 0u64);
    let mut consumed = 0u64;
    let mut cursor = 0u64;
    let mut i = 0usize;

    while i < lengths.len() {
        let core = ranges.len() as u64;
        let quota = if core < remainder { per_core + epb } else { per_core };
        let real = lengths[i] - cursor;
        let rounded = ceil_div(real, epb) * epb;

        if consumed + rounded < quota {
            consumed += rounded;
            cursor = 0;
            i += 1;
            continue;
        }

        cursor += quota - consumed;
        let end_offset = if consumed + real < quota { lengths[i] as i64 - 1 } else { cursor as i64 - 1 };
        ranges.push(RangeAssignment {
            start_tensor: start.0,
            start_offset: start.1 as i64,
            end_tensor: i,
            end_offset,
        });
        tracing::trace!(core, start = ?start, end_tensor = i, end_offset, "closed core range");
        consumed = 0;

        if cursor < lengths[i] {
            // The next core continues inside the same tensor.
            start = (i, cursor);
            continue;
        }
        cursor = 0;
        start = (i + 1, 0);
        i += 1;
    }

    if consumed != 0 {
        ranges.push(RangeAssignment {
            start_tensor: start.0,
            start_offset: start.1 as i64,
            end_tensor: last,
            end_offset: lengths[last] as i64 - 1,
        });
    }

    if ranges.is_empty() {
        ranges.push(RangeAssignment { start_tensor: 0, start_offset: 0, end_tensor: last, end_offset: -1 });
    }

    Ok(Partition {
        needed_cores: ranges.len() as u32,
        total_blocks,
        elements_per_block: epb,
        has_empty_tensor: lengths.contains(&0),
        ranges,
    })
}
