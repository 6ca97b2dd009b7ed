//! Tiling blobs read by the foreach kernels.

use snafu::ensure;

use super::partition::Partition;
use super::{MAX_CORE_COUNT, MAX_TENSOR_COUNT};
use crate::error::*;
use crate::output::{TilingData, TilingWriter};

/// Per-tensor and per-core lists of the V1 kernels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionLists {
    pub tensor_data_count: [i64; MAX_TENSOR_COUNT],
    pub tensor_start: [u16; MAX_CORE_COUNT],
    pub tensor_end: [u16; MAX_CORE_COUNT],
    pub tensor_start_offset: [i64; MAX_CORE_COUNT],
    pub tensor_end_offset: [i64; MAX_CORE_COUNT],
}

impl PartitionLists {
    pub fn new(lengths: &[u64], partition: &Partition) -> Result<Self> {
        ensure!(
            lengths.len() <= MAX_TENSOR_COUNT,
            CapacityExceededSnafu { what: "tensor", count: lengths.len(), max: MAX_TENSOR_COUNT }
        );
        ensure!(
            partition.ranges.len() <= MAX_CORE_COUNT,
            CapacityExceededSnafu { what: "core", count: partition.ranges.len(), max: MAX_CORE_COUNT }
        );

        let mut lists = Self {
            tensor_data_count: [0; MAX_TENSOR_COUNT],
            tensor_start: [0; MAX_CORE_COUNT],
            tensor_end: [0; MAX_CORE_COUNT],
            tensor_start_offset: [0; MAX_CORE_COUNT],
            tensor_end_offset: [0; MAX_CORE_COUNT],
        };
        for (slot, &len) in lists.tensor_data_count.iter_mut().zip(lengths) {
            *slot = len as i64;
        }
        for (core, range) in partition.ranges.iter().enumerate() {
            lists.tensor_start[core] = range.start_tensor as u16;
            lists.tensor_end[core] = range.end_tensor as u16;
            lists.tensor_start_offset[core] = range.start_offset;
            lists.tensor_end_offset[core] = range.end_offset;
        }
        Ok(lists)
    }

    fn write(&self, w: &mut TilingWriter) {
        w.array(&self.tensor_data_count)
            .array(&self.tensor_start)
            .array(&self.tensor_end)
            .array(&self.tensor_start_offset)
            .array(&self.tensor_end_offset);
    }
}

/// Blob of the V1 elementwise kernels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeachCommonData {
    pub inputs_tensor_ub_size: u64,
    pub lists: PartitionLists,
}

impl TilingData for ForeachCommonData {
    fn write(&self, w: &mut TilingWriter) {
        w.field(self.inputs_tensor_ub_size);
        self.lists.write(w);
    }
}

/// Blob shared by the V2 kernels, which partition on device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForeachV2Data {
    pub inputs_tensor_ub_size: u64,
    pub need_core_num: u32,
}

impl TilingData for ForeachV2Data {
    fn write(&self, w: &mut TilingWriter) {
        w.field(self.inputs_tensor_ub_size).field(self.need_core_num);
    }
}

/// Lists telling the reduction kernel where each tensor's partial results land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiddleLists {
    pub tensor_middle_count: [u16; MAX_TENSOR_COUNT],
    pub tensor_middle_start: [u16; MAX_TENSOR_COUNT],
    pub core_middle_offset: [u16; MAX_CORE_COUNT],
}

impl MiddleLists {
    /// Count the partial results per tensor and where each core writes its own.
    ///
    /// A tensor gets one partial per core touching it: one for its first core
    /// plus one for every later core that starts inside it.
    pub fn new(tensor_count: usize, lists: &PartitionLists, need: usize) -> Self {
        let mut middle = Self {
            tensor_middle_count: [0; MAX_TENSOR_COUNT],
            tensor_middle_start: [0; MAX_TENSOR_COUNT],
            core_middle_offset: [0; MAX_CORE_COUNT],
        };
        let tensor_count = tensor_count.min(MAX_TENSOR_COUNT);
        let need = need.min(MAX_CORE_COUNT);

        let mut pre = 0u16;
        for core in 1..need {
            let start = lists.tensor_start[core];
            if start == pre {
                middle.tensor_middle_count[pre as usize] += 1;
            } else if lists.tensor_start_offset[core] > 0 {
                middle.tensor_middle_count[start as usize] += 1;
            }
            pre = start;
        }

        let mut acc = 0u16;
        for t in 0..tensor_count {
            middle.tensor_middle_count[t] += 1;
            middle.tensor_middle_start[t] = acc;
            acc += middle.tensor_middle_count[t];
        }

        let mut offset = 0u16;
        for core in 0..need {
            middle.core_middle_offset[core] = offset;
            offset += lists.tensor_end[core] - lists.tensor_start[core] + 1;
        }
        middle
    }
}

/// Blob of the V1 reduction kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeachReduceData {
    pub inputs_tensor_ub_size: u64,
    pub need_core_num: u32,
    pub total_tensor_count: u32,
    pub lists: PartitionLists,
    pub middle: MiddleLists,
}

impl TilingData for ForeachReduceData {
    fn write(&self, w: &mut TilingWriter) {
        w.field(self.inputs_tensor_ub_size).field(self.need_core_num).field(self.total_tensor_count);
        self.lists.write(w);
        w.array(&self.middle.tensor_middle_count)
            .array(&self.middle.tensor_middle_start)
            .array(&self.middle.core_middle_offset);
    }
}
