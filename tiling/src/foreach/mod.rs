//! Tiling for the foreach operator family.
//!
//! A foreach operator applies one elementwise or reduction kernel to a whole
//! list of tensors. The host side flattens the list into one stream, splits
//! it into per-core ranges ([`partition`]) and sizes the UB buffers
//! ([`ub`]). The V1 layouts ship the ranges in the blob; the V2 layouts only
//! ship the core count and tile size and let the kernel walk the list.

pub mod common;
pub mod data;
pub mod partition;
pub mod reduce;
pub mod ub;

pub use common::{foreach_common_v1, foreach_common_v2};
pub use data::{ForeachCommonData, ForeachReduceData, ForeachV2Data, MiddleLists, PartitionLists};
pub use partition::{Partition, RangeAssignment, partition};
pub use reduce::{foreach_reduce_v1, foreach_reduce_v2};
pub use ub::{ForeachOp, UbDivision, UbTileBudget, max_tile};

use snafu::{OptionExt, ensure};
use tessel_dtype::{BlockAlignment, ScalarDType};

use crate::error::*;
use crate::tensor::TensorDesc;

/// Slots in the V1 per-tensor lists.
pub const MAX_TENSOR_COUNT: usize = 50;
/// Slots in the V1 per-core lists.
pub const MAX_CORE_COUNT: usize = 50;

/// Workspace of the elementwise kernels, which need none of their own.
pub const COMMON_WORKSPACE_BYTES: usize = 32;
/// System workspace of the reduction kernels.
pub const REDUCE_SYSTEM_WORKSPACE_BYTES: usize = 16 * 1024 * 1024;
/// System workspace plus one f32 partial per core and per tensor.
pub const REDUCE_WORKSPACE_BYTES: usize =
    REDUCE_SYSTEM_WORKSPACE_BYTES + (MAX_CORE_COUNT + MAX_TENSOR_COUNT) * size_of::<f32>();

/// The tensor list an operator works on, reduced to what tiling needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeachList {
    pub dtype: ScalarDType,
    /// Element count of every tensor, in list order.
    pub lengths: Vec<u64>,
}

impl ForeachList {
    /// Pick the operator's list out of its dynamic inputs and check it is uniform.
    pub fn from_inputs(op: ForeachOp, inputs: &[Vec<TensorDesc>]) -> Result<Self> {
        let name = op_name(op);
        let list = inputs.get(op.list_input()).context(EmptyInputListSnafu { op: name })?;
        let first = list.first().context(EmptyInputListSnafu { op: name })?;

        let dtype = first.dtype;
        if let Some((index, bad)) = list.iter().enumerate().find(|(_, t)| t.dtype != dtype) {
            return DTypeMismatchSnafu { index, expected: dtype, found: bad.dtype }.fail();
        }
        ensure!(op.supports(dtype), UnsupportedDTypeSnafu { op: name, dtype });

        Ok(Self { dtype, lengths: list.iter().map(TensorDesc::num_elements).collect() })
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    pub fn total_elements(&self) -> u64 {
        self.lengths.iter().sum()
    }

    /// Partitioning always counts in 32-byte blocks.
    pub fn elements_per_block(&self) -> u64 {
        self.dtype.elements_per_block(BlockAlignment::Narrow) as u64
    }

    pub(crate) fn check_capacity(&self) -> Result<()> {
        ensure!(
            self.len() <= MAX_TENSOR_COUNT,
            CapacityExceededSnafu { what: "tensor", count: self.len(), max: MAX_TENSOR_COUNT }
        );
        Ok(())
    }
}

/// Static operator name for error reports.
pub(crate) fn op_name(op: ForeachOp) -> &'static str {
    op.into()
}
