//! Drivers of the elementwise foreach kernels.

use snafu::{OptionExt, ResultExt, ensure};
use tessel_platform::PlatformBudget;

use super::data::{ForeachCommonData, ForeachV2Data, PartitionLists};
use super::partition::partition;
use super::ub::{ForeachOp, UbDivision, max_tile};
use super::{COMMON_WORKSPACE_BYTES, ForeachList, MAX_CORE_COUNT, op_name};
use crate::config::TilingConfig;
use crate::error::*;
use crate::math::ceil_div;
use crate::output::{TilingData, TilingOutput};
use crate::tensor::TensorDesc;

/// Ranges computed on the host, at most 50 tensors and 50 cores.
#[tracing::instrument(skip_all, fields(op = %op))]
pub fn foreach_common_v1(
    op: ForeachOp,
    inputs: &[Vec<TensorDesc>],
    budget: &PlatformBudget,
    config: &TilingConfig,
) -> Result<TilingOutput> {
    budget.validate().context(PlatformSnafu)?;
    let list = ForeachList::from_inputs(op, inputs)?;
    list.check_capacity()?;
    let key = list.dtype.tiling_key().context(UnsupportedDTypeSnafu { op: op_name(op), dtype: list.dtype })?;

    let part = partition(&list.lengths, list.elements_per_block(), budget.vector_cores)?;
    ensure!(
        part.ranges.len() <= MAX_CORE_COUNT,
        CapacityExceededSnafu { what: "core", count: part.ranges.len(), max: MAX_CORE_COUNT }
    );

    let mut data = ForeachCommonData { inputs_tensor_ub_size: 0, lists: PartitionLists::new(&list.lengths, &part)? };
    let division = division_for(op, &list, config)?;
    let tile = max_tile(budget.ub_bytes, data.byte_size() as u64, list.dtype, &division)?;
    data.inputs_tensor_ub_size = tile.bytes;

    tracing::debug!(
        dtype = ?list.dtype,
        tensors = list.len(),
        need_core_num = part.needed_cores,
        total_blocks = part.total_blocks,
        ub_tile_bytes = tile.bytes,
        "foreach common tiling"
    );
    Ok(TilingOutput::new(key, part.needed_cores, COMMON_WORKSPACE_BYTES, &data))
}

/// Core count and tile size only; the kernel walks the list itself.
#[tracing::instrument(skip_all, fields(op = %op))]
pub fn foreach_common_v2(
    op: ForeachOp,
    inputs: &[Vec<TensorDesc>],
    budget: &PlatformBudget,
    config: &TilingConfig,
) -> Result<TilingOutput> {
    budget.validate().context(PlatformSnafu)?;
    let list = ForeachList::from_inputs(op, inputs)?;
    let key = list.dtype.tiling_key().context(UnsupportedDTypeSnafu { op: op_name(op), dtype: list.dtype })?;

    let blocks = ceil_div(list.total_elements(), list.elements_per_block()).max(1);
    let need_core_num = blocks.min(u64::from(budget.vector_cores)) as u32;

    let mut data = ForeachV2Data { inputs_tensor_ub_size: 0, need_core_num };
    let division = division_for(op, &list, config)?;
    let tile = max_tile(budget.ub_bytes, data.byte_size() as u64, list.dtype, &division)?;
    data.inputs_tensor_ub_size = tile.bytes;

    tracing::debug!(dtype = ?list.dtype, tensors = list.len(), need_core_num, ub_tile_bytes = tile.bytes, "foreach common v2 tiling");
    Ok(TilingOutput::new(key, need_core_num, COMMON_WORKSPACE_BYTES, &data))
}

pub(super) fn division_for(op: ForeachOp, list: &ForeachList, config: &TilingConfig) -> Result<UbDivision> {
    let division = op.division(list.dtype)?;
    Ok(if config.force_narrow_bf16 { division.narrow_bf16() } else { division })
}
