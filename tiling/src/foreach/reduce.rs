//! Drivers of the foreach norm kernels.
//!
//! Reductions write one partial result per (tensor, core) pair into the
//! workspace and combine them in a second pass, so besides the ranges the V1
//! blob carries where each tensor's partials start.

use snafu::{OptionExt, ResultExt};
use tessel_platform::PlatformBudget;

use super::common::division_for;
use super::data::{ForeachReduceData, ForeachV2Data, MiddleLists, PartitionLists};
use super::partition::partition;
use super::ub::{ForeachOp, max_tile};
use super::{ForeachList, REDUCE_WORKSPACE_BYTES, op_name};
use crate::config::TilingConfig;
use crate::error::*;
use crate::math::ceil_div;
use crate::output::{TilingData, TilingOutput};
use crate::tensor::TensorDesc;

const OP: ForeachOp = ForeachOp::Norm;

#[tracing::instrument(skip_all, fields(tensors = inputs.first().map_or(0, Vec::len)))]
pub fn foreach_reduce_v1(
    inputs: &[Vec<TensorDesc>],
    budget: &PlatformBudget,
    config: &TilingConfig,
) -> Result<TilingOutput> {
    budget.validate().context(PlatformSnafu)?;
    let list = ForeachList::from_inputs(OP, inputs)?;
    list.check_capacity()?;
    let key = list.dtype.reduce_tiling_key().context(UnsupportedDTypeSnafu { op: op_name(OP), dtype: list.dtype })?;

    let part = partition(&list.lengths, list.elements_per_block(), budget.vector_cores)?;
    let lists = PartitionLists::new(&list.lengths, &part)?;
    let middle = MiddleLists::new(list.len(), &lists, part.ranges.len());

    let mut data = ForeachReduceData {
        inputs_tensor_ub_size: 0,
        need_core_num: part.needed_cores,
        total_tensor_count: list.len() as u32,
        lists,
        middle,
    };
    let division = division_for(OP, &list, config)?;
    let tile = max_tile(budget.ub_bytes, data.byte_size() as u64, list.dtype, &division)?;
    data.inputs_tensor_ub_size = tile.bytes;

    tracing::debug!(
        dtype = ?list.dtype,
        need_core_num = part.needed_cores,
        has_empty_tensor = part.has_empty_tensor,
        ub_tile_bytes = tile.bytes,
        "foreach reduce tiling"
    );
    Ok(TilingOutput::new(key, part.needed_cores, REDUCE_WORKSPACE_BYTES, &data))
}

#[tracing::instrument(skip_all, fields(tensors = inputs.first().map_or(0, Vec::len)))]
pub fn foreach_reduce_v2(
    inputs: &[Vec<TensorDesc>],
    budget: &PlatformBudget,
    config: &TilingConfig,
) -> Result<TilingOutput> {
    budget.validate().context(PlatformSnafu)?;
    let list = ForeachList::from_inputs(OP, inputs)?;
    let key = list.dtype.reduce_tiling_key().context(UnsupportedDTypeSnafu { op: op_name(OP), dtype: list.dtype })?;

    let epb = list.elements_per_block();
    let blocks = list.lengths.iter().map(|&len| ceil_div(len, epb)).sum::<u64>().max(1);
    let need_core_num = blocks.min(u64::from(budget.vector_cores)) as u32;

    let mut data = ForeachV2Data { inputs_tensor_ub_size: 0, need_core_num };
    let division = division_for(OP, &list, config)?;
    let tile = max_tile(budget.ub_bytes, data.byte_size() as u64, list.dtype, &division)?;
    data.inputs_tensor_ub_size = tile.bytes;

    tracing::debug!(dtype = ?list.dtype, need_core_num, ub_tile_bytes = tile.bytes, "foreach reduce v2 tiling");
    Ok(TilingOutput::new(key, need_core_num, REDUCE_WORKSPACE_BYTES, &data))
}
