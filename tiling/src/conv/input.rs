//! Input-gradient tiling: `dx = conv3d_backprop_input(filter, dy)`.
//!
//! The kernel runs the gradient as a forward convolution of the dilated
//! `dy` with the flipped filter, so besides the core split and cube block
//! plan the blob carries the pads of that equivalent convolution.

use snafu::{ResultExt, ensure};
use tessel_dtype::ScalarDType;
use tessel_platform::PlatformBudget;

use super::data::DxTilingData;
use super::knowledge::{self, KnowledgeTable, PrecomputedPlan, ShapeKey};
use super::plan::{ConvBlockPlan, ConvDimPlan, fits_l0, input_fmap_rows, input_l1_bytes};
use super::search::{CacheTiling, DefaultSearch, GeneralSearch};
use super::shape::{
    Conv3dAttrs, Conv3dShape, ConvPads, DIM_MAX, DataFormat, GroupEnlarge, Padding, ResolvedAttrs, StorageFormat,
    channel_block, check_conv_dtypes, check_dim, check_rank, dilated, hf32_requested, ncdhw_of, resolve_groups,
};
use super::{
    BEST_BASE_K, BEST_BASE_M, BEST_BASE_N, BLOCK_CUBE, K_START_POSITION_MAX, L1_RESERVED_BYTES, WORKSPACE_BYTES,
};
use crate::config::TilingConfig;
use crate::error::*;
use crate::math::{ceil_align, ceil_div, dim_factor, factors_desc, floor_align, gcd, max_divisor};
use crate::output::TilingOutput;
use crate::tensor::TensorDesc;

const OP: &str = "conv3d_backprop_input";

/// L1 is split four ways between the A and B double buffers.
const BUFFER_NUM_L1: u64 = 4;
const STRIDE_HW_MAX: i64 = 63;
const STRIDE_D_MAX: i64 = 255;
const DILATION_MAX: i64 = 255;
const PAD_MAX: i64 = 255;
const KERNEL_HW_MAX: i64 = 511;

/// Shapes the kernel-split specialization was built for, as [`ShapeKey`] values.
const KERNEL_SPLIT_SHAPES: [[u64; 24]; 2] = [
    [1, 62, 16, 66, 66, 120, 16, 128, 128, 4, 4, 4, 2, 2, 2, 3, 3, 3, 3, 3, 3, 1, 1, 1],
    [1, 122, 16, 130, 130, 240, 1, 256, 256, 4, 4, 4, 2, 2, 2, 3, 3, 3, 3, 3, 3, 1, 1, 1],
];

// ============================================================================
// ARGUMENTS
// ============================================================================

/// Extra attributes of the transposed-convolution entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransposeArgs {
    /// Five entries in the activation layout; N and C must be 0.
    pub output_padding: Vec<i64>,
    pub offset_x: i64,
    pub has_offset_w: bool,
    pub has_bias: bool,
}

impl Default for TransposeArgs {
    fn default() -> Self {
        Self { output_padding: vec![0; 5], offset_x: 0, has_offset_w: false, has_bias: false }
    }
}

/// Operands of one input-gradient tiling call.
///
/// `out_backprop` and `y` use `attrs.data_format`; the filter has its own.
/// For a transposed convolution an all-zero `y` shape is inferred from the
/// other operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conv3dBackpropInputArgs {
    pub filter: TensorDesc,
    pub filter_format: DataFormat,
    pub out_backprop: TensorDesc,
    pub y: TensorDesc,
    pub y_storage: StorageFormat,
    pub attrs: Conv3dAttrs,
    pub transpose: Option<TransposeArgs>,
}

// ============================================================================
// DRIVER
// ============================================================================

/// Tile an input gradient with the built-in general search as fallback.
pub fn conv3d_backprop_input(
    args: &Conv3dBackpropInputArgs,
    budget: &PlatformBudget,
    config: &TilingConfig,
) -> Result<TilingOutput> {
    conv3d_backprop_input_with(args, budget, config, &DefaultSearch)
}

/// Tile an input gradient, falling back to `search` when the heuristic is rejected.
#[tracing::instrument(
    skip_all,
    fields(dtype = ?args.out_backprop.dtype, cube_cores = budget.cube_cores, transpose = args.transpose.is_some())
)]
pub fn conv3d_backprop_input_with(
    args: &Conv3dBackpropInputArgs,
    budget: &PlatformBudget,
    config: &TilingConfig,
    search: &dyn GeneralSearch,
) -> Result<TilingOutput> {
    budget.validate().context(PlatformSnafu)?;
    let problem = InputProblem::new(args)?;
    let shape = &problem.shape;
    let tiler = InputTiler::new(shape, budget, config.dx_core_used_threshold);

    let (plan, basic_block) = match knowledge_plan(shape, budget.cube_cores, config) {
        Some(hit) => hit,
        None => (tiler.plan(config, search)?, false),
    };

    let load_b2 = if shape.kernel_hw() == 1 {
        2
    } else if plan.block.base_k / shape.c0 >= shape.kernel_hw() {
        1
    } else {
        0
    };
    let kernel_split = matches!(budget.cube_cores, 20 | 24) && kernel_split_shape(shape);
    let tiling_key = load_b2 + 10 * u64::from(kernel_split) + 100 * u64::from(basic_block);

    let mut workspace = WORKSPACE_BYTES;
    if args.y_storage == StorageFormat::Ncdhw {
        workspace += (u64::from(budget.cube_cores) * budget.l0c_bytes) as usize;
    }

    tracing::debug!(
        tiling_key,
        core_num = plan.dims.core_num,
        dims = ?plan.dims,
        block = ?plan.block,
        init_output = problem.init_output,
        "conv3d backprop input tiling"
    );

    let data = DxTilingData {
        shape: problem.shape.clone(),
        dims: plan.dims,
        block: plan.block,
        backprop_pads: problem.backprop_pads,
        init_output: problem.init_output,
    };
    Ok(TilingOutput::new(tiling_key, plan.dims.core_num as u32, workspace, &data))
}

/// Validated, normalized shape of an input-gradient problem.
pub(crate) fn input_shape(args: &Conv3dBackpropInputArgs) -> Result<Conv3dShape> {
    InputProblem::new(args).map(|problem| problem.shape)
}

fn knowledge_plan(shape: &Conv3dShape, cube_cores: u32, config: &TilingConfig) -> Option<(PrecomputedPlan, bool)> {
    if !config.use_knowledge || shape.real_g != 1 {
        return None;
    }
    let key = ShapeKey::backprop_input(shape);
    let registry = knowledge::registry();
    let hit = match shape.dtype {
        ScalarDType::Float32 => registry
            .lookup(KnowledgeTable::DxFloat, cube_cores, &key)
            .map(|plan| (plan, false))
            .or_else(|| registry.lookup(KnowledgeTable::DxFloatBasic, cube_cores, &key).map(|plan| (plan, true))),
        _ => registry.lookup(KnowledgeTable::DxHalf, cube_cores, &key).map(|plan| (plan, false)),
    };
    if hit.is_some() {
        tracing::debug!(%key, "knowledge hit");
    }
    hit
}

fn kernel_split_shape(shape: &Conv3dShape) -> bool {
    let key = ShapeKey::backprop_input(shape);
    (shape.real_g == 1 && key.0 == KERNEL_SPLIT_SHAPES[0]) || key.0 == KERNEL_SPLIT_SHAPES[1]
}

// ============================================================================
// VALIDATION
// ============================================================================

/// A validated input-gradient problem.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InputProblem {
    shape: Conv3dShape,
    backprop_pads: ConvPads,
    init_output: bool,
}

impl InputProblem {
    fn new(args: &Conv3dBackpropInputArgs) -> Result<Self> {
        let dtype = check_conv_dtypes(OP, &[&args.out_backprop, &args.filter, &args.y])?;
        let c0 = channel_block(dtype);
        let format = args.attrs.data_format;

        let [filter_n, filter_c, kd, kh, kw] = ncdhw_of("filter", &args.filter, args.filter_format)?;
        let [batch, cout, dout, ho, wo] = ncdhw_of("out_backprop", &args.out_backprop, format)?;
        let mut attrs = ResolvedAttrs::resolve(&args.attrs)?;
        attrs.normalize_dilation([kd, kh, kw]);
        let output_padding = match &args.transpose {
            Some(transpose) => check_transpose(transpose, format, &attrs)?,
            None => [0; 3],
        };

        let y_dims = ncdhw_of("y", &args.y, format)?;
        let [y_batch, cin, di, hi, wi] = if args.transpose.is_some() && y_dims.iter().all(|&d| d == 0) {
            infer_y(&args.attrs, &attrs, [batch, dout, ho, wo], [filter_c, kd, kh, kw], output_padding)?
        } else {
            y_dims
        };

        for (field, value) in [("batch", batch), ("cout", cout), ("dout", dout), ("ho", ho), ("wo", wo)] {
            check_dim(field, value, DIM_MAX)?;
        }
        for (field, value) in [("cin", cin), ("di", di), ("hi", hi), ("wi", wi), ("kernel_d", kd)] {
            check_dim(field, value, DIM_MAX)?;
        }
        check_dim("kernel_h", kh, KERNEL_HW_MAX)?;
        check_dim("kernel_w", kw, KERNEL_HW_MAX)?;

        let groups = resolve_groups(cin, filter_c, attrs.groups)?;
        ensure!(
            cout % groups == 0,
            InvalidAttrSnafu { field: "groups", reason: format!("out_backprop channels {cout} not divisible by {groups}") }
        );
        ensure!(
            cout == filter_n,
            InvalidAttrSnafu { field: "filter", reason: format!("filter N {filter_n} differs from out_backprop C {cout}") }
        );
        ensure!(
            batch == y_batch,
            InvalidAttrSnafu { field: "y", reason: format!("batch {y_batch} differs from out_backprop batch {batch}") }
        );

        let [sd, sh, sw] = attrs.strides;
        check_range("stride_d", sd as i64, 1, STRIDE_D_MAX.min(kd as i64))?;
        check_range("stride_h", sh as i64, 1, STRIDE_HW_MAX)?;
        check_range("stride_w", sw as i64, 1, STRIDE_HW_MAX)?;
        for (field, dilation) in ["dilation_d", "dilation_h", "dilation_w"].into_iter().zip(attrs.dilations) {
            check_range(field, dilation as i64, 1, DILATION_MAX)?;
        }

        if args.attrs.padding == Padding::Same {
            attrs.apply_same([di, hi, wi], [kd, kh, kw]);
        }
        let pads = attrs.pads;
        let pad_limits = [kd, kd, kh, kh, kw, kw].map(|k| PAD_MAX.min(k as i64 - 1));
        let pad_fields = ["pad_head", "pad_tail", "pad_up", "pad_down", "pad_left", "pad_right"];
        for ((field, pad), max) in pad_fields.into_iter().zip(pads.to_array()).zip(pad_limits) {
            check_range(field, pad as i64, 0, max)?;
        }

        let plane = hi.saturating_mul(wi);
        if plane > u64::from(u32::MAX) {
            return AttrOutOfRangeSnafu { field: "hi * wi", value: plane as i64, min: 1, max: i64::from(u32::MAX) }
                .fail();
        }
        check_dim("ho * stride_h", ho * sh, DIM_MAX)?;
        check_dim("wo * stride_w", wo * sw, DIM_MAX)?;

        let mut shape = Conv3dShape {
            dtype,
            c0,
            batch,
            cout,
            cout1: ceil_div(cout, c0),
            dout,
            ho,
            wo,
            cin,
            cin1: ceil_div(cin, c0),
            di,
            hi,
            wi,
            kd,
            kh,
            kw,
            stride_d: sd,
            stride_h: sh,
            stride_w: sw,
            pads,
            dilation_d: attrs.dilations[0],
            dilation_h: attrs.dilations[1],
            dilation_w: attrs.dilations[2],
            groups,
            real_g: 1,
            cin1_g: 0,
            cout1_g: 0,
            hf32: hf32_requested(dtype, args.attrs.precision_mode),
        };
        shape.apply_groups(GroupEnlarge::new(cin / groups, cout / groups, groups, c0)?);

        // window extents with the transpose output padding folded in
        let [op_d, op_h, op_w] = output_padding;
        let windows = [shape.kd_dilated() + op_d, shape.kh_dilated() + op_h, shape.kw_dilated() + op_w];
        let padded = shape.padded_fmap();
        shape.check_windows(windows)?;

        let backprop_pads = backprop_pads(&shape)?;
        let init_output = (padded[0] - windows[0]) % sd > pads.tail
            || (padded[1] - windows[1]) % sh > pads.down
            || sh > kh
            || (args.transpose.is_some() && (op_d > 0 || op_h > 0))
            || shape.dilation_d > 1;

        Ok(Self { shape, backprop_pads, init_output })
    }
}

/// Output padding in D, H, W after the transpose-only checks.
fn check_transpose(transpose: &TransposeArgs, format: DataFormat, attrs: &ResolvedAttrs) -> Result<[u64; 3]> {
    check_rank("output_padding", transpose.output_padding.len(), 5)?;
    let [n, c, d, h, w] = format.to_ncdhw(&transpose.output_padding[..]);
    ensure!(
        n == 0 && c == 0,
        InvalidAttrSnafu { field: "output_padding", reason: format!("N and C entries must be 0, got {n} and {c}") }
    );
    check_range("offset_x", transpose.offset_x, 0, 0)?;
    ensure!(!transpose.has_offset_w, InvalidAttrSnafu { field: "offset_w", reason: "weight offsets are not supported" });
    ensure!(!transpose.has_bias, InvalidAttrSnafu { field: "bias", reason: "bias is not supported" });

    let fields = ["output_padding_d", "output_padding_h", "output_padding_w"];
    let mut padding = [0; 3];
    for (axis, (field, value)) in fields.into_iter().zip([d, h, w]).enumerate() {
        // must stay below the stride or the dilation of its axis
        let max = attrs.strides[axis].max(attrs.dilations[axis]) as i64 - 1;
        check_range(field, value, 0, max)?;
        padding[axis] = value as u64;
    }
    Ok(padding)
}

/// `y` dims of a transposed convolution whose output shape was left open.
fn infer_y(
    raw: &Conv3dAttrs,
    attrs: &ResolvedAttrs,
    [batch, dout, ho, wo]: [u64; 4],
    [filter_c, kd, kh, kw]: [u64; 4],
    output_padding: [u64; 3],
) -> Result<[u64; 5]> {
    ensure!(
        raw.padding == Padding::Explicit,
        InvalidAttrSnafu { field: "y", reason: "SAME padding needs an explicit output shape" }
    );
    let pads = attrs.pads.to_array();
    let mut spatial = [0; 3];
    for (axis, (out, k)) in [dout, ho, wo].into_iter().zip([kd, kh, kw]).enumerate() {
        let full = attrs.strides[axis] * out.saturating_sub(1) + dilated(k, attrs.dilations[axis]) + output_padding[axis];
        let trimmed = pads[2 * axis] + pads[2 * axis + 1];
        ensure!(
            full > trimmed,
            InvalidAttrSnafu { field: "pads", reason: format!("pads {trimmed} consume the inferred extent {full}") }
        );
        spatial[axis] = full - trimmed;
    }
    Ok([batch, filter_c * attrs.groups, spatial[0], spatial[1], spatial[2]])
}

/// Pads of the equivalent forward convolution over the dilated gradient.
fn backprop_pads(shape: &Conv3dShape) -> Result<ConvPads> {
    let head = shape.kd_dilated() - 1 - shape.pads.head;
    let up = shape.kh_dilated() - 1 - shape.pads.up;
    let left = shape.kw_dilated() - 1 - shape.pads.left;
    check_range("backprop_pad_up", up as i64, 0, PAD_MAX)?;
    check_range("backprop_pad_left", left as i64, 0, PAD_MAX)?;

    let after = |input: u64, output: u64, stride: u64, pad_before: u64| -> i64 {
        input as i64 - (output * stride) as i64 + pad_before as i64
    };
    let tail = after(shape.di, shape.dout, shape.stride_d, shape.pads.head);
    let down = after(shape.hi, shape.ho, shape.stride_h, shape.pads.up);
    let right = after(shape.wi, shape.wo, shape.stride_w, shape.pads.left);
    check_range("backprop_pad_tail", tail, -DIM_MAX, DIM_MAX)?;
    check_range("backprop_pad_down", down, -PAD_MAX, PAD_MAX)?;
    check_range("backprop_pad_right", right, -PAD_MAX, PAD_MAX)?;

    // the kernel prefers the exact trailing pad when it fits the pad field
    let exact = |input: u64, output: u64, stride: u64, k_dilated: u64, before: u64, fallback: i64| -> u64 {
        let pad = input as i64 - ((output as i64 - 1) * stride as i64 + 1) + (k_dilated as i64 - 1) - before as i64;
        if (0..=PAD_MAX).contains(&pad) { pad as u64 } else { fallback.max(0) as u64 }
    };
    Ok(ConvPads {
        head,
        tail: exact(shape.di, shape.dout, shape.stride_d, shape.kd_dilated(), head, tail),
        up,
        down: exact(shape.hi, shape.ho, shape.stride_h, shape.kh_dilated(), up, down),
        left,
        right: exact(shape.wi, shape.wo, shape.stride_w, shape.kw_dilated(), left, right),
    })
}

// ============================================================================
// PLAN SEARCH
// ============================================================================

/// Core split of the fast path: batch, depth, M and N multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CoreSplit {
    batch: u64,
    d: u64,
    m: u64,
    n: u64,
}

struct InputTiler<'a> {
    shape: &'a Conv3dShape,
    budget: &'a PlatformBudget,
    cores: u64,
    l1: u64,
    threshold: f64,
}

impl<'a> InputTiler<'a> {
    fn new(shape: &'a Conv3dShape, budget: &'a PlatformBudget, threshold: f64) -> Self {
        Self {
            shape,
            budget,
            cores: u64::from(budget.cube_cores),
            l1: budget.l1_bytes.saturating_sub(L1_RESERVED_BYTES),
            threshold,
        }
    }

    fn plan(&self, config: &TilingConfig, search: &dyn GeneralSearch) -> Result<PrecomputedPlan> {
        if config.conv_strategy.is_heuristic() {
            match self.fast_dims() {
                Some(dims) => match self.base_block(&dims) {
                    Some(block) => return Ok(PrecomputedPlan { dims, block }),
                    None => tracing::debug!(?dims, "base block rejected, using general search"),
                },
                None => tracing::debug!(real_g = self.shape.real_g, "core split rejected, using general search"),
            }
        }
        self.fallback(search)
    }

    fn fallback(&self, search: &dyn GeneralSearch) -> Result<PrecomputedPlan> {
        let cache = search.backprop_input(self.shape, self.budget);
        cache.validate()?;
        let hi = self.shape.hi;
        let split = CoreSplit {
            batch: cache.batch_dim,
            d: cache.d_dim,
            m: ceil_div(hi, ceil_div(hi, cache.m_dim)),
            n: cache.n_dim,
        };
        let dims = self.dims(split, cache.group_dim, cache.k_dim);
        let mut block = self.cache_block(&cache);
        self.shrink_to_l1(&mut block)?;
        Ok(PrecomputedPlan { dims, block })
    }

    /// Give up A double buffering, then halve `base_m`, until the block fits L1.
    ///
    /// The A window never drops below the rows one fractal block of pixels
    /// reads, so a row wider than L1 is rejected.
    fn shrink_to_l1(&self, block: &mut ConvBlockPlan) -> Result<()> {
        loop {
            let l1_used = input_l1_bytes(self.shape, block);
            if l1_used <= self.l1 {
                return Ok(());
            }
            if block.al1 > 1 {
                block.al1 = 1;
            } else if block.base_m > BLOCK_CUBE {
                block.base_m = ceil_align(block.base_m / 2, BLOCK_CUBE);
            } else {
                return CapacityExceededSnafu { what: "L1 byte", count: l1_used as usize, max: self.l1 as usize }
                    .fail();
            }
            tracing::debug!(l1_used, l1 = self.l1, al1 = block.al1, base_m = block.base_m, "shrinking search block");
        }
    }

    // ------------------------------------------------------------------------
    // Phase A: core split
    // ------------------------------------------------------------------------

    fn fast_dims(&self) -> Option<ConvDimPlan> {
        if self.shape.real_g > 1 {
            return None;
        }
        let floor = (self.cores as f64 * self.threshold) as u64;
        let split = (floor.max(1)..=self.cores).rev().find_map(|cur| self.core_split(cur))?;
        let used = split.batch * split.d * split.m * split.n;
        if (used as f64) < self.cores as f64 * self.threshold || used > self.cores {
            return None;
        }
        let hi = self.shape.hi;
        let m = ceil_div(hi, ceil_div(hi, split.m));
        Some(self.dims(CoreSplit { m, ..split }, 1, 1))
    }

    /// Split exactly `cur` cores, or `None` when no split keeps blocks large enough.
    fn core_split(&self, cur: u64) -> Option<CoreSplit> {
        let s = self.shape;
        let factors = factors_desc(cur);
        let max_m = s.hi * s.wi;
        let max_n = s.cin1;
        let max_n_bytes = max_n * s.c0;

        let d_max = dim_factor(s.di, &factors);
        let b_max = dim_factor(s.batch, &factors);
        if (d_max * b_max) % cur == 0 {
            return Some(CoreSplit { batch: cur / d_max, d: d_max, m: 1, n: 1 });
        }

        let bd = dim_factor(d_max * b_max, &factors);
        let remain = cur / bd;
        let d = gcd(d_max, bd);
        let batch = bd / d;

        let m_max = dim_factor(max_m, &factors);
        let n_max = dim_factor(max_n, &factors);
        let coarse_enough = |m: u64, n: u64| {
            (n == 1 || max_n_bytes >= n * BEST_BASE_N) && (m == 1 || max_m >= m * BEST_BASE_M)
        };
        if (m_max * n_max) % remain == 0 {
            let m = gcd(m_max, remain);
            if coarse_enough(m, remain / m) {
                return Some(CoreSplit { batch, d, m, n: remain / m });
            }
            let n = gcd(n_max, remain);
            if coarse_enough(remain / n, n) {
                return Some(CoreSplit { batch, d, m: remain / n, n });
            }
        }
        if max_m >= remain * BEST_BASE_M {
            return Some(CoreSplit { batch, d, m: remain, n: 1 });
        }
        None
    }

    fn dims(&self, split: CoreSplit, group_dim: u64, k_dim: u64) -> ConvDimPlan {
        let s = self.shape;
        let single_core_cin1 = ceil_div(s.cin1_g, split.n);
        ConvDimPlan {
            batch_dim: split.batch,
            group_dim,
            d_dim: split.d,
            m_dim: split.m,
            k_dim,
            n_dim: split.n,
            dk_dim: 1,
            core_num: split.batch * group_dim * split.m * k_dim * split.n * split.d,
            single_core_batch: ceil_div(s.batch, split.batch),
            single_core_group: ceil_div(s.real_g, group_dim),
            single_core_m: ceil_div(s.hi, split.m) * s.wi,
            single_core_cout: s.cout1_g * s.c0,
            single_core_cout1: s.cout1_g,
            single_core_cin: single_core_cin1 * s.c0,
            single_core_cin1,
            single_core_din: ceil_div(s.di, split.d),
            single_core_ho: 1,
            single_core_dk: 1,
        }
    }

    // ------------------------------------------------------------------------
    // Phase B: base block and steps
    // ------------------------------------------------------------------------

    fn base_block(&self, dims: &ConvDimPlan) -> Option<ConvBlockPlan> {
        let s = self.shape;
        let mut block = ConvBlockPlan::double_buffered();
        let (base_m, base_k, base_n) = self.base_mkn(dims);
        block.base_m = base_m;
        block.base_k = base_k;
        block.base_n = base_n;
        let (step_ka, step_kb) = self.base_steps(&mut block, dims);
        block.step_ka = step_ka;
        block.step_kb = step_kb;
        if step_ka * step_kb == 0 {
            return None;
        }

        let len_hkwkc0 = s.kernel_hw() * s.c0;
        let l1_used = input_l1_bytes(s, &block);
        let whole_taps = (step_ka * base_k) % len_hkwkc0 == 0 && (step_kb * base_k) % len_hkwkc0 == 0;
        let accepted = self.fits_l0(base_m, base_n, base_k) && l1_used <= self.l1 && block.steps_nest() && whole_taps;
        if !accepted {
            tracing::trace!(base_m, base_k, base_n, step_ka, step_kb, l1_used, "base block does not fit");
            return None;
        }
        Some(block)
    }

    fn fits_l0(&self, base_m: u64, base_n: u64, base_k: u64) -> bool {
        let s = self.shape;
        let dt = s.dtype_bytes();
        // f32 transposes the filter in L0B and needs one spare channel block
        let extra_k = if dt == 4 && s.kernel_hw() > 1 { s.c0 } else { 0 };
        fits_l0(base_m, base_n, base_k, extra_k, dt, self.budget.l0a_bytes, self.budget.l0b_bytes)
    }

    fn base_mkn(&self, dims: &ConvDimPlan) -> (u64, u64, u64) {
        let s = self.shape;
        let (mut m, mut k, mut n) = (BEST_BASE_M, BEST_BASE_K / s.dtype_bytes(), BEST_BASE_N);

        let tap_k = s.kernel_hw() * s.c0;
        if k % tap_k == 0 {
            k = BEST_BASE_K / s.dtype_bytes();
        } else if tap_k < k {
            k = tap_k;
        } else {
            k = s.kw * s.c0;
        }
        if dims.single_core_m > dims.single_core_cin {
            m = BEST_BASE_N;
            n = BEST_BASE_M;
        }
        if m > dims.single_core_m {
            m = ceil_align(dims.single_core_m, BLOCK_CUBE);
        }
        if n > dims.single_core_cin {
            n = ceil_align(dims.single_core_cin, BLOCK_CUBE);
        }

        let max_k = dims.single_core_cout1 * s.c0 * s.kernel_hw();
        if k > max_k {
            k = max_k;
        } else if max_k % k != 0 {
            k = s.kw * s.c0;
        }
        (m, k, n)
    }

    /// `(step_ka, step_kb)`; may single-buffer L1 when one step holds all of `cout1`.
    fn base_steps(&self, block: &mut ConvBlockPlan, dims: &ConvDimPlan) -> (u64, u64) {
        let s = self.shape;
        let dt = s.dtype_bytes();
        let len_hkwkc0 = s.kernel_hw() * s.c0;
        let b_tile = len_hkwkc0 * block.base_n * dt;
        let l1_b = self.l1 / BUFFER_NUM_L1;
        let mut l1_a = l1_b;

        // f32 loads cout in pairs of c0 blocks
        let adapt_fp32 = dt == 4 && s.kernel_hw() > 1;
        let mut cout1_b = (l1_b / b_tile).max(1);
        if adapt_fp32 {
            if cout1_b == 1 {
                cout1_b = 2;
                l1_a = l1_a.saturating_sub((b_tile * cout1_b).saturating_sub(l1_b));
            } else {
                cout1_b = cout1_b / 2 * 2;
            }
        }

        let a_row = dt * input_fmap_rows(s, block.base_m) * s.wo * s.stride_w * s.c0;
        let mut cout1_a = (l1_a / a_row.max(1)).max(1);
        if cout1_a >= dims.single_core_cout1 {
            cout1_a = dims.single_core_cout1;
            block.al1 = 1;
        }
        if cout1_b >= dims.single_core_cout1 {
            cout1_b = dims.single_core_cout1;
            block.bl1 = 1;
        }
        align_cout1(&mut cout1_a, &mut cout1_b, adapt_fp32, s.c0);

        let base_k = block.base_k;
        let mut step_ka = ceil_div(cout1_a * len_hkwkc0, base_k).max(1).min(K_START_POSITION_MAX / base_k);
        let mut step_kb = ceil_div(cout1_b * len_hkwkc0, base_k).max(1);
        if step_ka > step_kb {
            step_ka = floor_align(step_ka, step_kb);
        } else {
            step_kb = floor_align(step_kb, step_ka);
        }
        if dt == 4 {
            self.fp32_steps(&mut step_ka, &mut step_kb, block);
        }
        (step_ka, step_kb)
    }

    /// f32 steps must load whole 16-channel output blocks of every tap.
    fn fp32_steps(&self, step_ka: &mut u64, step_kb: &mut u64, block: &ConvBlockPlan) {
        let s = self.shape;
        let base_k = block.base_k;
        let len_hkwk_c0out = s.kernel_hw() * BLOCK_CUBE;
        if block.bl1 == 1
            || (s.cout1_g * s.c0) % BLOCK_CUBE != 0
            || (s.kernel_hw() == 1 && base_k < BLOCK_CUBE)
        {
            *step_kb = ceil_align(*step_kb * base_k, len_hkwk_c0out) / base_k;
        }
        if *step_ka == 0 || *step_kb == 0 {
            return;
        }
        if *step_ka > *step_kb {
            while *step_ka % *step_kb > 0 {
                *step_ka -= 1;
            }
        } else {
            while *step_kb % *step_ka > 0 {
                *step_ka -= 1;
            }
        }
        let half = len_hkwk_c0out / 2;
        *step_ka = (floor_align(*step_ka * base_k, half) / base_k).max(1);
    }

    // ------------------------------------------------------------------------
    // Phase C: general search
    // ------------------------------------------------------------------------

    fn cache_block(&self, cache: &CacheTiling) -> ConvBlockPlan {
        let s = self.shape;
        let c0 = s.c0;
        let mut block = ConvBlockPlan::double_buffered();
        block.cl0 = cache.db_l0c;
        block.base_m = cache.m_l0 * BLOCK_CUBE;
        block.base_n = cache.n_l0 * BLOCK_CUBE;

        let candidates = [s.kernel_hw() * c0, s.kh.max(s.kw) * c0, s.kh.min(s.kw) * c0];
        block.base_k = candidates
            .into_iter()
            .find(|&k| self.fits_l0(block.base_m, block.base_n, k))
            .unwrap_or(c0);

        block.al1 = cache.db_al1;
        block.bl1 = cache.db_bl1;
        let k_blocks = block.base_k / c0;
        block.step_ka = ceil_div(cache.k_al1 * s.kernel_hw(), k_blocks);
        block.step_kb = ceil_div(cache.k_bl1 * s.kernel_hw(), k_blocks);
        if s.dtype_bytes() == 4 {
            let (mut ka, mut kb) = (block.step_ka, block.step_kb);
            self.fp32_steps(&mut ka, &mut kb, &block);
            block.step_ka = ka;
            block.step_kb = kb;
        }
        block
    }
}

/// Make one of the two L1 cout1 extents divide the other.
fn align_cout1(cout1_a: &mut u64, cout1_b: &mut u64, adapt_fp32: bool, c0: u64) {
    if *cout1_a == *cout1_b {
        return;
    }
    if *cout1_b > *cout1_a {
        *cout1_a = max_divisor(*cout1_b, *cout1_a, 1);
        return;
    }
    if !adapt_fp32 {
        *cout1_b = max_divisor(*cout1_a, *cout1_b, 1);
        return;
    }

    let mut smaller_a = *cout1_a;
    while smaller_a % *cout1_b > 0 {
        smaller_a -= 1;
    }
    let smaller_b = max_divisor(*cout1_a, *cout1_b, BLOCK_CUBE / c0);
    if smaller_b == 0 {
        *cout1_a = smaller_a;
    } else if smaller_b * *cout1_a > smaller_a * *cout1_b {
        *cout1_b = smaller_b;
    } else {
        *cout1_a = smaller_a;
    }
}
