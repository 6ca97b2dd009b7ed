//! Filter-gradient tiling: `dw = conv3d_backprop_filter(x, dy)`.
//!
//! The kernel computes `dy^T * img2col(x)`: M runs over output channels, K
//! over output pixels and N over input channels times kernel taps. Depth is
//! folded into the batch split, so `batch_dim` counts batch times depth
//! slices and `d_dim` stays 1.

use snafu::{ResultExt, ensure};
use tessel_dtype::ScalarDType;
use tessel_platform::PlatformBudget;

use super::data::DwTilingData;
use super::knowledge::{self, KnowledgeTable, PrecomputedPlan, ShapeKey};
use super::plan::{
    ConvBlockPlan, ConvDimPlan, filter_bl1_bound, filter_cin_extent, filter_hi_rows, filter_l1_bytes, fits_l0,
};
use super::search::{CacheTiling, DefaultSearch, GeneralSearch};
use super::shape::{
    Conv3dAttrs, Conv3dShape, DIM_MAX, DataFormat, GroupEnlarge, Padding, ResolvedAttrs, StorageFormat,
    channel_block, check_conv_dtypes, check_dim, hf32_requested, ncdhw_of, resolve_groups,
};
use super::{BEST_BASE_K, BEST_BASE_M, BEST_BASE_N, BLOCK_CUBE, DB_ON, L1_RESERVED_BYTES, WORKSPACE_BYTES};
use crate::config::TilingConfig;
use crate::error::*;
use crate::math::{ceil_align, ceil_div, dim_factor, factors_desc, gcd};
use crate::output::TilingOutput;
use crate::tensor::TensorDesc;

const OP: &str = "conv3d_backprop_filter";

const DILATION_D_MAX: i64 = 255;
/// Below this many batch/depth cores the fast split is not worth it.
const MIN_BATCH_DIM: u64 = 4;
const SECOND_BASE_M: u64 = 64;
const SECOND_BASE_K: u64 = 64;
const SECOND_BASE_N: u64 = 512;
const MIN_STEP_K: u64 = 2;
/// Cube cores of the one chip the fast split is tuned for.
const FAST_PATH_CORES: u64 = 20;
/// The fused layout transform stages `x` as bf16.
const TRANSDATA_ELEMENT_BYTES: u64 = 2;
/// Deterministic mode accumulates partial `i32`-sized results per core.
const PARTIAL_ELEMENT_BYTES: u64 = 4;

// ============================================================================
// ARGUMENTS
// ============================================================================

/// Operands of one filter-gradient tiling call.
///
/// `x` and `out_backprop` use `attrs.data_format`. `filter_size` describes
/// the gradient being produced; only its shape is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conv3dBackpropFilterArgs {
    pub x: TensorDesc,
    pub x_storage: StorageFormat,
    pub filter_size: TensorDesc,
    pub filter_format: DataFormat,
    pub out_backprop: TensorDesc,
    pub attrs: Conv3dAttrs,
}

// ============================================================================
// DRIVER
// ============================================================================

/// Tile a filter gradient with the built-in general search as fallback.
pub fn conv3d_backprop_filter(
    args: &Conv3dBackpropFilterArgs,
    budget: &PlatformBudget,
    config: &TilingConfig,
) -> Result<TilingOutput> {
    conv3d_backprop_filter_with(args, budget, config, &DefaultSearch)
}

/// Tile a filter gradient, falling back to `search` when the heuristic is rejected.
#[tracing::instrument(
    skip_all,
    fields(dtype = ?args.x.dtype, cube_cores = budget.cube_cores, deterministic = config.deterministic)
)]
pub fn conv3d_backprop_filter_with(
    args: &Conv3dBackpropFilterArgs,
    budget: &PlatformBudget,
    config: &TilingConfig,
    search: &dyn GeneralSearch,
) -> Result<TilingOutput> {
    budget.validate().context(PlatformSnafu)?;
    let shape = filter_shape(args)?;
    let tiler = FilterTiler::new(&shape, budget, config);

    let plan = match knowledge_plan(&shape, budget.cube_cores, config) {
        Some(plan) => plan,
        None => tiler.plan(config, search)?,
    };
    let core_num = plan.dims.used_cores();

    let mut workspace = WORKSPACE_BYTES as u64;
    if config.deterministic {
        workspace += DB_ON * PARTIAL_ELEMENT_BYTES * core_num * plan.block.base_m * plan.block.base_n;
    } else if args.x_storage == StorageFormat::Ncdhw {
        let single_core_hi = filter_hi_rows(plan.dims.single_core_ho, shape.stride_h, shape.kh_dilated(), shape.hi);
        let per_core = plan.dims.single_core_cin * single_core_hi * shape.wi * TRANSDATA_ELEMENT_BYTES * DB_ON;
        workspace += u64::from(budget.cube_cores) * per_core;
    }

    tracing::debug!(core_num, dims = ?plan.dims, block = ?plan.block, workspace, "conv3d backprop filter tiling");

    let data = DwTilingData { shape, dims: plan.dims, block: plan.block, total_l1_bytes: budget.l1_bytes };
    Ok(TilingOutput::new(0, core_num as u32, workspace as usize, &data))
}

fn knowledge_plan(shape: &Conv3dShape, cube_cores: u32, config: &TilingConfig) -> Option<PrecomputedPlan> {
    if !config.use_knowledge || config.deterministic || shape.real_g != 1 || shape.c0 != BLOCK_CUBE {
        return None;
    }
    let key = ShapeKey::backprop_filter(shape);
    let hit = knowledge::registry().lookup(KnowledgeTable::DwHalf, cube_cores, &key);
    if hit.is_some() {
        tracing::debug!(%key, "knowledge hit");
    }
    hit
}

// ============================================================================
// VALIDATION
// ============================================================================

fn filter_shape(args: &Conv3dBackpropFilterArgs) -> Result<Conv3dShape> {
    let dtype = check_conv_dtypes(OP, &[&args.x, &args.out_backprop])?;
    let c0 = channel_block(dtype);
    let format = args.attrs.data_format;

    let [filter_n, filter_c, kd, kh, kw] = ncdhw_of("filter_size", &args.filter_size, args.filter_format)?;
    let [batch, cin, di, hi, wi] = ncdhw_of("x", &args.x, format)?;
    let [dy_batch, cout, dout, ho, wo] = ncdhw_of("out_backprop", &args.out_backprop, format)?;

    let dims = [
        ("batch", batch),
        ("cin", cin),
        ("di", di),
        ("hi", hi),
        ("wi", wi),
        ("cout", cout),
        ("dout", dout),
        ("ho", ho),
        ("wo", wo),
        ("kernel_d", kd),
        ("kernel_h", kh),
        ("kernel_w", kw),
    ];
    for (field, value) in dims {
        check_dim(field, value, DIM_MAX)?;
    }

    let mut attrs = ResolvedAttrs::resolve(&args.attrs)?;
    attrs.normalize_dilation([kd, kh, kw]);
    check_range("dilation_d", attrs.dilations[0] as i64, 1, DILATION_D_MAX)?;

    let groups = resolve_groups(cin, filter_c, attrs.groups)?;
    ensure!(
        cout % groups == 0,
        InvalidAttrSnafu { field: "groups", reason: format!("out_backprop channels {cout} not divisible by {groups}") }
    );
    ensure!(
        cout == filter_n,
        InvalidAttrSnafu { field: "filter_size", reason: format!("filter N {filter_n} differs from out_backprop C {cout}") }
    );
    ensure!(
        batch == dy_batch,
        InvalidAttrSnafu { field: "out_backprop", reason: format!("batch {dy_batch} differs from x batch {batch}") }
    );

    if args.attrs.padding == Padding::Same {
        attrs.apply_same([di, hi, wi], [kd, kh, kw]);
    }
    let [sd, sh, sw] = attrs.strides;
    let [dd, dh, dw] = attrs.dilations;
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
        pads: attrs.pads,
        dilation_d: dd,
        dilation_h: dh,
        dilation_w: dw,
        groups,
        real_g: 1,
        cin1_g: 0,
        cout1_g: 0,
        hf32: hf32_requested(dtype, args.attrs.precision_mode),
    };

    let kh_dilated = shape.kh_dilated() as i64;
    check_range("pad_up", shape.pads.up as i64, 0, kh_dilated - 1)?;
    check_range("pad_down", shape.pads.down as i64, 0, kh_dilated - 1)?;

    shape.apply_groups(GroupEnlarge::new(cin / groups, cout / groups, groups, c0)?);
    shape.check_windows([shape.kd_dilated(), shape.kh_dilated(), shape.kw_dilated()])?;
    Ok(shape)
}

// ============================================================================
// PLAN SEARCH
// ============================================================================

/// Core split of the fast path. `m` is never split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CoreSplit {
    batch: u64,
    d: u64,
    k: u64,
    n: u64,
}

impl CoreSplit {
    const SINGLE: Self = Self { batch: 1, d: 1, k: 1, n: 1 };
}

struct FilterTiler<'a> {
    shape: &'a Conv3dShape,
    budget: &'a PlatformBudget,
    cores: u64,
    l1: u64,
    threshold: f64,
    deterministic: bool,
}

impl<'a> FilterTiler<'a> {
    fn new(shape: &'a Conv3dShape, budget: &'a PlatformBudget, config: &TilingConfig) -> Self {
        Self {
            shape,
            budget,
            cores: u64::from(budget.cube_cores),
            l1: budget.l1_bytes.saturating_sub(L1_RESERVED_BYTES),
            threshold: config.dw_core_used_threshold,
            deterministic: config.deterministic,
        }
    }

    fn plan(&self, config: &TilingConfig, search: &dyn GeneralSearch) -> Result<PrecomputedPlan> {
        if config.conv_strategy.is_heuristic() && self.fast_path_applies() {
            match self.fast_dims() {
                Some(dims) => match self.base_block(&dims) {
                    Some(block) => return Ok(PrecomputedPlan { dims, block }),
                    None => tracing::debug!(?dims, "base block rejected, using general search"),
                },
                None => tracing::debug!(cores = self.cores, "core split rejected, using general search"),
            }
        }
        self.fallback(search)
    }

    /// The fast split is only tuned for ungrouped bf16 on one chip.
    fn fast_path_applies(&self) -> bool {
        let s = self.shape;
        !self.deterministic
            && s.dtype == ScalarDType::BFloat16
            && self.cores == FAST_PATH_CORES
            && s.real_g == 1
            && s.dilation_d == 1
    }

    // ------------------------------------------------------------------------
    // Phase A: core split
    // ------------------------------------------------------------------------

    fn fast_dims(&self) -> Option<ConvDimPlan> {
        let dims = self.dims(self.core_split(self.cores));
        let used = dims.used_cores();
        if (used as f64) < self.cores as f64 * self.threshold || used > self.cores {
            return None;
        }
        Some(dims)
    }

    /// Bind batch and depth first, then hand the rest to K or N as a whole.
    fn core_split(&self, cur: u64) -> CoreSplit {
        let s = self.shape;
        let factors = factors_desc(cur);
        let d_max = dim_factor(s.dout, &factors);
        let b_max = dim_factor(s.batch, &factors);
        let bd = dim_factor(d_max * b_max, &factors);
        if bd < MIN_BATCH_DIM {
            return CoreSplit::SINGLE;
        }
        if (d_max * b_max) % cur == 0 {
            return CoreSplit { batch: cur / d_max, d: d_max, ..CoreSplit::SINGLE };
        }

        let remain = cur / bd;
        let best_k = BEST_BASE_K / s.dtype_bytes();
        let max_k = s.ho * s.wo;
        let max_n = s.cin1 * BLOCK_CUBE * s.kd * s.kernel_hw();
        let iter_k = ceil_div(max_k, best_k);
        let iter_n = ceil_div(max_n, BEST_BASE_N);

        let k_dim = ceil_div(s.ho, ceil_div(s.ho, remain));
        let n_dim = ceil_div(s.cin1_g * BLOCK_CUBE, ceil_div(s.cin1_g, remain) * BLOCK_CUBE);
        let k_split = max_k >= remain * best_k && s.ho >= remain && k_dim == remain;
        let n_split = max_n >= remain * BEST_BASE_N && s.cin1 >= remain && n_dim == remain;

        // try the axis with more iterations first
        let along_k = if iter_k >= iter_n { k_split } else { k_split && !n_split };
        let d = gcd(d_max, bd);
        let batch = bd / d;
        if along_k {
            CoreSplit { batch, d, k: remain, n: 1 }
        } else if n_split {
            CoreSplit { batch, d, k: 1, n: remain }
        } else {
            CoreSplit::SINGLE
        }
    }

    fn dims(&self, split: CoreSplit) -> ConvDimPlan {
        let s = self.shape;
        let single_core_cout = s.cout1_g * BLOCK_CUBE;
        let single_core_ho = ceil_div(s.ho, split.k);
        let single_core_cin = ceil_div(s.cin1_g, split.n) * BLOCK_CUBE;
        let mut dims = ConvDimPlan {
            batch_dim: split.batch * split.d,
            group_dim: 1,
            d_dim: 1,
            m_dim: ceil_div(s.cout1_g * BLOCK_CUBE, single_core_cout),
            k_dim: ceil_div(s.ho, single_core_ho),
            n_dim: ceil_div(s.cin1_g * BLOCK_CUBE, single_core_cin),
            dk_dim: 1,
            single_core_batch: ceil_div(s.batch, split.batch) * ceil_div(s.dout, split.d),
            single_core_group: 1,
            single_core_cout,
            // depth taps ride along with the channels
            single_core_cin: single_core_cin * s.kd,
            single_core_ho,
            single_core_dk: 1,
            ..ConvDimPlan::default()
        };
        dims.core_num = dims.used_cores();
        dims
    }

    // ------------------------------------------------------------------------
    // Phase B: base block and steps
    // ------------------------------------------------------------------------

    fn base_block(&self, dims: &ConvDimPlan) -> Option<ConvBlockPlan> {
        let s = self.shape;
        let dt = s.dtype_bytes();
        let mut block = ConvBlockPlan::double_buffered();
        let (base_m, base_k, base_n) = self.base_mkn(dims);
        block.base_m = base_m;
        block.base_k = base_k;
        block.base_n = base_n;
        let (step_ka, step_kb) = self.base_steps(&block, dims);
        block.step_ka = step_ka;
        block.step_kb = step_kb;
        block.bl1_bound = filter_bl1_bound(s, base_k, step_kb, base_n);

        let l1_used = filter_l1_bytes(dt, &block);
        let fits = fits_l0(base_m, base_n, base_k, 0, dt, self.budget.l0a_bytes, self.budget.l0b_bytes);
        if !fits || l1_used >= self.l1 {
            tracing::trace!(base_m, base_k, base_n, step_ka, step_kb, l1_used, "base block does not fit");
            return None;
        }
        Some(block)
    }

    fn base_mkn(&self, dims: &ConvDimPlan) -> (u64, u64, u64) {
        let s = self.shape;
        let dt = s.dtype_bytes();
        let max_k = dims.single_core_ho * s.wo;
        let max_n = dims.single_core_cin * s.kernel_hw();
        let m = dims.single_core_cout.min(BEST_BASE_M);
        let mut n = max_n.min(BEST_BASE_N);
        let mut k = BEST_BASE_K / dt;

        // small M and N leave L0 room for a deeper K
        for num in [2, 4, 8] {
            if m * num <= BEST_BASE_N && n * num <= BEST_BASE_N {
                let cap = BEST_BASE_K / dt * num;
                k = if max_k > cap { cap } else { ceil_align(max_k, BLOCK_CUBE) };
            }
        }
        if m <= SECOND_BASE_M && max_k < max_n && SECOND_BASE_N <= max_n {
            let cap = SECOND_BASE_K / dt;
            k = if max_k > cap { cap } else { ceil_align(max_k, BLOCK_CUBE) };
            n = max_n.min(SECOND_BASE_N);
        }
        (m, k, n)
    }

    /// Split L1 between A and B in proportion to their single-core footprints.
    fn base_steps(&self, block: &ConvBlockPlan, dims: &ConvDimPlan) -> (u64, u64) {
        let s = self.shape;
        let dt = s.dtype_bytes();
        let single_core_ho = dims.single_core_ho;

        let a_mat = single_core_ho * s.wo * block.base_m * block.step_m;
        let ci = filter_cin_extent(s, block.base_n * block.step_n);
        let b_mat = s.wi * ci * filter_hi_rows(single_core_ho, s.stride_h, s.kh_dilated(), s.hi);
        let ratio = a_mat as f64 / (a_mat + b_mat).max(1) as f64;
        let al1 = (self.l1 as f64 * ratio) as u64 / block.al1;
        let bl1 = (self.l1 as f64 * (1.0 - ratio)) as u64 / block.bl1;

        // at least one row on each side
        let ho_a1 = (al1 / (s.wo * block.base_m * block.step_m * dt)).max(1);
        let mut step_ka = (ho_a1 * s.wo / block.base_k).max(MIN_STEP_K);
        let hi_b1 = (bl1 / (s.wi * ci * dt)).max(1) as i64;
        let kh_reach = ((s.kh - 1) * s.dilation_h) as i64;
        let ho_b1 = ((hi_b1 - 1 - kh_reach) / s.stride_h as i64 + 1).max(1) as u64;
        let mut step_kb = (ho_b1 * s.wo / block.base_k).max(MIN_STEP_K);

        let max_k_iter = ceil_div(single_core_ho * s.wo, block.base_k);
        step_ka = step_ka.min(max_k_iter);
        step_kb = step_kb.min(max_k_iter);
        if step_ka > step_kb {
            step_ka = step_ka / step_kb * step_kb;
        } else {
            step_kb = step_kb / step_ka * step_ka;
        }
        (step_ka, step_kb)
    }

    // ------------------------------------------------------------------------
    // Phase C: general search
    // ------------------------------------------------------------------------

    fn fallback(&self, search: &dyn GeneralSearch) -> Result<PrecomputedPlan> {
        let s = self.shape;
        let cache = search.backprop_filter(s, self.budget, self.deterministic);
        cache.validate()?;
        ensure!(cache.batch_dout_single_core > 0, ZeroDivisorSnafu { what: "batch_dout_single_core" });
        let c0 = s.c0;

        // grouped, depth-dilated and deterministic runs split the kernel depth on its own
        let (dk_dim, single_core_dk, single_core_cin, n_dim) =
            if s.real_g > 1 || s.dilation_d > 1 || self.deterministic {
                let dk_dim = gcd(cache.n_dim, s.kd);
                let single_core_cin = ceil_div(s.cin1_g, cache.n_dim / dk_dim) * c0;
                (dk_dim, ceil_div(s.kd, dk_dim), single_core_cin, ceil_div(s.cin1_g * c0, single_core_cin))
            } else {
                let single_core_cin = ceil_div(s.cin1_g * s.kd, cache.n_dim) * c0;
                (1, 1, single_core_cin, ceil_div(s.cin1_g * c0 * s.kd, single_core_cin))
            };
        let single_core_cout = ceil_align(ceil_div(s.cout1_g, cache.m_dim) * c0, BLOCK_CUBE);
        let single_core_ho = ceil_div(s.ho, cache.k_dim);

        let mut dims = ConvDimPlan {
            batch_dim: ceil_div(s.batch * s.dout, cache.batch_dout_single_core),
            group_dim: cache.group_dim,
            d_dim: 1,
            m_dim: ceil_div(s.cout1_g * c0, single_core_cout),
            k_dim: ceil_div(s.ho, single_core_ho),
            n_dim,
            dk_dim,
            single_core_batch: ceil_div(s.batch, cache.batch_dim) * ceil_div(s.dout, cache.d_dim),
            single_core_group: ceil_div(s.real_g, cache.group_dim),
            single_core_cout,
            single_core_cin,
            single_core_ho,
            single_core_dk,
            ..ConvDimPlan::default()
        };
        dims.core_num = dims.used_cores();
        let block = self.cache_block(&cache, &dims);
        let l1_used = filter_l1_bytes(s.dtype_bytes(), &block);
        ensure!(
            l1_used <= self.l1,
            CapacityExceededSnafu { what: "L1 byte", count: l1_used as usize, max: self.l1 as usize }
        );
        Ok(PrecomputedPlan { dims, block })
    }

    fn cache_block(&self, cache: &CacheTiling, dims: &ConvDimPlan) -> ConvBlockPlan {
        let mut block = ConvBlockPlan::double_buffered();
        block.base_m = cache.m_l0 * BLOCK_CUBE;
        block.base_k = cache.k_l0 * self.shape.c0;
        block.base_n = cache.n_l0 * BLOCK_CUBE;
        block.step_m = cache.m_al1.max(1);
        block.step_n = cache.n_bl1.max(1);
        block.step_ka = (cache.k_al1 / cache.k_l0).max(1);
        block.step_kb = (cache.k_bl1 / cache.k_l0).max(1);
        block.cl0 = cache.db_l0c;
        block.al1 = cache.db_al1;
        block.bl1 = cache.db_bl1;
        block.bl1_bound = cache.bl1_bound;

        // a step that already covers all of K gains nothing from a second buffer
        let k_iter = ceil_div(dims.single_core_ho * self.shape.wo, block.base_k);
        if block.al1 > 1 && block.step_ka >= k_iter {
            block.al1 = 1;
        }
        if block.bl1 > 1 && block.step_kb >= k_iter {
            block.bl1 = 1;
        }
        if block.step_n > 1 && ceil_div(k_iter, block.step_kb) > block.bl1 {
            tracing::debug!(k_iter, step_kb = block.step_kb, bl1 = block.bl1, "single N step, K does not fit BL1");
            block.step_n = 1;
        }
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bf16_shape(batch: u64, dout: u64, ho: u64, cin: u64, k: u64) -> Conv3dShape {
        let args = Conv3dBackpropFilterArgs {
            x: TensorDesc::new(ScalarDType::BFloat16, [batch, dout + k - 1, ho + k - 1, ho + k - 1, cin]),
            x_storage: StorageFormat::Fractal,
            filter_size: TensorDesc::new(ScalarDType::Int32, [16, k, k, k, cin]),
            filter_format: DataFormat::Ndhwc,
            out_backprop: TensorDesc::new(ScalarDType::BFloat16, [batch, dout, ho, ho, 16]),
            attrs: Conv3dAttrs::builder().strides(vec![1; 5]).build(),
        };
        filter_shape(&args).expect("valid shape")
    }

    #[test]
    fn batch_and_depth_take_every_core_when_they_divide() {
        let shape = bf16_shape(4, 5, 32, 16, 3);
        let budget = PlatformBudget::ascend910b3();
        let config = TilingConfig::default();
        let tiler = FilterTiler::new(&shape, &budget, &config);
        let split = tiler.core_split(20);
        assert_eq!(split, CoreSplit { batch: 4, d: 5, k: 1, n: 1 });
        assert_eq!(tiler.dims(split).used_cores(), 20);
    }

    #[test]
    fn small_batch_depth_keeps_a_single_core_split() {
        let shape = bf16_shape(1, 1, 32, 16, 3);
        let budget = PlatformBudget::ascend910b3();
        let config = TilingConfig::default();
        let tiler = FilterTiler::new(&shape, &budget, &config);
        assert_eq!(tiler.core_split(20), CoreSplit::SINGLE);
        assert!(tiler.fast_dims().is_none());
    }
}
