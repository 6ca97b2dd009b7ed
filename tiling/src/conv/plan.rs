//! Dimension and block plans shared by the conv drivers.
//!
//! A [`ConvDimPlan`] says how the problem is split across cube cores; a
//! [`ConvBlockPlan`] says how one core walks its share through L1 and L0.
//! The helpers at the bottom size the feature map window a block needs.

use super::shape::Conv3dShape;
use super::{BLOCK_CUBE, DB_ON};
use crate::math::{ceil_align, ceil_div};

/// Extra input rows staged when a block does not end on a row boundary.
const FMAP_H_NUM: u64 = 2;
/// Rows of slack the filter kernel keeps when a block spans a partial row.
const ROW_NUM: u64 = 2;

/// How one convolution is split across cube cores.
///
/// Every multiplier is at least 1. Ceil-multiplying a single-core extent by
/// its multiplier covers the global extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConvDimPlan {
    pub batch_dim: u64,
    pub group_dim: u64,
    pub d_dim: u64,
    pub m_dim: u64,
    pub k_dim: u64,
    pub n_dim: u64,
    /// Kernel depth split, filter gradients only.
    pub dk_dim: u64,
    /// Cores the plan was built for.
    pub core_num: u64,

    pub single_core_batch: u64,
    pub single_core_group: u64,
    pub single_core_m: u64,
    pub single_core_cout: u64,
    pub single_core_cout1: u64,
    pub single_core_cin: u64,
    pub single_core_cin1: u64,
    pub single_core_din: u64,
    pub single_core_ho: u64,
    pub single_core_dk: u64,
}

impl ConvDimPlan {
    /// Product of all multipliers, i.e. the launch width.
    pub fn used_cores(&self) -> u64 {
        self.batch_dim * self.group_dim * self.d_dim * self.m_dim * self.k_dim * self.n_dim * self.dk_dim
    }
}

/// Per-core walk through the cube memories.
///
/// Pbuffer fields are 1 (single) or 2 (double buffered).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConvBlockPlan {
    pub base_m: u64,
    pub base_k: u64,
    pub base_n: u64,
    pub base_d: u64,
    pub base_batch: u64,
    pub base_group: u64,

    pub step_m: u64,
    pub step_n: u64,
    pub step_ka: u64,
    pub step_kb: u64,
    pub step_batch: u64,
    pub step_group: u64,
    pub iterate_order: u64,

    pub al0: u64,
    pub bl0: u64,
    pub cl0: u64,
    pub al1: u64,
    pub bl1: u64,

    /// Upper bound of the B matrix footprint in L1, filter gradients only.
    pub bl1_bound: u64,
}

impl ConvBlockPlan {
    /// Double-buffered L0 with single-stepped batch, group and depth.
    pub(crate) fn double_buffered() -> Self {
        Self {
            base_d: 1,
            base_batch: 1,
            base_group: 1,
            step_m: 1,
            step_n: 1,
            step_batch: 1,
            step_group: 1,
            iterate_order: 1,
            al0: DB_ON,
            bl0: DB_ON,
            cl0: 1,
            al1: DB_ON,
            bl1: DB_ON,
            ..Self::default()
        }
    }

    /// One of the two K steps divides the other.
    pub fn steps_nest(&self) -> bool {
        match (self.step_ka, self.step_kb) {
            (0, _) | (_, 0) => false,
            (a, b) if a > b => a % b == 0,
            (a, b) => b % a == 0,
        }
    }
}

/// L0A/L0B capacity test of a base block, both double buffered.
///
/// `extra_k` widens the B block; f32 input gradients reserve one channel
/// block for the transpose when the kernel has more than one tap.
pub fn fits_l0(
    base_m: u64,
    base_n: u64,
    base_k: u64,
    extra_k: u64,
    dtype_bytes: u64,
    l0a_bytes: u64,
    l0b_bytes: u64,
) -> bool {
    let l0a = base_m * base_k * dtype_bytes * DB_ON;
    let l0b = base_n * (base_k + extra_k) * dtype_bytes * DB_ON;
    l0a <= l0a_bytes && l0b <= l0b_bytes
}

/// L1 bytes an input-gradient block stages: the gradient window for A plus
/// the filter taps for B.
///
/// f32 loads filter taps in pairs, so B is counted in whole tap pairs.
pub fn input_l1_bytes(shape: &Conv3dShape, block: &ConvBlockPlan) -> u64 {
    let dt = shape.dtype_bytes();
    let len_hkwkc0 = shape.kernel_hw() * shape.c0;
    let b1 = if dt == 4 {
        let taps_loaded = ceil_div(block.step_kb * block.base_k, len_hkwkc0);
        block.bl1 * dt * block.base_n * ceil_align(taps_loaded, 2) * len_hkwkc0
    } else {
        block.bl1 * dt * block.step_kb * block.base_n * block.base_k
    };
    let cout_num = block.step_ka * block.base_k / shape.kernel_hw();
    let a1 = input_fmap_rows(shape, block.base_m) * shape.wo * shape.stride_w * cout_num;
    a1 * dt * block.al1 + b1
}

/// L1 bytes a filter-gradient block stages: `bl1_bound` elements of B plus
/// `step_ka` A blocks of every M step.
pub fn filter_l1_bytes(dtype_bytes: u64, block: &ConvBlockPlan) -> u64 {
    let b1 = block.bl1_bound * block.bl1;
    let a1 = block.step_m * block.base_m * block.base_k * block.step_ka * block.al1;
    (a1 + b1) * dtype_bytes
}

// ============================================================================
// WINDOW GEOMETRY
// ============================================================================

/// Gradient rows an `m_l1`-pixel block of the input gradient reads.
pub fn input_fmap_rows(shape: &Conv3dShape, m_l1: u64) -> u64 {
    let wi = shape.wi.max(1);
    let rows = if m_l1 != 0 && (m_l1 % wi == 0 || wi % m_l1 == 0) {
        ceil_div(m_l1, wi)
    } else if m_l1 > wi {
        m_l1 / wi + FMAP_H_NUM
    } else {
        FMAP_H_NUM
    };
    let window = rows - 1 + shape.kh_dilated();
    let expanded = shape.ho.saturating_sub(1) * shape.stride_h + 1;
    window.min(expanded)
}

/// Output rows covered by `k` reduction elements laid out row-major over `wo`.
pub fn filter_ho_rows(k: u64, wo: u64) -> u64 {
    if k < wo { 1 } else { ceil_div(k, wo) }
}

/// Input rows needed to produce `ho` output rows, capped at the feature map height.
pub fn filter_hi_rows(ho: u64, stride_h: u64, kh_dilated: u64, hi: u64) -> u64 {
    (ho.saturating_sub(1) * stride_h + kh_dilated).min(hi)
}

/// Input channels an `n_l1`-wide block of the filter gradient touches.
pub fn filter_cin_extent(shape: &Conv3dShape, n_l1: u64) -> u64 {
    let taps = shape.kernel_hw();
    let blocks = ceil_div(n_l1, BLOCK_CUBE).max(1);
    let ci = ceil_div(blocks, taps);
    let extend = if taps > blocks {
        u64::from(taps % blocks != 0)
    } else if 2 * blocks % taps == 0 {
        1
    } else {
        ROW_NUM
    };
    (ci + extend) * BLOCK_CUBE
}

/// Bound of the B matrix footprint in L1 for a filter-gradient block.
pub fn filter_bl1_bound(shape: &Conv3dShape, base_k: u64, step_kb: u64, base_n: u64) -> u64 {
    let ho = filter_ho_rows(base_k * step_kb, shape.wo);
    let hi = filter_hi_rows(ho, shape.stride_h, shape.kh_dilated(), shape.hi);
    hi * shape.wi * filter_cin_extent(shape, base_n)
}
