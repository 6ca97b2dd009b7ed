//! General conv tiling search, the fallback behind the fast heuristic.
//!
//! A [`GeneralSearch`] answers in the cache tiling vocabulary: core split
//! multipliers plus L0/L1 extents counted in fractal blocks. The drivers turn
//! that answer into [`super::ConvDimPlan`] and [`super::ConvBlockPlan`]
//! themselves, so a search only has to be feasible, not tuned.

use snafu::ensure;
use tessel_platform::PlatformBudget;

use super::plan::{filter_bl1_bound, fits_l0, input_fmap_rows};
use super::shape::Conv3dShape;
use super::{BLOCK_CUBE, DB_ON, L1_RESERVED_BYTES};
use crate::error::*;
use crate::math::ceil_div;

/// Answer of a general search.
///
/// `*_l0` extents count fractal blocks (`m`, `n`) or channel blocks (`k`);
/// `k_al1`/`k_bl1` count the same `k` units staged in L1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheTiling {
    pub batch_dim: u64,
    pub group_dim: u64,
    pub d_dim: u64,
    pub m_dim: u64,
    pub k_dim: u64,
    pub n_dim: u64,

    pub m_l0: u64,
    pub k_l0: u64,
    pub n_l0: u64,
    pub m_al1: u64,
    pub n_bl1: u64,
    pub k_al1: u64,
    pub k_bl1: u64,

    pub db_al1: u64,
    pub db_bl1: u64,
    pub db_l0c: u64,

    /// B matrix footprint bound in elements, filter gradients only.
    pub bl1_bound: u64,
    /// Batch times depth one core handles, filter gradients only.
    pub batch_dout_single_core: u64,
}

impl CacheTiling {
    /// Reject answers the drivers cannot divide by.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("batch_dim", self.batch_dim),
            ("group_dim", self.group_dim),
            ("d_dim", self.d_dim),
            ("m_dim", self.m_dim),
            ("k_dim", self.k_dim),
            ("n_dim", self.n_dim),
            ("m_l0", self.m_l0),
            ("k_l0", self.k_l0),
            ("n_l0", self.n_l0),
            ("k_al1", self.k_al1),
            ("k_bl1", self.k_bl1),
            ("db_al1", self.db_al1),
            ("db_bl1", self.db_bl1),
            ("db_l0c", self.db_l0c),
        ];
        for (name, value) in fields {
            ensure!(
                value > 0,
                InvalidAttrSnafu { field: "cache tiling", reason: format!("{name} must be positive") }
            );
        }
        Ok(())
    }
}

/// Slow tiling search behind the fast heuristic.
///
/// Answers must fit L0. The drivers check the L1 footprint of the block they
/// derive and shrink it or fail with [`Error::CapacityExceeded`].
pub trait GeneralSearch: Send + Sync {
    fn backprop_input(&self, shape: &Conv3dShape, budget: &PlatformBudget) -> CacheTiling;

    fn backprop_filter(&self, shape: &Conv3dShape, budget: &PlatformBudget, deterministic: bool) -> CacheTiling;
}

/// Built-in search: greedy core split, then the largest block that fits.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSearch;

const M_L0_CANDIDATES: [u64; 4] = [8, 4, 2, 1];
const MAX_N_L0: u64 = 4;
const FILTER_MAX_MN_L0: u64 = 8;
const FILTER_K_L0: u64 = 4;
const FILTER_K_L1_STEPS: u64 = 2;
const L0C_ELEMENT_BYTES: u64 = 4;

impl GeneralSearch for DefaultSearch {
    #[tracing::instrument(level = "trace", skip_all)]
    fn backprop_input(&self, shape: &Conv3dShape, budget: &PlatformBudget) -> CacheTiling {
        let cores = u64::from(budget.cube_cores).max(1);
        let batch_dim = shape.batch.clamp(1, cores);
        let d_dim = shape.di.clamp(1, cores / batch_dim);
        let m_dim = shape.hi.clamp(1, cores / (batch_dim * d_dim));

        let dt = shape.dtype_bytes();
        let c0 = shape.c0;
        let l1 = budget.l1_bytes.saturating_sub(L1_RESERVED_BYTES);
        let extra_k = if dt == 4 && shape.kernel_hw() > 1 { c0 } else { 0 };
        let n_l0 = ceil_div(shape.cin1_g * c0, BLOCK_CUBE).clamp(1, MAX_N_L0);
        let single_m = ceil_div(shape.hi, m_dim) * shape.wi;

        let feasible = |m_l0: u64, db: u64| {
            let (base_m, base_n) = (m_l0 * BLOCK_CUBE, n_l0 * BLOCK_CUBE);
            let a1 = input_fmap_rows(shape, base_m.min(single_m.max(1))) * shape.wo * shape.stride_w * c0 * dt * db;
            let b1 = base_n * shape.kernel_hw() * c0 * dt * db;
            fits_l0(base_m, base_n, c0, extra_k, dt, budget.l0a_bytes, budget.l0b_bytes) && a1 + b1 <= l1
        };

        let choice = [DB_ON, 1]
            .into_iter()
            .flat_map(|db| M_L0_CANDIDATES.map(|m_l0| (m_l0, db)))
            .find(|&(m_l0, db)| feasible(m_l0, db));
        let (m_l0, db) = choice.unwrap_or_else(|| {
            tracing::debug!(wi = shape.wi, "no block fits L1, answering with the smallest one");
            (1, 1)
        });
        let l0c_tile = m_l0 * n_l0 * BLOCK_CUBE * BLOCK_CUBE * L0C_ELEMENT_BYTES;

        CacheTiling {
            batch_dim,
            group_dim: 1,
            d_dim,
            m_dim,
            k_dim: 1,
            n_dim: 1,
            m_l0,
            k_l0: 1,
            n_l0,
            m_al1: 1,
            n_bl1: 1,
            k_al1: 1,
            k_bl1: 1,
            db_al1: db,
            db_bl1: db,
            db_l0c: if l0c_tile * DB_ON <= budget.l0c_bytes { DB_ON } else { 1 },
            bl1_bound: 0,
            batch_dout_single_core: ceil_div(shape.batch, batch_dim) * ceil_div(shape.di, d_dim),
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn backprop_filter(&self, shape: &Conv3dShape, budget: &PlatformBudget, deterministic: bool) -> CacheTiling {
        let cores = u64::from(budget.cube_cores).max(1);
        let batch_dim = shape.batch.clamp(1, cores);
        let d_dim = shape.dout.clamp(1, cores / batch_dim);
        let k_dim = shape.ho.clamp(1, cores / (batch_dim * d_dim));
        // deterministic accumulation keeps N whole on each core
        let n_dim = if deterministic { 1 } else { shape.kd.clamp(1, cores / (batch_dim * d_dim * k_dim)) };

        let dt = shape.dtype_bytes();
        let c0 = shape.c0;
        let l1 = budget.l1_bytes.saturating_sub(L1_RESERVED_BYTES);
        let mut m_l0 = ceil_div(shape.cout1_g * c0, BLOCK_CUBE).clamp(1, FILTER_MAX_MN_L0);
        let mut n_l0 = ceil_div(shape.cin1_g * c0 * shape.kernel_hw(), BLOCK_CUBE).clamp(1, FILTER_MAX_MN_L0);
        let mut k_l1 = FILTER_K_L0 * FILTER_K_L1_STEPS;
        let mut db = DB_ON;

        let l1_used = |m_l0: u64, n_l0: u64, k_l1: u64, db: u64| {
            let base_k = FILTER_K_L0 * c0;
            let bound = filter_bl1_bound(shape, base_k, k_l1 / FILTER_K_L0, n_l0 * BLOCK_CUBE);
            bound * db * dt + m_l0 * BLOCK_CUBE * k_l1 * c0 * db * dt
        };
        while l1_used(m_l0, n_l0, k_l1, db) >= l1 {
            if k_l1 > FILTER_K_L0 {
                k_l1 = FILTER_K_L0;
            } else if db > 1 {
                db = 1;
            } else if n_l0 > 1 {
                n_l0 /= 2;
            } else if m_l0 > 1 {
                m_l0 /= 2;
            } else {
                break;
            }
        }
        let bl1_bound = filter_bl1_bound(shape, FILTER_K_L0 * c0, k_l1 / FILTER_K_L0, n_l0 * BLOCK_CUBE);

        CacheTiling {
            batch_dim,
            group_dim: 1,
            d_dim,
            m_dim: 1,
            k_dim,
            n_dim,
            m_l0,
            k_l0: FILTER_K_L0,
            n_l0,
            m_al1: 1,
            n_bl1: 1,
            k_al1: k_l1,
            k_bl1: k_l1,
            db_al1: db,
            db_bl1: db,
            db_l0c: 1,
            bl1_bound,
            batch_dout_single_core: ceil_div(shape.batch, batch_dim) * ceil_div(shape.dout, d_dim),
        }
    }
}
