//! Precomputed plans for shapes the fast heuristic handles poorly.
//!
//! Lookups are cache-aside: a hit replaces the whole dim and block search, a
//! miss falls through to it. Built-in entries are keyed by table and cube core
//! count; callers can layer their own entries on top with
//! [`KnowledgeRegistry::register`], which take precedence over built-ins.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::plan::{ConvBlockPlan, ConvDimPlan};
use super::shape::Conv3dShape;
use super::tables;
use crate::error::*;

/// Which built-in table a lookup goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum KnowledgeTable {
    /// 16-bit input gradients.
    DxHalf,
    /// f32 input gradients.
    DxFloat,
    /// f32 input gradients served by the basic-block kernel.
    DxFloatBasic,
    /// 16-bit filter gradients.
    DwHalf,
}

// ============================================================================
// KEYS
// ============================================================================

/// Shape fingerprint, printed as `_`-joined decimals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeKey(pub Vec<u64>);

impl ShapeKey {
    /// `N Do Co1 Ho Wo Di Ci1 Hi Wi Dk Hk Wk sD sH sW pads dilations`.
    pub fn backprop_input(shape: &Conv3dShape) -> Self {
        let mut key = vec![
            shape.batch,
            shape.dout,
            shape.cout1,
            shape.ho,
            shape.wo,
            shape.di,
            shape.cin1,
            shape.hi,
            shape.wi,
        ];
        key.extend(shape_tail(shape));
        Self(key)
    }

    /// Like [`Self::backprop_input`] without `Di`, channels counted per group.
    pub fn backprop_filter(shape: &Conv3dShape) -> Self {
        let mut key = vec![shape.batch, shape.dout, shape.cout1_g, shape.ho, shape.wo, shape.cin1_g, shape.hi, shape.wi];
        key.extend(shape_tail(shape));
        Self(key)
    }
}

fn shape_tail(shape: &Conv3dShape) -> impl Iterator<Item = u64> {
    [shape.kd, shape.kh, shape.kw, shape.stride_d, shape.stride_h, shape.stride_w]
        .into_iter()
        .chain(shape.pads.to_array())
        .chain([shape.dilation_d, shape.dilation_h, shape.dilation_w])
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("_"))
    }
}

impl FromStr for ShapeKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.split('_')
            .map(|part| {
                part.parse::<u64>().map_err(|e| Error::InvalidAttr {
                    field: "shape key",
                    reason: format!("{part:?} in {s:?}: {e}"),
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

// ============================================================================
// PLANS
// ============================================================================

/// A complete plan that bypasses the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecomputedPlan {
    pub dims: ConvDimPlan,
    pub block: ConvBlockPlan,
}

impl PrecomputedPlan {
    /// Decode an input-gradient row: core split, single-core extents, pbuffers,
    /// base block, then steps and iterate order.
    pub fn from_dx_row(row: &[u64; 34]) -> Self {
        let dims = ConvDimPlan {
            core_num: row[0],
            batch_dim: row[1],
            group_dim: row[2],
            m_dim: row[3],
            k_dim: row[4],
            n_dim: row[5],
            d_dim: row[6],
            dk_dim: 1,
            single_core_batch: row[7],
            single_core_group: row[8],
            single_core_m: row[9],
            single_core_cout: row[10],
            single_core_cout1: row[11],
            single_core_cin: row[12],
            single_core_cin1: row[13],
            single_core_din: row[14],
            single_core_ho: row[15],
            single_core_dk: 1,
        };
        let block = ConvBlockPlan {
            al0: row[16],
            bl0: row[17],
            cl0: row[18],
            al1: row[19],
            bl1: row[20],
            base_m: row[21],
            base_k: row[22],
            base_n: row[23],
            base_d: row[24],
            base_batch: row[25],
            base_group: row[26],
            step_m: row[27],
            step_n: row[28],
            step_ka: row[29],
            step_kb: row[30],
            step_batch: row[31],
            step_group: row[32],
            iterate_order: row[33],
            bl1_bound: 0,
        };
        Self { dims, block }
    }

    /// Decode a filter-gradient row. `batch_dim` already folds the depth split.
    pub fn from_dw_row(row: &[u64; 26]) -> Self {
        let dims = ConvDimPlan {
            batch_dim: row[0],
            group_dim: row[1],
            dk_dim: row[2],
            m_dim: row[3],
            k_dim: row[4],
            n_dim: row[5],
            d_dim: 1,
            single_core_batch: row[6],
            single_core_group: row[7],
            single_core_dk: row[8],
            single_core_cout: row[9],
            single_core_cin: row[10],
            single_core_ho: row[11],
            ..ConvDimPlan::default()
        };
        let block = ConvBlockPlan {
            al0: row[12],
            bl0: row[13],
            cl0: row[14],
            al1: row[15],
            bl1: row[16],
            base_m: row[17],
            base_k: row[18],
            base_n: row[19],
            step_m: row[20],
            step_n: row[21],
            step_ka: row[22],
            step_kb: row[23],
            iterate_order: row[24],
            bl1_bound: row[25],
            ..ConvBlockPlan::default()
        };
        let mut plan = Self { dims, block };
        plan.dims.core_num = plan.dims.used_cores();
        plan
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

type TableKey = (KnowledgeTable, u32);

/// Built-in tables plus runtime overrides.
pub struct KnowledgeRegistry {
    builtin: HashMap<TableKey, HashMap<ShapeKey, PrecomputedPlan>>,
    overrides: RwLock<HashMap<TableKey, HashMap<ShapeKey, PrecomputedPlan>>>,
}

impl KnowledgeRegistry {
    fn new() -> Self {
        let mut builtin = HashMap::new();
        load(&mut builtin, (KnowledgeTable::DxHalf, 24), tables::DX_B16_24_CORES, PrecomputedPlan::from_dx_row);
        load(&mut builtin, (KnowledgeTable::DxHalf, 20), tables::DX_B16_20_CORES, PrecomputedPlan::from_dx_row);
        load(&mut builtin, (KnowledgeTable::DxFloat, 24), tables::DX_F32_24_CORES, PrecomputedPlan::from_dx_row);
        load(&mut builtin, (KnowledgeTable::DxFloat, 20), tables::DX_F32_20_CORES, PrecomputedPlan::from_dx_row);
        load(
            &mut builtin,
            (KnowledgeTable::DxFloatBasic, 24),
            tables::DX_F32_BASIC_24_CORES,
            PrecomputedPlan::from_dx_row,
        );
        load(
            &mut builtin,
            (KnowledgeTable::DxFloatBasic, 20),
            tables::DX_F32_BASIC_20_CORES,
            PrecomputedPlan::from_dx_row,
        );
        load(&mut builtin, (KnowledgeTable::DwHalf, 20), tables::DW_B16_20_CORES, PrecomputedPlan::from_dw_row);
        load(&mut builtin, (KnowledgeTable::DwHalf, 24), tables::DW_B16_24_CORES, PrecomputedPlan::from_dw_row);
        Self { builtin, overrides: RwLock::new(HashMap::new()) }
    }

    /// Plan for `key` on a `cube_cores` chip; overrides shadow built-ins.
    pub fn lookup(&self, table: KnowledgeTable, cube_cores: u32, key: &ShapeKey) -> Option<PrecomputedPlan> {
        let slot = (table, cube_cores);
        if let Some(plan) = self.overrides.read().get(&slot).and_then(|entries| entries.get(key)) {
            return Some(*plan);
        }
        self.builtin.get(&slot).and_then(|entries| entries.get(key)).copied()
    }

    /// Add or replace an override; returns the override it displaced.
    pub fn register(
        &self,
        table: KnowledgeTable,
        cube_cores: u32,
        key: ShapeKey,
        plan: PrecomputedPlan,
    ) -> Option<PrecomputedPlan> {
        tracing::debug!(%table, cube_cores, %key, "registering knowledge override");
        self.overrides.write().entry((table, cube_cores)).or_default().insert(key, plan)
    }

    /// Drop every override; built-ins stay.
    pub fn clear_overrides(&self) {
        self.overrides.write().clear();
    }

    /// Number of built-in entries in one table.
    pub fn builtin_len(&self, table: KnowledgeTable, cube_cores: u32) -> usize {
        self.builtin.get(&(table, cube_cores)).map_or(0, HashMap::len)
    }
}

fn load<const K: usize, const V: usize>(
    builtin: &mut HashMap<TableKey, HashMap<ShapeKey, PrecomputedPlan>>,
    slot: TableKey,
    rows: &[([u64; K], [u64; V])],
    decode: fn(&[u64; V]) -> PrecomputedPlan,
) {
    let entries = builtin.entry(slot).or_default();
    for (key, row) in rows {
        // first entry wins on duplicate keys
        entries.entry(ShapeKey(key.to_vec())).or_insert_with(|| decode(row));
    }
}

static REGISTRY: Lazy<KnowledgeRegistry> = Lazy::new(KnowledgeRegistry::new);

/// Process-wide knowledge registry.
pub fn registry() -> &'static KnowledgeRegistry {
    &REGISTRY
}
