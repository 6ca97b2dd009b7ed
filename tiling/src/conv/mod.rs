//! Tiling for the 3-D convolution backprop operators.
//!
//! Both drivers follow the same shape:
//!
//! 1. validate the operands and normalize them into a [`Conv3dShape`];
//! 2. look the shape up in the [`knowledge`] maps;
//! 3. on a miss, run the fast heuristic: a core split (Phase A) followed by a
//!    cube block plan (Phase B);
//! 4. when the heuristic is rejected, fall back to a [`GeneralSearch`]
//!    (Phase C), which always yields a usable plan.
//!
//! Heuristic rejection is not an error. It is logged at `debug` and the
//! driver carries on with the general search.

pub mod data;
pub mod filter;
pub mod input;
pub mod knowledge;
pub mod plan;
pub mod search;
pub mod shape;

mod tables;

pub use data::{DwTilingData, DxTilingData};
pub use filter::{Conv3dBackpropFilterArgs, conv3d_backprop_filter, conv3d_backprop_filter_with};
pub use input::{Conv3dBackpropInputArgs, TransposeArgs, conv3d_backprop_input, conv3d_backprop_input_with};
pub use knowledge::{KnowledgeRegistry, KnowledgeTable, PrecomputedPlan, ShapeKey};
pub use plan::{ConvBlockPlan, ConvDimPlan};
pub use search::{CacheTiling, DefaultSearch, GeneralSearch};
pub use shape::{Conv3dAttrs, Conv3dShape, ConvPads, DataFormat, Padding, StorageFormat};

/// Double buffering factor.
pub const DB_ON: u64 = 2;
/// Edge of the cube unit's fractal block, in elements.
pub const BLOCK_CUBE: u64 = 16;
/// Bytes the L1 budget keeps back for the kernel's own bookkeeping.
pub const L1_RESERVED_BYTES: u64 = 128;
/// System workspace every conv kernel receives.
pub const WORKSPACE_BYTES: usize = 16 * 1024 * 1024;

/// Preferred base block of the cube unit; `K` is in bytes, divide by dtype size.
pub const BEST_BASE_M: u64 = 128;
pub const BEST_BASE_K: u64 = 128;
pub const BEST_BASE_N: u64 = 256;

/// Largest `K` start offset the load instructions can address.
pub const K_START_POSITION_MAX: u64 = 65535;
