//! UB capacity divider.
//!
//! Each foreach operator splits the unified buffer between its input, output
//! and scratch buffers in a fixed ratio. The ratios are data, kept in one
//! table keyed by [`ForeachOp`].

use enumset::{EnumSet, enum_set};
use snafu::{OptionExt, ensure};
use tessel_dtype::{BlockAlignment, ScalarDType};

use crate::error::*;

/// Divisor applied to the budget when the kernel stages data through a wider type.
pub const CAST_DIVIDER: u64 = 10;

/// Bytes the vector unit processes per repeat.
pub const REPEAT_BYTES: u64 = 256;

const BASIC_BLOCK: u64 = 1024;
const POW_LIST_CALC_PROC: [u64; 9] = [12, 3, 5, 3, 12, 12, 12, 12, 12];

// ============================================================================
// OPERATORS
// ============================================================================

/// Operators of the foreach family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ForeachOp {
    ZeroInplace,
    AddScalar,
    AddScalarList,
    Expm1,
    Sqrt,
    Neg,
    Reciprocal,
    Log2,
    MulScalar,
    MulScalarList,
    Log,
    Log1p,
    Log10,
    AddList,
    SubList,
    MulList,
    DivList,
    MinimumList,
    MaximumList,
    AddcdivScalar,
    AddcdivScalarList,
    AddcmulScalar,
    AddcmulScalarList,
    AddcdivList,
    AddcmulList,
    MaximumScalar,
    MaximumScalarList,
    MinimumScalar,
    MinimumScalarList,
    Cos,
    Sin,
    Sigmoid,
    Exp,
    Abs,
    Erf,
    Erfc,
    Tanh,
    Cosh,
    Asin,
    Acos,
    Sinh,
    Tan,
    Atan,
    LerpScalar,
    LerpList,
    PowList,
    PowScalar,
    PowScalarList,
    PowScalarAndTensor,
    SubScalar,
    SubScalarList,
    DivScalar,
    DivScalarList,
    RoundOffNumber,
    Copy,
    Sign,
    Norm,
}

const FLOATS: EnumSet<ScalarDType> = enum_set!(ScalarDType::Float16 | ScalarDType::Float32 | ScalarDType::BFloat16);

impl ForeachOp {
    /// Position of the tensor list among the operator's dynamic inputs.
    ///
    /// `pow_scalar_and_tensor` takes a scalar base first, so both its element
    /// kind and its list come from input 1.
    pub const fn list_input(&self) -> usize {
        match self {
            Self::PowScalarAndTensor => 1,
            _ => 0,
        }
    }

    pub const fn is_reduce(&self) -> bool {
        matches!(self, Self::Norm)
    }

    /// Element kinds a kernel is compiled for.
    pub fn supported_dtypes(&self) -> EnumSet<ScalarDType> {
        use ForeachOp::*;
        use ScalarDType::*;

        match self {
            Copy | ZeroInplace | Sign => FLOATS | Int32 | Int8 | UInt8 | Int16 | Int64 | Float64,
            AddScalar | AddScalarList | AddList | SubList | MulList | DivList | MulScalar | MulScalarList
            | MinimumList | MaximumList | MaximumScalar | MaximumScalarList | MinimumScalar | MinimumScalarList
            | SubScalar | SubScalarList | DivScalar | DivScalarList | Abs | Neg | AddcdivScalar
            | AddcdivScalarList | AddcmulScalar | AddcmulScalarList | AddcdivList | AddcmulList | PowList
            | PowScalar | PowScalarList | PowScalarAndTensor => FLOATS | Int32,
            _ => FLOATS,
        }
    }

    pub fn supports(&self, dtype: ScalarDType) -> bool {
        self.supported_dtypes().contains(dtype)
    }

    /// How this operator divides the UB for `dtype`.
    pub fn division(&self, dtype: ScalarDType) -> Result<UbDivision> {
        use ForeachOp::*;

        let eb = dtype.element_bytes() as u64;
        let four = eb == 4;
        let two = eb == 2;
        let half_or_bf16 = enum_set!(ScalarDType::BFloat16 | ScalarDType::Float16);

        let division = match self {
            ZeroInplace | AddScalar | AddScalarList | Expm1 | Sqrt | MulScalar | MulScalarList => {
                UbDivision::new(2)
            }
            Neg | Reciprocal => UbDivision::new(2).after(32),
            Log2 => UbDivision::new(2).after(BASIC_BLOCK * if four { 0 } else { 4 } * eb),
            Log | Log1p | Log10 => UbDivision::new(2).reserve(1024),
            AddList | SubList | MulList | DivList | MinimumList | MaximumList => UbDivision::new(6),
            AddcdivScalar | AddcdivScalarList | AddcmulScalar | AddcmulScalarList => {
                UbDivision::new(8).cast(half_or_bf16).wide(half_or_bf16)
            }
            AddcdivList | AddcmulList => UbDivision::new(8),
            MaximumScalar | MaximumScalarList | MinimumScalar | MinimumScalarList => UbDivision::new(4),
            Cos => UbDivision::new(4).reserve(BASIC_BLOCK * if four { 4 } else { 6 } * eb),
            Sin => UbDivision::new(4).reserve(8 * BASIC_BLOCK * if four { 2 } else { 6 } * eb),
            Sigmoid | Exp => UbDivision::new(4).reserve(1024),
            Abs => UbDivision::new(4).reserve(2048),
            Erf => UbDivision::new(if two { 36 } else { 16 }),
            Erfc => UbDivision::new(if two { 68 } else { 32 }),
            Tanh => UbDivision::new(if two { 7 } else { 8 }).reserve(1024),
            Cosh | Asin | Acos => UbDivision::new(4).reserve(if four { 2 } else { 6 } * eb * BASIC_BLOCK * 8),
            Sinh => UbDivision::new(4).reserve(if four { 1 } else { 4 } * eb * BASIC_BLOCK),
            Tan | Atan => UbDivision::new(4).reserve(if four { 4 } else { 10 } * eb * BASIC_BLOCK * 8),
            LerpScalar => UbDivision::new(6).reserve(128).cast(half_or_bf16).wide(half_or_bf16),
            LerpList => UbDivision::new(11).cast(half_or_bf16).wide(half_or_bf16).repeat_aligned(),
            PowList => {
                let key = dtype.tiling_key().context(UnsupportedDTypeSnafu { op: "pow_list", dtype })?;
                let proc = POW_LIST_CALC_PROC[(key - 1) as usize];
                // bf16 folds the cast divider into the divisor.
                if dtype == ScalarDType::BFloat16 {
                    UbDivision::new(6 * CAST_DIVIDER + proc).cast(EnumSet::empty())
                } else {
                    UbDivision::new(6 + proc)
                }
            }
            PowScalar | PowScalarList | PowScalarAndTensor => {
                let n = match dtype {
                    ScalarDType::Float32 | ScalarDType::Int32 => 4,
                    _ => 14,
                };
                UbDivision::new(4).reserve(BASIC_BLOCK * n * eb)
            }
            SubScalar | SubScalarList | DivScalar | DivScalarList => {
                UbDivision::new(4).reserve(32).cast(half_or_bf16).wide(half_or_bf16)
            }
            RoundOffNumber => UbDivision {
                divide: Divide::RepeatScaled,
                ..UbDivision::new(2).cast(half_or_bf16).wide(half_or_bf16)
            },
            Copy => UbDivision::new(1).wide(EnumSet::empty()),
            Sign => {
                let reserve = match dtype {
                    ScalarDType::Float32 | ScalarDType::Float16 => 3 * eb * BASIC_BLOCK * 8,
                    _ => 0,
                };
                UbDivision::new(4)
                    .reserve(reserve)
                    .cast(enum_set!(ScalarDType::BFloat16 | ScalarDType::Int64 | ScalarDType::Int8))
            }
            Norm => UbDivision::new(2).reserve(16384).cast(half_or_bf16),
        };
        Ok(division)
    }
}

// ============================================================================
// DIVISION RULE
// ============================================================================

/// How the per-buffer share is derived from the usable bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divide {
    /// Cast divider first, then an integer split.
    Plain,
    /// Integer split, then shrink by `REPEAT / (REPEAT + 2 * eb)` to leave
    /// room for per-repeat scratch, then the cast divider.
    RepeatScaled,
}

/// One row of the per-operator UB table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UbDivision {
    /// Scratch bytes taken off the top, on top of the tiling blob.
    pub reserve: u64,
    /// Number of equal buffers the usable bytes are split into.
    pub divisor: u64,
    /// Bytes subtracted from each buffer after the split.
    pub after: u64,
    /// Element kinds the kernel widens in UB.
    pub cast: EnumSet<ScalarDType>,
    /// Element kinds aligned to the wide block.
    pub wide: EnumSet<ScalarDType>,
    /// Floor the result to whole vector repeats.
    pub repeat_align: bool,
    pub divide: Divide,
}

impl UbDivision {
    pub fn new(divisor: u64) -> Self {
        Self {
            reserve: 0,
            divisor,
            after: 0,
            cast: enum_set!(ScalarDType::BFloat16),
            wide: enum_set!(ScalarDType::BFloat16),
            repeat_align: false,
            divide: Divide::Plain,
        }
    }

    pub fn reserve(mut self, bytes: u64) -> Self {
        self.reserve = bytes;
        self
    }

    pub fn after(mut self, bytes: u64) -> Self {
        self.after = bytes;
        self
    }

    pub fn cast(mut self, set: EnumSet<ScalarDType>) -> Self {
        self.cast = set;
        self
    }

    pub fn wide(mut self, set: EnumSet<ScalarDType>) -> Self {
        self.wide = set;
        self
    }

    pub fn repeat_aligned(mut self) -> Self {
        self.repeat_align = true;
        self
    }

    /// Drop the wide alignment for bf16.
    pub fn narrow_bf16(mut self) -> Self {
        self.wide.remove(ScalarDType::BFloat16);
        self
    }

    pub fn alignment(&self, dtype: ScalarDType) -> BlockAlignment {
        if self.wide.contains(dtype) { BlockAlignment::Wide } else { BlockAlignment::Narrow }
    }
}

/// Largest per-buffer tile that fits the UB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UbTileBudget {
    /// Block-aligned bytes per buffer.
    pub bytes: u64,
    /// Elements those bytes hold.
    pub elements: u64,
}

/// Apply `division` to a UB of `ub_bytes` with `reserved_bytes` (at least the
/// serialized tiling blob) already spoken for.
pub fn max_tile(ub_bytes: u64, reserved_bytes: u64, dtype: ScalarDType, division: &UbDivision) -> Result<UbTileBudget> {
    ensure!(division.divisor > 0, ZeroDivisorSnafu { what: "UB buffer count" });

    let reserved = reserved_bytes.saturating_add(division.reserve);
    let mut usable = ub_bytes
        .checked_sub(reserved)
        .context(ReservedExceedsBudgetSnafu { ub_bytes, reserved_bytes: reserved })?;
    let cast = division.cast.contains(dtype);
    let eb = dtype.element_bytes() as u64;

    let per_buffer = match division.divide {
        Divide::Plain => {
            if cast {
                usable /= CAST_DIVIDER;
            }
            usable / division.divisor
        }
        Divide::RepeatScaled => {
            let split = usable / division.divisor;
            let scale = REPEAT_BYTES as f64 / (REPEAT_BYTES as f64 + 2.0 * eb as f64);
            let scaled = (scale * split as f64) as u64;
            if cast { scaled / CAST_DIVIDER } else { scaled }
        }
    };

    let per_buffer = per_buffer.checked_sub(division.after).context(ReservedExceedsBudgetSnafu {
        ub_bytes,
        reserved_bytes: reserved.saturating_add(division.after.saturating_mul(division.divisor)),
    })?;

    let mut bytes = division.alignment(dtype).align_down(per_buffer);
    if division.repeat_align {
        bytes = bytes / REPEAT_BYTES * REPEAT_BYTES;
    }

    Ok(UbTileBudget { bytes, elements: bytes / eb })
}
