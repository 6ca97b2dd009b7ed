//! Element and block accounting for NPU tiling.
//!
//! Every tiling computation starts from three facts about an element kind:
//! how many bytes one element occupies, how many elements fit in one aligned
//! memory block, and which dispatch tag the device kernel expects for it.

pub mod block;

#[cfg(any(test, feature = "proptest"))]
pub mod test;

pub use block::{BLOCK_BYTES, BlockAlignment, DEFAULT_ELEMENT_BYTES, WIDE_BLOCK_BYTES};

/// Scalar element kinds understood by the tiling layer.
#[derive(Debug, Hash, PartialOrd, Ord)]
#[derive(strum::EnumCount, strum::EnumIter, strum::VariantArray, strum::FromRepr)]
#[derive(enumset::EnumSetType)]
#[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[enumset(repr = "u32")]
pub enum ScalarDType {
    Bool = 0,

    Int8 = 1,
    UInt8 = 2,
    Int16 = 3,
    UInt16 = 4,
    Int32 = 5,
    UInt32 = 6,
    Int64 = 7,
    UInt64 = 8,

    Float16 = 9,
    BFloat16 = 10,
    Float32 = 11,
    Float64 = 12,

    /// Element kind the host framework reported but the tiling layer does not know.
    Undefined = 13,
}

impl ScalarDType {
    /// Exact storage size, `0` for [`ScalarDType::Undefined`].
    pub const fn bytes(&self) -> usize {
        match self {
            Self::Bool => 1,
            Self::Int8 => 1,
            Self::UInt8 => 1,
            Self::Int16 => 2,
            Self::UInt16 => 2,
            Self::Int32 => 4,
            Self::UInt32 => 4,
            Self::Int64 => 8,
            Self::UInt64 => 8,
            Self::Float16 => 2,
            Self::BFloat16 => 2,
            Self::Float32 => 4,
            Self::Float64 => 8,
            Self::Undefined => 0,
        }
    }

    /// Size used for partitioning arithmetic.
    ///
    /// Unknown element kinds are accounted as 4 bytes wide, so downstream
    /// divisions never see a zero element size.
    pub const fn element_bytes(&self) -> usize {
        match self.bytes() {
            0 => DEFAULT_ELEMENT_BYTES,
            n => n,
        }
    }

    /// Number of elements in one aligned block.
    pub const fn elements_per_block(&self, align: BlockAlignment) -> usize {
        align.bytes() / self.element_bytes()
    }

    /// Dispatch tag the foreach kernels use to pick their specialization.
    ///
    /// Returns `None` for element kinds no kernel is compiled for.
    pub const fn tiling_key(&self) -> Option<u64> {
        match self {
            Self::Float16 => Some(1),
            Self::Float32 => Some(2),
            Self::Int32 => Some(3),
            Self::BFloat16 => Some(4),
            Self::Int8 => Some(5),
            Self::UInt8 => Some(6),
            Self::Int16 => Some(7),
            Self::Int64 => Some(8),
            Self::Float64 => Some(9),
            _ => None,
        }
    }

    /// Dispatch tag of the reduction kernels, which only exist for float types.
    pub const fn reduce_tiling_key(&self) -> Option<u64> {
        match self {
            Self::Float16 => Some(1),
            Self::Float32 => Some(2),
            Self::BFloat16 => Some(4),
            _ => None,
        }
    }
}
