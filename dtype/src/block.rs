/// Minimum contiguous-access granularity of the vector units.
pub const BLOCK_BYTES: usize = 32;

/// Block size used by the bf16 paths that stage data through a wider type.
pub const WIDE_BLOCK_BYTES: usize = 64;

/// Element size assumed for element kinds without a known width.
pub const DEFAULT_ELEMENT_BYTES: usize = 4;

/// Alignment granularity chosen at a particular call site.
///
/// Most paths align to [`BLOCK_BYTES`]. Some bf16 paths align to
/// [`WIDE_BLOCK_BYTES`] instead; which ones is decided per call site and
/// never inferred from the element kind alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockAlignment {
    #[default]
    Narrow,
    Wide,
}

impl BlockAlignment {
    pub const fn bytes(self) -> usize {
        match self {
            Self::Narrow => BLOCK_BYTES,
            Self::Wide => WIDE_BLOCK_BYTES,
        }
    }

    /// Round `bytes` down to a whole number of blocks.
    pub const fn align_down(self, bytes: u64) -> u64 {
        let block = self.bytes() as u64;
        bytes / block * block
    }
}
