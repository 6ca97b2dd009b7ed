//! Tiling results and the little-endian blob packer.
//!
//! Device kernels read the tiling blob as a plain C struct, so fields are
//! written little-endian at their natural alignment and the whole blob is
//! padded to a multiple of 8 bytes.

use smallvec::SmallVec;

/// Everything a tiling call hands to the kernel launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilingOutput {
    /// Kernel specialization tag.
    pub tiling_key: u64,
    /// Number of cores to launch.
    pub block_dim: u32,
    /// Scratch workspace sizes in bytes.
    pub workspace_bytes: SmallVec<[usize; 2]>,
    /// Serialized tiling data.
    pub data: Vec<u8>,
}

impl TilingOutput {
    pub fn new(tiling_key: u64, block_dim: u32, workspace: usize, data: &impl TilingData) -> Self {
        let mut workspace_bytes = SmallVec::new();
        workspace_bytes.push(workspace);
        Self { tiling_key, block_dim, workspace_bytes, data: data.to_bytes() }
    }
}

// ============================================================================
// FIELD ENCODING
// ============================================================================

/// Scalar that can appear in a tiling blob.
pub trait LeField: Copy {
    const SIZE: usize;

    fn put(self, buf: &mut Vec<u8>);
}

macro_rules! le_field {
    ($($ty:ty),*) => {$(
        impl LeField for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn put(self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_le_bytes());
            }
        }
    )*};
}

le_field!(u8, u16, u32, u64, i32, i64);

/// Sequential writer reproducing C struct layout.
#[derive(Debug, Default)]
pub struct TilingWriter {
    buf: Vec<u8>,
}

impl TilingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn align_to(&mut self, align: usize) {
        let rem = self.buf.len() % align;
        if rem != 0 {
            self.buf.resize(self.buf.len() + align - rem, 0);
        }
    }

    pub fn field<T: LeField>(&mut self, value: T) -> &mut Self {
        self.align_to(T::SIZE);
        value.put(&mut self.buf);
        self
    }

    pub fn array<T: LeField>(&mut self, values: &[T]) -> &mut Self {
        self.align_to(T::SIZE);
        for &value in values {
            value.put(&mut self.buf);
        }
        self
    }

    /// Pad to the blob granularity and hand out the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to(8);
        self.buf
    }
}

/// A struct the device kernel reads from the tiling blob.
pub trait TilingData {
    fn write(&self, w: &mut TilingWriter);

    fn to_bytes(&self) -> Vec<u8> {
        let mut w = TilingWriter::new();
        self.write(&mut w);
        w.finish()
    }

    /// Serialized size in bytes.
    fn byte_size(&self) -> usize {
        self.to_bytes().len()
    }
}
