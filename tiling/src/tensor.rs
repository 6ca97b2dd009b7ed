use smallvec::SmallVec;
use tessel_dtype::ScalarDType;

/// Static dimensions of one operator input or output.
pub type Shape = SmallVec<[u64; 5]>;

/// Element kind and dimensions of a tensor, as the host framework reports them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorDesc {
    pub dtype: ScalarDType,
    pub shape: Shape,
}

impl TensorDesc {
    pub fn new(dtype: ScalarDType, shape: impl IntoIterator<Item = u64>) -> Self {
        Self { dtype, shape: shape.into_iter().collect() }
    }

    /// Flat tensor of `len` elements.
    pub fn flat(dtype: ScalarDType, len: u64) -> Self {
        Self::new(dtype, [len])
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Product of the dimensions; a rank-0 tensor holds one element.
    pub fn num_elements(&self) -> u64 {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.num_elements() == 0
    }
}
