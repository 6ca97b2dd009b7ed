//! Host-side tiling for Ascend NPU kernels.
//!
//! A tiling call turns operator shapes, dtypes and attributes plus a
//! [`tessel_platform::PlatformBudget`] into a [`TilingOutput`]: the kernel
//! specialization key, the number of cores to launch, workspace sizes and a
//! little-endian blob the device kernel reads as a C struct.
//!
//! Two operator families are covered:
//!
//! - [`foreach`]: elementwise and norm kernels over a list of tensors,
//!   flattened into one stream and split across vector cores.
//! - [`conv`]: the 3-D convolution backprop drivers, which search a core
//!   split and cube block plan for the input and filter gradients.

pub mod config;
pub mod conv;
pub mod error;
pub mod foreach;
pub mod math;
pub mod output;
pub mod tensor;


pub use config::{ConvStrategy, TilingConfig};
pub use error::{Error, Result};
pub use output::{TilingData, TilingOutput, TilingWriter};
pub use tensor::{Shape, TensorDesc};
