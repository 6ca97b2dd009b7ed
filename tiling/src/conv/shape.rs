//! Convolution operands normalized for tiling.
//!
//! Host frameworks describe the three tensors in whatever layout the graph
//! uses. Everything downstream works on a [`Conv3dShape`]: NCDHW extents,
//! channel counts in `c0`-element blocks, and attributes with the
//! layout-dependent positions resolved.

use bon::bon;
use snafu::ensure;
use tessel_dtype::ScalarDType;

use super::BLOCK_CUBE;
use crate::error::*;
use crate::math::{ceil_div, lcm};
use crate::tensor::TensorDesc;

// ============================================================================
// LAYOUTS
// ============================================================================

/// Logical layout of a 5-D tensor or attribute list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum DataFormat {
    Ncdhw,
    #[default]
    Ndhwc,
    /// Filters only.
    Dhwcn,
}

impl DataFormat {
    /// Positions of N, C, D, H and W in this layout.
    pub const fn ncdhw_positions(&self) -> [usize; 5] {
        match self {
            Self::Ncdhw => [0, 1, 2, 3, 4],
            Self::Ndhwc => [0, 4, 1, 2, 3],
            Self::Dhwcn => [4, 3, 0, 1, 2],
        }
    }

    /// Reorder `dims` into NCDHW; `dims` must hold five entries.
    pub fn to_ncdhw<T: Copy>(&self, dims: &[T]) -> [T; 5] {
        self.ncdhw_positions().map(|pos| dims[pos])
    }
}

/// Physical layout of an activation in device memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StorageFormat {
    /// Blocked `NDC1HWC0`, the layout the cube kernels consume directly.
    #[default]
    Fractal,
    /// Plain `NCDHW`; the kernel fuses a layout transform and needs scratch space.
    Ncdhw,
}

/// How the pads attribute is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Padding {
    /// Use `pads` as given.
    #[default]
    Explicit,
    /// Derive pads so every output position sees a full window.
    Same,
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// Convolution attributes as the host framework reports them.
///
/// `strides` and `dilations` are in `data_format` order; `pads` is always
/// `[head, tail, up, down, left, right]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conv3dAttrs {
    pub strides: Vec<i64>,
    pub pads: Vec<i64>,
    pub dilations: Vec<i64>,
    pub groups: i64,
    pub data_format: DataFormat,
    pub padding: Padding,
    /// Implementation mode bits; bit `0x40` requests HF32 for f32 inputs.
    pub precision_mode: Option<i32>,
}

#[bon]
impl Conv3dAttrs {
    #[builder]
    pub fn builder(
        strides: Vec<i64>,
        #[builder(default = vec![0; 6])] pads: Vec<i64>,
        #[builder(default = vec![1; 5])] dilations: Vec<i64>,
        #[builder(default = 1)] groups: i64,
        #[builder(default)] data_format: DataFormat,
        #[builder(default)] padding: Padding,
        precision_mode: Option<i32>,
    ) -> Self {
        Self { strides, pads, dilations, groups, data_format, padding, precision_mode }
    }
}

/// Padding of the three spatial axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConvPads {
    pub head: u64,
    pub tail: u64,
    pub up: u64,
    pub down: u64,
    pub left: u64,
    pub right: u64,
}

impl ConvPads {
    pub fn to_array(&self) -> [u64; 6] {
        [self.head, self.tail, self.up, self.down, self.left, self.right]
    }
}

/// Spatial and channel attributes after layout resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedAttrs {
    /// D, H, W.
    pub strides: [u64; 3],
    pub dilations: [u64; 3],
    pub pads: ConvPads,
    pub groups: u64,
}

impl ResolvedAttrs {
    /// Check list lengths and resolve positions; pads still need [`Self::apply_same`].
    pub fn resolve(attrs: &Conv3dAttrs) -> Result<Self> {
        check_rank("strides", attrs.strides.len(), 5)?;
        check_rank("pads", attrs.pads.len(), 6)?;
        check_rank("dilations", attrs.dilations.len(), 5)?;

        let [sn, sc, sd, sh, sw] = attrs.data_format.to_ncdhw(&attrs.strides[..]);
        ensure!(
            sn == 1 && sc == 1,
            InvalidAttrSnafu { field: "strides", reason: format!("N and C strides must be 1, got {sn} and {sc}") }
        );
        let [_, _, dd, dh, dw] = attrs.data_format.to_ncdhw(&attrs.dilations[..]);

        let positive = |field: &'static str, v: i64| -> Result<u64> {
            check_range(field, v, 1, i64::from(i32::MAX))?;
            Ok(v as u64)
        };
        let pad = |field: &'static str, v: i64| -> Result<u64> {
            check_range(field, v, 0, i64::from(i32::MAX))?;
            Ok(v as u64)
        };

        Ok(Self {
            strides: [positive("stride_d", sd)?, positive("stride_h", sh)?, positive("stride_w", sw)?],
            dilations: [positive("dilation_d", dd)?, positive("dilation_h", dh)?, positive("dilation_w", dw)?],
            pads: ConvPads {
                head: pad("pad_head", attrs.pads[0])?,
                tail: pad("pad_tail", attrs.pads[1])?,
                up: pad("pad_up", attrs.pads[2])?,
                down: pad("pad_down", attrs.pads[3])?,
                left: pad("pad_left", attrs.pads[4])?,
                right: pad("pad_right", attrs.pads[5])?,
            },
            groups: positive("groups", attrs.groups)?,
        })
    }

    /// A kernel extent of 1 makes its dilation meaningless; force it to 1.
    pub fn normalize_dilation(&mut self, kernel: [u64; 3]) {
        for (dilation, k) in self.dilations.iter_mut().zip(kernel) {
            if k == 1 {
                *dilation = 1;
            }
        }
    }

    /// Replace the pads with the SAME padding of `fmap` (D, H, W).
    pub fn apply_same(&mut self, fmap: [u64; 3], kernel: [u64; 3]) {
        let mut split = [(0, 0); 3];
        for (axis, slot) in split.iter_mut().enumerate() {
            let (stride, k_dil) = (self.strides[axis], dilated(kernel[axis], self.dilations[axis]));
            let tail = fmap[axis] % stride;
            let total = if tail > 0 { k_dil.saturating_sub(tail) } else { k_dil.saturating_sub(stride) };
            *slot = (total / 2, total - total / 2);
        }
        self.pads = ConvPads {
            head: split[0].0,
            tail: split[0].1,
            up: split[1].0,
            down: split[1].1,
            left: split[2].0,
            right: split[2].1,
        };
    }
}

/// Largest extent or product the kernels index with `i32`.
pub(crate) const DIM_MAX: i64 = i32::MAX as i64;
pub(crate) const GROUPS_MAX: i64 = u16::MAX as i64;

pub(crate) fn check_rank(tensor: &'static str, found: usize, expected: usize) -> Result<()> {
    ensure!(found == expected, RankMismatchSnafu { tensor, expected, found });
    Ok(())
}

/// Spatial extent a kernel covers once dilated.
pub const fn dilated(kernel: u64, dilation: u64) -> u64 {
    kernel.saturating_sub(1) * dilation + 1
}

pub(crate) fn check_dim(field: &'static str, value: u64, max: i64) -> Result<()> {
    check_range(field, i64::try_from(value).unwrap_or(i64::MAX), 1, max)
}

/// Groups implied by the channel counts; an attribute of 1 defers to them.
pub(crate) fn resolve_groups(cin: u64, filter_c: u64, attr_groups: u64) -> Result<u64> {
    ensure!(
        filter_c > 0 && cin % filter_c == 0,
        InvalidAttrSnafu { field: "filter", reason: format!("input channels {cin} not a multiple of filter C {filter_c}") }
    );
    let implied = cin / filter_c;
    let groups = if attr_groups == 1 { implied } else { attr_groups };
    ensure!(
        groups == implied,
        InvalidAttrSnafu { field: "groups", reason: format!("{cin} / {filter_c} = {implied} channels per group, groups = {groups}") }
    );
    check_range("groups", groups as i64, 1, GROUPS_MAX)?;
    Ok(groups)
}

/// NCDHW dims of a rank-5 tensor in `format`.
pub(crate) fn ncdhw_of(tensor: &'static str, desc: &TensorDesc, format: DataFormat) -> Result<[u64; 5]> {
    check_rank(tensor, desc.rank(), 5)?;
    Ok(format.to_ncdhw(&desc.shape[..]))
}

/// Channel block size: one 32-byte block worth of elements.
pub const fn channel_block(dtype: ScalarDType) -> u64 {
    32 / dtype.element_bytes() as u64
}

// ============================================================================
// GROUP ENLARGEMENT
// ============================================================================

/// Groups merged so each kernel group fills whole channel blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupEnlarge {
    /// Original groups folded into one kernel group.
    pub multiple: u64,
    /// Kernel groups after folding.
    pub real_g: u64,
    pub cin1_g: u64,
    pub cout1_g: u64,
}

impl GroupEnlarge {
    /// `cin_g`/`cout_g` are per-group channel counts; `c0` the dtype's channel block.
    pub fn new(cin_g: u64, cout_g: u64, groups: u64, c0: u64) -> Result<Self> {
        ensure!(cin_g > 0, ZeroDivisorSnafu { what: "input channels per group" });
        ensure!(cout_g > 0, ZeroDivisorSnafu { what: "output channels per group" });
        let cin_extend = lcm(cin_g, c0) / cin_g;
        let cout_extend = lcm(cout_g, BLOCK_CUBE) / cout_g;
        let multiple = lcm(cin_extend, cout_extend).min(groups).max(1);

        Ok(Self {
            multiple,
            real_g: ceil_div(groups, multiple),
            cin1_g: ceil_div(multiple * cin_g, c0),
            // output channels are blocked by the cube edge; f32 addresses them in half blocks
            cout1_g: ceil_div(multiple * cout_g, BLOCK_CUBE) * (BLOCK_CUBE / c0),
        })
    }
}

// ============================================================================
// NORMALIZED SHAPE
// ============================================================================

/// Everything the backprop searches read about one convolution.
///
/// `out_backprop` is the gradient flowing in (`cout`, `dout`, `ho`, `wo`);
/// the feature map side is `cin`, `di`, `hi`, `wi`. Channel counts with a
/// `1` suffix are in `c0`-element blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conv3dShape {
    pub dtype: ScalarDType,
    pub c0: u64,
    pub batch: u64,

    pub cout: u64,
    pub cout1: u64,
    pub dout: u64,
    pub ho: u64,
    pub wo: u64,

    pub cin: u64,
    pub cin1: u64,
    pub di: u64,
    pub hi: u64,
    pub wi: u64,

    pub kd: u64,
    pub kh: u64,
    pub kw: u64,

    pub stride_d: u64,
    pub stride_h: u64,
    pub stride_w: u64,
    pub pads: ConvPads,
    pub dilation_d: u64,
    pub dilation_h: u64,
    pub dilation_w: u64,

    pub groups: u64,
    pub real_g: u64,
    pub cin1_g: u64,
    pub cout1_g: u64,
    pub hf32: bool,
}

impl Conv3dShape {
    pub fn dtype_bytes(&self) -> u64 {
        self.dtype.element_bytes() as u64
    }

    pub fn kernel_hw(&self) -> u64 {
        self.kh * self.kw
    }

    pub fn kd_dilated(&self) -> u64 {
        dilated(self.kd, self.dilation_d)
    }

    pub fn kh_dilated(&self) -> u64 {
        dilated(self.kh, self.dilation_h)
    }

    pub fn kw_dilated(&self) -> u64 {
        dilated(self.kw, self.dilation_w)
    }

    /// Feature map extents including padding (D, H, W).
    pub fn padded_fmap(&self) -> [u64; 3] {
        [
            self.di + self.pads.head + self.pads.tail,
            self.hi + self.pads.up + self.pads.down,
            self.wi + self.pads.left + self.pads.right,
        ]
    }

    /// `c0Bits`: log2 of the channel block.
    pub fn c0_bits(&self) -> u32 {
        self.c0.trailing_zeros()
    }

    /// Windows (D, H, W) must fit the padded map and reproduce the gradient extents.
    pub(crate) fn check_windows(&self, windows: [u64; 3]) -> Result<()> {
        let padded = self.padded_fmap();
        let strides = [self.stride_d, self.stride_h, self.stride_w];
        let expected = [self.dout, self.ho, self.wo];
        for axis in 0..3 {
            ensure!(
                windows[axis] <= padded[axis],
                InvalidAttrSnafu {
                    field: "filter",
                    reason: format!("dilated kernel {} exceeds padded feature map {}", windows[axis], padded[axis]),
                }
            );
        }
        let inferred: [u64; 3] = std::array::from_fn(|axis| (padded[axis] - windows[axis]) / strides[axis] + 1);
        ensure!(
            inferred == expected,
            InvalidAttrSnafu {
                field: "out_backprop",
                reason: format!("spatial dims {expected:?} differ from {inferred:?} implied by the feature map"),
            }
        );
        Ok(())
    }

    pub(crate) fn apply_groups(&mut self, enlarge: GroupEnlarge) {
        self.real_g = enlarge.real_g;
        if enlarge.real_g == 1 {
            self.cin1_g = self.cin1;
            self.cout1_g = self.cout1;
        } else {
            self.cin1_g = enlarge.cin1_g;
            self.cout1_g = enlarge.cout1_g;
        }
    }
}

/// HF32 is only meaningful for f32 and only when the mode bit is set.
pub(crate) fn hf32_requested(dtype: ScalarDType, precision_mode: Option<i32>) -> bool {
    dtype == ScalarDType::Float32 && matches!(precision_mode, Some(mode) if mode != -1 && mode & 0x40 != 0)
}

/// Reject dtypes the conv kernels are not built for and mixed dtypes.
pub(crate) fn check_conv_dtypes(op: &'static str, tensors: &[&TensorDesc]) -> Result<ScalarDType> {
    let dtype = tensors.first().map_or(ScalarDType::Undefined, |t| t.dtype);
    ensure!(
        matches!(dtype, ScalarDType::Float16 | ScalarDType::BFloat16 | ScalarDType::Float32),
        UnsupportedDTypeSnafu { op, dtype }
    );
    if let Some((index, bad)) = tensors.iter().enumerate().find(|(_, t)| t.dtype != dtype) {
        return DTypeMismatchSnafu { index, expected: dtype, found: bad.dtype }.fail();
    }
    Ok(dtype)
}
