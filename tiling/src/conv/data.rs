//! Tiling blobs read by the conv backprop kernels.
//!
//! Both blobs are a launch-parameter header followed by the kernel's tiling
//! struct. Narrow fields are written as `u32`; counts that can exceed it stay
//! `u64` at the tail, where the kernel declares them.

use super::BLOCK_CUBE;
use super::plan::{ConvBlockPlan, ConvDimPlan};
use super::shape::{ConvPads, Conv3dShape};
use crate::output::{TilingData, TilingWriter};

/// Blob of the input-gradient kernel, 312 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DxTilingData {
    pub shape: Conv3dShape,
    pub dims: ConvDimPlan,
    pub block: ConvBlockPlan,
    /// Pads of the equivalent forward convolution over the gradient; `head` is unused.
    pub backprop_pads: ConvPads,
    /// The kernel must zero its output before accumulating.
    pub init_output: bool,
}

impl TilingData for DxTilingData {
    fn write(&self, w: &mut TilingWriter) {
        let (s, d, b) = (&self.shape, &self.dims, &self.block);

        // launch parameters
        for v in [d.batch_dim, d.group_dim, d.m_dim, d.k_dim, d.n_dim, d.d_dim] {
            w.field(v as u32);
        }
        w.field(d.core_num);

        let narrow = [
            s.batch,
            s.cin,
            s.cout,
            s.cout1,
            s.cin1,
            s.cout1_g,
            s.cin1_g,
            s.c0,
            u64::from(s.c0_bits()),
            s.dout,
            s.ho,
            s.wo,
            s.di,
            s.hi,
            s.wi,
            s.kd,
            s.kh,
            s.kw,
            s.real_g,
            s.stride_d,
            s.stride_h,
            s.stride_w,
            s.pads.head,
            s.pads.tail,
            s.pads.up,
            s.pads.down,
            s.pads.left,
            s.pads.right,
            self.backprop_pads.tail,
            self.backprop_pads.up,
            self.backprop_pads.down,
            self.backprop_pads.left,
            self.backprop_pads.right,
            s.dilation_d,
            s.dilation_h,
            s.dilation_w,
            b.al0,
            b.bl0,
            b.cl0,
            b.al1,
            b.bl1,
            d.single_core_group,
            d.single_core_cout,
            d.single_core_cout1,
            d.single_core_cin1,
            d.single_core_din,
            d.single_core_ho,
            b.base_m,
            b.base_k,
            b.base_n,
            b.base_d,
            b.base_batch,
            b.base_group,
            b.step_m,
            b.step_n,
            b.step_ka,
            b.step_kb,
            b.step_batch,
            b.step_group,
            b.iterate_order,
        ];
        for v in narrow {
            w.field(v as u32);
        }
        w.field(i32::from(s.hf32)).field(i32::from(self.init_output)).field(0i32);
        w.field(d.single_core_batch).field(d.single_core_m).field(d.single_core_cin);
    }
}

/// Blob of the filter-gradient kernel, 272 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DwTilingData {
    pub shape: Conv3dShape,
    pub dims: ConvDimPlan,
    pub block: ConvBlockPlan,
    /// L1 bytes the kernel may use.
    pub total_l1_bytes: u64,
}

impl TilingData for DwTilingData {
    fn write(&self, w: &mut TilingWriter) {
        let (s, d, b) = (&self.shape, &self.dims, &self.block);

        w.field(d.batch_dim);
        for v in [d.group_dim, d.m_dim, d.k_dim, d.n_dim, d.dk_dim, self.total_l1_bytes] {
            w.field(v as u32);
        }

        let narrow = [
            s.batch,
            s.cin,
            s.cout,
            s.cin1_g,
            s.cout1_g,
            s.dout,
            s.ho,
            s.wo,
            s.di,
            s.hi,
            s.wi,
            s.kd,
            s.kh,
            s.kw,
            s.real_g,
            s.stride_d,
            s.stride_h,
            s.stride_w,
            s.pads.head,
            s.pads.tail,
            s.pads.up,
            s.pads.down,
            s.pads.left,
            s.pads.right,
            s.dilation_d,
            s.dilation_h,
            s.dilation_w,
            s.c0,
            b.al0,
            b.bl0,
            b.cl0,
            b.al1,
            b.bl1,
            b.base_m,
            b.base_k,
            b.base_n,
            BLOCK_CUBE,
            s.c0,
            BLOCK_CUBE,
            b.step_m,
            b.step_n,
            b.step_ka,
            b.step_kb,
            b.iterate_order,
            b.bl1_bound,
            u64::from(s.hf32),
            d.single_core_dk,
            d.single_core_group,
            d.single_core_cout,
            d.single_core_ho,
        ];
        for v in narrow {
            w.field(v as u32);
        }
        w.field(d.single_core_batch).field(d.single_core_cin);

        // basic-block section, unused by these kernels
        w.array(&[0u32; 5]);
    }
}
