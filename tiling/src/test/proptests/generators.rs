use proptest::prelude::*;
use strum::IntoEnumIterator;
use tessel_dtype::ScalarDType;
use tessel_platform::PlatformBudget;

use crate::conv::*;
use crate::foreach::ForeachOp;
use crate::*;

/// Ragged list lengths; zero-length tensors are common on purpose.
pub fn lengths_generator() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(prop_oneof![1 => Just(0u64), 4 => 1u64..5_000], 1..=50)
}

#[rustfmt::skip]
pub fn epb_generator() -> impl Strategy<Value = u64> {
    prop_oneof![Just(4u64), Just(8), Just(16), Just(32)]
}

#[rustfmt::skip]
pub fn half_dtype() -> impl Strategy<Value = ScalarDType> {
    prop_oneof![Just(ScalarDType::Float16), Just(ScalarDType::BFloat16)]
}

#[rustfmt::skip]
pub fn conv_dtype() -> impl Strategy<Value = ScalarDType> {
    prop_oneof![Just(ScalarDType::Float16), Just(ScalarDType::BFloat16), Just(ScalarDType::Float32)]
}

pub fn op_generator() -> impl Strategy<Value = ForeachOp> {
    prop::sample::select(ForeachOp::iter().collect::<Vec<_>>())
}

/// An operator together with a dtype its kernel is compiled for.
pub fn op_dtype_generator() -> impl Strategy<Value = (ForeachOp, ScalarDType)> {
    let pairs: Vec<(ForeachOp, ScalarDType)> = ForeachOp::iter()
        .flat_map(|op| op.supported_dtypes().iter().map(move |dtype| (op, dtype)))
        .collect();
    prop::sample::select(pairs)
}

/// A valid filter-gradient problem with unit dilation and no padding.
pub fn dw_args_generator() -> impl Strategy<Value = Conv3dBackpropFilterArgs> {
    let channels = || prop_oneof![Just(16u64), Just(32), Just(64)];
    (conv_dtype(), 1u64..=4, 1u64..=8, 1u64..=32, channels(), channels(), 1u64..=3, 1i64..=2).prop_map(
        |(dtype, batch, dout, ho, cout, cin, k, stride)| {
            let extent = |out: u64| (out - 1) * stride as u64 + k;
            Conv3dBackpropFilterArgs {
                x: TensorDesc::new(dtype, [batch, extent(dout), extent(ho), extent(ho), cin]),
                x_storage: StorageFormat::Fractal,
                filter_size: TensorDesc::new(ScalarDType::Int32, [cout, cin, k, k, k]),
                filter_format: DataFormat::Ncdhw,
                out_backprop: TensorDesc::new(dtype, [batch, dout, ho, ho, cout]),
                attrs: Conv3dAttrs::builder().strides(vec![1, stride, stride, stride, 1]).build(),
            }
        },
    )
}

/// Input-gradient problem with a unit depth stride and an `ho x wo` gradient.
fn dx_args(
    dtype: ScalarDType,
    batch: u64,
    dout: u64,
    (ho, wo): (u64, u64),
    (cout, cin): (u64, u64),
    k: u64,
    stride: i64,
) -> Conv3dBackpropInputArgs {
    let extent = |out: u64| (out - 1) * stride as u64 + k;
    Conv3dBackpropInputArgs {
        filter: TensorDesc::new(dtype, [cout, cin, k, k, k]),
        filter_format: DataFormat::Ncdhw,
        out_backprop: TensorDesc::new(dtype, [batch, dout, ho, wo, cout]),
        y: TensorDesc::new(dtype, [batch, dout - 1 + k, extent(ho), extent(wo), cin]),
        y_storage: StorageFormat::Fractal,
        attrs: Conv3dAttrs::builder().strides(vec![1, 1, stride, stride, 1]).build(),
        transpose: None,
    }
}

/// A valid 16-bit input-gradient problem small enough for any L1 plan.
pub fn dx_args_generator() -> impl Strategy<Value = Conv3dBackpropInputArgs> {
    let channels = || prop_oneof![Just(16u64), Just(32)];
    (half_dtype(), 1u64..=2, 1u64..=8, 1u64..=32, channels(), channels(), 1u64..=3, 1i64..=2).prop_map(
        |(dtype, batch, dout, ho, cout, cin, k, stride)| dx_args(dtype, batch, dout, (ho, ho), (cout, cin), k, stride),
    )
}

/// Input-gradient problems a few rows high whose rows may not fit L1 at all.
pub fn wide_dx_args_generator() -> impl Strategy<Value = Conv3dBackpropInputArgs> {
    (conv_dtype(), 1u64..=2, 1u64..=4, 1_000u64..=60_000, 1u64..=3, 1i64..=2).prop_map(
        |(dtype, dout, ho, wo, k, stride)| dx_args(dtype, 1, dout, (ho, wo), (16, 16), k, stride),
    )
}

pub fn budget_generator() -> impl Strategy<Value = PlatformBudget> {
    (1u32..=32).prop_map(|cube_cores| PlatformBudget::builder().cube_cores(cube_cores).build())
}

pub fn strategy_generator() -> impl Strategy<Value = TilingConfig> {
    prop_oneof![Just(ConvStrategy::Heuristic), Just(ConvStrategy::FallbackOnly)]
        .prop_map(|conv_strategy| TilingConfig::builder().conv_strategy(conv_strategy).use_knowledge(false).build())
}
