use tessel_dtype::ScalarDType;
use tessel_platform::{PlatformBudget, Soc};
use test_case::test_case;

use crate::conv::shape::GroupEnlarge;
use crate::conv::*;
use crate::*;

fn u64_at(data: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(data[offset..offset + 8].try_into().unwrap())
}

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}

/// Both blobs start their `u32` field list at byte 32.
fn narrow(data: &[u8], index: usize) -> u32 {
    u32_at(data, 32 + 4 * index)
}

fn no_knowledge() -> TilingConfig {
    TilingConfig::builder().use_knowledge(false).build()
}

// ============================================================================
// INPUT GRADIENT
// ============================================================================

/// bf16, 3x3x3 kernel, unit strides and pads of 1 on a 16x128x128 map.
fn dx_args() -> Conv3dBackpropInputArgs {
    Conv3dBackpropInputArgs {
        filter: TensorDesc::new(ScalarDType::BFloat16, [16, 16, 3, 3, 3]),
        filter_format: DataFormat::Ncdhw,
        out_backprop: TensorDesc::new(ScalarDType::BFloat16, [1, 16, 128, 128, 16]),
        y: TensorDesc::new(ScalarDType::BFloat16, [1, 16, 128, 128, 16]),
        y_storage: StorageFormat::Fractal,
        attrs: Conv3dAttrs::builder().strides(vec![1; 5]).pads(vec![1; 6]).build(),
        transpose: None,
    }
}

#[test]
fn dx_blob_layout() {
    let out = conv3d_backprop_input(&dx_args(), &PlatformBudget::ascend910b3(), &TilingConfig::default()).unwrap();
    assert_eq!(out.data.len(), 312);
    assert!(out.tiling_key < 10);
    assert_eq!(out.workspace_bytes.as_slice(), &[WORKSPACE_BYTES]);
    assert!(out.block_dim >= 1 && out.block_dim <= 20);
    assert_eq!(u64_at(&out.data, 24), u64::from(out.block_dim));

    let (al1, bl1) = (narrow(&out.data, 39), narrow(&out.data, 40));
    assert!(matches!(al1, 1 | 2) && matches!(bl1, 1 | 2));
    assert!(narrow(&out.data, 55) > 0 && narrow(&out.data, 56) > 0);
}

#[test]
fn dx_fallback_only_splits_depth() {
    let config = TilingConfig::builder().conv_strategy(ConvStrategy::FallbackOnly).use_knowledge(false).build();
    let out = conv3d_backprop_input(&dx_args(), &PlatformBudget::ascend910b3(), &config).unwrap();
    assert_eq!(out.block_dim, 16);
    // batch, group, m, k, n, d
    let dims: Vec<u32> = (0..6).map(|i| u32_at(&out.data, 4 * i)).collect();
    assert_eq!(dims, vec![1, 1, 1, 1, 1, 16]);
    assert_eq!(u64_at(&out.data, 288), 1);
}

#[test]
fn dx_ncdhw_output_needs_l0c_scratch() {
    let budget = PlatformBudget::ascend910b3();
    let args = Conv3dBackpropInputArgs { y_storage: StorageFormat::Ncdhw, ..dx_args() };
    let out = conv3d_backprop_input(&args, &budget, &no_knowledge()).unwrap();
    assert_eq!(out.workspace_bytes[0], WORKSPACE_BYTES + (20 * budget.l0c_bytes) as usize);
}

#[test]
fn transpose_infers_an_open_output_shape() {
    let budget = PlatformBudget::ascend910b3();
    let config = no_knowledge();
    let plain = conv3d_backprop_input(&dx_args(), &budget, &config).unwrap();

    let args = Conv3dBackpropInputArgs {
        y: TensorDesc::new(ScalarDType::BFloat16, [0; 5]),
        transpose: Some(TransposeArgs::default()),
        ..dx_args()
    };
    let transposed = conv3d_backprop_input(&args, &budget, &config).unwrap();
    assert_eq!(transposed, plain);
}

#[test]
fn transpose_output_padding_forces_init() {
    let args = Conv3dBackpropInputArgs {
        out_backprop: TensorDesc::new(ScalarDType::BFloat16, [1, 8, 64, 64, 16]),
        y: TensorDesc::new(ScalarDType::BFloat16, [0; 5]),
        attrs: Conv3dAttrs::builder().strides(vec![1, 2, 2, 2, 1]).pads(vec![1; 6]).build(),
        transpose: Some(TransposeArgs { output_padding: vec![0, 1, 1, 1, 0], ..TransposeArgs::default() }),
        ..dx_args()
    };
    let out = conv3d_backprop_input(&args, &PlatformBudget::ascend910b3(), &no_knowledge()).unwrap();
    // y = 2 * (out - 1) + 3 + 1 - 2
    assert_eq!(narrow(&out.data, 12), 16);
    assert_eq!(narrow(&out.data, 13), 128);
    // init_output
    assert_eq!(u32_at(&out.data, 276), 1);
}

fn dx_error(modify: impl FnOnce(&mut Conv3dBackpropInputArgs)) -> Error {
    let mut args = dx_args();
    modify(&mut args);
    conv3d_backprop_input(&args, &PlatformBudget::ascend910b3(), &no_knowledge()).unwrap_err()
}

#[test]
fn dx_rejects_out_of_range_attributes() {
    let err = dx_error(|a| a.attrs.strides = vec![1, 1, 64, 1, 1]);
    assert!(matches!(err, Error::AttrOutOfRange { field: "stride_h", max: 63, .. }));

    let err = dx_error(|a| a.attrs.pads = vec![1, 1, 3, 1, 1, 1]);
    assert!(matches!(err, Error::AttrOutOfRange { field: "pad_up", value: 3, max: 2, .. }));

    let err = dx_error(|a| a.attrs.groups = 2);
    assert!(matches!(err, Error::InvalidAttr { field: "groups", .. }));

    let err = dx_error(|a| a.out_backprop = TensorDesc::new(ScalarDType::BFloat16, [1, 16, 100, 128, 16]));
    assert!(matches!(err, Error::InvalidAttr { field: "out_backprop", .. }));
}

#[test]
fn dx_rejects_bad_operands() {
    let err = dx_error(|a| a.filter = TensorDesc::new(ScalarDType::BFloat16, [16, 16, 3, 3]));
    assert!(matches!(err, Error::RankMismatch { tensor: "filter", expected: 5, found: 4 }));

    let err = dx_error(|a| a.y.dtype = ScalarDType::Float16);
    assert!(matches!(err, Error::DTypeMismatch { index: 2, .. }));

    let err = dx_error(|a| {
        for t in [&mut a.filter, &mut a.out_backprop, &mut a.y] {
            t.dtype = ScalarDType::Float64;
        }
    });
    assert!(matches!(err, Error::UnsupportedDType { dtype: ScalarDType::Float64, .. }));
}

#[test_case(TransposeArgs { offset_x: 1, ..TransposeArgs::default() }, "offset_x"; "offset x")]
#[test_case(TransposeArgs { output_padding: vec![0, 1, 0, 0, 0], ..TransposeArgs::default() }, "output_padding_d"; "output padding at stride 1")]
fn transpose_rejects_out_of_range(transpose: TransposeArgs, field: &str) {
    let err = dx_error(|a| a.transpose = Some(transpose));
    assert!(matches!(err, Error::AttrOutOfRange { field: f, .. } if f == field));
}

#[test]
fn transpose_rejects_unsupported_operands() {
    let err = dx_error(|a| a.transpose = Some(TransposeArgs { has_bias: true, ..TransposeArgs::default() }));
    assert!(matches!(err, Error::InvalidAttr { field: "bias", .. }));

    let err = dx_error(|a| a.transpose = Some(TransposeArgs { output_padding: vec![0; 4], ..TransposeArgs::default() }));
    assert!(matches!(err, Error::RankMismatch { tensor: "output_padding", .. }));
}

#[test]
fn invalid_budget_is_a_platform_error() {
    let budget = PlatformBudget::builder().cube_cores(0).build();
    let err = conv3d_backprop_input(&dx_args(), &budget, &TilingConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Platform { .. }));
}

/// A search that answers with an unusable M split.
struct ZeroM;

impl GeneralSearch for ZeroM {
    fn backprop_input(&self, shape: &Conv3dShape, budget: &PlatformBudget) -> CacheTiling {
        CacheTiling { m_dim: 0, ..DefaultSearch.backprop_input(shape, budget) }
    }

    fn backprop_filter(&self, shape: &Conv3dShape, budget: &PlatformBudget, deterministic: bool) -> CacheTiling {
        DefaultSearch.backprop_filter(shape, budget, deterministic)
    }
}

#[test]
fn bad_search_answer_is_rejected() {
    let config = TilingConfig::builder().conv_strategy(ConvStrategy::FallbackOnly).use_knowledge(false).build();
    let err = conv3d_backprop_input_with(&dx_args(), &PlatformBudget::ascend910b3(), &config, &ZeroM).unwrap_err();
    assert!(matches!(err, Error::InvalidAttr { field: "cache tiling", .. }));
}

fn l1_budget() -> usize {
    (PlatformBudget::ascend910b3().l1_bytes - L1_RESERVED_BYTES) as usize
}

/// bf16 unit kernel over a single gradient row `wo` pixels wide.
fn single_row_args(rows: u64, wo: u64) -> Conv3dBackpropInputArgs {
    Conv3dBackpropInputArgs {
        filter: TensorDesc::new(ScalarDType::BFloat16, [16, 16, 1, 1, 1]),
        filter_format: DataFormat::Ncdhw,
        out_backprop: TensorDesc::new(ScalarDType::BFloat16, [1, 1, rows, wo, 16]),
        y: TensorDesc::new(ScalarDType::BFloat16, [1, 1, rows, wo, 16]),
        y_storage: StorageFormat::Fractal,
        attrs: Conv3dAttrs::builder().strides(vec![1; 5]).build(),
        transpose: None,
    }
}

#[test_case(ConvStrategy::Heuristic; "heuristic")]
#[test_case(ConvStrategy::FallbackOnly; "fallback only")]
fn row_wider_than_l1_is_rejected(strategy: ConvStrategy) {
    let config = TilingConfig::builder().conv_strategy(strategy).use_knowledge(false).build();
    let args = single_row_args(1, 200_000);
    let err = conv3d_backprop_input(&args, &PlatformBudget::ascend910b3(), &config).unwrap_err();
    match err {
        Error::CapacityExceeded { what, count, max } => {
            assert_eq!(what, "L1 byte");
            assert_eq!(max, l1_budget());
            // one gradient row of 16 bf16 channels plus one 16x16 filter block
            assert_eq!(count, 200_000 * 16 * 2 + 16 * 16 * 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// A search that ignores L1 and answers with the deepest double-buffered blocks.
struct Greedy;

impl GeneralSearch for Greedy {
    fn backprop_input(&self, shape: &Conv3dShape, budget: &PlatformBudget) -> CacheTiling {
        CacheTiling { m_l0: 8, db_al1: 2, db_bl1: 2, ..DefaultSearch.backprop_input(shape, budget) }
    }

    fn backprop_filter(&self, shape: &Conv3dShape, budget: &PlatformBudget, deterministic: bool) -> CacheTiling {
        CacheTiling { k_al1: 4096, k_bl1: 4096, ..DefaultSearch.backprop_filter(shape, budget, deterministic) }
    }
}

#[test]
fn dx_search_block_shrinks_into_l1() {
    let config = TilingConfig::builder().conv_strategy(ConvStrategy::FallbackOnly).use_knowledge(false).build();
    let args = single_row_args(4, 12_000);
    let out = conv3d_backprop_input_with(&args, &PlatformBudget::ascend910b3(), &config, &Greedy).unwrap();
    // single A buffer first, then base_m halves until a block reads one row
    assert_eq!(narrow(&out.data, 39), 1);
    assert_eq!(narrow(&out.data, 47), 32);
    assert_eq!(narrow(&out.data, 40), 2);
}

#[test]
fn dw_search_block_over_l1_is_rejected() {
    let config = TilingConfig::builder().conv_strategy(ConvStrategy::FallbackOnly).use_knowledge(false).build();
    let err = conv3d_backprop_filter_with(&dw_args(), &PlatformBudget::ascend910b3(), &config, &Greedy).unwrap_err();
    assert!(matches!(err, Error::CapacityExceeded { what: "L1 byte", .. }), "{err}");
}

/// 256 channels, 4x4x4 kernel with stride 2 and pads 3 on a 120x128x128 map.
fn kernel_split_args() -> Conv3dBackpropInputArgs {
    Conv3dBackpropInputArgs {
        filter: TensorDesc::new(ScalarDType::BFloat16, [256, 256, 4, 4, 4]),
        filter_format: DataFormat::Ncdhw,
        out_backprop: TensorDesc::new(ScalarDType::BFloat16, [1, 62, 66, 66, 256]),
        y: TensorDesc::new(ScalarDType::BFloat16, [1, 120, 128, 128, 256]),
        y_storage: StorageFormat::Fractal,
        attrs: Conv3dAttrs::builder().strides(vec![1, 2, 2, 2, 1]).pads(vec![3; 6]).build(),
        transpose: None,
    }
}

#[test_case(Soc::Ascend910B3; "20 cores")]
#[test_case(Soc::Ascend910B2; "24 cores")]
fn kernel_split_shape_selects_its_kernel(soc: Soc) {
    let out = conv3d_backprop_input(&kernel_split_args(), &PlatformBudget::for_soc(soc), &TilingConfig::default())
        .unwrap();
    assert_eq!(out.tiling_key / 10, 1);
}

#[test]
fn kernel_split_needs_a_known_core_count() {
    let budget = PlatformBudget::builder().cube_cores(16).build();
    let out = conv3d_backprop_input(&kernel_split_args(), &budget, &TilingConfig::default()).unwrap();
    assert!(out.tiling_key < 10);
}

// ============================================================================
// FILTER GRADIENT
// ============================================================================

/// bf16, 128 to 128 channels, 3x3x3 kernel over a 16x22x66x66 map.
fn dw_args() -> Conv3dBackpropFilterArgs {
    Conv3dBackpropFilterArgs {
        x: TensorDesc::new(ScalarDType::BFloat16, [16, 22, 66, 66, 128]),
        x_storage: StorageFormat::Fractal,
        filter_size: TensorDesc::new(ScalarDType::Int32, [128, 128, 3, 3, 3]),
        filter_format: DataFormat::Ncdhw,
        out_backprop: TensorDesc::new(ScalarDType::BFloat16, [16, 20, 64, 64, 128]),
        attrs: Conv3dAttrs::builder().strides(vec![1; 5]).build(),
    }
}

#[test]
fn dw_fast_path_blob() {
    let out = conv3d_backprop_filter(&dw_args(), &PlatformBudget::ascend910b3(), &no_knowledge()).unwrap();
    assert_eq!(out.tiling_key, 0);
    assert_eq!(out.block_dim, 20);
    assert_eq!(out.data.len(), 272);
    assert_eq!(out.workspace_bytes.as_slice(), &[WORKSPACE_BYTES]);

    assert_eq!(u64_at(&out.data, 0), 20);
    // group, m, k, n and dk stay unsplit
    for offset in [8, 12, 16, 20, 24] {
        assert_eq!(u32_at(&out.data, offset), 1);
    }
    assert_eq!(u32_at(&out.data, 28), 524_288);

    assert_eq!((narrow(&out.data, 33), narrow(&out.data, 34), narrow(&out.data, 35)), (128, 64, 256));
    assert_eq!((narrow(&out.data, 41), narrow(&out.data, 42)), (8, 8));
    assert_eq!(narrow(&out.data, 44), 42_240);
    assert_eq!(u64_at(&out.data, 240), 384);
}

#[test]
fn dw_ncdhw_input_adds_transdata_scratch() {
    let args = Conv3dBackpropFilterArgs { x_storage: StorageFormat::Ncdhw, ..dw_args() };
    let out = conv3d_backprop_filter(&args, &PlatformBudget::ascend910b3(), &no_knowledge()).unwrap();
    assert_eq!(out.workspace_bytes[0], 150_593_536);
}

#[test]
fn dw_knowledge_hit() {
    let out = conv3d_backprop_filter(&dw_args(), &PlatformBudget::ascend910b3(), &TilingConfig::default()).unwrap();
    assert_eq!(out.block_dim, 20);
    assert_eq!((narrow(&out.data, 41), narrow(&out.data, 42)), (4, 4));
    assert_eq!(narrow(&out.data, 44), 131_072);
}

#[test]
fn dw_deterministic_skips_the_fast_path() {
    let config = TilingConfig::builder().deterministic(true).build();
    let out = conv3d_backprop_filter(&dw_args(), &PlatformBudget::ascend910b3(), &config).unwrap();
    assert_eq!(out.block_dim, 16);
    assert_eq!((narrow(&out.data, 33), narrow(&out.data, 35)), (128, 128));
    // partial sums for every core, double buffered
    assert_eq!(out.workspace_bytes[0], 18_874_368);
}

fn dw_error(modify: impl FnOnce(&mut Conv3dBackpropFilterArgs)) -> Error {
    let mut args = dw_args();
    modify(&mut args);
    conv3d_backprop_filter(&args, &PlatformBudget::ascend910b3(), &no_knowledge()).unwrap_err()
}

#[test]
fn dw_rejects_bad_operands() {
    let err = dw_error(|a| a.attrs.dilations = vec![1, 256, 1, 1, 1]);
    assert!(matches!(err, Error::AttrOutOfRange { field: "dilation_d", max: 255, .. }));

    let err = dw_error(|a| a.attrs.pads = vec![0, 0, 3, 0, 0, 0]);
    assert!(matches!(err, Error::AttrOutOfRange { field: "pad_up", .. }));

    let err = dw_error(|a| a.out_backprop.dtype = ScalarDType::Float16);
    assert!(matches!(err, Error::DTypeMismatch { index: 1, .. }));

    let err = dw_error(|a| a.filter_size = TensorDesc::new(ScalarDType::Int32, [64, 128, 3, 3, 3]));
    assert!(matches!(err, Error::InvalidAttr { field: "filter_size", .. }));
}

// ============================================================================
// SHAPES
// ============================================================================

#[test_case(4, 4, 8, 16 => (4, 2, 1, 1); "half precision")]
#[test_case(4, 4, 8, 8 => (4, 2, 2, 2); "single precision")]
#[test_case(16, 16, 4, 16 => (1, 4, 1, 1); "already block aligned")]
fn group_enlarge(cin_g: u64, cout_g: u64, groups: u64, c0: u64) -> (u64, u64, u64, u64) {
    let e = GroupEnlarge::new(cin_g, cout_g, groups, c0).unwrap();
    (e.multiple, e.real_g, e.cin1_g, e.cout1_g)
}

#[test]
fn group_enlarge_rejects_empty_groups() {
    assert!(matches!(GroupEnlarge::new(0, 4, 2, 16), Err(Error::ZeroDivisor { .. })));
}

#[test]
fn same_padding_splits_the_remainder_towards_the_tail() {
    let args = Conv3dBackpropFilterArgs {
        x: TensorDesc::new(ScalarDType::BFloat16, [1, 8, 9, 9, 16]),
        out_backprop: TensorDesc::new(ScalarDType::BFloat16, [1, 4, 5, 5, 16]),
        filter_size: TensorDesc::new(ScalarDType::Int32, [16, 16, 3, 3, 3]),
        attrs: Conv3dAttrs::builder().strides(vec![1, 2, 2, 2, 1]).padding(Padding::Same).build(),
        ..dw_args()
    };
    let out = conv3d_backprop_filter(&args, &PlatformBudget::builder().cube_cores(8).build(), &no_knowledge())
        .unwrap();
    // head, tail, up, down, left, right
    let pads: Vec<u32> = (18..24).map(|i| narrow(&out.data, i)).collect();
    assert_eq!(pads, vec![0, 1, 1, 1, 1, 1]);
}
