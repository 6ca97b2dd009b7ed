use tessel_dtype::ScalarDType;
use tessel_platform::PlatformBudget;
use test_case::test_case;

use crate::foreach::*;
use crate::*;

fn list(dtype: ScalarDType, lengths: &[u64]) -> Vec<TensorDesc> {
    lengths.iter().map(|&len| TensorDesc::flat(dtype, len)).collect()
}

fn range(start: (usize, i64), end: (usize, i64)) -> RangeAssignment {
    RangeAssignment { start_tensor: start.0, start_offset: start.1, end_tensor: end.0, end_offset: end.1 }
}

fn u64_at(data: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(data[offset..offset + 8].try_into().unwrap())
}

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}

fn four_cores() -> PlatformBudget {
    PlatformBudget::builder().vector_cores(4).build()
}

// ============================================================================
// PARTITION
// ============================================================================

#[test]
fn ragged_f32_list_over_four_cores() {
    let part = partition(&[100, 250, 37], 8, 4).unwrap();
    assert_eq!(part.needed_cores, 4);
    assert_eq!(part.total_blocks, 50);
    assert_eq!(
        part.ranges,
        vec![
            range((0, 0), (0, 99)),
            range((1, 0), (1, 103)),
            range((1, 104), (1, 199)),
            range((1, 200), (2, 36)),
        ]
    );
    assert_eq!((0..4).map(|core| part.quota_blocks(core)).collect::<Vec<_>>(), vec![13, 13, 12, 12]);
    assert!(!part.has_empty_tensor);
}

#[test]
fn all_empty_list_keeps_one_core() {
    let part = partition(&[0, 0, 0], 16, 40).unwrap();
    assert_eq!(part.needed_cores, 1);
    assert_eq!(part.total_blocks, 1);
    assert_eq!(part.ranges, vec![range((0, 0), (2, -1))]);
    assert!(part.has_empty_tensor);
}

#[test]
fn fewer_blocks_than_cores() {
    let part = partition(&[8, 8], 8, 40).unwrap();
    assert_eq!(part.needed_cores, 2);
    assert_eq!(part.ranges, vec![range((0, 0), (0, 7)), range((1, 0), (1, 7))]);
}

#[test]
fn empty_tensor_in_the_middle_is_skipped() {
    let part = partition(&[16, 0, 16], 8, 2).unwrap();
    assert_eq!(part.ranges, vec![range((0, 0), (0, 15)), range((1, 0), (2, 15))]);
    assert!(part.has_empty_tensor);
}

#[test_case(&[], 8, 4; "empty list")]
#[test_case(&[10], 0, 4; "zero block")]
#[test_case(&[10], 8, 0; "zero cores")]
fn partition_rejects_bad_input(lengths: &[u64], epb: u64, cores: u32) {
    assert!(matches!(partition(lengths, epb, cores), Err(Error::EmptyInputList { .. } | Error::ZeroDivisor { .. })));
}

#[test]
fn middle_lists_count_partials_per_tensor() {
    let lengths = [100, 250, 37];
    let part = partition(&lengths, 8, 4).unwrap();
    let lists = PartitionLists::new(&lengths, &part).unwrap();
    let middle = MiddleLists::new(lengths.len(), &lists, part.ranges.len());

    assert_eq!(middle.tensor_middle_count[..3], [1, 3, 1]);
    assert_eq!(middle.tensor_middle_start[..3], [0, 1, 4]);
    assert_eq!(middle.core_middle_offset[..4], [0, 1, 2, 3]);
}

// ============================================================================
// UB DIVIDER
// ============================================================================

#[test_case(ForeachOp::Sqrt, ScalarDType::Float32, 98_304; "sqrt f32")]
#[test_case(ForeachOp::Sqrt, ScalarDType::BFloat16, 9_792; "sqrt bf16 casts and aligns to 64")]
#[test_case(ForeachOp::Copy, ScalarDType::BFloat16, 19_648; "copy stays on 32-byte blocks")]
#[test_case(ForeachOp::Neg, ScalarDType::Float16, 98_272; "neg subtracts after the split")]
#[test_case(ForeachOp::Log2, ScalarDType::Float16, 90_112; "log2 f16 scratch")]
#[test_case(ForeachOp::Erf, ScalarDType::Float16, 5_440; "erf f16")]
#[test_case(ForeachOp::LerpList, ScalarDType::Float32, 17_664; "lerp list floors to repeats")]
#[test_case(ForeachOp::RoundOffNumber, ScalarDType::Float32, 95_296; "round off scales per repeat")]
fn ub_table(op: ForeachOp, dtype: ScalarDType, expected: u64) {
    let division = op.division(dtype).unwrap();
    let tile = max_tile(196_608, 0, dtype, &division).unwrap();
    assert_eq!(tile.bytes, expected);
    assert_eq!(tile.elements, expected / dtype.element_bytes() as u64);
}

#[test]
fn narrow_bf16_override() {
    let division = ForeachOp::Sqrt.division(ScalarDType::BFloat16).unwrap().narrow_bf16();
    assert_eq!(max_tile(196_608, 0, ScalarDType::BFloat16, &division).unwrap().bytes, 9_824);
}

#[test]
fn reserve_larger_than_ub() {
    let division = ForeachOp::Exp.division(ScalarDType::Float32).unwrap();
    assert!(matches!(
        max_tile(1_000, 0, ScalarDType::Float32, &division),
        Err(Error::ReservedExceedsBudget { ub_bytes: 1_000, reserved_bytes: 1_024 })
    ));
}

#[test]
fn zero_divisor_is_rejected() {
    assert!(matches!(
        max_tile(1_000, 0, ScalarDType::Float32, &UbDivision::new(0)),
        Err(Error::ZeroDivisor { .. })
    ));
}

#[test_case("add_list", ForeachOp::AddList)]
#[test_case("pow_scalar_and_tensor", ForeachOp::PowScalarAndTensor)]
#[test_case("norm", ForeachOp::Norm)]
fn op_names_parse(name: &str, op: ForeachOp) {
    assert_eq!(name.parse::<ForeachOp>().unwrap(), op);
    assert_eq!(op.to_string(), name);
}

// ============================================================================
// DRIVERS
// ============================================================================

#[test]
fn common_v1_blob() {
    let tensors = list(ScalarDType::Float32, &[100, 250, 37]);
    let out = foreach_common_v1(ForeachOp::AddList, &[tensors.clone(), tensors], &four_cores(), &TilingConfig::default())
        .unwrap();

    assert_eq!(out.tiling_key, 2);
    assert_eq!(out.block_dim, 4);
    assert_eq!(out.workspace_bytes.as_slice(), &[COMMON_WORKSPACE_BYTES]);
    assert_eq!(out.data.len(), 1_408);
    assert_eq!(u64_at(&out.data, 0), 32_512);
    // tensor_data_count follows the tile size
    assert_eq!(u64_at(&out.data, 8), 100);
    assert_eq!(u64_at(&out.data, 16), 250);
}

#[test]
fn common_v2_blob() {
    let tensors = list(ScalarDType::Float32, &[100, 250, 37]);
    let out = foreach_common_v2(ForeachOp::AddList, &[tensors], &four_cores(), &TilingConfig::default()).unwrap();

    assert_eq!(out.block_dim, 4);
    assert_eq!(out.data.len(), 16);
    assert_eq!(u64_at(&out.data, 0), 32_736);
    assert_eq!(u32_at(&out.data, 8), 4);
}

#[test]
fn v1_caps_the_tensor_count() {
    let tensors = list(ScalarDType::Float16, &[32; MAX_TENSOR_COUNT + 1]);
    let err = foreach_common_v1(ForeachOp::Abs, &[tensors.clone()], &four_cores(), &TilingConfig::default())
        .unwrap_err();
    assert!(matches!(err, Error::CapacityExceeded { what: "tensor", count: 51, max: 50 }));

    // V2 has no per-tensor slots
    assert!(foreach_common_v2(ForeachOp::Abs, &[tensors], &four_cores(), &TilingConfig::default()).is_ok());
}

#[test]
fn pow_scalar_and_tensor_reads_its_second_input() {
    let base = list(ScalarDType::Float32, &[1]);
    let exponents = list(ScalarDType::Float16, &[64, 64]);
    let out = foreach_common_v2(
        ForeachOp::PowScalarAndTensor,
        &[base, exponents],
        &four_cores(),
        &TilingConfig::default(),
    )
    .unwrap();
    assert_eq!(out.tiling_key, 1);
}

#[test]
fn input_errors() {
    let config = TilingConfig::default();
    let budget = four_cores();

    let err = foreach_common_v1(ForeachOp::Sqrt, &[], &budget, &config).unwrap_err();
    assert!(matches!(err, Error::EmptyInputList { op: "sqrt" }));

    let err = foreach_common_v1(ForeachOp::Sqrt, &[vec![]], &budget, &config).unwrap_err();
    assert!(matches!(err, Error::EmptyInputList { .. }));

    let mixed = vec![TensorDesc::flat(ScalarDType::Float32, 8), TensorDesc::flat(ScalarDType::Float16, 8)];
    let err = foreach_common_v1(ForeachOp::Sqrt, &[mixed], &budget, &config).unwrap_err();
    assert!(matches!(err, Error::DTypeMismatch { index: 1, .. }));

    let ints = list(ScalarDType::Int32, &[8]);
    let err = foreach_common_v1(ForeachOp::Sqrt, &[ints], &budget, &config).unwrap_err();
    assert!(matches!(err, Error::UnsupportedDType { op: "sqrt", dtype: ScalarDType::Int32 }));

    let no_cores = PlatformBudget::builder().vector_cores(0).build();
    let err = foreach_common_v2(ForeachOp::Sqrt, &[list(ScalarDType::Float32, &[8])], &no_cores, &config)
        .unwrap_err();
    assert!(matches!(err, Error::Platform { .. }));
}

#[test]
fn reduce_v1_blob() {
    let tensors = list(ScalarDType::Float32, &[100, 250, 37]);
    let out = foreach_reduce_v1(&[tensors], &four_cores(), &TilingConfig::default()).unwrap();

    assert_eq!(out.tiling_key, 2);
    assert_eq!(out.block_dim, 4);
    assert_eq!(out.workspace_bytes.as_slice(), &[REDUCE_WORKSPACE_BYTES]);
    assert_eq!(u32_at(&out.data, 8), 4);
    assert_eq!(u32_at(&out.data, 12), 3);
}

#[test]
fn reduce_has_no_integer_kernel() {
    let tensors = list(ScalarDType::Int32, &[8]);
    assert!(foreach_reduce_v2(&[tensors], &four_cores(), &TilingConfig::default()).is_err());
}

#[test]
fn reduce_v2_counts_blocks_per_tensor() {
    // three one-element tensors take three blocks, not one
    let tensors = list(ScalarDType::Float32, &[1, 1, 1]);
    let out = foreach_reduce_v2(&[tensors], &four_cores(), &TilingConfig::default()).unwrap();
    assert_eq!(out.block_dim, 3);
}
