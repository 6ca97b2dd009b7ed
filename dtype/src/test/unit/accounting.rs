use strum::IntoEnumIterator;
use test_case::test_case;

use crate::*;

#[test_case(ScalarDType::Float16, 16; "f16")]
#[test_case(ScalarDType::BFloat16, 16; "bf16")]
#[test_case(ScalarDType::Float32, 8; "f32")]
#[test_case(ScalarDType::Int8, 32; "i8")]
#[test_case(ScalarDType::Int64, 4; "i64")]
#[test_case(ScalarDType::Undefined, 8; "unknown falls back to four bytes")]
fn narrow_block_elements(dtype: ScalarDType, expected: usize) {
    assert_eq!(dtype.elements_per_block(BlockAlignment::Narrow), expected);
}

#[test]
fn wide_block_doubles_bf16_granularity() {
    assert_eq!(ScalarDType::BFloat16.elements_per_block(BlockAlignment::Wide), 32);
}

#[test]
fn element_bytes_never_zero() {
    for dtype in ScalarDType::iter() {
        assert!(matches!(dtype.element_bytes(), 1 | 2 | 4 | 8), "{dtype:?}");
    }
    assert_eq!(ScalarDType::Undefined.bytes(), 0);
}

#[test_case(ScalarDType::Float16, Some(1))]
#[test_case(ScalarDType::Float32, Some(2))]
#[test_case(ScalarDType::Int32, Some(3))]
#[test_case(ScalarDType::BFloat16, Some(4))]
#[test_case(ScalarDType::Int8, Some(5))]
#[test_case(ScalarDType::UInt8, Some(6))]
#[test_case(ScalarDType::Int16, Some(7))]
#[test_case(ScalarDType::Int64, Some(8))]
#[test_case(ScalarDType::Float64, Some(9))]
#[test_case(ScalarDType::Bool, None)]
#[test_case(ScalarDType::UInt64, None)]
fn dispatch_keys(dtype: ScalarDType, expected: Option<u64>) {
    assert_eq!(dtype.tiling_key(), expected);
}

#[test]
fn dispatch_keys_are_distinct() {
    let keys: Vec<u64> = ScalarDType::iter().filter_map(|d| d.tiling_key()).collect();
    let mut dedup = keys.clone();
    dedup.sort_unstable();
    dedup.dedup();
    assert_eq!(keys.len(), dedup.len());
}

#[test]
fn reduce_keys_cover_floats_only() {
    let keyed: enumset::EnumSet<ScalarDType> =
        ScalarDType::iter().filter(|d| d.reduce_tiling_key().is_some()).collect();
    assert_eq!(keyed, ScalarDType::Float16 | ScalarDType::Float32 | ScalarDType::BFloat16);
}
