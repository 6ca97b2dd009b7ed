use crate::*;
use proptest::prelude::*;

#[rustfmt::skip]
pub fn float_dtype() -> impl Strategy<Value = ScalarDType> {
    prop_oneof![
        Just(ScalarDType::Float16), Just(ScalarDType::BFloat16),
        Just(ScalarDType::Float32)
    ]
}

#[rustfmt::skip]
pub fn int_dtype() -> impl Strategy<Value = ScalarDType> {
    prop_oneof![
        Just(ScalarDType::Int8), Just(ScalarDType::Int16), Just(ScalarDType::Int32), Just(ScalarDType::Int64),
        Just(ScalarDType::UInt8), Just(ScalarDType::UInt16), Just(ScalarDType::UInt32), Just(ScalarDType::UInt64)
    ]
}

/// Every element kind, including the ones without a dispatch key.
pub fn scalar_generator() -> impl Strategy<Value = ScalarDType> {
    prop_oneof![
        Just(ScalarDType::Bool),
        int_dtype(),
        float_dtype(),
        Just(ScalarDType::Float64),
        Just(ScalarDType::Undefined)
    ]
}

pub fn alignment_generator() -> impl Strategy<Value = BlockAlignment> {
    prop_oneof![Just(BlockAlignment::Narrow), Just(BlockAlignment::Wide)]
}
