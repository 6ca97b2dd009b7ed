use snafu::Snafu;
use tessel_dtype::ScalarDType;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures a tiling call reports to its caller.
///
/// Every variant names the offending input and, where one exists, the
/// accepted range. The fast convolution heuristic never produces one of
/// these; it falls back silently instead.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("operator {op} received no input tensors"))]
    EmptyInputList { op: &'static str },

    #[snafu(display("input {index} has dtype {found:?}, expected {expected:?} like the first input"))]
    DTypeMismatch { index: usize, expected: ScalarDType, found: ScalarDType },

    #[snafu(display("operator {op} does not support dtype {dtype:?}"))]
    UnsupportedDType { op: &'static str, dtype: ScalarDType },

    #[snafu(display("{what} count {count} exceeds the capacity of {max}"))]
    CapacityExceeded { what: &'static str, count: usize, max: usize },

    #[snafu(display("reserved {reserved_bytes} bytes exceed the {ub_bytes} byte UB budget"))]
    ReservedExceedsBudget { ub_bytes: u64, reserved_bytes: u64 },

    #[snafu(display("{what} must be positive"))]
    ZeroDivisor { what: &'static str },

    #[snafu(display("{field} = {value} is outside [{min}, {max}]"))]
    AttrOutOfRange { field: &'static str, value: i64, min: i64, max: i64 },

    #[snafu(display("{tensor} must have rank {expected}, found {found}"))]
    RankMismatch { tensor: &'static str, expected: usize, found: usize },

    #[snafu(display("invalid {field}: {reason}"))]
    InvalidAttr { field: &'static str, reason: String },

    #[snafu(display("platform budget rejected: {source}"))]
    Platform { source: tessel_platform::Error },
}

impl Error {
    pub(crate) fn out_of_range(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::AttrOutOfRange { field, value, min, max }
    }
}

/// Fail with [`Error::AttrOutOfRange`] unless `min <= value <= max`.
pub(crate) fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
    if (min..=max).contains(&value) { Ok(()) } else { Err(Error::out_of_range(field, value, min, max)) }
}
