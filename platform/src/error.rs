use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The platform query reported no capacity for a resource tiling depends on.
    #[snafu(display("platform reports zero {resource}"))]
    ZeroResource { resource: &'static str },

    #[snafu(display("unknown SoC: {name}"))]
    UnknownSoc { name: String },

    #[snafu(display("invalid value for {var}: {value:?}"))]
    InvalidEnv { var: &'static str, value: String },
}
