//! Core counts and on-chip memory sizes.
//!
//! A [`PlatformBudget`] is an immutable snapshot taken once per tiling call.
//! Presets cover the chips the knowledge tables were tuned on; anything else
//! is described through the builder or environment overrides.

use bon::bon;
use snafu::ensure;

use crate::error::*;

// ============================================================================
// SOC PRESETS
// ============================================================================

/// Supported chip variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Soc {
    /// 24 cube cores, 48 vector cores.
    #[strum(serialize = "910b2", serialize = "ascend910b2")]
    Ascend910B2,

    /// 20 cube cores, 40 vector cores.
    #[default]
    #[strum(serialize = "910b3", serialize = "ascend910b3")]
    Ascend910B3,
}

const UB_BYTES: u64 = 192 * 1024;
const L1_BYTES: u64 = 512 * 1024;
const L0A_BYTES: u64 = 64 * 1024;
const L0B_BYTES: u64 = 64 * 1024;
const L0C_BYTES: u64 = 128 * 1024;

/// Vector cores per cube core on the 910B family.
const VECTOR_PER_CUBE: u32 = 2;

// ============================================================================
// BUDGET
// ============================================================================

/// Read-only view of the resources one kernel launch may use.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlatformBudget {
    /// Vector (AIV) core count, used by the foreach family.
    pub vector_cores: u32,
    /// Cube (AIC) core count, used by the convolution search.
    pub cube_cores: u32,
    /// Unified buffer size per vector core.
    pub ub_bytes: u64,
    /// L1 buffer size per cube core.
    pub l1_bytes: u64,
    pub l0a_bytes: u64,
    pub l0b_bytes: u64,
    pub l0c_bytes: u64,
}

impl PlatformBudget {
    pub fn ascend910b2() -> Self {
        Self::for_soc(Soc::Ascend910B2)
    }

    pub fn ascend910b3() -> Self {
        Self::for_soc(Soc::Ascend910B3)
    }

    pub fn for_soc(soc: Soc) -> Self {
        let cube_cores = match soc {
            Soc::Ascend910B2 => 24,
            Soc::Ascend910B3 => 20,
        };
        Self {
            vector_cores: cube_cores * VECTOR_PER_CUBE,
            cube_cores,
            ub_bytes: UB_BYTES,
            l1_bytes: L1_BYTES,
            l0a_bytes: L0A_BYTES,
            l0b_bytes: L0B_BYTES,
            l0c_bytes: L0C_BYTES,
        }
    }

    /// Reject snapshots a broken platform query could produce.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.vector_cores > 0, ZeroResourceSnafu { resource: "vector cores" });
        ensure!(self.cube_cores > 0, ZeroResourceSnafu { resource: "cube cores" });
        ensure!(self.ub_bytes > 0, ZeroResourceSnafu { resource: "UB bytes" });
        ensure!(self.l1_bytes > 0, ZeroResourceSnafu { resource: "L1 bytes" });
        ensure!(self.l0a_bytes > 0, ZeroResourceSnafu { resource: "L0A bytes" });
        ensure!(self.l0b_bytes > 0, ZeroResourceSnafu { resource: "L0B bytes" });
        ensure!(self.l0c_bytes > 0, ZeroResourceSnafu { resource: "L0C bytes" });
        Ok(())
    }

    /// Create a budget from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `TESSEL_SOC` - Chip preset, `910b2` or `910b3` (default: `910b3`)
    /// * `TESSEL_CORE_NUM` - Override the cube core count; vector cores follow at 2x
    /// * `TESSEL_UB_SIZE` - Override the UB size in bytes
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`PlatformBudget::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let soc = match lookup("TESSEL_SOC") {
            Some(name) => match name.parse::<Soc>() {
                Ok(soc) => soc,
                Err(_) => return UnknownSocSnafu { name }.fail(),
            },
            None => Soc::default(),
        };
        let mut budget = Self::for_soc(soc);

        if let Some(cores) = parse_var(&lookup, "TESSEL_CORE_NUM")? {
            budget.cube_cores = cores;
            budget.vector_cores = cores.saturating_mul(VECTOR_PER_CUBE);
        }
        if let Some(ub) = parse_var(&lookup, "TESSEL_UB_SIZE")? {
            budget.ub_bytes = ub;
        }

        budget.validate()?;
        tracing::debug!(%soc, ?budget, "platform budget from environment");
        Ok(budget)
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<Option<T>> {
    match lookup(var) {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => InvalidEnvSnafu { var, value }.fail(),
        },
        None => Ok(None),
    }
}

impl Default for PlatformBudget {
    fn default() -> Self {
        Self::for_soc(Soc::default())
    }
}

#[bon]
impl PlatformBudget {
    /// Describe an arbitrary chip; unset fields take the 910B3 values.
    #[builder]
    pub fn builder(
        #[builder(default = 40)] vector_cores: u32,
        #[builder(default = 20)] cube_cores: u32,
        #[builder(default = UB_BYTES)] ub_bytes: u64,
        #[builder(default = L1_BYTES)] l1_bytes: u64,
        #[builder(default = L0A_BYTES)] l0a_bytes: u64,
        #[builder(default = L0B_BYTES)] l0b_bytes: u64,
        #[builder(default = L0C_BYTES)] l0c_bytes: u64,
    ) -> Self {
        Self { vector_cores, cube_cores, ub_bytes, l1_bytes, l0a_bytes, l0b_bytes, l0c_bytes }
    }
}
