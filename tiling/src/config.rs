//! Tiling configuration types.
//!
//! Typed knobs for the tiling drivers with bon builders and environment
//! variable fallbacks. Hardware facts live in [`tessel_platform::PlatformBudget`];
//! this module only carries policy.

use bon::bon;

// ============================================================================
// CONVOLUTION STRATEGY
// ============================================================================

/// How the convolution drivers pick their dimension and block plans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConvStrategy {
    /// Fast heuristic first, general search when it is rejected (default).
    #[default]
    Heuristic,

    /// Skip the heuristic and always run the general search.
    FallbackOnly,
}

impl ConvStrategy {
    /// Get the convolution strategy from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `TESSEL_CONV_FALLBACK_ONLY=1` - Always use the general search
    pub fn from_env() -> Self {
        Self::from_lookup(&|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        match lookup("TESSEL_CONV_FALLBACK_ONLY") {
            Some(v) if v != "0" => Self::FallbackOnly,
            _ => Self::Heuristic,
        }
    }

    pub fn is_heuristic(&self) -> bool {
        matches!(self, Self::Heuristic)
    }
}

// ============================================================================
// TILING CONFIGURATION
// ============================================================================

/// Policy shared by every tiling driver.
#[derive(Debug, Clone, PartialEq)]
pub struct TilingConfig {
    /// Convolution plan selection.
    pub conv_strategy: ConvStrategy,
    /// Consult the precomputed shape tables before searching.
    pub use_knowledge: bool,
    /// Minimum fraction of cube cores a backprop-input fast plan must use.
    pub dx_core_used_threshold: f64,
    /// Minimum fraction of cube cores a backprop-filter fast plan must use.
    pub dw_core_used_threshold: f64,
    /// Request bitwise-reproducible accumulation from the filter kernel.
    pub deterministic: bool,
    /// Align bf16 UB tiles to 32 bytes even where the operator asks for 64.
    pub force_narrow_bf16: bool,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            conv_strategy: ConvStrategy::Heuristic,
            use_knowledge: true,
            dx_core_used_threshold: 0.6,
            dw_core_used_threshold: 0.8,
            deterministic: false,
            force_narrow_bf16: false,
        }
    }
}

#[bon]
impl TilingConfig {
    /// Create a tiling configuration with builder pattern.
    #[builder]
    pub fn builder(
        #[builder(default)] conv_strategy: ConvStrategy,
        #[builder(default = true)] use_knowledge: bool,
        #[builder(default = 0.6)] dx_core_used_threshold: f64,
        #[builder(default = 0.8)] dw_core_used_threshold: f64,
        #[builder(default = false)] deterministic: bool,
        #[builder(default = false)] force_narrow_bf16: bool,
    ) -> Self {
        Self {
            conv_strategy,
            use_knowledge,
            dx_core_used_threshold,
            dw_core_used_threshold,
            deterministic,
            force_narrow_bf16,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `TESSEL_CONV_FALLBACK_ONLY` - See [`ConvStrategy::from_env`]
    /// * `TESSEL_NO_KNOWLEDGE` - Ignore the precomputed shape tables
    /// * `TESSEL_DX_CORE_THRESHOLD` - Backprop-input core usage floor (default: 0.6)
    /// * `TESSEL_DW_CORE_THRESHOLD` - Backprop-filter core usage floor (default: 0.8)
    /// * `TESSEL_DETERMINISTIC` - Deterministic filter accumulation
    /// * `TESSEL_NARROW_BF16` - Force 32-byte alignment for bf16 UB tiles
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`TilingConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let conv_strategy = ConvStrategy::from_lookup(&lookup);
        let use_knowledge = lookup("TESSEL_NO_KNOWLEDGE").is_none();
        let dx_core_used_threshold =
            lookup("TESSEL_DX_CORE_THRESHOLD").and_then(|s| s.parse().ok()).unwrap_or(0.6);
        let dw_core_used_threshold =
            lookup("TESSEL_DW_CORE_THRESHOLD").and_then(|s| s.parse().ok()).unwrap_or(0.8);
        let deterministic = lookup("TESSEL_DETERMINISTIC").is_some();
        let force_narrow_bf16 = lookup("TESSEL_NARROW_BF16").is_some();

        Self {
            conv_strategy,
            use_knowledge,
            dx_core_used_threshold,
            dw_core_used_threshold,
            deterministic,
            force_narrow_bf16,
        }
    }
}
