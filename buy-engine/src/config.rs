//! Engine configuration

/// Cart engine configuration
///
/// All values can be overridden via environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | TAX_RATE | 10 | Consumption tax rate (percent) extracted from totals |
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Consumption tax rate in percent; values outside (0, 100) disable
    /// tax extraction
    pub tax_rate: i32,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            tax_rate: std::env::var("TAX_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
