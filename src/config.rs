//! Configuration parameters for harmonic analysis

/// Analysis configuration parameters
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Number of bars in the analysis window, starting at tick 0 (default: 8)
    pub window_bars: u32,

    // Minor mode disambiguation
    /// Margin by which the leading-tone fraction must exceed the natural
    /// seventh fraction to call a minor key harmonic (default: 0.02)
    pub harmonic_minor_margin: f64,

    /// Minimum leading-tone fraction of total weight for harmonic minor (default: 0.04)
    pub harmonic_minor_floor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_bars: 8,
            harmonic_minor_margin: 0.02,
            harmonic_minor_floor: 0.04,
        }
    }
}
