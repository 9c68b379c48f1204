//! YAML sidecar persistence
//!
//! The sidecar sits next to the MIDI file with a `.yml` extension and holds
//! exactly three keys, in this order:
//!
//! ```yaml
//! key: C
//! mode: major
//! bars:
//! - I
//! - I|V
//! # ... eight entries in all
//! ```

use std::path::{Path, PathBuf};

use crate::analysis::result::AnalysisResult;
use crate::error::AnalysisError;

/// Number of bar labels a sidecar holds
pub const SIDECAR_BARS: usize = 8;

/// Serialize a result as sidecar YAML
///
/// # Errors
///
/// Returns `AnalysisError::SerializationError` unless the result has exactly
/// [`SIDECAR_BARS`] bar labels.
pub fn to_yaml_string(result: &AnalysisResult) -> Result<String, AnalysisError> {
    check_bar_count(result)?;
    Ok(serde_yaml::to_string(result)?)
}

/// Parse sidecar YAML, validating pitch names, mode tags, bar labels and bar count
pub fn from_yaml_str(yaml: &str) -> Result<AnalysisResult, AnalysisError> {
    let result: AnalysisResult = serde_yaml::from_str(yaml)?;
    check_bar_count(&result)?;
    Ok(result)
}

fn check_bar_count(result: &AnalysisResult) -> Result<(), AnalysisError> {
    if result.bars.len() != SIDECAR_BARS {
        return Err(AnalysisError::SerializationError(format!(
            "Sidecar must hold {} bars, found {}",
            SIDECAR_BARS,
            result.bars.len()
        )));
    }
    Ok(())
}

/// Sidecar path for a source file: same path with a `.yml` extension
pub fn sidecar_path<P: AsRef<Path>>(source: P) -> PathBuf {
    source.as_ref().with_extension("yml")
}

/// Write the sidecar next to `source` and return its path
pub fn write_sidecar<P: AsRef<Path>>(
    source: P,
    result: &AnalysisResult,
) -> Result<PathBuf, AnalysisError> {
    let path = sidecar_path(source);
    std::fs::write(&path, to_yaml_string(result)?)?;
    log::info!("Wrote sidecar: {}", path.display());
    Ok(path)
}

/// Read a sidecar file
pub fn read_sidecar<P: AsRef<Path>>(path: P) -> Result<AnalysisResult, AnalysisError> {
    let yaml = std::fs::read_to_string(path)?;
    from_yaml_str(&yaml)
}
