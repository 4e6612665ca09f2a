use serde::{Deserialize, Serialize};

/// One month of the fictional "interest over time" series. A full series is
/// exactly twelve points, newest month first, scores in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDataPoint {
    /// Three-letter month abbreviation as produced by the provider ("Jan").
    pub month: String,
    pub score: f64,
}
