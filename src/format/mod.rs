//! Distance read-out formatting
//!
//! Converts distance samples into display strings for the host's
//! read-out label and into a serializable form for logging pipelines.

use serde::{Deserialize, Serialize};

use crate::core::DistanceSample;

/// Serializable rendition of a `DistanceSample` with plain fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSample {
    /// Euclidean distance (mm)
    pub raw_distance_mm: f64,
    /// Distance normalized against the 200 mm ceiling
    pub normalized_distance: f64,
    /// First endpoint, world frame (mm)
    pub position_a_mm: [f64; 3],
    /// Second endpoint, world frame (mm)
    pub position_b_mm: [f64; 3],
    /// Update counter
    pub sequence_number: u32,
}

/// Renders distance samples for display and logging.
pub struct SampleFormatter {
    /// Decimal places for distance labels
    pub precision: usize,
}

impl Default for SampleFormatter {
    fn default() -> Self {
        Self { precision: 1 }
    }
}

impl SampleFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Bare numeric label for the distance read-out widget.
    pub fn distance_label(&self, sample: &DistanceSample) -> String {
        format!("{:.*}", self.precision, sample.raw_distance_mm)
    }

    /// Full read-out line.
    pub fn text(&self, sample: &DistanceSample) -> String {
        format!(
            "Distance to target (mm): {} (normalized {:.3})",
            self.distance_label(sample),
            sample.normalized_distance
        )
    }

    /// Plain-field rendition for serialization.
    pub fn formatted(&self, sample: &DistanceSample) -> FormattedSample {
        FormattedSample {
            raw_distance_mm: sample.raw_distance_mm,
            normalized_distance: sample.normalized_distance,
            position_a_mm: [
                sample.position_a.x,
                sample.position_a.y,
                sample.position_a.z,
            ],
            position_b_mm: [
                sample.position_b.x,
                sample.position_b.y,
                sample.position_b.z,
            ],
            sequence_number: sample.sequence_number,
        }
    }

    /// Pretty-printed JSON rendition.
    pub fn json(&self, sample: &DistanceSample) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.formatted(sample))
    }
}
