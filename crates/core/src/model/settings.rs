//! Configuration values consumed by the analyzers.
//!
//! The core consumes plain values; loading and merging configuration files
//! is the caller's concern. Validation happens once, before any analysis
//! begins — a bad tolerance is the one class of error that is fatal.

use crate::error::{GridPlanError, Result};

pub(crate) const DEFAULT_MAX_DISTANCE: f64 = 100.0;
pub(crate) const DEFAULT_ALIGNMENT_TOLERANCE: f64 = 5.0;

pub(crate) const DEFAULT_MERGE_TOLERANCE: f64 = 100.0;
pub(crate) const DEFAULT_MIN_AXIS_LENGTH: f64 = 2000.0;
pub(crate) const DEFAULT_LABEL_SEARCH_RADIUS: f64 = 5000.0;
pub(crate) const DEFAULT_MAX_LABEL_LEN: usize = 8;

pub(crate) const DEFAULT_SNAP_TOLERANCE: f64 = 1e-3;
pub(crate) const DEFAULT_MIN_LINES: usize = 4;

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GridPlanError::InvalidSetting {
            name,
            value,
            constraint: "a positive finite number",
        })
    }
}

/// Thresholds for the relationship analyzer.
#[derive(Clone, Debug)]
pub struct AnalysisSettings {
    /// Maximum text-to-line distance for a Proximity relationship.
    pub max_distance: f64,
    /// Coordinate tolerance for Aligned clustering.
    pub alignment_tolerance: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            alignment_tolerance: DEFAULT_ALIGNMENT_TOLERANCE,
        }
    }
}

impl AnalysisSettings {
    pub fn validate(&self) -> Result<()> {
        positive("max_distance", self.max_distance)?;
        positive("alignment_tolerance", self.alignment_tolerance)
    }
}

/// Parameters for axis-grid construction.
#[derive(Clone, Debug)]
pub struct GridSettings {
    /// Axis positions closer than this merge into one axis.
    pub merge_tolerance: f64,
    /// Candidate groups with a shorter extent are not gridlines.
    pub min_axis_length: f64,
    /// How far from an axis endpoint a label text may sit.
    pub label_search_radius: f64,
    /// Texts longer than this never qualify as axis labels.
    pub max_label_len: usize,
    /// Case-insensitive layer-name keywords restricting axis candidates.
    /// Empty means every line is a candidate.
    pub axis_layer_keywords: Vec<String>,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            merge_tolerance: DEFAULT_MERGE_TOLERANCE,
            min_axis_length: DEFAULT_MIN_AXIS_LENGTH,
            label_search_radius: DEFAULT_LABEL_SEARCH_RADIUS,
            max_label_len: DEFAULT_MAX_LABEL_LEN,
            axis_layer_keywords: Vec::new(),
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<()> {
        positive("grid.merge_tolerance", self.merge_tolerance)?;
        positive("grid.min_axis_length", self.min_axis_length)?;
        positive("grid.label_search_radius", self.label_search_radius)
    }
}

/// Parameters for closed-space detection.
#[derive(Clone, Debug)]
pub struct SpaceSettings {
    /// Endpoint snap distance; endpoints within this merge into one node.
    pub snap_tolerance: f64,
    /// Minimum edge count for an accepted face. A polygon needs 3; the
    /// default policy requires 4.
    pub min_lines: usize,
}

impl Default for SpaceSettings {
    fn default() -> Self {
        Self {
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            min_lines: DEFAULT_MIN_LINES,
        }
    }
}

impl SpaceSettings {
    pub fn validate(&self) -> Result<()> {
        positive("space_detection.tolerance", self.snap_tolerance)?;
        if self.min_lines < 3 {
            return Err(GridPlanError::MinLinesTooSmall(self.min_lines));
        }
        Ok(())
    }
}
