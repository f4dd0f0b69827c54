//! gridplan - spatial relationship and axis-grid analysis for normalized
//! 2-D CAD drawing primitives.
//!
//! The crate consumes already-extracted entity records (texts, line
//! segments, circles, rectangles) and derives structured facts about them:
//!
//! * pairwise relationships — containment, proximity, intersection,
//!   color/layer grouping, alignment ([`analysis`]);
//! * a structural axis grid clustered from gridline segments, with
//!   nearest-axis and span lookup for arbitrary points ([`grid`]);
//! * closed polygonal spaces formed by chains of connected segments, with
//!   leftovers reported individually ([`spaces`]).
//!
//! All computation is planar, tolerance-based and pure: entity collections
//! are immutable once built, every analyzer returns fresh derived records,
//! and recoverable per-entity problems surface as diagnostics rather than
//! errors. Reading drawing files and persisting results are the caller's
//! concern.

pub mod analysis;
pub mod error;
pub mod grid;
pub mod model;
pub mod spaces;
pub mod utils;

pub use analysis::{analyze, analyze_batch};
pub use error::{GridPlanError, Result};
pub use grid::{AxisGrid, GridLocator};
pub use model::{
    AnalysisSettings, Diagnostic, Drawing, GridSettings, Relationship, SpaceSettings,
};
pub use spaces::{SpaceReport, detect_spaces};
