//! Closed-space detection on line-segment graphs.

pub mod detector;
mod facewalk;
mod snap;

pub use detector::{ClosedSpace, SpaceReport, UnclosedSegment, detect_spaces};
