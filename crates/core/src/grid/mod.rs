//! The structural axis grid and its point locator.

pub mod axes;
pub mod locator;

pub use axes::{Axis, AxisGrid};
pub use locator::{AxisFix, GridLocation, GridLocator, Span, TextGridPosition};
