//! Entity records, derived-fact records, diagnostics and settings.

pub mod diagnostics;
pub mod entity;
pub mod relationship;
pub mod settings;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use entity::{
    CircleElement, Drawing, EntityKind, EntityRef, LineSegment, RectElement, TextElement,
};
pub use relationship::{Relationship, RelationshipKind};
pub use settings::{AnalysisSettings, GridSettings, SpaceSettings};
