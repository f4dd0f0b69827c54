//! Derived relationship records.

use serde::Serialize;

use crate::model::entity::EntityRef;
use crate::utils::Direction;

/// The kind of spatial or attribute fact a [`Relationship`] states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RelationshipKind {
    /// Source text anchor lies inside the target rectangle.
    Contains,
    /// Source text is within the proximity threshold of the target line.
    Proximity,
    /// Source line crosses or enters the target rectangle.
    Intersects,
    /// Both entities carry the same color code.
    ColorMatch,
    /// Both entities sit on the same layer.
    LayerMatch,
    /// Both entities share a coordinate in the tagged direction.
    Aligned(Direction),
}

/// A derived fact between two entities. Relationships hold index-based
/// references into the entity collections and are never mutated after
/// creation.
#[derive(Clone, Debug, Serialize)]
pub struct Relationship {
    pub kind: RelationshipKind,
    pub source: EntityRef,
    pub target: EntityRef,
    /// Distance or overlap measure, where the kind has one.
    pub metric: Option<f64>,
    pub description: String,
}

impl Relationship {
    pub fn new(kind: RelationshipKind, source: EntityRef, target: EntityRef) -> Self {
        Self {
            kind,
            source,
            target,
            metric: None,
            description: String::new(),
        }
    }

    pub fn with_metric(mut self, metric: f64) -> Self {
        self.metric = Some(metric);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
