//! Diagnostic records for recoverable per-entity failures.
//!
//! The engine always returns whatever it could compute; anything skipped or
//! demoted along the way lands here instead of failing the run.

use serde::Serialize;

use crate::model::entity::EntityRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// Entity missing required coordinates or otherwise unreadable.
    MalformedEntity,
    /// Zero-length, zero-radius or zero-area primitive.
    DegenerateEntity,
    /// A tolerance cluster whose total span exceeds the configured
    /// tolerance; resolved by first-seen ordering.
    ToleranceDrift,
    /// Geometry that could not form a closed face and was demoted to
    /// individual reporting.
    OpenGeometry,
}

#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// The entity concerned, where one can be named.
    pub entity: Option<EntityRef>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            entity: None,
        }
    }

    pub fn for_entity(mut self, entity: EntityRef) -> Self {
        self.entity = Some(entity);
        self
    }
}
