//! Relationship analysis: tolerance clustering plus the pairwise analyzers.

pub mod clustering;
pub mod relations;

pub use relations::{
    alignment, analyze, analyze_batch, color_groups, containment, intersection, layer_groups,
    proximity,
};
