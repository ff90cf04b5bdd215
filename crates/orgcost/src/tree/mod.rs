//! Tree construction and cost rollup.
//!
//! [`build`] checks the single-rooted tree shape and links records into an
//! owned [`crate::OrgTree`]. [`aggregate`] then walks it once, children
//! before parents, and attaches [`crate::Metrics`] to every node.

mod build;
mod rollup;

pub use build::build;
pub use rollup::{aggregate, rollup_metrics};
