//! Assembly layer: JSON description of a resource graph + the code that builds it.
//!
//! This module is separate from the builder API and from rendering. It owns:
//! - the input document shape (resources, sidecars, references)
//! - replaying that document against [`crate::graph::AppBuilder`]

pub mod build;
pub mod input;

pub use build::assemble;
pub use input::{AssemblyDoc, RawKind, RawResource, SidecarRequest};
