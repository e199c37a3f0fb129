//! Annotations carried by resources and consumed by the orchestrator.
//!
//! Annotations are append-only. Nothing here reconciles repeated attachments; the
//! orchestrator filters by [`AnnotationKind`] and decides.

pub mod reference;
pub mod sidecar;

pub use reference::ComponentReference;
pub use sidecar::{SidecarAttachment, SidecarOptions};

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    #[serde(rename = "sidecar_attachment")]
    Sidecar(SidecarAttachment),
    ComponentReference(ComponentReference),
}

/// Discriminator used to filter annotations by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnnotationKind {
    SidecarAttachment,
    ComponentReference,
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SidecarAttachment => f.write_str("SidecarAttachment"),
            Self::ComponentReference => f.write_str("ComponentReference"),
        }
    }
}

impl Annotation {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Sidecar(_) => AnnotationKind::SidecarAttachment,
            Self::ComponentReference(_) => AnnotationKind::ComponentReference,
        }
    }

    pub fn as_sidecar(&self) -> Option<&SidecarAttachment> {
        match self {
            Self::Sidecar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_component_reference(&self) -> Option<&ComponentReference> {
        match self {
            Self::ComponentReference(r) => Some(r),
            _ => None,
        }
    }
}
