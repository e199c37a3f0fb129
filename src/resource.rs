//! Resource variants that can carry annotations.
//!
//! Attachment logic is written against [`Resource`] only, so every variant gets the
//! same sidecar and reference behavior. [`ComponentCapability`] marks the variants
//! that can be the target of a component reference.

use crate::annotation::Annotation;
use serde::Serialize;

/// Any value that exposes a name and an annotation collection.
pub trait Resource {
    fn name(&self) -> &str;

    fn annotations(&self) -> &[Annotation];

    fn annotations_mut(&mut self) -> &mut Vec<Annotation>;

    /// Describes the variant for the frozen model.
    fn kind(&self) -> ResourceKind;
}

/// A resource that represents an externally defined sidecar component
/// (state store, pub/sub broker, binding, ...).
pub trait ComponentCapability: Resource {
    fn component_type(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceKind {
    Project {
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    Container {
        image: String,
    },
    Component {
        #[serde(rename = "type")]
        component_type: String,
    },
}

impl ResourceKind {
    pub fn is_component(&self) -> bool {
        matches!(self, Self::Component { .. })
    }
}

/// An application project (service) in the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectResource {
    name: String,
    path: Option<String>,
    annotations: Vec<Annotation>,
}

impl ProjectResource {
    pub(crate) fn new(name: String, path: Option<String>) -> Self {
        Self {
            name,
            path,
            annotations: Vec::new(),
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

impl Resource for ProjectResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.annotations
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Project {
            path: self.path.clone(),
        }
    }
}

/// A prebuilt container image.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerResource {
    name: String,
    image: String,
    annotations: Vec<Annotation>,
}

impl ContainerResource {
    pub(crate) fn new(name: String, image: String) -> Self {
        Self {
            name,
            image,
            annotations: Vec::new(),
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

impl Resource for ContainerResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.annotations
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Container {
            image: self.image.clone(),
        }
    }
}

pub const STATE_STORE: &str = "state";
pub const PUB_SUB: &str = "pubsub";

/// An external component a sidecar can be wired to.
///
/// What the component configures is owned elsewhere; here it only has a name and a
/// type string such as `state.redis` or `pubsub`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentResource {
    name: String,
    component_type: String,
    annotations: Vec<Annotation>,
}

impl ComponentResource {
    pub(crate) fn new(name: String, component_type: String) -> Self {
        Self {
            name,
            component_type,
            annotations: Vec::new(),
        }
    }
}

impl Resource for ComponentResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        &mut self.annotations
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Component {
            component_type: self.component_type.clone(),
        }
    }
}

impl ComponentCapability for ComponentResource {
    fn component_type(&self) -> &str {
        &self.component_type
    }
}
