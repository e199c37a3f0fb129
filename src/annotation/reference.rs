//! Component reference binding: a directed edge from an owning resource to a
//! component resource. The component itself is never touched.

use crate::annotation::Annotation;
use crate::error::{Error, Result};
use crate::graph::{ResourceBuilder, ResourceRef};
use crate::resource::{ComponentCapability, Resource};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentReference {
    target: ResourceRef,
}

impl ComponentReference {
    pub fn target(&self) -> &ResourceRef {
        &self.target
    }
}

impl<R: Resource> ResourceBuilder<R> {
    /// Wires the sidecar of this resource to `component`.
    ///
    /// Duplicate references are kept. Fails if `component` was created by a
    /// different graph, even when the names match.
    pub fn with_reference<C: ComponentCapability>(
        self,
        component: &ResourceBuilder<C>,
    ) -> Result<Self> {
        if component.graph() != self.graph() {
            return Err(Error::invalid_argument(
                "component",
                format!(
                    "component '{}' belongs to {}, but '{}' belongs to {}",
                    component.name(),
                    component.graph(),
                    self.name(),
                    self.graph()
                ),
            ));
        }

        tracing::debug!(
            resource = self.name(),
            component = component.name(),
            component_type = component.resource().component_type(),
            "binding component reference"
        );
        let target = component.handle();
        Ok(self.with_annotation(Annotation::ComponentReference(ComponentReference { target })))
    }
}
