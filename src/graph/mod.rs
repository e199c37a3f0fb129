//! Resource graph assembly.
//!
//! An [`AppBuilder`] hands out exclusively owned [`ResourceBuilder`]s. Attachment
//! operations take a builder by value and return it, so a resource under assembly is
//! never aliased. Adding a builder back commits the resource; [`AppBuilder::build`]
//! freezes everything into a read-only [`AppModel`].

pub mod names;

use crate::annotation::Annotation;
use crate::error::{Error, Result};
use crate::model::{AppModel, ModelResource};
use crate::resource::{
    ComponentResource, ContainerResource, PUB_SUB, ProjectResource, Resource, STATE_STORE,
};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use names::validate_resource_name;

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one assembly context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphId(u64);

impl GraphId {
    fn next() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph#{}", self.0)
    }
}

/// Non-owning handle to a resource: graph identity plus name.
///
/// Serializes as the bare resource name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    graph: GraphId,
    name: Arc<str>,
}

impl ResourceRef {
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for ResourceRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

/// Exclusively owned builder for one resource under assembly.
#[derive(Debug)]
pub struct ResourceBuilder<R: Resource> {
    graph: GraphId,
    resource: R,
}

impl<R: Resource> ResourceBuilder<R> {
    /// Appends an annotation to the resource. Never replaces existing entries.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        tracing::debug!(
            resource = self.resource.name(),
            kind = %annotation.kind(),
            "attaching annotation"
        );
        self.resource.annotations_mut().push(annotation);
        self
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn name(&self) -> &str {
        self.resource.name()
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.resource.annotations()
    }

    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn handle(&self) -> ResourceRef {
        ResourceRef {
            graph: self.graph,
            name: Arc::from(self.resource.name()),
        }
    }
}

/// Mutable assembly context for one application graph.
#[derive(Debug)]
pub struct AppBuilder {
    id: GraphId,
    reserved: BTreeSet<String>,
    resources: Vec<ModelResource>,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            id: GraphId::next(),
            reserved: BTreeSet::new(),
            resources: Vec::new(),
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn add_project(
        &mut self,
        name: &str,
        path: Option<&str>,
    ) -> Result<ResourceBuilder<ProjectResource>> {
        let name = self.reserve(name)?;
        Ok(self.builder(ProjectResource::new(name, path.map(str::to_string))))
    }

    pub fn add_container(
        &mut self,
        name: &str,
        image: &str,
    ) -> Result<ResourceBuilder<ContainerResource>> {
        if image.trim().is_empty() {
            return Err(Error::invalid_argument(
                "image",
                "container image must not be blank",
            ));
        }
        let name = self.reserve(name)?;
        Ok(self.builder(ContainerResource::new(name, image.to_string())))
    }

    pub fn add_component(
        &mut self,
        name: &str,
        component_type: &str,
    ) -> Result<ResourceBuilder<ComponentResource>> {
        if component_type.trim().is_empty() {
            return Err(Error::invalid_argument(
                "component_type",
                "component type must not be blank",
            ));
        }
        let name = self.reserve(name)?;
        Ok(self.builder(ComponentResource::new(name, component_type.to_string())))
    }

    pub fn add_state_store(&mut self, name: &str) -> Result<ResourceBuilder<ComponentResource>> {
        self.add_component(name, STATE_STORE)
    }

    pub fn add_pub_sub(&mut self, name: &str) -> Result<ResourceBuilder<ComponentResource>> {
        self.add_component(name, PUB_SUB)
    }

    /// Commits a resource into the graph, in insertion order.
    pub fn add<R: Resource>(&mut self, builder: ResourceBuilder<R>) -> Result<ResourceRef> {
        if builder.graph != self.id {
            return Err(Error::invalid_argument(
                "builder",
                format!(
                    "resource '{}' belongs to {}, not {}",
                    builder.name(),
                    builder.graph,
                    self.id
                ),
            ));
        }

        let handle = builder.handle();
        let ResourceBuilder { mut resource, .. } = builder;
        self.resources.push(ModelResource::new(
            resource.name().to_string(),
            resource.kind(),
            std::mem::take(resource.annotations_mut()),
        ));
        Ok(handle)
    }

    /// Freezes the graph. Reserved names whose builders were dropped are discarded.
    pub fn build(self) -> AppModel {
        let committed: BTreeSet<&str> = self.resources.iter().map(|r| r.name()).collect();
        for name in &self.reserved {
            if !committed.contains(name.as_str()) {
                tracing::debug!(resource = %name, "discarding resource that was never added");
            }
        }

        tracing::info!(
            graph = %self.id,
            resources = self.resources.len(),
            "froze application model"
        );
        AppModel::new(self.id, self.resources)
    }

    fn reserve(&mut self, name: &str) -> Result<String> {
        validate_resource_name(name)?;
        if !self.reserved.insert(name.to_string()) {
            return Err(Error::DuplicateResource {
                name: name.to_string(),
            });
        }
        Ok(name.to_string())
    }

    fn builder<R: Resource>(&self, resource: R) -> ResourceBuilder<R> {
        ResourceBuilder {
            graph: self.id,
            resource,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{SidecarAttachment, SidecarOptions};
    use pretty_assertions::assert_eq;

    #[test]
    fn graphs_get_distinct_ids() {
        let a = AppBuilder::new();
        let b = AppBuilder::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut app = AppBuilder::new();
        let _api = app.add_project("api", None).unwrap();
        let err = app.add_container("api", "nginx").unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateResource {
                name: "api".to_string()
            }
        );
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut app = AppBuilder::new();
        let err = app.add_project("not valid", None).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn blank_component_type_is_rejected() {
        let mut app = AppBuilder::new();
        let err = app.add_component("store", "  ").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn with_annotation_appends_in_order() {
        let mut app = AppBuilder::new();
        let first = Annotation::Sidecar(SidecarAttachment::new(None));
        let second = Annotation::Sidecar(SidecarAttachment::new(Some(SidecarOptions::with_app_id(
            "second",
        ))));
        let api = app
            .add_project("api", None)
            .unwrap()
            .with_annotation(first.clone())
            .with_annotation(second.clone());

        assert_eq!(api.annotations(), &[first, second]);
    }

    #[test]
    fn add_commits_in_insertion_order() {
        let mut app = AppBuilder::new();
        let web = app.add_project("web", Some("../Web")).unwrap();
        let cache = app.add_container("cache", "redis:7").unwrap();
        app.add(web).unwrap();
        app.add(cache).unwrap();

        let model = app.build();
        let names: Vec<&str> = model.resources().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["web", "cache"]);
    }

    #[test]
    fn add_rejects_builder_from_another_graph() {
        let mut app = AppBuilder::new();
        let mut other = AppBuilder::new();
        let stranger = other.add_project("api", None).unwrap();

        let err = app.add(stranger).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn dropped_builders_are_not_in_the_model() {
        let mut app = AppBuilder::new();
        let _discarded = app.add_project("scratch", None).unwrap();
        let kept = app.add_project("kept", None).unwrap();
        app.add(kept).unwrap();

        let model = app.build();
        assert!(model.resource("scratch").is_none());
        assert!(model.resource("kept").is_some());
    }

    #[test]
    fn handle_carries_graph_identity() {
        let mut app = AppBuilder::new();
        let store = app.add_state_store("statestore").unwrap();
        let handle = store.handle();
        assert_eq!(handle.name(), "statestore");
        assert_eq!(handle.graph(), app.id());
        assert_eq!(serde_json::to_value(&handle).unwrap(), "statestore");
    }
}
