//! Frozen application model: the read-only input handed to the orchestrator.
//!
//! Enumeration here never has side effects. Resources keep insertion order and each
//! resource keeps its annotations in attachment order.

use crate::annotation::{Annotation, AnnotationKind, ComponentReference, SidecarAttachment};
use crate::graph::GraphId;
use crate::resource::ResourceKind;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelResource {
    name: String,
    #[serde(flatten)]
    kind: ResourceKind,
    annotations: Vec<Annotation>,
}

impl ModelResource {
    pub(crate) fn new(name: String, kind: ResourceKind, annotations: Vec<Annotation>) -> Self {
        Self {
            name,
            kind,
            annotations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotations_of(&self, kind: AnnotationKind) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.kind() == kind)
    }

    pub fn sidecars(&self) -> impl Iterator<Item = &SidecarAttachment> {
        self.annotations.iter().filter_map(Annotation::as_sidecar)
    }

    pub fn component_references(&self) -> impl Iterator<Item = &ComponentReference> {
        self.annotations
            .iter()
            .filter_map(Annotation::as_component_reference)
    }
}

/// A resource that asked for more than one sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateSidecar {
    pub resource: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppModel {
    #[serde(skip)]
    graph: GraphId,
    resources: Vec<ModelResource>,
}

impl AppModel {
    pub(crate) fn new(graph: GraphId, resources: Vec<ModelResource>) -> Self {
        Self { graph, resources }
    }

    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn resources(&self) -> &[ModelResource] {
        &self.resources
    }

    pub fn resource(&self, name: &str) -> Option<&ModelResource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Annotations of `name`, or an empty slice if no such resource was added.
    pub fn annotations(&self, name: &str) -> &[Annotation] {
        self.resource(name).map(|r| r.annotations()).unwrap_or(&[])
    }

    pub fn sidecars<'a>(&'a self, name: &str) -> Vec<&'a SidecarAttachment> {
        self.resource(name)
            .map(|r| r.sidecars().collect())
            .unwrap_or_default()
    }

    pub fn component_references<'a>(&'a self, name: &str) -> Vec<&'a ComponentReference> {
        self.resource(name)
            .map(|r| r.component_references().collect())
            .unwrap_or_default()
    }

    /// Looks up the component a reference points at.
    ///
    /// Returns `None` when the target was never added to this model or belongs to
    /// another graph. Whether that is fatal is the orchestrator's call.
    pub fn resolve(&self, reference: &ComponentReference) -> Option<&ModelResource> {
        let target = reference.target();
        if target.graph() != self.graph {
            return None;
        }
        self.resource(target.name())
    }

    /// Resources carrying more than one sidecar attachment, in model order.
    pub fn duplicate_sidecars(&self) -> Vec<DuplicateSidecar> {
        self.resources
            .iter()
            .filter_map(|r| {
                let count = r.sidecars().count();
                (count > 1).then(|| DuplicateSidecar {
                    resource: r.name.clone(),
                    count,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AppBuilder;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> AppModel {
        let mut app = AppBuilder::new();
        let store = app.add_state_store("statestore").unwrap();
        let api = app
            .add_project("api", Some("../Api"))
            .unwrap()
            .with_sidecar_app_id("frontend")
            .unwrap()
            .with_reference(&store)
            .unwrap();
        let worker = app
            .add_container("worker", "worker:1")
            .unwrap()
            .with_sidecar()
            .with_sidecar_options(None)
            .unwrap();
        app.add(store).unwrap();
        app.add(api).unwrap();
        app.add(worker).unwrap();
        app.build()
    }

    #[test]
    fn enumerates_annotations_in_insertion_order() {
        let model = sample();
        let kinds: Vec<AnnotationKind> = model.annotations("api").iter().map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                AnnotationKind::SidecarAttachment,
                AnnotationKind::ComponentReference
            ]
        );
        assert!(model.annotations("missing").is_empty());
    }

    #[test]
    fn filters_by_kind() {
        let model = sample();
        let api = model.resource("api").unwrap();
        assert_eq!(api.annotations_of(AnnotationKind::SidecarAttachment).count(), 1);
        assert_eq!(api.annotations_of(AnnotationKind::ComponentReference).count(), 1);
        assert_eq!(model.sidecars("worker").len(), 2);
        assert!(model.component_references("worker").is_empty());
    }

    #[test]
    fn resolves_references_within_the_model() {
        let model = sample();
        let reference = model.component_references("api")[0];
        let target = model.resolve(reference).unwrap();
        assert_eq!(target.name(), "statestore");
        assert!(target.kind().is_component());
    }

    #[test]
    fn unresolved_reference_is_none() {
        let mut app = AppBuilder::new();
        let store = app.add_state_store("statestore").unwrap();
        let api = app
            .add_project("api", None)
            .unwrap()
            .with_reference(&store)
            .unwrap();
        app.add(api).unwrap();
        drop(store);

        let model = app.build();
        let reference = model.component_references("api")[0];
        assert!(model.resolve(reference).is_none());
    }

    #[test]
    fn reports_duplicate_sidecars() {
        let model = sample();
        assert_eq!(
            model.duplicate_sidecars(),
            vec![DuplicateSidecar {
                resource: "worker".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn serializes_as_tagged_manifest() {
        let model = sample();
        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(
            value,
            json!({
                "resources": [
                    { "name": "statestore", "kind": "component", "type": "state", "annotations": [] },
                    {
                        "name": "api",
                        "kind": "project",
                        "path": "../Api",
                        "annotations": [
                            { "kind": "sidecar_attachment", "options": { "appId": "frontend" } },
                            { "kind": "component_reference", "target": "statestore" }
                        ]
                    },
                    {
                        "name": "worker",
                        "kind": "container",
                        "image": "worker:1",
                        "annotations": [
                            { "kind": "sidecar_attachment", "options": { "appId": "worker" } },
                            { "kind": "sidecar_attachment", "options": null }
                        ]
                    }
                ]
            })
        );
    }

    #[test]
    fn model_can_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppModel>();
    }
}
