//! Replay an assembly description against the builder API.
//!
//! Three phases:
//! 1) Create a builder per resource (names validated and reserved).
//! 2) Apply sidecars, then references, in document order.
//! 3) Commit every builder and freeze the model.

use crate::assembly::input::{AssemblyDoc, RawKind, RawResource, SidecarRequest};
use crate::error::Error;
use crate::graph::{AppBuilder, ResourceBuilder};
use crate::model::AppModel;
use crate::resource::{ComponentResource, ContainerResource, ProjectResource, Resource};
use anyhow::{Context, bail};
use std::collections::BTreeMap;

/// A builder of any resource variant, so a heterogeneous document can be replayed.
enum AnyBuilder {
    Project(ResourceBuilder<ProjectResource>),
    Container(ResourceBuilder<ContainerResource>),
    Component(ResourceBuilder<ComponentResource>),
}

pub fn assemble(doc: &AssemblyDoc) -> anyhow::Result<AppModel> {
    if doc.resources.is_empty() {
        bail!("assembly description contained no resources");
    }

    // Phase 1: builders keyed by name.
    let mut app = AppBuilder::new();
    let mut builders: BTreeMap<String, AnyBuilder> = BTreeMap::new();
    for raw in &doc.resources {
        let builder = create(&mut app, raw)
            .with_context(|| format!("cannot create resource '{}'", raw.name))?;
        builders.insert(raw.name.clone(), builder);
    }

    // Phase 2: annotate. The owner is taken out of the map while its peers stay
    // borrowable as reference targets.
    for raw in &doc.resources {
        let Some(owner) = builders.remove(&raw.name) else {
            bail!("resource '{}' disappeared during assembly", raw.name);
        };
        let owner = match owner {
            AnyBuilder::Project(b) => AnyBuilder::Project(annotate(b, raw, &builders)?),
            AnyBuilder::Container(b) => AnyBuilder::Container(annotate(b, raw, &builders)?),
            AnyBuilder::Component(b) => AnyBuilder::Component(annotate(b, raw, &builders)?),
        };
        builders.insert(raw.name.clone(), owner);
    }

    // Phase 3: commit in document order.
    for raw in &doc.resources {
        match builders.remove(&raw.name) {
            Some(AnyBuilder::Project(b)) => app.add(b)?,
            Some(AnyBuilder::Container(b)) => app.add(b)?,
            Some(AnyBuilder::Component(b)) => app.add(b)?,
            None => bail!("resource '{}' disappeared during assembly", raw.name),
        };
    }

    Ok(app.build())
}

fn create(app: &mut AppBuilder, raw: &RawResource) -> anyhow::Result<AnyBuilder> {
    Ok(match &raw.kind {
        RawKind::Project { path } => AnyBuilder::Project(app.add_project(&raw.name, path.as_deref())?),
        RawKind::Container { image } => AnyBuilder::Container(app.add_container(&raw.name, image)?),
        RawKind::Component { component_type } => {
            AnyBuilder::Component(app.add_component(&raw.name, component_type)?)
        }
    })
}

fn annotate<R: Resource>(
    mut builder: ResourceBuilder<R>,
    raw: &RawResource,
    peers: &BTreeMap<String, AnyBuilder>,
) -> anyhow::Result<ResourceBuilder<R>> {
    for sidecar in &raw.sidecar {
        builder = match sidecar {
            SidecarRequest::Enabled(true) => Ok(builder.with_sidecar()),
            SidecarRequest::Enabled(false) => Ok(builder),
            SidecarRequest::AppId(app_id) => builder.with_sidecar_app_id(app_id.as_str()),
            SidecarRequest::Options(options) => builder.with_sidecar_options(options.clone()),
        }
        .with_context(|| format!("cannot attach sidecar to '{}'", raw.name))?;
    }

    for target in &raw.references {
        if target == &raw.name {
            return Err(Error::invalid_argument(
                "references",
                format!("resource '{}' cannot reference itself", raw.name),
            )
            .into());
        }
        let component = match peers.get(target) {
            Some(AnyBuilder::Component(c)) => c,
            Some(_) => {
                return Err(Error::invalid_argument(
                    "references",
                    format!("'{}' references '{}', which is not a component", raw.name, target),
                )
                .into());
            }
            None => bail!("'{}' references unknown resource '{}'", raw.name, target),
        };
        builder = builder
            .with_reference(component)
            .with_context(|| format!("cannot bind '{}' to '{}'", raw.name, target))?;
    }

    Ok(builder)
}
