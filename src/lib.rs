//! Declarative sidecar wiring for an application resource graph.
//!
//! Resources are assembled through exclusively owned builders. Each builder can be
//! annotated with sidecar attachments (a sidecar process with a service-discovery app
//! id and options) and component references (directed edges to component resources
//! such as state stores). Nothing is started here: the frozen [`AppModel`] is the
//! input contract for an orchestrator.
//!
//! ```
//! use sidecar_intent::AppBuilder;
//!
//! let mut app = AppBuilder::new();
//! let store = app.add_state_store("statestore")?;
//! let api = app
//!     .add_project("api", None)?
//!     .with_sidecar_app_id("frontend")?
//!     .with_reference(&store)?;
//! app.add(store)?;
//! app.add(api)?;
//!
//! let model = app.build();
//! assert_eq!(model.sidecars("api")[0].effective_app_id("api"), "frontend");
//! # Ok::<(), sidecar_intent::Error>(())
//! ```

pub mod annotation;
pub mod assembly;
pub mod error;
pub mod graph;
pub mod model;
pub mod render;
pub mod resource;

pub use annotation::{
    Annotation, AnnotationKind, ComponentReference, SidecarAttachment, SidecarOptions,
};
pub use error::{Error, Result};
pub use graph::{AppBuilder, GraphId, ResourceBuilder, ResourceRef};
pub use model::{AppModel, DuplicateSidecar, ModelResource};
pub use resource::{
    ComponentCapability, ComponentResource, ContainerResource, ProjectResource, Resource,
    ResourceKind,
};
