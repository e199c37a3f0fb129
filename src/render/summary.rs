use crate::annotation::Annotation;
use crate::model::AppModel;
use crate::resource::ResourceKind;
use std::fmt::Write;

/// Render a short listing: one line per resource, one indented line per annotation.
///
/// Example:
/// api (project ../Api)
///   sidecar app-id=frontend
///   reference -> statestore
pub fn render_summary(model: &AppModel) -> anyhow::Result<String> {
    let mut out = String::new();

    for resource in model.resources() {
        let kind = match resource.kind() {
            ResourceKind::Project { path: Some(path) } => format!("project {}", path),
            ResourceKind::Project { path: None } => "project".to_string(),
            ResourceKind::Container { image } => format!("container {}", image),
            ResourceKind::Component { component_type } => format!("component {}", component_type),
        };
        writeln!(out, "{} ({})", resource.name(), kind)?;

        for annotation in resource.annotations() {
            match annotation {
                Annotation::Sidecar(sidecar) => {
                    let app_id = sidecar.effective_app_id(resource.name());
                    if sidecar.options().is_none() {
                        writeln!(out, "  sidecar app-id={} (all defaults)", app_id)?;
                    } else {
                        writeln!(out, "  sidecar app-id={}", app_id)?;
                    }
                }
                Annotation::ComponentReference(reference) => {
                    let resolved = model.resolve(reference).is_some();
                    writeln!(
                        out,
                        "  reference -> {}{}",
                        reference.target(),
                        if resolved { "" } else { " (unresolved)" }
                    )?;
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AppBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_resources_and_annotations() {
        let mut app = AppBuilder::new();
        let store = app.add_state_store("statestore").unwrap();
        let gone = app.add_pub_sub("gone").unwrap();
        let api = app
            .add_project("api", Some("../Api"))
            .unwrap()
            .with_sidecar_app_id("frontend")
            .unwrap()
            .with_reference(&store)
            .unwrap()
            .with_reference(&gone)
            .unwrap();
        let worker = app
            .add_container("worker", "worker:1")
            .unwrap()
            .with_sidecar_options(None)
            .unwrap();
        app.add(store).unwrap();
        app.add(api).unwrap();
        app.add(worker).unwrap();
        drop(gone);

        let expected = [
            "statestore (component state)",
            "api (project ../Api)",
            "  sidecar app-id=frontend",
            "  reference -> statestore",
            "  reference -> gone (unresolved)",
            "worker (container worker:1)",
            "  sidecar app-id=worker (all defaults)",
            "",
        ]
        .join("\n");
        assert_eq!(render_summary(&app.build()).unwrap(), expected);
    }
}
