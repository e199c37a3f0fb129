use crate::model::AppModel;

/// Render the orchestrator manifest as pretty JSON.
pub fn render_manifest(model: &AppModel) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(model)?;
    json.push('\n');
    Ok(json)
}
