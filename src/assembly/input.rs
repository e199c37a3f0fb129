//! Assembly description (app.json).
//!
//! JSON shape:
//! {
//!   "resources": [
//!     { "name": "statestore", "kind": "component", "type": "state.redis" },
//!     {
//!       "name": "api",
//!       "kind": "project",                  // project | container | component
//!       "path": "../Api",                   // optional, projects only
//!       "sidecar": { "appId": "frontend" }, // one or a list, see SidecarRequest
//!       "references": ["statestore"]        // component names, wiring order
//!     }
//!   ]
//! }

use crate::annotation::SidecarOptions;
use anyhow::Context;
use serde::de::Deserializer;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct AssemblyDoc {
    #[serde(default)]
    pub resources: Vec<RawResource>,
}

/// Raw resource shape as it appears in app.json.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResource {
    pub name: String,

    #[serde(flatten)]
    pub kind: RawKind,

    #[serde(default, deserialize_with = "one_or_many")]
    pub sidecar: Vec<SidecarRequest>,

    #[serde(default)]
    pub references: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawKind {
    Project {
        #[serde(default)]
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

/// One sidecar request. Each form maps to one builder entry point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SidecarRequest {
    // `true` attaches with the resource name as app id; `false` attaches nothing.
    Enabled(bool),
    AppId(String),
    // Object or null.
    Options(Option<SidecarOptions>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<SidecarRequest>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<SidecarRequest>),
        One(SidecarRequest),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(v) => v,
        OneOrMany::One(s) => vec![s],
    })
}

impl AssemblyDoc {
    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read assembly file {}", path))?;
        Self::from_json(&text).with_context(|| format!("parse assembly file {}", path))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
