//! Sidecar attachment.
//!
//! Three entry points, from least to most specific:
//! - [`ResourceBuilder::with_sidecar`]: app id derived from the resource name
//! - [`ResourceBuilder::with_sidecar_app_id`]: explicit app id
//! - [`ResourceBuilder::with_sidecar_options`]: full options record, or none
//!
//! Every call appends a new [`SidecarAttachment`]. Repeated calls are not merged.

use crate::annotation::Annotation;
use crate::error::{Error, Result};
use crate::graph::ResourceBuilder;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Knobs understood by the orchestrator when it starts the sidecar.
///
/// Unset fields mean "use the default". Keys not listed here are kept verbatim in
/// `extensions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidecarOptions {
    /// Identity used for service discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_port: Option<u16>,

    /// `http`, `grpc`, `https`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_channel_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_health_check_path: Option<String>,

    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_health_probe_interval: Option<u32>,

    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_health_probe_timeout: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_health_threshold: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_max_concurrency: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_app_health_check: Option<bool>,

    /// Path to a sidecar configuration file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dapr_http_port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dapr_grpc_port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_api_logging: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_profiling: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources_paths: Vec<String>,

    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl SidecarOptions {
    /// Options carrying only an app id.
    pub fn with_app_id(app_id: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            ..Self::default()
        }
    }

    /// Adds a forward-compatible key. Keys that shadow a typed field are rejected
    /// when the options are attached.
    pub fn extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }
}

/// Records that a resource needs a sidecar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SidecarAttachment {
    options: Option<SidecarOptions>,
}

impl SidecarAttachment {
    pub fn new(options: Option<SidecarOptions>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> Option<&SidecarOptions> {
        self.options.as_ref()
    }

    /// The explicit app id, if one was given.
    pub fn app_id(&self) -> Option<&str> {
        self.options.as_ref().and_then(|o| o.app_id.as_deref())
    }

    /// The explicit app id, or the owning resource's name.
    pub fn effective_app_id<'a>(&'a self, owner: &'a str) -> &'a str {
        self.app_id().unwrap_or(owner)
    }
}

/// Serialized names of the typed fields. Extension keys must not shadow them.
const RECOGNIZED_KEYS: &[&str] = &[
    "appId",
    "appPort",
    "appProtocol",
    "appChannelAddress",
    "appHealthCheckPath",
    "appHealthProbeInterval",
    "appHealthProbeTimeout",
    "appHealthThreshold",
    "appMaxConcurrency",
    "enableAppHealthCheck",
    "config",
    "daprHttpPort",
    "daprGrpcPort",
    "metricsPort",
    "logLevel",
    "enableApiLogging",
    "enableProfiling",
    "resourcesPaths",
];

fn validate_extensions(options: &SidecarOptions) -> Result<()> {
    if let Some(key) = options
        .extensions
        .keys()
        .find(|k| RECOGNIZED_KEYS.contains(&k.as_str()))
    {
        return Err(Error::invalid_argument(
            "options",
            format!(
                "extension key '{}' collides with a recognized sidecar option",
                key
            ),
        ));
    }
    Ok(())
}

fn validate_app_id(app_id: &str) -> Result<()> {
    if app_id.trim().is_empty() {
        return Err(Error::invalid_argument(
            "app_id",
            "sidecar app id must not be empty or blank",
        ));
    }
    Ok(())
}

impl<R: Resource> ResourceBuilder<R> {
    /// Attaches a sidecar whose app id is the resource name.
    pub fn with_sidecar(self) -> Self {
        let options = SidecarOptions::with_app_id(self.name());
        self.attach_sidecar(Some(options))
    }

    /// Attaches a sidecar with an explicit app id.
    pub fn with_sidecar_app_id(self, app_id: impl Into<String>) -> Result<Self> {
        let app_id = app_id.into();
        validate_app_id(&app_id)?;
        Ok(self.attach_sidecar(Some(SidecarOptions::with_app_id(app_id))))
    }

    /// Attaches a sidecar with a full options record. `None` means all defaults.
    pub fn with_sidecar_options(self, options: Option<SidecarOptions>) -> Result<Self> {
        if let Some(options) = &options {
            validate_extensions(options)?;
            if let Some(app_id) = options.app_id.as_deref() {
                validate_app_id(app_id)?;
            }
        }
        Ok(self.attach_sidecar(options))
    }

    fn attach_sidecar(self, options: Option<SidecarOptions>) -> Self {
        if self.annotations().iter().any(|a| a.as_sidecar().is_some()) {
            tracing::debug!(
                resource = self.name(),
                "resource already has a sidecar attachment; appending another"
            );
        }
        self.with_annotation(Annotation::Sidecar(SidecarAttachment::new(options)))
    }
}
