use anyhow::Context;
use serde::{Deserialize, Serialize};
use squatcore::SessionConfig;
use std::fs;
use std::path::Path;

use crate::generator::profile::GeneratorConfig;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Tag attached to log lines of sessions built from this config.
    pub label: Option<String>,
    pub session: SessionConfig,
    pub generator: GeneratorConfig,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config
            .session
            .validate()
            .with_context(|| format!("validating workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(window_size: Option<usize>) -> Self {
        let mut config = Self::default();
        if let Some(window_size) = window_size {
            config.session.window_size = window_size;
        }
        config
    }

    pub fn to_session_config(&self) -> SessionConfig {
        self.session.clone()
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("squat")
    }
}
