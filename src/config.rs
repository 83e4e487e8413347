use std::path::Path;

use anyhow::Context;

use crate::{
    compress::compressor::CompressOpts,
    container::template::ContainerTemplate,
    foundation::error::{FramecraftError, FramecraftResult},
};

/// Chat platform upload ceiling (8 MiB).
pub const DEFAULT_SIZE_LIMIT_BYTES: u64 = 8 * 1024 * 1024;

/// Runtime configuration, usually read from a JSON file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Byte ceiling every produced file must fit.
    pub size_limit_bytes: u64,
    /// Run the adaptive compressor after each operation.
    pub compress_output: bool,
    pub compress: CompressOpts,
    /// Worker threads for per-frame work; `None` uses every core.
    pub threads: Option<usize>,
    pub templates: Vec<ContainerTemplate>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            size_limit_bytes: DEFAULT_SIZE_LIMIT_BYTES,
            compress_output: true,
            compress: CompressOpts::default(),
            threads: None,
            templates: Vec::new(),
        }
    }
}

impl MediaConfig {
    pub fn from_json_str(s: &str) -> FramecraftResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FramecraftError::config(format!("parse config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> FramecraftResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> FramecraftResult<()> {
        if self.size_limit_bytes == 0 {
            return Err(FramecraftError::config("size_limit_bytes must be > 0"));
        }
        if self.threads == Some(0) {
            return Err(FramecraftError::config("threads must be >= 1 when set"));
        }
        self.compress.validate()?;
        for (i, t) in self.templates.iter().enumerate() {
            t.validate()?;
            if self.templates[..i].iter().any(|o| o.name == t.name) {
                return Err(FramecraftError::config(format!(
                    "duplicate container template '{}'",
                    t.name
                )));
            }
        }
        Ok(())
    }

    pub fn template(&self, name: &str) -> Option<&ContainerTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
