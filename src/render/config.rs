//! Renderer settings, loadable from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{PixError, PixResult};
use crate::scale::Filter;

/// Settings of a [`crate::Render`] instance.
///
/// Every field has a default, so a JSON document only needs the fields it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Scale with separable kernels instead of nearest neighbour.
    pub antialiasing: bool,
    /// Window function for anti-aliased scaling.
    pub filter: Filter,
    /// Pool worker count; `0` picks the hardware concurrency (at most 8).
    pub threads: usize,
    /// Gaussian sigma of the background blur.
    pub blur_sigma: f64,
    /// Blur synthesized backgrounds.
    pub blur_background: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            antialiasing: true,
            filter: Filter::default(),
            threads: 0,
            blur_sigma: 20.0,
            blur_background: true,
        }
    }
}

impl RenderConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(s: &str) -> PixResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| PixError::validation(format!("parse render config JSON: {e}")))
    }

    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PixResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PixError::validation(format!("parse render config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PixResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PixError::validation(format!("open render config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject settings the renderer cannot run with.
    pub fn validate(&self) -> PixResult<()> {
        if !self.blur_sigma.is_finite() || self.blur_sigma <= 0.0 {
            return Err(PixError::validation(format!(
                "blur_sigma must be finite and > 0, got {}",
                self.blur_sigma
            )));
        }
        if self.threads > 256 {
            return Err(PixError::validation(format!(
                "threads must be <= 256, got {}",
                self.threads
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
