// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What to do with a filter name the engine does not recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFilterPolicy {
    /// Fail with `RasterError::UnsupportedFilter`.
    #[default]
    Reject,
    /// Return the input unchanged and log a warning.
    Passthrough,
}

/// Settings owned by a filter engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Handling of unrecognised filter names.
    pub unknown_filter: UnknownFilterPolicy,
    /// Fraction of the image width used as the glitch red-channel offset.
    pub glitch_channel_shift: f64,
    /// Optional upper bound on the blur radius. `None` accepts any radius.
    pub max_blur_radius: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unknown_filter: UnknownFilterPolicy::Reject,
            glitch_channel_shift: 0.02,
            max_blur_radius: None,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document. Missing fields fall back to the defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }
}
