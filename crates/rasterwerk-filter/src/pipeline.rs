// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter pipelines — an ordered list of filter specs applied one after another.

use rand::Rng;
use rasterwerk_core::error::Result;
use rasterwerk_core::{FilterSpec, RasterBuffer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::engine::PixelFilterEngine;

/// Ordered chain of filters.
///
/// Serialises as a plain JSON array of specs:
/// `[{"kind":"grayscale"},{"kind":"blur","radius":2}]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterPipeline {
    steps: Vec<FilterSpec>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step, builder style.
    pub fn then(mut self, spec: FilterSpec) -> Self {
        self.steps.push(spec);
        self
    }

    pub fn push(&mut self, spec: FilterSpec) {
        self.steps.push(spec);
    }

    pub fn steps(&self) -> &[FilterSpec] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    // -- Parsing --------------------------------------------------------------

    /// Parse the compact comma-separated form, e.g. `grayscale,blur:2,glitch:0.3`.
    ///
    /// Names go through [`PixelFilterEngine::parse_filter`], so unknown names are
    /// rejected or dropped according to the engine's policy. Empty segments are
    /// ignored.
    pub fn parse(text: &str, engine: &PixelFilterEngine) -> Result<Self> {
        let mut pipeline = Self::new();
        for segment in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if let Some(spec) = engine.parse_filter(segment)? {
                pipeline.push(spec);
            }
        }
        Ok(pipeline)
    }

    /// Parse a JSON array of specs and validate every step.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let pipeline: Self = serde_json::from_str(json)?;
        for spec in &pipeline.steps {
            spec.validate()?;
        }
        Ok(pipeline)
    }

    /// Read a JSON pipeline file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    // -- Execution ------------------------------------------------------------

    /// Run every step in order. An empty pipeline returns a copy of the input.
    pub fn apply(&self, engine: &PixelFilterEngine, buffer: &RasterBuffer) -> Result<RasterBuffer> {
        let mut rng = rand::rng();
        self.apply_with_rng(engine, buffer, &mut rng)
    }

    /// Run every step in order with an explicit random source.
    #[instrument(
        skip_all,
        fields(steps = self.steps.len(), width = buffer.width(), height = buffer.height())
    )]
    pub fn apply_with_rng<R: Rng>(
        &self,
        engine: &PixelFilterEngine,
        buffer: &RasterBuffer,
        rng: &mut R,
    ) -> Result<RasterBuffer> {
        info!("Running filter pipeline");
        buffer.validate()?;
        let mut current = buffer.clone();
        for (index, spec) in self.steps.iter().enumerate() {
            debug!(index, filter = %spec, "Pipeline step");
            current = engine.apply_filter_with_rng(&current, spec, rng)?;
        }
        Ok(current)
    }
}

impl FromIterator<FilterSpec> for FilterPipeline {
    fn from_iter<I: IntoIterator<Item = FilterSpec>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, spec) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{spec}")?;
        }
        Ok(())
    }
}
