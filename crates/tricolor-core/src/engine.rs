//! Color transform engine.
//!
//! Maps batches of RGB triples from one named space to another through the
//! active configuration. Evaluators are compiled on first use and cached by
//! `(src, dst)`; failed builds are not cached so a later call retries.
//!
//! ```
//! use tricolor_core::{ColorSpaceRegistry, ColorTransformEngine};
//! use tricolor_ocio::builtin;
//!
//! let registry = ColorSpaceRegistry::from_config(Box::new(builtin::studio()));
//! let mut engine = ColorTransformEngine::new();
//!
//! let out = engine.apply(&registry, &[[0.18, 0.18, 0.18]], "Linear", "sRGB").unwrap();
//! assert!((out[0][0] - 0.461).abs() < 1e-2);
//! ```

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::RgbEvaluator;
use crate::error::{PipelineError, PipelineResult};
use crate::registry::ColorSpaceRegistry;
use crate::Rgb;

/// Cache key for evaluator lookup.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CacheKey {
    src: String,
    dst: String,
}

/// Applies src -> dst transforms to RGB triples.
///
/// An engine caches evaluators for one registry; do not share it across
/// configurations.
#[derive(Default)]
pub struct ColorTransformEngine {
    cache: HashMap<CacheKey, Box<dyn RgbEvaluator>>,
}

impl std::fmt::Debug for ColorTransformEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorTransformEngine")
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl ColorTransformEngine {
    /// Creates an engine with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached evaluators.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Drops all cached evaluators.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Maps `triples` from `src` to `dst`.
    ///
    /// Equal names short-circuit to an exact copy without consulting the
    /// configuration. Failures are logged and returned; the caller decides
    /// the fallback.
    pub fn apply(
        &mut self,
        registry: &ColorSpaceRegistry,
        triples: &[Rgb],
        src: &str,
        dst: &str,
    ) -> PipelineResult<Vec<Rgb>> {
        if src == dst {
            return Ok(triples.to_vec());
        }

        let result = self.evaluate(registry, triples, src, dst);
        if let Err(e) = &result {
            warn!(error = %e, "color transform failed");
        }
        result
    }

    fn evaluate(
        &mut self,
        registry: &ColorSpaceRegistry,
        triples: &[Rgb],
        src: &str,
        dst: &str,
    ) -> PipelineResult<Vec<Rgb>> {
        let key = CacheKey {
            src: src.to_string(),
            dst: dst.to_string(),
        };

        if !self.cache.contains_key(&key) {
            let evaluator = registry
                .config()
                .build_transform(src, dst)
                .map_err(|e| PipelineError::TransformBuild {
                    src: src.into(),
                    dst: dst.into(),
                    reason: e.to_string(),
                })?;
            debug!(src, dst, "compiled color transform");
            self.cache.insert(key.clone(), evaluator);
        }

        let eval_error = |reason: String| PipelineError::TransformEval {
            src: src.into(),
            dst: dst.into(),
            reason,
        };

        let evaluator = self
            .cache
            .get(&key)
            .ok_or_else(|| eval_error("evaluator missing from cache".into()))?;

        let mut out = triples.to_vec();
        evaluator
            .apply_rgb(&mut out)
            .map_err(|e| eval_error(e.to_string()))?;

        if let Some(bad) = out.iter().flatten().find(|v| !v.is_finite()) {
            return Err(eval_error(format!("non-finite output {bad}")));
        }

        Ok(out)
    }
}
