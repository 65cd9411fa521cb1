//! Color space registry.
//!
//! Enumerates the selectable color spaces once at startup and resolves the
//! reference space the baseline colors are assumed to be in.

use tracing::{debug, info, warn};

use crate::config::{ColorConfig, ConfigSource, RawConfig};
use crate::error::PipelineError;

/// Number of spaces reachable with the digit keys 1..9.
pub const KEY_ADDRESSABLE: usize = 9;

/// Ordered, immutable list of color spaces plus the reference space.
#[derive(Debug)]
pub struct ColorSpaceRegistry {
    config: Box<dyn ColorConfig>,
    spaces: Vec<String>,
    reference: String,
    fallback: bool,
}

impl ColorSpaceRegistry {
    /// Loads the registry from `source`.
    ///
    /// Never fails: an unavailable or empty configuration yields the raw
    /// fallback with no spaces.
    pub fn load(source: &ConfigSource) -> Self {
        match source.open() {
            Ok(config) => Self::from_config(config),
            Err(e) => {
                warn!(source = %source, error = %e, "falling back to raw");
                Self::fallback()
            }
        }
    }

    /// Builds the registry over an already opened configuration.
    pub fn from_config(config: Box<dyn ColorConfig>) -> Self {
        let mut spaces: Vec<String> = Vec::with_capacity(config.num_spaces());
        for i in 0..config.num_spaces() {
            let Some(name) = config.space_name_at(i) else {
                continue;
            };
            if spaces.iter().any(|s| s == name) {
                debug!(name, "dropping duplicate color space");
                continue;
            }
            spaces.push(name.to_string());
        }

        if spaces.is_empty() {
            let e = PipelineError::ConfigUnavailable {
                reason: "configuration declares no color spaces".into(),
            };
            warn!(error = %e, "falling back to raw");
            return Self::fallback();
        }

        if spaces.len() > KEY_ADDRESSABLE {
            debug!(
                total = spaces.len(),
                "only the first {KEY_ADDRESSABLE} color spaces are key-addressable"
            );
        }

        let reference = resolve_reference(config.as_ref(), &spaces);
        info!(spaces = spaces.len(), reference = %reference, "color spaces loaded");

        Self {
            config,
            spaces,
            reference,
            fallback: false,
        }
    }

    /// Raw no-op registry: no spaces, reference `raw`.
    pub fn fallback() -> Self {
        Self {
            config: Box::new(RawConfig),
            spaces: Vec::new(),
            reference: RawConfig::SPACE.to_string(),
            fallback: true,
        }
    }

    /// Color space names in order.
    #[inline]
    pub fn spaces(&self) -> &[String] {
        &self.spaces
    }

    /// Number of color spaces.
    #[inline]
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    /// Returns true if there are no color spaces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Name at `index`.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.spaces.get(index).map(String::as_str)
    }

    /// Index of `name`, compared case-insensitively.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.spaces.iter().position(|s| s.eq_ignore_ascii_case(name))
    }

    /// Reference space the baseline colors are expressed in.
    #[inline]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// True when running on the raw fallback.
    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Underlying configuration.
    pub fn config(&self) -> &dyn ColorConfig {
        self.config.as_ref()
    }
}

/// Picks the reference space: `scene_linear` role, else the first space,
/// else `raw`.
///
/// The first-space choice is a best guess; nothing guarantees the baseline
/// colors are actually in that space.
pub fn resolve_reference(config: &dyn ColorConfig, spaces: &[String]) -> String {
    if let Some(role) = config.role_scene_linear() {
        if let Some(name) = spaces.iter().find(|s| s.eq_ignore_ascii_case(role)) {
            return name.clone();
        }
        debug!(role, "scene_linear role does not name a listed space");
    }
    spaces
        .first()
        .cloned()
        .unwrap_or_else(|| RawConfig::SPACE.to_string())
}
