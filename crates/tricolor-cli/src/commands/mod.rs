//! CLI command implementations

pub mod convert;
pub mod spaces;
pub mod view;

use tracing::info;
use tricolor_core::{ColorSpaceRegistry, ConfigSource};

/// Loads the registry and reports which configuration is active.
pub fn load_registry(source: &ConfigSource) -> ColorSpaceRegistry {
    let registry = ColorSpaceRegistry::load(source);
    if registry.is_fallback() {
        info!(source = %source, "no usable color config, running raw");
    } else {
        info!(source = %source, spaces = registry.len(), "config loaded");
    }
    registry
}
