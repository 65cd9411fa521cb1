//! Standard color space roles.
//!
//! Roles reference color spaces by purpose rather than by name. Only the
//! handful of roles tricolor cares about get named constants; any other
//! role in a config is still stored and queryable.

use std::collections::HashMap;

/// Standard OCIO role names.
pub mod names {
    /// Scene-referred linear reference.
    pub const REFERENCE: &str = "reference";
    /// Default input color space.
    pub const DEFAULT: &str = "default";
    /// Non-color data (normals, masks).
    pub const DATA: &str = "data";
    /// Scene-referred linear working space.
    pub const SCENE_LINEAR: &str = "scene_linear";
    /// Linear compositing space.
    pub const COMPOSITING_LINEAR: &str = "compositing_linear";
    /// Color grading space.
    pub const COLOR_TIMING: &str = "color_timing";
    /// ACES interchange scene-referred.
    pub const ACES_INTERCHANGE: &str = "aces_interchange";
}

/// Role to color space mapping.
#[derive(Debug, Clone, Default)]
pub struct Roles {
    mapping: HashMap<String, String>,
}

impl Roles {
    /// Creates an empty roles mapping.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines (or redefines) a role.
    #[inline]
    pub fn define(&mut self, role: impl Into<String>, colorspace: impl Into<String>) {
        self.mapping.insert(role.into(), colorspace.into());
    }

    /// Gets the color space name for a role.
    #[inline]
    pub fn get(&self, role: &str) -> Option<&str> {
        self.mapping.get(role).map(String::as_str)
    }

    /// Checks if a role is defined.
    #[inline]
    pub fn contains(&self, role: &str) -> bool {
        self.mapping.contains_key(role)
    }

    /// Returns all defined roles.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mapping.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of defined roles.
    #[inline]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Checks if no roles are defined.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Gets the reference color space name.
    #[inline]
    pub fn reference(&self) -> Option<&str> {
        self.get(names::REFERENCE)
    }

    /// Gets the scene_linear color space name.
    #[inline]
    pub fn scene_linear(&self) -> Option<&str> {
        self.get(names::SCENE_LINEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let mut roles = Roles::new();
        roles.define(names::SCENE_LINEAR, "ACEScg");
        roles.define(names::REFERENCE, "ACES2065-1");

        assert_eq!(roles.scene_linear(), Some("ACEScg"));
        assert_eq!(roles.reference(), Some("ACES2065-1"));
        assert_eq!(roles.get("unknown"), None);
        assert_eq!(roles.len(), 2);
    }

    #[test]
    fn redefine_overwrites() {
        let mut roles = Roles::new();
        roles.define("scene_linear", "Linear");
        roles.define("scene_linear", "ACEScg");

        assert_eq!(roles.scene_linear(), Some("ACEScg"));
        assert_eq!(roles.iter().count(), 1);
    }
}
