//! Color space definition.
//!
//! A color space is a name plus the transforms that move values to and from
//! the config's reference space. Family and encoding are kept as metadata
//! for listings.
//!
//! # Example
//!
//! ```
//! use tricolor_ocio::{ColorSpace, Encoding, Family};
//!
//! let cs = ColorSpace::builder("ACEScg")
//!     .family(Family::Aces)
//!     .encoding(Encoding::SceneLinear)
//!     .build();
//!
//! assert_eq!(cs.name(), "ACEScg");
//! assert!(cs.encoding().is_linear());
//! ```

use crate::transform::Transform;

/// Color encoding type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Scene-referred linear.
    SceneLinear,
    /// Display-referred linear.
    DisplayLinear,
    /// Logarithmic encoding.
    Log,
    /// OETF-encoded SDR video (sRGB, Rec.709, gamma).
    Sdr,
    /// Non-color data.
    Data,
    /// Unknown/unspecified encoding.
    #[default]
    Unknown,
}

impl Encoding {
    /// Parses encoding from an OCIO config string.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "scene-linear" | "scene_linear" | "linear" => Self::SceneLinear,
            "display-linear" | "display_linear" => Self::DisplayLinear,
            "log" => Self::Log,
            "sdr-video" | "sdr_video" | "sdr" => Self::Sdr,
            "data" => Self::Data,
            _ => Self::Unknown,
        }
    }

    /// Returns the OCIO config string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SceneLinear => "scene-linear",
            Self::DisplayLinear => "display-linear",
            Self::Log => "log",
            Self::Sdr => "sdr-video",
            Self::Data => "data",
            Self::Unknown => "",
        }
    }

    /// Checks if this is a linear encoding.
    #[inline]
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::SceneLinear | Self::DisplayLinear)
    }
}

/// Color space family, used to group listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Family {
    /// Scene-referred spaces.
    Scene,
    /// Display-referred spaces.
    Display,
    /// Utility spaces.
    Utility,
    /// ACES spaces.
    Aces,
    /// Custom/uncategorized.
    #[default]
    Other,
}

impl Family {
    /// Parses family from config string.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "scene" | "scene-referred" => Self::Scene,
            "display" | "display-referred" => Self::Display,
            "utility" | "utilities" => Self::Utility,
            "aces" => Self::Aces,
            _ => Self::Other,
        }
    }

    /// Returns display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scene => "Scene",
            Self::Display => "Display",
            Self::Utility => "Utility",
            Self::Aces => "ACES",
            Self::Other => "",
        }
    }
}

/// Named color space with transforms to/from the reference space.
#[derive(Debug, Clone)]
pub struct ColorSpace {
    name: String,
    aliases: Vec<String>,
    description: String,
    family: Family,
    encoding: Encoding,
    is_data: bool,
    to_reference: Option<Transform>,
    from_reference: Option<Transform>,
}

impl ColorSpace {
    /// Creates a color space with no transforms (same as reference).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            family: Family::default(),
            encoding: Encoding::default(),
            is_data: false,
            to_reference: None,
            from_reference: None,
        }
    }

    /// Creates a builder for constructing color spaces.
    #[inline]
    pub fn builder(name: impl Into<String>) -> ColorSpaceBuilder {
        ColorSpaceBuilder::new(name)
    }

    /// Returns the color space name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all aliases.
    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the family.
    #[inline]
    pub fn family(&self) -> Family {
        self.family
    }

    /// Returns the encoding.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Checks if this is a data (non-color) space.
    ///
    /// Data spaces never transform: conversions into or out of them are
    /// passthrough.
    #[inline]
    pub fn is_data(&self) -> bool {
        self.is_data
    }

    /// Returns the transform to reference space.
    #[inline]
    pub fn to_reference(&self) -> Option<&Transform> {
        self.to_reference.as_ref()
    }

    /// Returns the transform from reference space.
    #[inline]
    pub fn from_reference(&self) -> Option<&Transform> {
        self.from_reference.as_ref()
    }

    /// Checks if a name or alias matches (case-insensitive).
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Builder for [`ColorSpace`].
#[derive(Debug)]
pub struct ColorSpaceBuilder {
    inner: ColorSpace,
}

impl ColorSpaceBuilder {
    /// Creates a new builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: ColorSpace::new(name),
        }
    }

    /// Adds an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.inner.aliases.push(alias.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.inner.description = desc.into();
        self
    }

    /// Sets the family.
    pub fn family(mut self, family: Family) -> Self {
        self.inner.family = family;
        self
    }

    /// Sets the encoding. `Encoding::Data` also marks the space as data.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.inner.encoding = encoding;
        if encoding == Encoding::Data {
            self.inner.is_data = true;
        }
        self
    }

    /// Marks as data (non-color) space.
    pub fn is_data(mut self, is_data: bool) -> Self {
        self.inner.is_data = is_data;
        self
    }

    /// Sets the transform to reference space.
    pub fn to_reference(mut self, transform: Transform) -> Self {
        self.inner.to_reference = Some(transform);
        self
    }

    /// Sets the transform from reference space.
    pub fn from_reference(mut self, transform: Transform) -> Self {
        self.inner.from_reference = Some(transform);
        self
    }

    /// Builds the color space.
    pub fn build(self) -> ColorSpace {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_colorspace() {
        let cs = ColorSpace::builder("ACEScg")
            .alias("ACES - ACEScg")
            .family(Family::Aces)
            .encoding(Encoding::SceneLinear)
            .description("ACES CG working space")
            .build();

        assert_eq!(cs.name(), "ACEScg");
        assert_eq!(cs.family(), Family::Aces);
        assert!(cs.matches_name("acescg"));
        assert!(cs.matches_name("ACES - ACEScg"));
        assert!(!cs.matches_name("sRGB"));
    }

    #[test]
    fn encoding_parse() {
        assert_eq!(Encoding::parse("scene-linear"), Encoding::SceneLinear);
        assert_eq!(Encoding::parse("sdr-video"), Encoding::Sdr);
        assert_eq!(Encoding::parse("hdr-video"), Encoding::Unknown);
        assert_eq!(Encoding::Sdr.as_str(), "sdr-video");
    }

    #[test]
    fn data_encoding_marks_data() {
        let cs = ColorSpace::builder("Raw").encoding(Encoding::Data).build();
        assert!(cs.is_data());
    }
}
