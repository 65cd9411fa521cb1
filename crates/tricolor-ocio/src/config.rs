//! OCIO configuration model and YAML loading.
//!
//! Only the part of the `.ocio` format tricolor needs is understood:
//! profile version, name, roles and color spaces with their reference
//! transforms. Displays, views, looks and file rules are ignored.
//!
//! # Example
//!
//! ```
//! use tricolor_ocio::Config;
//!
//! let yaml = r#"
//! ocio_profile_version: 2
//! roles:
//!   scene_linear: Linear
//! colorspaces:
//!   - !<ColorSpace>
//!     name: Linear
//!   - !<ColorSpace>
//!     name: Gamma 2.2
//!     from_scene_reference: !<ExponentTransform> {value: 2.2, direction: inverse}
//! "#;
//!
//! let config = Config::from_yaml_str(yaml).unwrap();
//! let proc = config.processor("Linear", "Gamma 2.2").unwrap();
//! let mut px = [[0.25_f32, 0.25, 0.25]];
//! proc.apply_rgb(&mut px);
//! assert!((px[0][0] - 0.25_f32.powf(1.0 / 2.2)).abs() < 1e-5);
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_yaml::value::TaggedValue;
use serde_yaml::Value;
use tracing::debug;

use crate::colorspace::{ColorSpace, Encoding, Family};
use crate::error::{OcioError, OcioResult};
use crate::processor::Processor;
use crate::role::Roles;
use crate::transform::*;

/// OCIO writes verbatim tags (`!<MatrixTransform>`); serde_yaml wants `!MatrixTransform`.
static VERBATIM_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!<([A-Za-z0-9_]+)>").expect("static regex")
});

/// OCIO configuration.
///
/// Holds an ordered list of color spaces and the role mapping.
#[derive(Debug, Clone, Default)]
pub struct Config {
    name: String,
    version: ConfigVersion,
    colorspaces: Vec<ColorSpace>,
    roles: Roles,
}

/// Config format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigVersion {
    /// OCIO v1.x.
    #[default]
    V1,
    /// OCIO v2.x.
    V2,
}

impl Config {
    /// Creates a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> OcioResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OcioError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        debug!(
            path = %path.display(),
            colorspaces = config.colorspaces.len(),
            "loaded OCIO config"
        );
        Ok(config)
    }

    /// Loads configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> OcioResult<Self> {
        let normalized = VERBATIM_TAG.replace_all(yaml, "!$1");
        let raw: RawConfig = serde_yaml::from_str(&normalized)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> OcioResult<Self> {
        let version_str = match &raw.ocio_profile_version {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            other => format!("{other:?}"),
        };
        let version = if version_str.starts_with('2') {
            ConfigVersion::V2
        } else if version_str.starts_with('1') {
            ConfigVersion::V1
        } else {
            return Err(OcioError::UnsupportedVersion {
                version: version_str,
            });
        };

        let mut config = Self {
            name: raw.name.unwrap_or_default(),
            version,
            ..Self::default()
        };

        for (role, cs) in raw.roles.unwrap_or_default() {
            config.roles.define(role, cs);
        }

        for value in raw.colorspaces.unwrap_or_default() {
            let raw_cs: RawColorSpace = serde_yaml::from_value(untag(value))?;
            config.colorspaces.push(parse_colorspace(raw_cs)?);
        }

        Ok(config)
    }

    /// Returns config name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets config name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns config version.
    #[inline]
    pub fn version(&self) -> ConfigVersion {
        self.version
    }

    /// Returns all color spaces in declaration order.
    #[inline]
    pub fn colorspaces(&self) -> &[ColorSpace] {
        &self.colorspaces
    }

    /// Gets a color space by role, name or alias.
    pub fn colorspace(&self, name: &str) -> Option<&ColorSpace> {
        if let Some(cs_name) = self.roles.get(name) {
            return self.colorspaces.iter().find(|cs| cs.matches_name(cs_name));
        }
        self.colorspaces.iter().find(|cs| cs.matches_name(name))
    }

    /// Returns color space names in declaration order.
    pub fn colorspace_names(&self) -> impl Iterator<Item = &str> {
        self.colorspaces.iter().map(|cs| cs.name())
    }

    /// Returns the roles mapping.
    #[inline]
    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    /// Adds a color space.
    pub fn add_colorspace(&mut self, cs: ColorSpace) {
        self.colorspaces.push(cs);
    }

    /// Defines a role.
    pub fn set_role(&mut self, role: impl Into<String>, colorspace: impl Into<String>) {
        self.roles.define(role, colorspace);
    }

    /// Creates a processor converting `src` to `dst`.
    ///
    /// The chain is src -> reference -> dst. A space that only declares the
    /// opposite direction is inverted. Conversions between a space and
    /// itself, or touching a data space, are identity.
    pub fn processor(&self, src: &str, dst: &str) -> OcioResult<Processor> {
        let src_cs = self
            .colorspace(src)
            .ok_or_else(|| OcioError::ColorSpaceNotFound { name: src.into() })?;
        let dst_cs = self
            .colorspace(dst)
            .ok_or_else(|| OcioError::ColorSpaceNotFound { name: dst.into() })?;

        if src_cs.name() == dst_cs.name() || src_cs.is_data() || dst_cs.is_data() {
            return Ok(Processor::new());
        }

        let mut chain = Vec::with_capacity(2);
        match (src_cs.to_reference(), src_cs.from_reference()) {
            (Some(t), _) => chain.push((t, TransformDirection::Forward)),
            (None, Some(t)) => chain.push((t, TransformDirection::Inverse)),
            (None, None) => {}
        }
        match (dst_cs.from_reference(), dst_cs.to_reference()) {
            (Some(t), _) => chain.push((t, TransformDirection::Forward)),
            (None, Some(t)) => chain.push((t, TransformDirection::Inverse)),
            (None, None) => {}
        }

        Processor::from_chain(chain)
    }
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => tagged.value,
        other => other,
    }
}

fn parse_colorspace(raw: RawColorSpace) -> OcioResult<ColorSpace> {
    let mut builder = ColorSpace::builder(&raw.name);

    if let Some(desc) = raw.description {
        builder = builder.description(desc.trim());
    }
    if let Some(family) = raw.family {
        builder = builder.family(Family::parse(&family));
    }
    if let Some(encoding) = raw.encoding {
        builder = builder.encoding(Encoding::parse(&encoding));
    }
    if raw.isdata == Some(true) {
        builder = builder.is_data(true);
    }
    for alias in raw.aliases.unwrap_or_default() {
        builder = builder.alias(alias);
    }

    // v1 keys win over v2 scene-reference keys when both are present.
    if let Some(t) = raw.to_reference.or(raw.to_scene_reference) {
        builder = builder.to_reference(parse_transform(t)?);
    }
    if let Some(t) = raw.from_reference.or(raw.from_scene_reference) {
        builder = builder.from_reference(parse_transform(t)?);
    }

    Ok(builder.build())
}

fn parse_transform(value: Value) -> OcioResult<Transform> {
    let tagged = match value {
        Value::Tagged(tagged) => *tagged,
        Value::Sequence(items) => {
            let transforms = items
                .into_iter()
                .map(parse_transform)
                .collect::<OcioResult<Vec<_>>>()?;
            return Ok(Transform::group(transforms));
        }
        other => {
            return Err(OcioError::InvalidTransform {
                reason: format!("expected a tagged transform, got {other:?}"),
            });
        }
    };

    let TaggedValue { tag, value } = tagged;
    let tag = tag.to_string();
    let kind = tag.trim_start_matches('!');

    let transform = match kind {
        "MatrixTransform" => {
            let raw: RawMatrixTransform = serde_yaml::from_value(value)?;
            let matrix = match raw.matrix {
                Some(m) => to_array::<16>(&m, "matrix")?,
                None => IDENTITY_MATRIX,
            };
            let offset = match raw.offset {
                Some(o) => to_array::<4>(&o, "offset")?,
                None => [0.0; 4],
            };
            Transform::Matrix(MatrixTransform {
                matrix,
                offset,
                direction: direction(raw.direction.as_deref()),
            })
        }
        "ExponentTransform" => {
            let raw: RawExponentTransform = serde_yaml::from_value(value)?;
            Transform::Exponent(ExponentTransform {
                value: raw.value.to_rgba(),
                direction: direction(raw.direction.as_deref()),
            })
        }
        "ExponentWithLinearTransform" => {
            let raw: RawExponentWithLinearTransform = serde_yaml::from_value(value)?;
            Transform::ExponentWithLinear(ExponentWithLinearTransform {
                gamma: raw.gamma.to_rgba(),
                offset: raw.offset.to_rgba(),
                direction: direction(raw.direction.as_deref()),
            })
        }
        "LogTransform" => {
            let raw: RawLogTransform = serde_yaml::from_value(value)?;
            Transform::Log(LogTransform {
                base: raw.base.unwrap_or(2.0),
                direction: direction(raw.direction.as_deref()),
            })
        }
        "RangeTransform" => {
            let raw: RawRangeTransform = serde_yaml::from_value(value)?;
            Transform::Range(RangeTransform {
                min_in: raw.min_in_value,
                max_in: raw.max_in_value,
                min_out: raw.min_out_value,
                max_out: raw.max_out_value,
                direction: direction(raw.direction.as_deref()),
            })
        }
        "GroupTransform" => {
            let raw: RawGroupTransform = serde_yaml::from_value(value)?;
            let transforms = raw
                .children
                .into_iter()
                .map(parse_transform)
                .collect::<OcioResult<Vec<_>>>()?;
            Transform::Group(GroupTransform {
                transforms,
                direction: direction(raw.direction.as_deref()),
            })
        }
        "BuiltinTransform" => {
            let raw: RawBuiltinTransform = serde_yaml::from_value(value)?;
            match TransferStyle::parse(&raw.style) {
                Some(style) => Transform::transfer(style, direction(raw.direction.as_deref())),
                None => Transform::Unsupported(format!("BuiltinTransform({})", raw.style)),
            }
        }
        other => Transform::Unsupported(other.to_string()),
    };

    Ok(transform)
}

fn direction(s: Option<&str>) -> TransformDirection {
    s.map(TransformDirection::parse).unwrap_or_default()
}

fn to_array<const N: usize>(values: &[f64], what: &str) -> OcioResult<[f64; N]> {
    values.try_into().map_err(|_| OcioError::InvalidTransform {
        reason: format!("{what} needs {N} values, got {}", values.len()),
    })
}

#[rustfmt::skip]
const IDENTITY_MATRIX: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

// ============================================================================
// Raw YAML structures for serde
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawConfig {
    ocio_profile_version: Value,
    name: Option<String>,
    roles: Option<HashMap<String, String>>,
    colorspaces: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawColorSpace {
    name: String,
    description: Option<String>,
    family: Option<String>,
    encoding: Option<String>,
    isdata: Option<bool>,
    aliases: Option<Vec<String>>,
    to_reference: Option<Value>,
    from_reference: Option<Value>,
    to_scene_reference: Option<Value>,
    from_scene_reference: Option<Value>,
}

/// OCIO allows a single number where a per-channel list is expected.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScalarOrList {
    Scalar(f64),
    List(Vec<f64>),
}

impl ScalarOrList {
    fn to_rgba(&self) -> [f64; 4] {
        match self {
            Self::Scalar(v) => [*v, *v, *v, 1.0],
            Self::List(l) => {
                let get = |i: usize, default: f64| l.get(i).copied().unwrap_or(default);
                let r = get(0, 1.0);
                [r, get(1, r), get(2, r), get(3, 1.0)]
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMatrixTransform {
    matrix: Option<Vec<f64>>,
    offset: Option<Vec<f64>>,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExponentTransform {
    value: ScalarOrList,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExponentWithLinearTransform {
    gamma: ScalarOrList,
    offset: ScalarOrList,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLogTransform {
    base: Option<f64>,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRangeTransform {
    min_in_value: Option<f64>,
    max_in_value: Option<f64>,
    min_out_value: Option<f64>,
    max_out_value: Option<f64>,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGroupTransform {
    children: Vec<Value>,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBuiltinTransform {
    style: String,
    direction: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const STUDIO_CONFIG: &str = r#"
ocio_profile_version: 2.1
name: test-studio

roles:
  reference: Linear
  scene_linear: Linear

colorspaces:
  - !<ColorSpace>
    name: Linear
    aliases: [lin_rec709]
    family: Scene
    encoding: scene-linear

  - !<ColorSpace>
    name: sRGB
    family: Display
    encoding: sdr-video
    from_scene_reference: !<ExponentWithLinearTransform> {gamma: 2.4, offset: 0.055, direction: inverse}

  - !<ColorSpace>
    name: ACEScg
    to_scene_reference: !<GroupTransform>
      children:
        - !<MatrixTransform> {matrix: [1.705, -0.622, -0.083, 0, -0.130, 1.141, -0.011, 0, -0.024, -0.129, 1.153, 0, 0, 0, 0, 1]}

  - !<ColorSpace>
    name: Film
    from_scene_reference: !<FileTransform> {src: film.cube}

  - !<ColorSpace>
    name: Raw
    isdata: true
"#;

    fn studio() -> Config {
        Config::from_yaml_str(STUDIO_CONFIG).unwrap()
    }

    #[test]
    fn parse_verbatim_tags() {
        let config = studio();
        assert_eq!(config.version(), ConfigVersion::V2);
        assert_eq!(config.name(), "test-studio");
        let names: Vec<_> = config.colorspace_names().collect();
        assert_eq!(names, ["Linear", "sRGB", "ACEScg", "Film", "Raw"]);
    }

    #[test]
    fn roles_and_aliases_resolve() {
        let config = studio();
        assert_eq!(config.colorspace("scene_linear").unwrap().name(), "Linear");
        assert_eq!(config.colorspace("LIN_REC709").unwrap().name(), "Linear");
        assert!(config.colorspace("nope").is_none());
    }

    #[test]
    fn encode_to_srgb() {
        let config = studio();
        let proc = config.processor("Linear", "sRGB").unwrap();
        let mut px = [[0.18_f32, 1.0, 0.0]];
        proc.apply_rgb(&mut px);
        assert_abs_diff_eq!(px[0][0], 0.4613, epsilon = 2e-3);
        assert_abs_diff_eq!(px[0][1], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(px[0][2], 0.0);
    }

    #[test]
    fn to_reference_only_space_is_inverted() {
        let config = studio();
        let there = config.processor("Linear", "ACEScg").unwrap();
        let back = config.processor("ACEScg", "Linear").unwrap();
        let mut px = [[0.5_f32, 0.25, 0.125]];
        there.apply_rgb(&mut px);
        back.apply_rgb(&mut px);
        assert_abs_diff_eq!(px[0][0], 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(px[0][2], 0.125, epsilon = 1e-4);
    }

    #[test]
    fn unknown_transform_fails_at_processor_build() {
        let config = studio();
        let err = config.processor("Linear", "Film").unwrap_err();
        assert!(matches!(err, OcioError::UnsupportedTransform { .. }));
    }

    #[test]
    fn data_space_is_passthrough() {
        let config = studio();
        assert!(config.processor("sRGB", "Raw").unwrap().is_identity());
    }

    #[test]
    fn missing_colorspace() {
        let err = studio().processor("NonExistent", "sRGB");
        assert!(matches!(
            err,
            Err(OcioError::ColorSpaceNotFound { name }) if name == "NonExistent"
        ));
    }

    #[test]
    fn bad_version_rejected() {
        let err = Config::from_yaml_str("ocio_profile_version: 7\n").unwrap_err();
        assert!(matches!(err, OcioError::UnsupportedVersion { .. }));
    }

    #[test]
    fn short_matrix_rejected() {
        let yaml = r#"
ocio_profile_version: 1
colorspaces:
  - !<ColorSpace>
    name: Broken
    to_reference: !<MatrixTransform> {matrix: [1, 0, 0]}
"#;
        let err = Config::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, OcioError::InvalidTransform { .. }));
    }

    #[test]
    fn missing_file() {
        let err = Config::from_file("/definitely/not/here/config.ocio").unwrap_err();
        assert!(matches!(err, OcioError::ConfigNotFound { .. }));
    }
}
