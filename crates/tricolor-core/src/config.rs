//! Color configuration seam.
//!
//! The pipeline only needs a handful of queries from a color-management
//! configuration. [`ColorConfig`] captures them so the registry and engine
//! work the same over an OCIO [`Config`], the raw fallback, or a test fake.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};
use tricolor_ocio::{ColorSpace, Config, OcioError, OcioResult, Processor, builtin};

use crate::error::{PipelineError, PipelineResult};

/// Environment variable holding the path of the active `.ocio` file.
pub const OCIO_ENV: &str = "OCIO";

/// Per-pixel evaluator produced by [`ColorConfig::build_transform`].
pub trait RgbEvaluator {
    /// Transforms RGB triples in place.
    fn apply_rgb(&self, pixels: &mut [[f32; 3]]) -> OcioResult<()>;
}

/// What the pipeline needs from a color-management configuration.
pub trait ColorConfig: fmt::Debug {
    /// Number of enumerable color spaces.
    fn num_spaces(&self) -> usize;

    /// Name of the space at `index`, in declaration order.
    fn space_name_at(&self, index: usize) -> Option<&str>;

    /// Canonical name of the space bound to the `scene_linear` role.
    ///
    /// `None` when the role is not declared or names no known space.
    fn role_scene_linear(&self) -> Option<&str>;

    /// Builds an evaluator converting `src` to `dst`.
    fn build_transform(&self, src: &str, dst: &str) -> OcioResult<Box<dyn RgbEvaluator>>;

    /// Full definition of a space, when the configuration carries one.
    fn colorspace_info(&self, _name: &str) -> Option<&ColorSpace> {
        None
    }
}

impl RgbEvaluator for Processor {
    fn apply_rgb(&self, pixels: &mut [[f32; 3]]) -> OcioResult<()> {
        Processor::apply_rgb(self, pixels);
        Ok(())
    }
}

impl ColorConfig for Config {
    fn num_spaces(&self) -> usize {
        self.colorspaces().len()
    }

    fn space_name_at(&self, index: usize) -> Option<&str> {
        self.colorspaces().get(index).map(|cs| cs.name())
    }

    fn role_scene_linear(&self) -> Option<&str> {
        let role = self.roles().scene_linear()?;
        self.colorspace(role).map(ColorSpace::name)
    }

    fn build_transform(&self, src: &str, dst: &str) -> OcioResult<Box<dyn RgbEvaluator>> {
        Ok(Box::new(self.processor(src, dst)?))
    }

    fn colorspace_info(&self, name: &str) -> Option<&ColorSpace> {
        self.colorspace(name)
    }
}

/// No-op configuration used when nothing else is available.
///
/// Declares no spaces; the only transform it can build is `raw -> raw`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawConfig;

impl RawConfig {
    /// Name of the raw/no-op space.
    pub const SPACE: &'static str = "raw";
}

impl ColorConfig for RawConfig {
    fn num_spaces(&self) -> usize {
        0
    }

    fn space_name_at(&self, _index: usize) -> Option<&str> {
        None
    }

    fn role_scene_linear(&self) -> Option<&str> {
        None
    }

    fn build_transform(&self, src: &str, dst: &str) -> OcioResult<Box<dyn RgbEvaluator>> {
        for name in [src, dst] {
            if name != Self::SPACE {
                return Err(OcioError::ColorSpaceNotFound { name: name.into() });
            }
        }
        Ok(Box::new(Processor::default()))
    }
}

/// Where the active configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// An `.ocio` file on disk.
    File(PathBuf),
    /// The file named by `$OCIO`.
    Env,
    /// A built-in config by name (`studio`, `aces`).
    Builtin(String),
    /// No configuration; run raw.
    None,
}

impl ConfigSource {
    /// Default chain: explicit path, else `$OCIO` if set, else the studio built-in.
    pub fn resolve(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None if std::env::var_os(OCIO_ENV).is_some() => Self::Env,
            None => Self::Builtin("studio".into()),
        }
    }

    /// Opens the configuration.
    pub fn open(&self) -> PipelineResult<Box<dyn ColorConfig>> {
        let unavailable = |reason: String| PipelineError::ConfigUnavailable { reason };

        match self {
            Self::File(path) => {
                info!(path = %path.display(), "loading OCIO config");
                let config = Config::from_file(path).map_err(|e| unavailable(e.to_string()))?;
                Ok(Box::new(config))
            }
            Self::Env => {
                let path = std::env::var_os(OCIO_ENV)
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| unavailable(format!("${OCIO_ENV} is not set")))?;
                debug!(path = ?path, "using config from ${OCIO_ENV}");
                Self::File(PathBuf::from(path)).open()
            }
            Self::Builtin(name) => {
                info!(name = %name, "using built-in config");
                let config = builtin::by_name(name).map_err(|e| unavailable(e.to_string()))?;
                Ok(Box::new(config))
            }
            Self::None => Err(unavailable("running without a configuration".into())),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Env => write!(f, "${OCIO_ENV}"),
            Self::Builtin(name) => write!(f, "builtin:{name}"),
            Self::None => f.write_str("none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ocio_config_answers_queries() {
        let config = builtin::studio();
        let cfg: &dyn ColorConfig = &config;
        assert_eq!(cfg.num_spaces(), 9);
        assert_eq!(cfg.space_name_at(1), Some("sRGB"));
        assert_eq!(cfg.space_name_at(9), None);
        assert_eq!(cfg.role_scene_linear(), Some("Linear"));
        assert!(cfg.build_transform("Linear", "sRGB").is_ok());
        assert!(cfg.build_transform("Linear", "Nope").is_err());
    }

    #[test]
    fn scene_linear_role_by_alias_is_canonical() {
        let mut config = Config::new();
        config.add_colorspace(ColorSpace::new("ACES2065-1"));
        config.add_colorspace(ColorSpace::builder("Linear Rec.709").alias("lin_rec709").build());
        config.set_role("scene_linear", "lin_rec709");

        let cfg: &dyn ColorConfig = &config;
        assert_eq!(cfg.role_scene_linear(), Some("Linear Rec.709"));
        assert_eq!(cfg.colorspace_info("LIN_REC709").map(ColorSpace::name), Some("Linear Rec.709"));

        config.set_role("scene_linear", "missing");
        assert_eq!(ColorConfig::role_scene_linear(&config), None);
    }

    #[test]
    fn raw_config_is_empty() {
        let cfg = RawConfig;
        assert_eq!(cfg.num_spaces(), 0);
        assert!(cfg.role_scene_linear().is_none());
        assert!(cfg.colorspace_info("raw").is_none());
        assert!(cfg.build_transform("raw", "raw").is_ok());
        assert!(cfg.build_transform("raw", "sRGB").is_err());
    }

    #[test]
    fn open_sources() {
        assert!(ConfigSource::Builtin("aces".into()).open().is_ok());
        assert!(matches!(
            ConfigSource::Builtin("nope".into()).open(),
            Err(PipelineError::ConfigUnavailable { .. })
        ));
        assert!(matches!(
            ConfigSource::None.open(),
            Err(PipelineError::ConfigUnavailable { .. })
        ));
        assert!(ConfigSource::File("/no/such/config.ocio".into()).open().is_err());
    }

    #[test]
    fn explicit_path_wins() {
        let src = ConfigSource::resolve(Some("show.ocio".into()));
        assert_eq!(src, ConfigSource::File("show.ocio".into()));
        assert_eq!(src.to_string(), "show.ocio");
    }
}
