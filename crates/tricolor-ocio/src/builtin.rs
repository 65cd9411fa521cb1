//! Built-in OCIO configurations.
//!
//! Provides studio and ACES configs that can be used without loading
//! external files.
//!
//! # Example
//!
//! ```
//! use tricolor_ocio::builtin;
//!
//! let config = builtin::studio();
//! for cs in config.colorspaces() {
//!     println!("{}", cs.name());
//! }
//! ```

use crate::colorspace::{ColorSpace, Encoding, Family};
use crate::config::Config;
use crate::error::{OcioError, OcioResult};
use crate::primaries::{self, Primaries};
use crate::role;
use crate::transform::*;

/// Names accepted by [`by_name`].
pub const AVAILABLE: &[&str] = &["studio", "aces"];

/// Looks up a built-in config by name (case-insensitive).
pub fn by_name(name: &str) -> OcioResult<Config> {
    match name.to_ascii_lowercase().as_str() {
        "studio" => Ok(studio()),
        "aces" => Ok(aces()),
        _ => Err(OcioError::UnknownBuiltin { name: name.into() }),
    }
}

/// Display-referred studio config with linear Rec.709 as reference.
///
/// Spaces, in order:
/// - Linear (reference, scene_linear)
/// - sRGB, Rec.709, Gamma 2.2, Gamma 2.4 (encoded Rec.709 primaries)
/// - Display P3, Rec.2020 (wide gamut, encoded)
/// - ACEScg (linear AP1)
/// - Raw (data)
pub fn studio() -> Config {
    let mut config = Config::new();
    config.set_name("studio");

    config.add_colorspace(
        ColorSpace::builder("Linear")
            .alias("lin_rec709")
            .alias("Linear Rec.709")
            .family(Family::Scene)
            .encoding(Encoding::SceneLinear)
            .description("Scene-linear Rec.709 primaries, D65")
            .build(),
    );
    config.add_colorspace(encoded("sRGB", TransferStyle::Srgb, "sRGB piecewise curve"));
    config.add_colorspace(encoded("Rec.709", TransferStyle::Rec709, "BT.709 camera curve"));
    config.add_colorspace(encoded("Gamma 2.2", TransferStyle::Gamma22, "Pure 2.2 power"));
    config.add_colorspace(encoded("Gamma 2.4", TransferStyle::Gamma24, "Pure 2.4 power"));
    config.add_colorspace(
        ColorSpace::builder("Display P3")
            .alias("p3_d65")
            .family(Family::Display)
            .encoding(Encoding::Sdr)
            .description("P3 primaries, D65, sRGB curve")
            .from_reference(Transform::group(vec![
                gamut(&primaries::REC709, &primaries::DISPLAY_P3),
                Transform::transfer(TransferStyle::Srgb, TransformDirection::Forward),
            ]))
            .build(),
    );
    config.add_colorspace(
        ColorSpace::builder("Rec.2020")
            .alias("rec2020")
            .family(Family::Display)
            .encoding(Encoding::Sdr)
            .description("BT.2020 primaries, BT.709 curve")
            .from_reference(Transform::group(vec![
                gamut(&primaries::REC709, &primaries::REC2020),
                Transform::transfer(TransferStyle::Rec709, TransformDirection::Forward),
            ]))
            .build(),
    );
    config.add_colorspace(
        ColorSpace::builder("ACEScg")
            .family(Family::Aces)
            .encoding(Encoding::SceneLinear)
            .description("Scene-linear AP1 primaries")
            .from_reference(gamut(&primaries::REC709, &primaries::ACES_AP1))
            .build(),
    );
    config.add_colorspace(raw());

    config.set_role(role::names::REFERENCE, "Linear");
    config.set_role(role::names::SCENE_LINEAR, "Linear");
    config.set_role(role::names::COMPOSITING_LINEAR, "Linear");
    config.set_role(role::names::DEFAULT, "sRGB");
    config.set_role(role::names::DATA, "Raw");

    config
}

/// ACES config with ACES2065-1 as reference and ACEScg as scene_linear.
pub fn aces() -> Config {
    let mut config = Config::new();
    config.set_name("aces");

    config.add_colorspace(
        ColorSpace::builder("ACES2065-1")
            .alias("aces")
            .family(Family::Aces)
            .encoding(Encoding::SceneLinear)
            .description("ACES interchange, AP0 primaries")
            .build(),
    );
    config.add_colorspace(
        ColorSpace::builder("ACEScg")
            .alias("lin_ap1")
            .family(Family::Aces)
            .encoding(Encoding::SceneLinear)
            .description("Scene-linear AP1 primaries")
            .to_reference(gamut(&primaries::ACES_AP1, &primaries::ACES_AP0))
            .build(),
    );
    config.add_colorspace(
        ColorSpace::builder("ACEScct")
            .alias("acescct_ap1")
            .family(Family::Aces)
            .encoding(Encoding::Log)
            .description("ACEScct log encoding, AP1 primaries")
            .to_reference(Transform::group(vec![
                Transform::transfer(TransferStyle::AcesCct, TransformDirection::Inverse),
                gamut(&primaries::ACES_AP1, &primaries::ACES_AP0),
            ]))
            .build(),
    );
    config.add_colorspace(
        ColorSpace::builder("Linear Rec.709")
            .alias("lin_rec709")
            .family(Family::Scene)
            .encoding(Encoding::SceneLinear)
            .to_reference(gamut(&primaries::REC709, &primaries::ACES_AP0))
            .build(),
    );
    for (name, style) in [("sRGB", TransferStyle::Srgb), ("Rec.709", TransferStyle::Rec709)] {
        config.add_colorspace(
            ColorSpace::builder(name)
                .family(Family::Display)
                .encoding(Encoding::Sdr)
                .to_reference(Transform::group(vec![
                    Transform::transfer(style, TransformDirection::Inverse),
                    gamut(&primaries::REC709, &primaries::ACES_AP0),
                ]))
                .build(),
        );
    }
    config.add_colorspace(raw());

    config.set_role(role::names::REFERENCE, "ACES2065-1");
    config.set_role(role::names::SCENE_LINEAR, "ACEScg");
    config.set_role(role::names::COMPOSITING_LINEAR, "ACEScg");
    config.set_role(role::names::COLOR_TIMING, "ACEScct");
    config.set_role(role::names::ACES_INTERCHANGE, "ACES2065-1");
    config.set_role(role::names::DEFAULT, "ACEScg");
    config.set_role(role::names::DATA, "Raw");

    config
}

// ============================================================================
// Color space definitions
// ============================================================================

/// Rec.709 primaries with a transfer curve applied on the way out.
fn encoded(name: &str, style: TransferStyle, desc: &str) -> ColorSpace {
    ColorSpace::builder(name)
        .family(Family::Display)
        .encoding(Encoding::Sdr)
        .description(desc)
        .from_reference(Transform::transfer(style, TransformDirection::Forward))
        .build()
}

fn raw() -> ColorSpace {
    ColorSpace::builder("Raw")
        .alias("Utility - Raw")
        .family(Family::Utility)
        .encoding(Encoding::Data)
        .description("Non-color data, never transformed")
        .build()
}

fn gamut(src: &Primaries, dst: &Primaries) -> Transform {
    Transform::from_mat3(primaries::rgb_to_rgb_matrix(src, dst))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn studio_layout() {
        let config = studio();
        let names: Vec<_> = config.colorspace_names().collect();
        assert_eq!(
            names,
            [
                "Linear",
                "sRGB",
                "Rec.709",
                "Gamma 2.2",
                "Gamma 2.4",
                "Display P3",
                "Rec.2020",
                "ACEScg",
                "Raw"
            ]
        );
        assert_eq!(config.roles().scene_linear(), Some("Linear"));
    }

    #[test]
    fn aces_layout() {
        let config = aces();
        assert_eq!(config.colorspaces().len(), 7);
        assert_eq!(config.roles().scene_linear(), Some("ACEScg"));
        assert_eq!(config.colorspace("color_timing").unwrap().name(), "ACEScct");
    }

    #[test]
    fn studio_srgb_encodes_mid_grey() {
        let proc = studio().processor("Linear", "sRGB").unwrap();
        let mut px = [[0.18_f32; 3]];
        proc.apply_rgb(&mut px);
        assert_abs_diff_eq!(px[0][0], 0.4613, epsilon = 1e-3);
    }

    #[test]
    fn studio_acescg_keeps_neutrals() {
        let proc = studio().processor("Linear", "ACEScg").unwrap();
        let mut px = [[0.5_f32; 3]];
        proc.apply_rgb(&mut px);
        for c in px[0] {
            assert_abs_diff_eq!(c, 0.5, epsilon = 2e-3);
        }
    }

    #[test]
    fn aces_cct_roundtrip() {
        let config = aces();
        let to = config.processor("ACEScg", "ACEScct").unwrap();
        let back = config.processor("ACEScct", "ACEScg").unwrap();
        let mut px = [[0.18_f32, 0.05, 1.5]];
        to.apply_rgb(&mut px);
        assert_abs_diff_eq!(px[0][0], 0.4135, epsilon = 2e-3);
        back.apply_rgb(&mut px);
        assert_abs_diff_eq!(px[0][0], 0.18, epsilon = 1e-4);
        assert_abs_diff_eq!(px[0][2], 1.5, epsilon = 1e-3);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("STUDIO").unwrap().name(), "studio");
        assert!(matches!(by_name("nope"), Err(OcioError::UnknownBuiltin { .. })));
    }
}
