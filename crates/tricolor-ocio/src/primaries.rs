//! Color primaries, white points, and RGB-XYZ matrix generation.
//!
//! # Example
//!
//! ```
//! use tricolor_ocio::primaries::{rgb_to_rgb_matrix, SRGB, ACES_AP1};
//!
//! let m = rgb_to_rgb_matrix(&SRGB, &ACES_AP1);
//! let white = m * glam::Vec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-3);
//! ```

use glam::{Mat3, Vec3};

/// RGB primaries and white point as CIE xy chromaticities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y)
    pub r: (f32, f32),
    /// Green primary (x, y)
    pub g: (f32, f32),
    /// Blue primary (x, y)
    pub b: (f32, f32),
    /// White point (x, y)
    pub w: (f32, f32),
    /// Gamut name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

/// D65 white point chromaticity.
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// D60 white point chromaticity (ACES).
pub const D60_XY: (f32, f32) = (0.32168, 0.33767);

/// sRGB / Rec.709 primaries (D65).
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "sRGB",
};

/// Rec.709 primaries (identical to sRGB).
pub const REC709: Primaries = SRGB;

/// Rec.2020 primaries (D65).
pub const REC2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "Rec.2020",
};

/// Display P3 primaries (DCI-P3 gamut, D65 white).
pub const DISPLAY_P3: Primaries = Primaries {
    r: (0.6800, 0.3200),
    g: (0.2650, 0.6900),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Display P3",
};

/// ACES AP0 primaries (D60), used by ACES2065-1.
pub const ACES_AP0: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.0000, 1.0000),
    b: (0.0001, -0.0770),
    w: D60_XY,
    name: "ACES AP0",
};

/// ACES AP1 primaries (D60), used by ACEScg and ACEScct.
pub const ACES_AP1: Primaries = Primaries {
    r: (0.7130, 0.2930),
    g: (0.1650, 0.8300),
    b: (0.1280, 0.0440),
    w: D60_XY,
    name: "ACES AP1",
};

fn from_rows(rows: [[f32; 3]; 3]) -> Mat3 {
    Mat3::from_cols_array_2d(&rows).transpose()
}

fn bradford() -> Mat3 {
    from_rows([
        [0.8951, 0.2664, -0.1614],
        [-0.7502, 1.7135, 0.0367],
        [0.0389, -0.0685, 1.0296],
    ])
}

/// Converts xy chromaticity to XYZ (with Y=1).
fn xy_to_xyz(x: f32, y: f32) -> Vec3 {
    if y.abs() < 1e-10 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes the RGB to XYZ matrix for a set of primaries.
///
/// Primaries become the matrix columns, scaled so that RGB (1, 1, 1) lands
/// on the white point.
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let r_xyz = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g_xyz = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b_xyz = xy_to_xyz(primaries.b.0, primaries.b.1);

    let m = Mat3::from_cols(r_xyz, g_xyz, b_xyz);
    let s = m.inverse() * primaries.white_xyz();

    Mat3::from_cols(r_xyz * s.x, g_xyz * s.y, b_xyz * s.z)
}

/// Computes the XYZ to RGB matrix (inverse of [`rgb_to_xyz_matrix`]).
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(primaries).inverse()
}

/// Bradford chromatic adaptation from one XYZ white to another.
pub fn adapt_matrix(src_white: Vec3, dst_white: Vec3) -> Mat3 {
    let cat = bradford();
    let src_cone = cat * src_white;
    let dst_cone = cat * dst_white;
    let scale = Mat3::from_diagonal(dst_cone / src_cone);
    cat.inverse() * scale * cat
}

/// Matrix converting linear RGB in `src` primaries to linear RGB in `dst`.
///
/// Goes through XYZ, with Bradford adaptation when the white points differ.
pub fn rgb_to_rgb_matrix(src: &Primaries, dst: &Primaries) -> Mat3 {
    if src == dst {
        return Mat3::IDENTITY;
    }
    let to_xyz = rgb_to_xyz_matrix(src);
    let from_xyz = xyz_to_rgb_matrix(dst);
    if src.w == dst.w {
        from_xyz * to_xyz
    } else {
        from_xyz * adapt_matrix(src.white_xyz(), dst.white_xyz()) * to_xyz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn srgb_to_xyz_known_values() {
        let m = rgb_to_xyz_matrix(&SRGB);
        assert_abs_diff_eq!(m.row(0).x, 0.4124564, epsilon = 1e-3);
        assert_abs_diff_eq!(m.row(1).x, 0.2126729, epsilon = 1e-3);
        assert_abs_diff_eq!(m.row(1).y, 0.7151522, epsilon = 1e-3);
    }

    #[test]
    fn white_maps_to_white() {
        for p in [SRGB, REC2020, DISPLAY_P3, ACES_AP0, ACES_AP1] {
            let white = rgb_to_xyz_matrix(&p) * Vec3::ONE;
            assert_abs_diff_eq!(white.y, 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn same_primaries_is_identity() {
        assert_eq!(rgb_to_rgb_matrix(&SRGB, &REC709), Mat3::IDENTITY);
    }

    #[test]
    fn adapted_conversion_preserves_neutrals() {
        // Bradford keeps white neutral across D65 -> D60.
        let m = rgb_to_rgb_matrix(&SRGB, &ACES_AP1);
        let grey = m * Vec3::splat(0.18);
        assert_abs_diff_eq!(grey.x, 0.18, epsilon = 1e-3);
        assert_abs_diff_eq!(grey.y, 0.18, epsilon = 1e-3);
        assert_abs_diff_eq!(grey.z, 0.18, epsilon = 1e-3);
    }

    #[test]
    fn srgb_to_acescg_matches_published() {
        // Published sRGB -> ACEScg (Bradford) first row.
        let m = rgb_to_rgb_matrix(&SRGB, &ACES_AP1);
        assert_abs_diff_eq!(m.row(0).x, 0.6131, epsilon = 2e-3);
        assert_abs_diff_eq!(m.row(0).y, 0.3395, epsilon = 2e-3);
        assert_abs_diff_eq!(m.row(0).z, 0.0474, epsilon = 2e-3);
    }
}
