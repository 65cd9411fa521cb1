//! Transfer functions (OETF/EOTF).
//!
//! - **OETF**: linear -> encoded
//! - **EOTF**: encoded -> linear
//!
//! Only the curves the built-in configs need live here.

/// sRGB piecewise curve (IEC 61966-2-1).
pub mod srgb {
    /// sRGB EOTF: encoded [0, 1] to linear.
    ///
    /// ```
    /// use tricolor_ocio::transfer::srgb::eotf;
    ///
    /// assert!((eotf(0.5) - 0.214).abs() < 0.01);
    /// ```
    #[inline]
    pub fn eotf(v: f32) -> f32 {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }

    /// sRGB OETF: linear to encoded.
    #[inline]
    pub fn oetf(l: f32) -> f32 {
        if l <= 0.0031308 {
            l * 12.92
        } else {
            1.055 * l.powf(1.0 / 2.4) - 0.055
        }
    }
}

/// Rec.709 (BT.709) camera curve.
pub mod rec709 {
    /// Rec.709 OETF: linear to encoded.
    #[inline]
    pub fn oetf(l: f32) -> f32 {
        if l < 0.018 {
            4.5 * l
        } else {
            1.099 * l.powf(0.45) - 0.099
        }
    }

    /// Inverse of [`oetf`].
    #[inline]
    pub fn eotf(v: f32) -> f32 {
        if v < 0.081 {
            v / 4.5
        } else {
            ((v + 0.099) / 1.099).powf(1.0 / 0.45)
        }
    }
}

/// Pure power curves. Negative input clamps to zero.
pub mod gamma {
    /// Linear to encoded: `l^(1/gamma)`.
    #[inline]
    pub fn oetf(l: f32, gamma: f32) -> f32 {
        l.max(0.0).powf(1.0 / gamma)
    }

    /// Encoded to linear: `v^gamma`.
    #[inline]
    pub fn eotf(v: f32, gamma: f32) -> f32 {
        v.max(0.0).powf(gamma)
    }
}

/// ACEScct log curve with linear toe (AMPAS S-2016-001).
pub mod acescct {
    const X_BRK: f32 = 0.0078125;
    const Y_BRK: f32 = 0.155_251_14;
    const A: f32 = 10.540_237;
    const B: f32 = 0.072_905_53;

    /// ACES linear to ACEScct.
    #[inline]
    pub fn encode(linear: f32) -> f32 {
        if linear <= X_BRK {
            A * linear + B
        } else {
            (linear.log2() + 9.72) / 17.52
        }
    }

    /// ACEScct to ACES linear.
    #[inline]
    pub fn decode(cct: f32) -> f32 {
        if cct <= Y_BRK {
            (cct - B) / A
        } else {
            (cct * 17.52 - 9.72).exp2()
        }
    }
}
