//! Transform definitions for color space conversions.
//!
//! Transforms are declarative: they describe an operation and a direction.
//! [`Processor`](crate::Processor) compiles them into evaluable ops.

use glam::Mat3;

/// Transform application direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformDirection {
    /// Forward transform.
    #[default]
    Forward,
    /// Inverse transform.
    Inverse,
}

impl TransformDirection {
    /// Returns the opposite direction.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Self::Forward => Self::Inverse,
            Self::Inverse => Self::Forward,
        }
    }

    /// Parses an OCIO `direction:` value. Anything but `inverse` is forward.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("inverse") {
            Self::Inverse
        } else {
            Self::Forward
        }
    }

    /// Combines a transform's own direction with the requested one.
    #[inline]
    pub fn combine(self, requested: Self) -> Self {
        match requested {
            Self::Forward => self,
            Self::Inverse => self.inverse(),
        }
    }
}

/// Built-in transfer curve styles.
///
/// Forward direction encodes (linear -> curve), inverse decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStyle {
    /// sRGB piecewise curve.
    Srgb,
    /// Rec.709 camera curve.
    Rec709,
    /// Pure gamma 2.2.
    Gamma22,
    /// Pure gamma 2.4.
    Gamma24,
    /// ACEScct log curve.
    AcesCct,
}

impl TransferStyle {
    /// Parses a `BuiltinTransform` style name.
    pub fn parse(s: &str) -> Option<Self> {
        let style = match s.to_ascii_lowercase().as_str() {
            "srgb" | "curve - srgb" => Self::Srgb,
            "rec709" | "rec.709" | "curve - rec709" => Self::Rec709,
            "gamma22" | "gamma 2.2" => Self::Gamma22,
            "gamma24" | "gamma 2.4" => Self::Gamma24,
            "acescct" | "aces-lin_to_acescct" | "acescct_to_aces2065-1" => Self::AcesCct,
            _ => return None,
        };
        Some(style)
    }
}

/// Color transform definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// 4x4 matrix plus offset.
    Matrix(MatrixTransform),
    /// Per-channel power.
    Exponent(ExponentTransform),
    /// Power curve with a linear toe (sRGB-style moncurve).
    ExponentWithLinear(ExponentWithLinearTransform),
    /// Logarithm in a given base.
    Log(LogTransform),
    /// Affine range remap with optional clamping.
    Range(RangeTransform),
    /// Built-in transfer curve.
    BuiltinTransfer(BuiltinTransferTransform),
    /// Chain of transforms.
    Group(GroupTransform),
    /// Transform kind that exists in the config but cannot be evaluated here.
    Unsupported(String),
}

impl Transform {
    /// Creates a forward matrix transform from a row-major 4x4 array.
    pub fn matrix(m: [f64; 16]) -> Self {
        Self::Matrix(MatrixTransform {
            matrix: m,
            offset: [0.0; 4],
            direction: TransformDirection::Forward,
        })
    }

    /// Creates a forward matrix transform from a 3x3 glam matrix.
    pub fn from_mat3(m: Mat3) -> Self {
        let r0 = m.row(0);
        let r1 = m.row(1);
        let r2 = m.row(2);
        #[rustfmt::skip]
        let matrix = [
            r0.x as f64, r0.y as f64, r0.z as f64, 0.0,
            r1.x as f64, r1.y as f64, r1.z as f64, 0.0,
            r2.x as f64, r2.y as f64, r2.z as f64, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self::matrix(matrix)
    }

    /// Creates a built-in transfer transform.
    pub fn transfer(style: TransferStyle, direction: TransformDirection) -> Self {
        Self::BuiltinTransfer(BuiltinTransferTransform { style, direction })
    }

    /// Creates a forward group transform.
    pub fn group(transforms: Vec<Transform>) -> Self {
        Self::Group(GroupTransform {
            transforms,
            direction: TransformDirection::Forward,
        })
    }

    /// Returns the inverse of this transform.
    pub fn inverse(self) -> Self {
        match self {
            Self::Matrix(mut t) => {
                t.direction = t.direction.inverse();
                Self::Matrix(t)
            }
            Self::Exponent(mut t) => {
                t.direction = t.direction.inverse();
                Self::Exponent(t)
            }
            Self::ExponentWithLinear(mut t) => {
                t.direction = t.direction.inverse();
                Self::ExponentWithLinear(t)
            }
            Self::Log(mut t) => {
                t.direction = t.direction.inverse();
                Self::Log(t)
            }
            Self::Range(mut t) => {
                t.direction = t.direction.inverse();
                Self::Range(t)
            }
            Self::BuiltinTransfer(mut t) => {
                t.direction = t.direction.inverse();
                Self::BuiltinTransfer(t)
            }
            Self::Group(mut t) => {
                t.direction = t.direction.inverse();
                Self::Group(t)
            }
            Self::Unsupported(kind) => Self::Unsupported(kind),
        }
    }
}

/// Matrix transform: `out = M * in + offset` on the RGBA 4-vector.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTransform {
    /// Row-major 4x4 matrix.
    pub matrix: [f64; 16],
    /// RGBA offset.
    pub offset: [f64; 4],
    /// Direction.
    pub direction: TransformDirection,
}

/// Exponent transform: `out = max(in, 0)^value` per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentTransform {
    /// RGBA exponents.
    pub value: [f64; 4],
    /// Direction.
    pub direction: TransformDirection,
}

/// Monitor curve: power with linear segment, as used by sRGB.
///
/// Forward decodes (curve -> linear), matching OCIO.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentWithLinearTransform {
    /// RGBA gamma.
    pub gamma: [f64; 4],
    /// RGBA offset.
    pub offset: [f64; 4],
    /// Direction.
    pub direction: TransformDirection,
}

/// Log transform: forward is `log_base(in)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogTransform {
    /// Logarithm base.
    pub base: f64,
    /// Direction.
    pub direction: TransformDirection,
}

/// Range remap from `[min_in, max_in]` to `[min_out, max_out]`.
///
/// Output is clamped to whichever out bounds are given.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeTransform {
    /// Input lower bound.
    pub min_in: Option<f64>,
    /// Input upper bound.
    pub max_in: Option<f64>,
    /// Output lower bound.
    pub min_out: Option<f64>,
    /// Output upper bound.
    pub max_out: Option<f64>,
    /// Direction.
    pub direction: TransformDirection,
}

/// Built-in transfer curve.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinTransferTransform {
    /// Curve.
    pub style: TransferStyle,
    /// Direction.
    pub direction: TransformDirection,
}

/// Ordered chain of transforms. Inverting reverses the order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTransform {
    /// Children, applied first to last in forward direction.
    pub transforms: Vec<Transform>,
    /// Direction.
    pub direction: TransformDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_combine() {
        use TransformDirection::*;
        assert_eq!(Forward.combine(Forward), Forward);
        assert_eq!(Forward.combine(Inverse), Inverse);
        assert_eq!(Inverse.combine(Inverse), Forward);
        assert_eq!(TransformDirection::parse("INVERSE"), Inverse);
        assert_eq!(TransformDirection::parse("forward"), Forward);
    }

    #[test]
    fn inverse_flips_direction() {
        let t = Transform::transfer(TransferStyle::Srgb, TransformDirection::Forward).inverse();
        match t {
            Transform::BuiltinTransfer(b) => assert_eq!(b.direction, TransformDirection::Inverse),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn from_mat3_is_row_major() {
        let m = Mat3::from_cols_array_2d(&[[1.0, 4.0, 7.0], [2.0, 5.0, 8.0], [3.0, 6.0, 9.0]]);
        let Transform::Matrix(t) = Transform::from_mat3(m) else {
            panic!("expected matrix");
        };
        assert_eq!(&t.matrix[0..3], &[1.0, 2.0, 3.0]);
        assert_eq!(&t.matrix[4..7], &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn transfer_style_parse() {
        assert_eq!(TransferStyle::parse("sRGB"), Some(TransferStyle::Srgb));
        assert_eq!(TransferStyle::parse("ACEScct"), Some(TransferStyle::AcesCct));
        assert_eq!(TransferStyle::parse("ARRI_LOGC4"), None);
    }
}
