//! Compiled transform processors.
//!
//! A [`Processor`] flattens a transform tree into a list of [`ProcessorOp`]s,
//! drops identities, folds adjacent matrices, and applies the result to
//! RGB pixels.
//!
//! # Example
//!
//! ```
//! use tricolor_ocio::{Processor, Transform, TransferStyle, TransformDirection};
//!
//! let encode = Transform::transfer(TransferStyle::Srgb, TransformDirection::Forward);
//! let proc = Processor::from_transform(&encode, TransformDirection::Forward).unwrap();
//!
//! let mut px = [[0.214_f32, 0.214, 0.214]];
//! proc.apply_rgb(&mut px);
//! assert!((px[0][0] - 0.5).abs() < 0.01);
//! ```

use crate::error::{OcioError, OcioResult};
use crate::transfer::{acescct, gamma, rec709, srgb};
use crate::transform::{TransferStyle, Transform, TransformDirection};

#[rustfmt::skip]
const IDENTITY_4X4: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// Smallest value fed to a logarithm.
const LOG_FLOOR: f32 = 1e-10;

/// Compiled operation.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum ProcessorOp {
    /// Row-major 4x4 matrix + offset (only the RGB part is evaluated).
    Matrix { matrix: [f32; 16], offset: [f32; 4] },
    /// `max(v, 0)^value`.
    Exponent { value: [f32; 3] },
    /// Monitor curve; `forward` decodes.
    MonCurve {
        gamma: [f32; 3],
        offset: [f32; 3],
        forward: bool,
    },
    /// Log base conversion; `forward` is linear to log.
    Log { base: f32, forward: bool },
    /// Affine remap with optional clamps.
    Range {
        scale: f32,
        offset: f32,
        clamp_min: Option<f32>,
        clamp_max: Option<f32>,
    },
    /// Built-in transfer curve; `forward` encodes.
    Transfer { style: TransferStyle, forward: bool },
}

impl ProcessorOp {
    /// Returns true if this operation is a no-op.
    pub fn is_identity(&self) -> bool {
        match self {
            ProcessorOp::Matrix { matrix, offset } => {
                matrix == &IDENTITY_4X4 && offset.iter().all(|v| *v == 0.0)
            }
            ProcessorOp::Range { scale, offset, clamp_min, clamp_max } => {
                *scale == 1.0 && *offset == 0.0 && clamp_min.is_none() && clamp_max.is_none()
            }
            _ => false,
        }
    }
}

/// Compiled transform processor.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    ops: Vec<ProcessorOp>,
}

impl Processor {
    /// Creates an empty (identity) processor.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Compiles a transform applied in the given direction.
    pub fn from_transform(
        transform: &Transform,
        direction: TransformDirection,
    ) -> OcioResult<Self> {
        let mut processor = Self::new();
        processor.compile_transform(transform, direction)?;
        processor.optimize();
        Ok(processor)
    }

    /// Compiles `(transform, direction)` pairs in order into one processor.
    pub(crate) fn from_chain<'a>(
        chain: impl IntoIterator<Item = (&'a Transform, TransformDirection)>,
    ) -> OcioResult<Self> {
        let mut processor = Self::new();
        for (transform, direction) in chain {
            processor.compile_transform(transform, direction)?;
        }
        processor.optimize();
        Ok(processor)
    }

    /// Returns the compiled operations.
    pub fn ops(&self) -> &[ProcessorOp] {
        &self.ops
    }

    /// Number of compiled operations.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// True when the processor leaves pixels untouched.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    fn compile_transform(
        &mut self,
        transform: &Transform,
        direction: TransformDirection,
    ) -> OcioResult<()> {
        match transform {
            Transform::Matrix(m) => {
                let matrix = m.matrix.map(|v| v as f32);
                let offset = m.offset.map(|v| v as f32);
                let inverse = m.direction.combine(direction) == TransformDirection::Inverse;
                let (matrix, offset) = if inverse {
                    invert_affine(&matrix, &offset)?
                } else {
                    (matrix, offset)
                };
                self.ops.push(ProcessorOp::Matrix { matrix, offset });
            }

            Transform::Exponent(e) => {
                let value = [e.value[0] as f32, e.value[1] as f32, e.value[2] as f32];
                let value = if e.direction.combine(direction) == TransformDirection::Inverse {
                    if value.iter().any(|v| *v == 0.0) {
                        return Err(OcioError::InvalidTransform {
                            reason: "cannot invert exponent of zero".into(),
                        });
                    }
                    value.map(|v| 1.0 / v)
                } else {
                    value
                };
                self.ops.push(ProcessorOp::Exponent { value });
            }

            Transform::ExponentWithLinear(e) => {
                let gamma = [e.gamma[0] as f32, e.gamma[1] as f32, e.gamma[2] as f32];
                let offset = [e.offset[0] as f32, e.offset[1] as f32, e.offset[2] as f32];
                if gamma.iter().any(|g| *g <= 1.0) || offset.iter().any(|o| *o <= 0.0) {
                    return Err(OcioError::InvalidTransform {
                        reason: "ExponentWithLinear needs gamma > 1 and offset > 0".into(),
                    });
                }
                self.ops.push(ProcessorOp::MonCurve {
                    gamma,
                    offset,
                    forward: e.direction.combine(direction) == TransformDirection::Forward,
                });
            }

            Transform::Log(l) => {
                if l.base <= 0.0 || l.base == 1.0 {
                    return Err(OcioError::InvalidTransform {
                        reason: format!("invalid log base {}", l.base),
                    });
                }
                self.ops.push(ProcessorOp::Log {
                    base: l.base as f32,
                    forward: l.direction.combine(direction) == TransformDirection::Forward,
                });
            }

            Transform::Range(r) => {
                let forward = r.direction.combine(direction) == TransformDirection::Forward;
                let (min_in, max_in, min_out, max_out) = if forward {
                    (r.min_in, r.max_in, r.min_out, r.max_out)
                } else {
                    (r.min_out, r.max_out, r.min_in, r.max_in)
                };
                self.ops.push(compile_range(min_in, max_in, min_out, max_out)?);
            }

            Transform::BuiltinTransfer(t) => {
                self.ops.push(ProcessorOp::Transfer {
                    style: t.style,
                    forward: t.direction.combine(direction) == TransformDirection::Forward,
                });
            }

            Transform::Group(g) => {
                let dir = g.direction.combine(direction);
                if dir == TransformDirection::Forward {
                    for child in &g.transforms {
                        self.compile_transform(child, TransformDirection::Forward)?;
                    }
                } else {
                    for child in g.transforms.iter().rev() {
                        self.compile_transform(child, TransformDirection::Inverse)?;
                    }
                }
            }

            Transform::Unsupported(kind) => {
                return Err(OcioError::UnsupportedTransform { kind: kind.clone() });
            }
        }
        Ok(())
    }

    /// Removes identities and folds adjacent matrices. Lossless.
    fn optimize(&mut self) {
        self.ops.retain(|op| !op.is_identity());

        let mut folded: Vec<ProcessorOp> = Vec::with_capacity(self.ops.len());
        for op in self.ops.drain(..) {
            if let (
                Some(ProcessorOp::Matrix { matrix: m1, offset: o1 }),
                ProcessorOp::Matrix { matrix: m2, offset: o2 },
            ) = (folded.last_mut(), &op)
            {
                // Applying m1 then m2: out = m2 * (m1 * x + o1) + o2
                let matrix = mul4(m2, m1);
                let offset = add4(&mul4_vec(m2, o1), o2);
                *m1 = matrix;
                *o1 = offset;
                continue;
            }
            folded.push(op);
        }
        folded.retain(|op| !op.is_identity());
        self.ops = folded;
    }

    /// Applies the transform to RGB pixels in-place.
    pub fn apply_rgb(&self, pixels: &mut [[f32; 3]]) {
        for pixel in pixels.iter_mut() {
            self.apply_one_rgb(pixel);
        }
    }

    #[inline]
    fn apply_one_rgb(&self, pixel: &mut [f32; 3]) {
        for op in &self.ops {
            match op {
                ProcessorOp::Matrix { matrix, offset } => {
                    let [r, g, b] = *pixel;
                    pixel[0] = r * matrix[0] + g * matrix[1] + b * matrix[2] + offset[0];
                    pixel[1] = r * matrix[4] + g * matrix[5] + b * matrix[6] + offset[1];
                    pixel[2] = r * matrix[8] + g * matrix[9] + b * matrix[10] + offset[2];
                }

                ProcessorOp::Exponent { value } => {
                    for (v, e) in pixel.iter_mut().zip(value) {
                        *v = v.max(0.0).powf(*e);
                    }
                }

                ProcessorOp::MonCurve { gamma, offset, forward } => {
                    for i in 0..3 {
                        pixel[i] = moncurve(pixel[i], gamma[i], offset[i], *forward);
                    }
                }

                ProcessorOp::Log { base, forward } => {
                    for v in pixel.iter_mut() {
                        *v = if *forward {
                            v.max(LOG_FLOOR).log(*base)
                        } else {
                            base.powf(*v)
                        };
                    }
                }

                ProcessorOp::Range { scale, offset, clamp_min, clamp_max } => {
                    for v in pixel.iter_mut() {
                        *v = *v * scale + offset;
                        if let Some(min) = clamp_min {
                            *v = v.max(*min);
                        }
                        if let Some(max) = clamp_max {
                            *v = v.min(*max);
                        }
                    }
                }

                ProcessorOp::Transfer { style, forward } => {
                    for v in pixel.iter_mut() {
                        *v = apply_transfer(*v, *style, *forward);
                    }
                }
            }
        }
    }
}

fn apply_transfer(v: f32, style: TransferStyle, forward: bool) -> f32 {
    match style {
        TransferStyle::Srgb => {
            if forward { srgb::oetf(v) } else { srgb::eotf(v) }
        }
        TransferStyle::Rec709 => {
            if forward { rec709::oetf(v) } else { rec709::eotf(v) }
        }
        TransferStyle::Gamma22 => {
            if forward { gamma::oetf(v, 2.2) } else { gamma::eotf(v, 2.2) }
        }
        TransferStyle::Gamma24 => {
            if forward { gamma::oetf(v, 2.4) } else { gamma::eotf(v, 2.4) }
        }
        TransferStyle::AcesCct => {
            if forward { acescct::encode(v) } else { acescct::decode(v) }
        }
    }
}

/// OCIO monitor curve. Forward: encoded -> linear.
///
/// The break point sits at `offset / (gamma - 1)` on the encoded side,
/// where slope and value of both segments meet.
fn moncurve(v: f32, gamma: f32, offset: f32, forward: bool) -> f32 {
    let enc_break = offset / (gamma - 1.0);
    let knee = (offset * gamma / ((gamma - 1.0) * (1.0 + offset))).powf(gamma);
    let slope = knee / enc_break;
    if forward {
        if v > enc_break {
            ((v + offset) / (1.0 + offset)).powf(gamma)
        } else {
            v * slope
        }
    } else if v > knee {
        (1.0 + offset) * v.powf(1.0 / gamma) - offset
    } else {
        v / slope
    }
}

fn compile_range(
    min_in: Option<f64>,
    max_in: Option<f64>,
    min_out: Option<f64>,
    max_out: Option<f64>,
) -> OcioResult<ProcessorOp> {
    let invalid = |reason: &str| OcioError::InvalidTransform { reason: reason.into() };
    if min_in.is_some() != min_out.is_some() || max_in.is_some() != max_out.is_some() {
        return Err(invalid("range bounds must come in in/out pairs"));
    }

    let (scale, offset) = match (min_in, max_in, min_out, max_out) {
        (Some(lo_in), Some(hi_in), Some(lo_out), Some(hi_out)) => {
            if hi_in == lo_in {
                return Err(invalid("empty input range"));
            }
            let scale = (hi_out - lo_out) / (hi_in - lo_in);
            (scale, lo_out - scale * lo_in)
        }
        (Some(lo_in), None, Some(lo_out), None) => (1.0, lo_out - lo_in),
        (None, Some(hi_in), None, Some(hi_out)) => (1.0, hi_out - hi_in),
        _ => (1.0, 0.0),
    };

    Ok(ProcessorOp::Range {
        scale: scale as f32,
        offset: offset as f32,
        clamp_min: min_out.map(|v| v as f32),
        clamp_max: max_out.map(|v| v as f32),
    })
}

/// Inverts `M * x + o` into `M^-1 * x - M^-1 * o`.
fn invert_affine(matrix: &[f32; 16], offset: &[f32; 4]) -> OcioResult<([f32; 16], [f32; 4])> {
    // glam is column-major; the transpose of our row-major array.
    let mat4 = glam::Mat4::from_cols_array(matrix).transpose();
    if mat4.determinant().abs() < 1e-10 {
        return Err(OcioError::Transform(
            "cannot invert singular matrix (determinant near zero)".into(),
        ));
    }
    let inv = mat4.inverse().transpose().to_cols_array();
    let inv_offset = mul4_vec(&inv, offset).map(|v| -v);
    Ok((inv, inv_offset))
}

fn mul4(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let mut out = [0.0; 16];
    for row in 0..4 {
        for col in 0..4 {
            out[row * 4 + col] = (0..4).map(|k| a[row * 4 + k] * b[k * 4 + col]).sum();
        }
    }
    out
}

fn mul4_vec(m: &[f32; 16], v: &[f32; 4]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (row, o) in out.iter_mut().enumerate() {
        *o = (0..4).map(|k| m[row * 4 + k] * v[k]).sum();
    }
    out
}

fn add4(a: &[f32; 4], b: &[f32; 4]) -> [f32; 4] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]]
}
