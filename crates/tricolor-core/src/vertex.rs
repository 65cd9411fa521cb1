//! Vertex data and color state.
//!
//! [`VertexColorState`] keeps the baseline colors captured at startup and the
//! working colors derived from them. Working colors are always rebuilt from
//! the baseline, never from their own previous value, so repeated selections
//! cannot drift.

use bytemuck::{Pod, Zeroable};
use tracing::debug;

use crate::engine::ColorTransformEngine;
use crate::error::PipelineError;
use crate::registry::ColorSpaceRegistry;
use crate::selection::Selection;
use crate::Rgb;

/// Interleaved vertex: `[x, y, r, g, b]`, 20 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Clip-space position.
    pub position: [f32; 2],
    /// Linear RGB color.
    pub color: Rgb,
}

impl Vertex {
    /// Creates a vertex.
    pub const fn new(position: [f32; 2], color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Fixed ordered set of vertices drawn as one primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    vertices: Vec<Vertex>,
}

impl Primitive {
    /// Creates a primitive from vertices.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// The red/cyan/green triangle.
    pub fn reference_triangle() -> Self {
        Self::new(vec![
            Vertex::new([0.0, 0.6], [1.0, 0.2, 0.3]),
            Vertex::new([-0.6, -0.6], [0.2, 0.8, 1.0]),
            Vertex::new([0.6, -0.6], [0.3, 1.0, 0.2]),
        ])
    }

    /// Vertices in draw order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

/// Result of a [`VertexColorState::recompute`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recompute {
    /// Selection was `None`; working colors equal the baseline.
    Passthrough,
    /// Working colors hold the transformed baseline.
    Transformed {
        /// Destination space.
        space: String,
    },
    /// The transform failed; working colors kept their previous value.
    Fallback(PipelineError),
}

impl Recompute {
    /// True if the recompute fell back.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Baseline and working colors of a primitive.
#[derive(Debug, Clone)]
pub struct VertexColorState {
    baseline: Vec<Rgb>,
    vertices: Vec<Vertex>,
}

impl VertexColorState {
    /// Captures the primitive's colors as the baseline.
    pub fn new(primitive: &Primitive) -> Self {
        let vertices = primitive.vertices().to_vec();
        let baseline = vertices.iter().map(|v| v.color).collect();
        Self { baseline, vertices }
    }

    /// Colors captured at startup.
    #[inline]
    pub fn baseline(&self) -> &[Rgb] {
        &self.baseline
    }

    /// Current working colors.
    pub fn working(&self) -> Vec<Rgb> {
        self.vertices.iter().map(|v| v.color).collect()
    }

    /// Vertices with working colors.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Interleaved position+color bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Rebuilds working colors from the baseline for `selection`.
    ///
    /// Source is the registry's reference space. On failure the working
    /// colors are left untouched.
    pub fn recompute(
        &mut self,
        selection: Selection,
        registry: &ColorSpaceRegistry,
        engine: &mut ColorTransformEngine,
    ) -> Recompute {
        let Some(index) = selection else {
            for (v, c) in self.vertices.iter_mut().zip(&self.baseline) {
                v.color = *c;
            }
            debug!("working colors restored to baseline");
            return Recompute::Passthrough;
        };

        let Some(dst) = registry.name_at(index) else {
            return Recompute::Fallback(PipelineError::InvalidSelection {
                index,
                len: registry.len(),
            });
        };

        match engine.apply(registry, &self.baseline, registry.reference(), dst) {
            Ok(colors) => {
                self.write(&colors);
                debug!(space = dst, "working colors transformed");
                Recompute::Transformed { space: dst.to_string() }
            }
            Err(e) => Recompute::Fallback(e),
        }
    }

    fn write(&mut self, colors: &[Rgb]) {
        for (v, c) in self.vertices.iter_mut().zip(colors) {
            v.color = *c;
        }
    }
}
