//! Frame-side sinks: vertex buffer mirror and pending title.

use bytemuck::Zeroable;
use egui::{Color32, Mesh, Pos2, Rect};
use tricolor_core::{TitleSink, Vertex, VertexSink};

const VERTEX_SIZE: usize = std::mem::size_of::<Vertex>();

/// Receives uploads and title changes from the pipeline.
///
/// Uploaded bytes are kept as typed vertices so the draw step can read them
/// back without re-parsing.
#[derive(Debug, Default)]
pub struct FrameSurface {
    vertices: Vec<Vertex>,
    pending_title: Option<String>,
    uploads: usize,
}

impl FrameSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices as last uploaded.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of uploads received.
    pub const fn uploads(&self) -> usize {
        self.uploads
    }

    /// Takes the title set since the last call, if any.
    pub fn take_title(&mut self) -> Option<String> {
        self.pending_title.take()
    }
}

impl VertexSink for FrameSurface {
    fn upload(&mut self, offset: usize, bytes: &[u8]) {
        let end = offset + bytes.len();
        let needed = end.div_ceil(VERTEX_SIZE);
        if self.vertices.len() < needed {
            self.vertices.resize(needed, Vertex::zeroed());
        }
        let dst: &mut [u8] = bytemuck::cast_slice_mut(&mut self.vertices);
        dst[offset..end].copy_from_slice(bytes);
        self.uploads += 1;
    }
}

impl TitleSink for FrameSurface {
    fn set_title(&mut self, title: &str) {
        self.pending_title = Some(title.to_string());
    }
}

/// Quantizes a color to 8 bits per channel.
///
/// Values go to the framebuffer as-is; no encoding is applied here.
pub fn to_color32(rgb: [f32; 3]) -> Color32 {
    let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(q(rgb[0]), q(rgb[1]), q(rgb[2]))
}

/// Maps a clip-space position (`[-1, 1]`, y up) into `rect`.
pub fn to_screen(position: [f32; 2], rect: Rect) -> Pos2 {
    let center = rect.center();
    Pos2::new(
        center.x + position[0] * rect.width() * 0.5,
        center.y - position[1] * rect.height() * 0.5,
    )
}

/// Builds a triangle-list mesh from vertices. A trailing partial triangle is
/// dropped.
pub fn build_mesh(vertices: &[Vertex], rect: Rect) -> Mesh {
    let mut mesh = Mesh::default();
    for v in vertices {
        mesh.colored_vertex(to_screen(v.position, rect), to_color32(v.color));
    }
    let tris = (vertices.len() / 3) as u32;
    for t in 0..tris {
        mesh.add_triangle(t * 3, t * 3 + 1, t * 3 + 2);
    }
    mesh
}
