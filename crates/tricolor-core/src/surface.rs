//! Collaborator interfaces implemented by the rendering side.

/// GPU-resident vertex buffer.
pub trait VertexSink {
    /// Replaces buffer contents starting at `offset` with `bytes`.
    fn upload(&mut self, offset: usize, bytes: &[u8]);
}

/// Window title.
pub trait TitleSink {
    /// Shows `title` to the user.
    fn set_title(&mut self, title: &str);
}
