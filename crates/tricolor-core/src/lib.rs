//! Color pipeline core for tricolor.
//!
//! Maps the colors of a small primitive into a selected color space and keeps
//! the uploaded vertex buffer in sync with the selection:
//!
//! - [`ColorSpaceRegistry`] - selectable spaces and the reference space
//! - [`ColorTransformEngine`] - src -> dst transforms with an identity fast path
//! - [`VertexColorState`] - baseline and working colors
//! - [`SelectionController`] - input events to selection
//! - [`ColorPipeline`] - context object wiring them together
//!
//! Windowing and GPU work stay outside; the pipeline talks to them through
//! [`VertexSink`] and [`TitleSink`].
//!
//! # Example
//!
//! ```
//! use tricolor_core::{ColorPipeline, ColorSpaceRegistry, ConfigSource, InputEvent, Primitive};
//! use tricolor_core::{TitleSink, VertexSink};
//!
//! struct Headless;
//! impl VertexSink for Headless {
//!     fn upload(&mut self, _offset: usize, _bytes: &[u8]) {}
//! }
//! impl TitleSink for Headless {
//!     fn set_title(&mut self, _title: &str) {}
//! }
//!
//! let registry = ColorSpaceRegistry::load(&ConfigSource::Builtin("studio".into()));
//! let mut pipeline = ColorPipeline::new("tricolor", registry, &Primitive::reference_triangle());
//! pipeline.start(&mut Headless);
//! pipeline.handle_event(InputEvent::ChooseIndex(1), &mut Headless);
//! assert_eq!(pipeline.title(), "tricolor - sRGB");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod engine;
mod error;
mod pipeline;
mod registry;
mod selection;
mod surface;
mod vertex;

/// Linear RGB triple.
pub type Rgb = [f32; 3];

// Re-exports
pub use config::{ColorConfig, ConfigSource, OCIO_ENV, RawConfig, RgbEvaluator};
pub use engine::ColorTransformEngine;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{ColorPipeline, EventOutcome, FAILED_SUFFIX, PASSTHROUGH_LABEL};
pub use registry::{ColorSpaceRegistry, KEY_ADDRESSABLE, resolve_reference};
pub use selection::{InputEvent, Selection, SelectionController, Transition};
pub use surface::{TitleSink, VertexSink};
pub use vertex::{Primitive, Recompute, Vertex, VertexColorState};
