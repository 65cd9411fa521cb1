//! Color pipeline context.
//!
//! [`ColorPipeline`] owns the registry, engine, vertex state and selection
//! controller. Each handled event runs the same linear sequence:
//! resolve the selection, transform or fall back, then upload and retitle.
//! The upload happens on every path, including fallback.

use tracing::{debug, warn};

use crate::engine::ColorTransformEngine;
use crate::registry::ColorSpaceRegistry;
use crate::selection::{InputEvent, Selection, SelectionController, Transition};
use crate::surface::{TitleSink, VertexSink};
use crate::vertex::{Primitive, Recompute, VertexColorState};

/// Label shown when no space is selected.
pub const PASSTHROUGH_LABEL: &str = "passthrough";

/// Suffix appended to the title after a failed transform.
pub const FAILED_SUFFIX: &str = " (transform failed)";

/// What happened to an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Selection changed; colors recomputed and uploaded.
    Updated,
    /// Event had no effect.
    Ignored,
    /// Shutdown requested.
    Quit,
}

/// Explicit application context for the color pipeline.
#[derive(Debug)]
pub struct ColorPipeline {
    app_name: String,
    registry: ColorSpaceRegistry,
    engine: ColorTransformEngine,
    state: VertexColorState,
    controller: SelectionController,
    last: Option<Recompute>,
}

impl ColorPipeline {
    /// Creates the pipeline; call [`start`](Self::start) before the first draw.
    pub fn new(
        app_name: impl Into<String>,
        registry: ColorSpaceRegistry,
        primitive: &Primitive,
    ) -> Self {
        let controller = SelectionController::new(registry.len());
        Self {
            app_name: app_name.into(),
            engine: ColorTransformEngine::new(),
            state: VertexColorState::new(primitive),
            registry,
            controller,
            last: None,
        }
    }

    /// Computes colors for the initial selection, uploads them and sets the title.
    pub fn start<S: VertexSink + TitleSink>(&mut self, surface: &mut S) {
        self.refresh(surface);
    }

    /// Feeds one input event through the pipeline.
    pub fn handle_event<S: VertexSink + TitleSink>(
        &mut self,
        event: InputEvent,
        surface: &mut S,
    ) -> EventOutcome {
        match self.controller.handle(event) {
            Transition::Changed(_) => {
                self.refresh(surface);
                EventOutcome::Updated
            }
            Transition::Ignored => EventOutcome::Ignored,
            Transition::Quit => {
                debug!("quit requested");
                EventOutcome::Quit
            }
        }
    }

    fn refresh<S: VertexSink + TitleSink>(&mut self, surface: &mut S) {
        let result = self.state.recompute(
            self.controller.selection(),
            &self.registry,
            &mut self.engine,
        );
        if let Recompute::Fallback(e) = &result {
            warn!(error = %e, "keeping previous colors");
        }
        self.last = Some(result);

        surface.upload(0, self.state.as_bytes());
        surface.set_title(&self.title());
    }

    /// Window title for the current state.
    pub fn title(&self) -> String {
        let label = self
            .controller
            .selection()
            .and_then(|i| self.registry.name_at(i))
            .unwrap_or(PASSTHROUGH_LABEL);
        let mut title = format!("{} - {}", self.app_name, label);
        if self.last_failed() {
            title.push_str(FAILED_SUFFIX);
        }
        title
    }

    /// True if the most recent recompute fell back.
    pub fn last_failed(&self) -> bool {
        self.last.as_ref().is_some_and(Recompute::is_fallback)
    }

    /// Outcome of the most recent recompute.
    pub fn last_recompute(&self) -> Option<&Recompute> {
        self.last.as_ref()
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.controller.selection()
    }

    /// True once a quit event was handled.
    pub fn is_done(&self) -> bool {
        self.controller.is_done()
    }

    /// Registry in use.
    pub fn registry(&self) -> &ColorSpaceRegistry {
        &self.registry
    }

    /// Vertex colors.
    pub fn state(&self) -> &VertexColorState {
        &self.state
    }
}
