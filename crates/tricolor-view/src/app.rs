//! Viewer application with eframe/egui integration.
//!
//! Feeds key presses into the color pipeline and draws whatever the
//! pipeline last uploaded.

use egui::{Color32, Key};
use tricolor_core::{ColorPipeline, ConfigSource, EventOutcome, InputEvent};

use crate::mesh::{FrameSurface, build_mesh};

/// Digit keys in the order `InputEvent::from_digit` expects.
const DIGIT_KEYS: [Key; 10] = [
    Key::Num0,
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Num4,
    Key::Num5,
    Key::Num6,
    Key::Num7,
    Key::Num8,
    Key::Num9,
];

/// Configuration for launching the viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Where the color configuration comes from.
    pub source: ConfigSource,
    /// Application name used as the title prefix.
    pub app_name: String,
    /// Initial window size in points.
    pub size: [f32; 2],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: ConfigSource::resolve(None),
            app_name: "tricolor".into(),
            size: [800.0, 600.0],
        }
    }
}

/// Maps a key to the input event it triggers.
pub fn event_for_key(key: Key) -> Option<InputEvent> {
    if key == Key::Escape {
        return Some(InputEvent::Quit);
    }
    let digit = DIGIT_KEYS.iter().position(|k| *k == key)?;
    InputEvent::from_digit(digit as u8)
}

/// Main viewer application.
pub struct ViewerApp {
    pipeline: ColorPipeline,
    surface: FrameSurface,
}

impl ViewerApp {
    /// Creates the app and runs the pipeline's initial upload.
    pub fn new(mut pipeline: ColorPipeline) -> Self {
        let mut surface = FrameSurface::new();
        pipeline.start(&mut surface);
        Self { pipeline, surface }
    }

    /// Handle keyboard input. Returns true if should exit.
    fn handle_input(&mut self, ctx: &egui::Context) -> bool {
        let events: Vec<InputEvent> = ctx.input(|i| {
            std::iter::once(Key::Escape)
                .chain(DIGIT_KEYS)
                .filter(|k| i.key_pressed(*k))
                .filter_map(event_for_key)
                .collect()
        });

        events.into_iter().any(|event| {
            self.pipeline.handle_event(event, &mut self.surface) == EventOutcome::Quit
        })
    }

    /// Draw bottom hints panel.
    fn draw_hints(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("hints").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let reg = self.pipeline.registry();
                if reg.is_fallback() {
                    ui.colored_label(Color32::YELLOW, "no color config: raw");
                } else {
                    ui.monospace(format!("reference: {}", reg.reference()));
                }
                ui.separator();
                ui.label("1-9: Color space | 0: Passthrough | Esc: Exit");
            });
        });
    }

    /// Draw the triangle.
    fn draw_canvas(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::from_gray(20)))
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                let mesh = build_mesh(self.surface.vertices(), rect);
                ui.painter_at(rect).add(egui::Shape::mesh(mesh));
            });
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Recompute and upload before anything reads the buffer this frame.
        if self.handle_input(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        if let Some(title) = self.surface.take_title() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }

        self.draw_hints(ctx);
        self.draw_canvas(ctx);
    }
}
