//! # tricolor-view
//!
//! Interactive viewer for the tricolor color pipeline: a vertex-colored
//! triangle drawn with egui on wgpu, recolored through the selected color
//! space.
//!
//! # Quick Start
//!
//! ```ignore
//! use tricolor_view::{run, ViewerConfig};
//!
//! let exit_code = run(ViewerConfig::default());
//! ```
//!
//! # Color Configuration
//!
//! The viewer resolves the config in this order:
//! 1. `--ocio` CLI argument
//! 2. `$OCIO` environment variable
//! 3. Built-in studio config
//!
//! # Keyboard Shortcuts
//!
//! | Key | Action |
//! |-----|--------|
//! | `1`-`9` | Select color space 1-9 |
//! | `0` | Passthrough (original colors) |
//! | `Esc` | Exit |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod app;
mod mesh;

pub use app::{ViewerApp, ViewerConfig, event_for_key};
pub use mesh::{FrameSurface, build_mesh, to_color32};

use tracing::{error, info};
use tricolor_core::{ColorPipeline, ColorSpaceRegistry, Primitive};

/// Run the viewer.
///
/// Loads the color configuration, opens an eframe window and enters the
/// event loop. Returns the exit code when the window closes.
///
/// # Returns
/// Exit code: 0 for success, 1 for error
pub fn run(config: ViewerConfig) -> i32 {
    let registry = ColorSpaceRegistry::load(&config.source);
    let pipeline = ColorPipeline::new(
        config.app_name.as_str(),
        registry,
        &Primitive::reference_triangle(),
    );
    let title = pipeline.title();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size(config.size)
            .with_min_inner_size([320.0, 240.0]),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    info!(source = %config.source, "creating window");
    let result = eframe::run_native(
        &config.app_name,
        native_options,
        Box::new(move |_cc| Ok(Box::new(ViewerApp::new(pipeline)))),
    );

    match result {
        Ok(()) => {
            info!("viewer exited normally");
            0
        }
        Err(e) => {
            error!(error = %e, "viewer error");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_config_default() {
        let config = ViewerConfig::default();
        assert_eq!(config.app_name, "tricolor");
        assert_eq!(config.size, [800.0, 600.0]);
    }
}
