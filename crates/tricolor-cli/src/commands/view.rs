//! View command - interactive triangle viewer.

use anyhow::Result;
use tricolor_core::ConfigSource;
#[cfg(feature = "viewer")]
use tracing::info;

use crate::ViewArgs;

/// Run the view command.
#[cfg(feature = "viewer")]
pub fn run(args: ViewArgs, source: ConfigSource) -> Result<()> {
    info!(source = %source, "opening viewer");

    let config = tricolor_view::ViewerConfig {
        source,
        size: [args.width, args.height],
        ..Default::default()
    };

    let exit_code = tricolor_view::run(config);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

/// Run the view command.
#[cfg(not(feature = "viewer"))]
pub fn run(_args: ViewArgs, _source: ConfigSource) -> Result<()> {
    anyhow::bail!("tricolor was built without the `viewer` feature")
}
