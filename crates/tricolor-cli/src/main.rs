//! tricolor - color-managed triangle viewer
//!
//! Opens the interactive viewer by default; `spaces` and `convert` run the
//! same color pipeline without a window.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tricolor_core::ConfigSource;

mod commands;

#[derive(Parser)]
#[command(name = "tricolor")]
#[command(author, version, about = "Color-managed triangle viewer")]
#[command(long_about = "
Draws a vertex-colored triangle and recolors it through the color spaces of
an OCIO configuration. Keys 1-9 pick a space, 0 shows the original colors.

Config lookup: --ocio, else $OCIO, else the built-in studio config.

Examples:
  tricolor                               # Open the viewer
  tricolor --ocio show.ocio view         # Viewer with a specific config
  tricolor --builtin aces spaces         # List spaces of the ACES built-in
  tricolor convert --to sRGB 0.18,0.18,0.18 1,0.2,0.3
  tricolor --raw spaces                  # No config at all
")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// OCIO config file (overrides $OCIO)
    #[arg(long, global = true, value_name = "PATH")]
    ocio: Option<PathBuf>,

    /// Built-in config to use instead of a file (studio, aces)
    #[arg(long, global = true, value_name = "NAME", conflicts_with = "ocio")]
    builtin: Option<String>,

    /// Run without any color configuration
    #[arg(long, global = true, conflicts_with_all = ["ocio", "builtin"])]
    raw: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Cli {
    fn config_source(&self) -> ConfigSource {
        if self.raw {
            ConfigSource::None
        } else if let Some(name) = &self.builtin {
            ConfigSource::Builtin(name.clone())
        } else {
            ConfigSource::resolve(self.ocio.clone())
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer (default)
    #[command(visible_alias = "v")]
    View(ViewArgs),

    /// List color spaces and their key bindings
    #[command(visible_alias = "ls")]
    Spaces,

    /// Transform RGB triples from the reference space
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),
}

#[derive(Args)]
struct ViewArgs {
    /// Window width in points
    #[arg(long, default_value = "800")]
    width: f32,

    /// Window height in points
    #[arg(long, default_value = "600")]
    height: f32,
}

#[derive(Args)]
struct ConvertArgs {
    /// Destination color space
    #[arg(short, long)]
    to: String,

    /// Source color space (defaults to the reference space)
    #[arg(short, long)]
    from: Option<String>,

    /// Colors as R,G,B
    #[arg(required = true, value_name = "R,G,B", allow_hyphen_values = true)]
    colors: Vec<String>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = cli.config_source();
    match cli.command {
        None => commands::view::run(ViewArgs { width: 800.0, height: 600.0 }, source),
        Some(Commands::View(args)) => commands::view::run(args, source),
        Some(Commands::Spaces) => commands::spaces::run(source, cli.verbose),
        Some(Commands::Convert(args)) => commands::convert::run(args, source),
    }
}
