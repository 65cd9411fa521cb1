//! Convert command - push RGB triples through the transform engine.

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use tricolor_core::{ColorTransformEngine, ConfigSource, Rgb};

use crate::ConvertArgs;

/// Run the convert command.
pub fn run(args: ConvertArgs, source: ConfigSource) -> Result<()> {
    let colors = args
        .colors
        .iter()
        .map(|s| parse_rgb(s))
        .collect::<Result<Vec<_>>>()?;

    let registry = super::load_registry(&source);

    // Listed names are matched case-insensitively; anything else goes to the
    // engine as typed and fails there.
    let canonical = |name: &str| {
        registry
            .index_of(name)
            .and_then(|i| registry.name_at(i))
            .unwrap_or(name)
            .to_string()
    };
    let src = args
        .from
        .as_deref()
        .map_or_else(|| registry.reference().to_string(), canonical);
    let dst = canonical(&args.to);

    info!(count = colors.len(), src = %src, dst = %dst, "converting");

    let mut engine = ColorTransformEngine::new();
    let out = match engine.apply(&registry, &colors, &src, &dst) {
        Ok(out) => out,
        Err(e) => {
            warn!(error = %e, "colors left unchanged");
            colors
        }
    };

    for rgb in out {
        println!("{:.6}, {:.6}, {:.6}", rgb[0], rgb[1], rgb[2]);
    }
    Ok(())
}

/// Parses `R,G,B`.
fn parse_rgb(s: &str) -> Result<Rgb> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("expected R,G,B, got '{s}'");
    }
    let mut rgb = [0.0_f32; 3];
    for (c, part) in rgb.iter_mut().zip(&parts) {
        *c = part
            .parse()
            .with_context(|| format!("invalid channel '{part}' in '{s}'"))?;
    }
    Ok(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_triples() {
        assert_eq!(parse_rgb("0.18,0.5,1").unwrap(), [0.18, 0.5, 1.0]);
        assert_eq!(parse_rgb(" -1, 0 ,2 ").unwrap(), [-1.0, 0.0, 2.0]);
        assert!(parse_rgb("1,2").is_err());
        assert!(parse_rgb("1,x,3").is_err());
    }
}
