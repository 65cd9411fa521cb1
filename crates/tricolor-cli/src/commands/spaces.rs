//! Spaces command - list the selectable color spaces.

use anyhow::Result;
use tricolor_core::{ColorSpaceRegistry, ConfigSource, KEY_ADDRESSABLE};

/// Run the spaces command.
pub fn run(source: ConfigSource, verbose: bool) -> Result<()> {
    let registry = super::load_registry(&source);
    print!("{}", listing(&registry, verbose));
    Ok(())
}

/// One line per space: key binding, name, reference marker.
///
/// Verbose listings add a detail line with family, encoding and description.
fn listing(registry: &ColorSpaceRegistry, verbose: bool) -> String {
    let mut out = String::new();
    if registry.is_fallback() {
        out.push_str("No color spaces (raw). Colors are shown unchanged.\n");
        return out;
    }

    out.push_str("  [0] passthrough\n");
    for (i, name) in registry.spaces().iter().enumerate() {
        let key = if i < KEY_ADDRESSABLE {
            format!("[{}]", i + 1)
        } else {
            " - ".to_string()
        };
        let marker = if name == registry.reference() { "  (reference)" } else { "" };
        out.push_str(&format!("  {key} {name}{marker}\n"));
        if verbose {
            if let Some(detail) = details(registry, name) {
                out.push_str(&format!("        {detail}\n"));
            }
        }
    }
    out
}

/// `Family, encoding: description`, skipping whatever is unset.
fn details(registry: &ColorSpaceRegistry, name: &str) -> Option<String> {
    let cs = registry.config().colorspace_info(name)?;
    let tags: Vec<&str> = [cs.family().as_str(), cs.encoding().as_str()]
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect();
    let detail = match (tags.is_empty(), cs.description().is_empty()) {
        (true, true) => return None,
        (false, true) => tags.join(", "),
        (true, false) => cs.description().to_string(),
        (false, false) => format!("{}: {}", tags.join(", "), cs.description()),
    };
    Some(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studio_listing() {
        let registry = ColorSpaceRegistry::load(&ConfigSource::Builtin("studio".into()));
        let text = listing(&registry, false);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "  [0] passthrough");
        assert_eq!(lines[1], "  [1] Linear  (reference)");
        assert_eq!(lines[2], "  [2] sRGB");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn verbose_listing_shows_metadata() {
        let registry = ColorSpaceRegistry::load(&ConfigSource::Builtin("studio".into()));
        let text = listing(&registry, true);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "  [1] Linear  (reference)");
        assert_eq!(
            lines[2],
            "        Scene, scene-linear: Scene-linear Rec.709 primaries, D65"
        );
        assert!(text.contains("        Utility, data: Non-color data, never transformed\n"));
    }

    #[test]
    fn raw_listing() {
        let text = listing(&ColorSpaceRegistry::fallback(), true);
        assert!(text.starts_with("No color spaces"));
    }
}
