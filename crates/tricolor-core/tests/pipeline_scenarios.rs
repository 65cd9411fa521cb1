//! End-to-end behaviour of the color pipeline.
//!
//! Covers the three reference scenarios: a Linear/sRGB config loaded from
//! disk, a config that fails to load, and a transform that cannot be built.

use std::io::Write;

use approx::assert_abs_diff_eq;
use tricolor_core::*;
use tricolor_ocio::transfer::srgb;
use tricolor_ocio::{OcioError, OcioResult, builtin};

const BASELINE: [Rgb; 3] = [[1.0, 0.2, 0.3], [0.2, 0.8, 1.0], [0.3, 1.0, 0.2]];

const LINEAR_SRGB: &str = r#"
ocio_profile_version: 2
name: two-spaces
roles:
  scene_linear: Linear
colorspaces:
  - !<ColorSpace>
    name: Linear
    encoding: scene-linear
  - !<ColorSpace>
    name: sRGB
    encoding: sdr-video
    from_scene_reference: !<BuiltinTransform> {style: sRGB}
"#;

#[derive(Default)]
struct Recorder {
    uploads: Vec<Vec<u8>>,
    titles: Vec<String>,
}

impl VertexSink for Recorder {
    fn upload(&mut self, _offset: usize, bytes: &[u8]) {
        self.uploads.push(bytes.to_vec());
    }
}

impl TitleSink for Recorder {
    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }
}

/// Studio config whose builds into one space always fail.
#[derive(Debug)]
struct BrokenTarget {
    inner: tricolor_ocio::Config,
    broken: &'static str,
}

impl ColorConfig for BrokenTarget {
    fn num_spaces(&self) -> usize {
        3
    }
    fn space_name_at(&self, index: usize) -> Option<&str> {
        ["Linear", "sRGB", "ACEScg"].get(index).copied()
    }
    fn role_scene_linear(&self) -> Option<&str> {
        Some("Linear")
    }
    fn build_transform(&self, src: &str, dst: &str) -> OcioResult<Box<dyn RgbEvaluator>> {
        if dst == self.broken {
            return Err(OcioError::Transform(format!("no path to {dst}")));
        }
        self.inner.build_transform(src, dst)
    }
}

/// Evaluator producing NaN.
struct Poison;

impl RgbEvaluator for Poison {
    fn apply_rgb(&self, pixels: &mut [[f32; 3]]) -> OcioResult<()> {
        for px in pixels {
            px[1] = f32::NAN;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct PoisonConfig;

impl ColorConfig for PoisonConfig {
    fn num_spaces(&self) -> usize {
        2
    }
    fn space_name_at(&self, index: usize) -> Option<&str> {
        ["Linear", "Weird"].get(index).copied()
    }
    fn role_scene_linear(&self) -> Option<&str> {
        None
    }
    fn build_transform(&self, _src: &str, _dst: &str) -> OcioResult<Box<dyn RgbEvaluator>> {
        Ok(Box::new(Poison))
    }
}

fn pipeline(registry: ColorSpaceRegistry) -> (ColorPipeline, Recorder) {
    let mut pipe = ColorPipeline::new("tricolor", registry, &Primitive::reference_triangle());
    let mut rec = Recorder::default();
    pipe.start(&mut rec);
    (pipe, rec)
}

fn broken_acescg() -> ColorSpaceRegistry {
    ColorSpaceRegistry::from_config(Box::new(BrokenTarget {
        inner: builtin::studio(),
        broken: "ACEScg",
    }))
}

#[test]
fn scenario_linear_to_srgb_from_file() {
    let mut file = tempfile::Builder::new().suffix(".ocio").tempfile().unwrap();
    file.write_all(LINEAR_SRGB.as_bytes()).unwrap();

    let registry = ColorSpaceRegistry::load(&ConfigSource::File(file.path().to_path_buf()));
    assert_eq!(registry.spaces(), ["Linear", "sRGB"]);
    assert_eq!(registry.reference(), "Linear");

    let (mut pipe, mut rec) = pipeline(registry);
    assert_eq!(pipe.state().baseline(), BASELINE);

    pipe.handle_event(InputEvent::ChooseIndex(1), &mut rec);
    for (out, base) in pipe.state().working().iter().zip(BASELINE) {
        for c in 0..3 {
            assert_abs_diff_eq!(out[c], srgb::oetf(base[c]), epsilon = 1e-5);
        }
    }

    pipe.handle_event(InputEvent::ChooseIndex(0), &mut rec);
    assert_eq!(pipe.state().working(), BASELINE);

    pipe.handle_event(InputEvent::ChooseIndex(1), &mut rec);
    pipe.handle_event(InputEvent::ChooseNone, &mut rec);
    assert_eq!(pipe.state().working(), BASELINE);

    assert_eq!(rec.uploads.len(), 5);
    assert_eq!(rec.titles.last().map(String::as_str), Some("tricolor - passthrough"));
}

#[test]
fn scenario_config_load_failure() {
    let registry = ColorSpaceRegistry::load(&ConfigSource::File("/missing/config.ocio".into()));
    assert!(registry.is_fallback());
    assert!(registry.spaces().is_empty());

    let (mut pipe, mut rec) = pipeline(registry);
    for k in 0..9 {
        assert_eq!(
            pipe.handle_event(InputEvent::ChooseIndex(k), &mut rec),
            EventOutcome::Ignored
        );
        assert_eq!(pipe.selection(), None);
        assert_eq!(pipe.state().working(), BASELINE);
    }
    assert_eq!(rec.uploads.len(), 1);
    assert_eq!(rec.titles, ["tricolor - passthrough"]);
}

#[test]
fn scenario_transform_build_failure() {
    let (mut pipe, mut rec) = pipeline(broken_acescg());

    pipe.handle_event(InputEvent::ChooseIndex(1), &mut rec);
    let srgb_colors = pipe.state().working();

    assert_eq!(
        pipe.handle_event(InputEvent::ChooseIndex(2), &mut rec),
        EventOutcome::Updated
    );
    assert_eq!(pipe.state().working(), srgb_colors);
    assert!(matches!(
        pipe.last_recompute(),
        Some(Recompute::Fallback(PipelineError::TransformBuild { dst, .. })) if dst == "ACEScg"
    ));
    assert_eq!(pipe.title(), "tricolor - ACEScg (transform failed)");

    // Upload still happens after the failed recompute.
    assert_eq!(rec.uploads.len(), 3);
    assert_eq!(rec.uploads[2], rec.uploads[1]);

    pipe.handle_event(InputEvent::ChooseNone, &mut rec);
    assert_eq!(pipe.state().working(), BASELINE);
    assert!(!pipe.last_failed());
}

#[test]
fn failure_from_baseline_keeps_baseline() {
    let registry = broken_acescg();
    let mut state = VertexColorState::new(&Primitive::reference_triangle());
    let mut engine = ColorTransformEngine::new();
    let result = state.recompute(Some(2), &registry, &mut engine);
    assert!(result.is_fallback());
    assert_eq!(state.working(), BASELINE);
}

#[test]
fn non_finite_output_is_an_eval_failure() {
    let (mut pipe, mut rec) = pipeline(ColorSpaceRegistry::from_config(Box::new(PoisonConfig)));
    pipe.handle_event(InputEvent::ChooseIndex(1), &mut rec);
    assert!(matches!(
        pipe.last_recompute(),
        Some(Recompute::Fallback(PipelineError::TransformEval { .. }))
    ));
    assert!(pipe.state().working().iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn identity_fast_path_never_builds() {
    let registry = ColorSpaceRegistry::from_config(Box::new(PoisonConfig));
    let mut engine = ColorTransformEngine::new();
    let out = engine.apply(&registry, &BASELINE, "Weird", "Weird").unwrap();
    assert_eq!(out, BASELINE);
    assert_eq!(engine.cached(), 0);
}

#[test]
fn repeated_selection_is_bit_identical() {
    let registry = ColorSpaceRegistry::from_config(Box::new(builtin::aces()));
    let (mut pipe, mut rec) = pipeline(registry);
    for k in 0..pipe.registry().len() {
        pipe.handle_event(InputEvent::ChooseIndex(k), &mut rec);
        let once = rec.uploads.last().cloned();
        pipe.handle_event(InputEvent::ChooseIndex(k), &mut rec);
        assert_eq!(rec.uploads.last().cloned(), once);
    }
}
