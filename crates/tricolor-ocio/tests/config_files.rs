//! Loading `.ocio` files from disk.

use std::io::Write;

use approx::assert_abs_diff_eq;
use tricolor_ocio::{Config, ConfigVersion, OcioError, Transform};

const V1_CONFIG: &str = r#"
ocio_profile_version: 1

roles:
  scene_linear: linear
  data: raw

colorspaces:
  - !<ColorSpace>
    name: linear
    family: ""
    isdata: false

  - !<ColorSpace>
    name: gamma22
    description: |
      Simple 2.2 display curve
    to_reference: !<ExponentTransform> {value: [2.2, 2.2, 2.2, 1]}

  - !<ColorSpace>
    name: log2
    to_reference: !<GroupTransform>
      children:
        - !<RangeTransform> {min_in_value: 0, max_in_value: 4, min_out_value: 0, max_out_value: 1, direction: inverse}
        - !<LogTransform> {base: 2, direction: inverse}

  - !<ColorSpace>
    name: lut
    to_reference: !<FileTransform> {src: shot.cube, interpolation: linear}

  - !<ColorSpace>
    name: raw
    isdata: true
"#;

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".ocio")
        .tempfile()
        .expect("temp file");
    file.write_all(text.as_bytes()).expect("write config");
    file
}

#[test]
fn load_v1_file() {
    let file = write_config(V1_CONFIG);
    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.version(), ConfigVersion::V1);
    assert_eq!(config.colorspaces().len(), 5);
    assert_eq!(config.roles().scene_linear(), Some("linear"));
    assert_eq!(
        config.colorspace("gamma22").unwrap().description(),
        "Simple 2.2 display curve"
    );
}

#[test]
fn unsupported_transform_survives_loading() {
    let file = write_config(V1_CONFIG);
    let config = Config::from_file(file.path()).unwrap();

    let lut = config.colorspace("lut").unwrap();
    assert_eq!(
        lut.to_reference(),
        Some(&Transform::Unsupported("FileTransform".into()))
    );
    assert!(matches!(
        config.processor("linear", "lut"),
        Err(OcioError::UnsupportedTransform { .. })
    ));
}

#[test]
fn exponent_inverted_for_encode() {
    let config = Config::from_file(write_config(V1_CONFIG).path()).unwrap();
    let proc = config.processor("linear", "gamma22").unwrap();
    let mut px = [[0.5_f32, 0.0, 1.0]];
    proc.apply_rgb(&mut px);
    assert_abs_diff_eq!(px[0][0], 0.5_f32.powf(1.0 / 2.2), epsilon = 1e-5);
    assert_abs_diff_eq!(px[0][1], 0.0);
    assert_abs_diff_eq!(px[0][2], 1.0, epsilon = 1e-6);
}

#[test]
fn log_and_range_chain() {
    let config = Config::from_file(write_config(V1_CONFIG).path()).unwrap();
    let proc = config.processor("linear", "log2").unwrap();
    let mut px = [[1.0_f32, 4.0, 16.0]];
    proc.apply_rgb(&mut px);
    // log2 then [0, 4] -> [0, 1]
    assert_abs_diff_eq!(px[0][0], 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(px[0][1], 0.5, epsilon = 1e-5);
    assert_abs_diff_eq!(px[0][2], 1.0, epsilon = 1e-5);
}

#[test]
fn broken_yaml_is_an_error() {
    let file = write_config("ocio_profile_version: 2\ncolorspaces: [\n");
    assert!(matches!(
        Config::from_file(file.path()),
        Err(OcioError::Yaml(_))
    ));
}
