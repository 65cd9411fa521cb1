//! Minimal OpenColorIO-compatible color management.
//!
//! This crate covers the slice of OCIO that tricolor needs:
//! - Load `.ocio` configuration files (roles and color spaces)
//! - Compile src -> reference -> dst transform chains into processors
//! - Built-in studio and ACES configurations
//!
//! # Quick Start
//!
//! ```
//! use tricolor_ocio::{Config, builtin};
//!
//! let config = builtin::studio();
//!
//! let linear = config.colorspace("scene_linear").unwrap();
//! assert_eq!(linear.name(), "Linear");
//!
//! let processor = config.processor("Linear", "sRGB").unwrap();
//! let mut pixels = [[0.18_f32, 0.18, 0.18]];
//! processor.apply_rgb(&mut pixels);
//! ```
//!
//! # Loading External Configs
//!
//! ```ignore
//! use tricolor_ocio::Config;
//!
//! let config = Config::from_file("path/to/config.ocio")?;
//! for cs in config.colorspaces() {
//!     println!("{}: {:?}", cs.name(), cs.encoding());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod colorspace;
mod config;
mod error;
mod processor;
mod role;
mod transform;

pub mod builtin;
pub mod primaries;
pub mod transfer;

// Re-exports
pub use colorspace::{ColorSpace, ColorSpaceBuilder, Encoding, Family};
pub use config::{Config, ConfigVersion};
pub use error::{OcioError, OcioResult};
pub use processor::{Processor, ProcessorOp};
pub use role::{Roles, names as role_names};
pub use transform::{
    BuiltinTransferTransform, ExponentTransform, ExponentWithLinearTransform, GroupTransform,
    LogTransform, MatrixTransform, RangeTransform, TransferStyle, Transform, TransformDirection,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_start_example() {
        let config = builtin::aces();
        let acescg = config.colorspace("ACEScg").unwrap();
        assert_eq!(acescg.name(), "ACEScg");

        let processor = config.processor("ACEScg", "sRGB").unwrap();
        let mut pixels = [[0.18_f32, 0.18, 0.18]];
        processor.apply_rgb(&mut pixels);
        assert!(pixels[0][0] > 0.18);
    }
}
