#![forbid(unsafe_code)]

pub mod checks;
pub mod config;
pub mod conformance;
pub mod error;
pub mod gallery;
pub mod pipeline;
pub mod raster;
pub mod report;

pub use config::CheckConfig;
pub use conformance::{
    check_outline_conformance, Conformance, DiffMap, PixelClass, TemplateColors,
};
pub use error::{StencilError, StencilResult};
pub use pipeline::{run_checks, CheckReport, CheckStatus};
pub use raster::{ImageRGBA, Rgba8};
pub use report::render_markdown;
