use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context as _;

use crate::{
    error::{StencilError, StencilResult},
    raster::Rgba8,
};

/// Checker configuration. Defaults reproduce the reference instance
/// (the `cat_sitting` template).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Path to the template PNG.
    pub template_path: PathBuf,
    /// Required filename prefix for submissions.
    pub filename_prefix: String,
    /// Template background color as `#RRGGBB`; treated as opaque.
    pub background_color: String,
    /// Template outline color as `#RRGGBB`; treated as opaque.
    pub outline_color: String,
    /// Directory where reports and annotated images are written.
    pub report_dir: PathBuf,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("cat_sitting_template.png"),
            filename_prefix: "cat_sitting_".to_string(),
            background_color: "#99D9EA".to_string(),
            outline_color: "#FFFFFF".to_string(),
            report_dir: PathBuf::from("reports"),
        }
    }
}

impl CheckConfig {
    pub fn load(path: &Path) -> StencilResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let r = BufReader::new(f);
        let cfg: CheckConfig =
            serde_json::from_reader(r).with_context(|| "parse config JSON")?;
        Ok(cfg)
    }

    pub fn background_rgba(&self) -> StencilResult<Rgba8> {
        parse_hex_color(&self.background_color)
    }

    pub fn outline_rgba(&self) -> StencilResult<Rgba8> {
        parse_hex_color(&self.outline_color)
    }
}

/// Parse `#RRGGBB` into an opaque RGBA8 value.
pub fn parse_hex_color(s: &str) -> StencilResult<Rgba8> {
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| StencilError::config(format!("color '{s}' must start with '#'")))?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(StencilError::config(format!(
            "color '{s}' must be 6 hex digits"
        )));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|e| StencilError::config(format!("color '{s}': {e}")))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?, 255])
}
