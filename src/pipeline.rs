use std::path::Path;

use crate::{
    checks::{dimensions_match, is_valid_name, is_valid_png, submission_name},
    config::CheckConfig,
    conformance::{check_outline_conformance, TemplateColors},
    error::{StencilError, StencilResult},
    raster::ImageRGBA,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    /// The pipeline short-circuited before reaching this check.
    NotAttempted,
    Passed,
    Failed,
}

impl CheckStatus {
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            Self::Passed
        } else {
            Self::Failed
        }
    }

    pub fn passed(self) -> bool {
        self == Self::Passed
    }
}

/// Accumulated result of one check run, threaded through the pipeline as a
/// plain value. Later fields are only populated when every earlier check
/// passed; `NotAttempted` means exactly that, not failure.
#[derive(Clone, Debug)]
pub struct CheckReport {
    pub valid_png: CheckStatus,
    pub valid_name: CheckStatus,
    pub valid_dimensions: CheckStatus,
    pub within_outline: CheckStatus,
    pub submission_name: Option<String>,
    pub annotated: Option<ImageRGBA>,
}

impl Default for CheckReport {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckReport {
    pub fn new() -> Self {
        Self {
            valid_png: CheckStatus::NotAttempted,
            valid_name: CheckStatus::NotAttempted,
            valid_dimensions: CheckStatus::NotAttempted,
            within_outline: CheckStatus::NotAttempted,
            submission_name: None,
            annotated: None,
        }
    }

    pub fn passed(&self) -> bool {
        self.rows().iter().all(|(_, status)| status.passed())
    }

    /// The report table rows in their fixed rendering order.
    pub fn rows(&self) -> [(&'static str, CheckStatus); 4] {
        [
            ("Image file is a valid .png", self.valid_png),
            ("Image file has valid name", self.valid_name),
            (
                "Image file dimensions matches template",
                self.valid_dimensions,
            ),
            ("Drawing is within outline of template", self.within_outline),
        ]
    }
}

/// Run the ordered check pipeline over one submission file.
///
/// Cheap structural checks gate the pixel scan: the first failure stops the
/// run and everything after it stays `NotAttempted`. A missing or corrupt
/// template is an `Err` (operator configuration), never a check failure.
pub fn run_checks(cfg: &CheckConfig, submission_path: &Path) -> StencilResult<CheckReport> {
    let colors = TemplateColors {
        background: cfg.background_rgba()?,
        outline: cfg.outline_rgba()?,
    };

    let mut report = CheckReport::new();

    report.valid_png = CheckStatus::from_bool(is_valid_png(submission_path));
    if !report.valid_png.passed() {
        return Ok(report);
    }

    let filename = submission_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    report.valid_name = CheckStatus::from_bool(is_valid_name(filename, &cfg.filename_prefix));
    if !report.valid_name.passed() {
        return Ok(report);
    }
    let name = submission_name(filename, &cfg.filename_prefix).ok_or_else(|| {
        StencilError::validation("filename passed the pattern but the prefix would not strip")
    })?;
    report.submission_name = Some(name);

    let template = ImageRGBA::load(&cfg.template_path)?;
    let submission = ImageRGBA::load(submission_path)?;

    report.valid_dimensions = CheckStatus::from_bool(dimensions_match(&template, &submission));
    if !report.valid_dimensions.passed() {
        return Ok(report);
    }

    let conformance = check_outline_conformance(&template, &submission, colors)?;
    report.within_outline = CheckStatus::from_bool(conformance.conforms);
    report.annotated = Some(conformance.annotated);

    Ok(report)
}
