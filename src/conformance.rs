use crate::{
    error::{StencilError, StencilResult},
    raster::{over_in_place, ImageRGBA, Rgba8},
};

/// Translucent red laid over pixels that violate the template background.
pub const VIOLATION_TINT: Rgba8 = [255, 0, 0, 128];
/// Translucent blue laid over pixels that alter the outline guide.
pub const OUTLINE_TINT: Rgba8 = [0, 0, 255, 128];

/// The two template colors the engine instruments.
#[derive(Clone, Copy, Debug)]
pub struct TemplateColors {
    pub background: Rgba8,
    pub outline: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelClass {
    Unchanged,
    /// The submission painted over a region that must remain background.
    BackgroundViolation,
    /// The submission altered the outline guide itself. Tracked, never fatal.
    OutlineDifference,
}

/// Per-pixel classification of a submission against a template, plus counts.
#[derive(Clone, Debug)]
pub struct DiffMap {
    width: u32,
    height: u32,
    classes: Vec<PixelClass>,
    pub violations: u64,
    pub outline_differences: u64,
}

impl DiffMap {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn class_at(&self, x: u32, y: u32) -> PixelClass {
        debug_assert!(x < self.width && y < self.height);
        self.classes[y as usize * self.width as usize + x as usize]
    }
}

/// Outcome of a conformance run over one submission.
#[derive(Clone, Debug)]
pub struct Conformance {
    /// True iff no background-colored template pixel was altered.
    /// Outline differences alone do not fail the check.
    pub conforms: bool,
    /// The submission with violation/outline tints composited on top.
    pub annotated: ImageRGBA,
    pub diff: DiffMap,
}

/// Classify every pixel of `submission` against `template`.
///
/// Pure row-major scan. Equal pixels are `Unchanged`. Where the pixels differ,
/// a background-colored template pixel is a `BackgroundViolation` and an
/// outline-colored one an `OutlineDifference`; differing pixels over any other
/// template color are not instrumented.
pub fn classify(
    template: &ImageRGBA,
    submission: &ImageRGBA,
    colors: TemplateColors,
) -> StencilResult<DiffMap> {
    if template.dimensions() != submission.dimensions() {
        return Err(StencilError::validation(
            "classify expects template and submission of equal dimensions",
        ));
    }

    let background: &[u8] = &colors.background;
    let outline: &[u8] = &colors.outline;

    let mut classes = Vec::with_capacity(template.data.len() / 4);
    let mut violations = 0u64;
    let mut outline_differences = 0u64;

    for (t, s) in template
        .data
        .chunks_exact(4)
        .zip(submission.data.chunks_exact(4))
    {
        let class = if t == s {
            PixelClass::Unchanged
        } else if t == background {
            violations += 1;
            PixelClass::BackgroundViolation
        } else if t == outline {
            outline_differences += 1;
            PixelClass::OutlineDifference
        } else {
            PixelClass::Unchanged
        };
        classes.push(class);
    }

    Ok(DiffMap {
        width: template.width,
        height: template.height,
        classes,
        violations,
        outline_differences,
    })
}

/// Build the transparent overlay carrying the per-class tints.
pub fn build_overlay(diff: &DiffMap) -> ImageRGBA {
    let mut overlay = ImageRGBA::blank(diff.width, diff.height);
    for (px, class) in overlay.data.chunks_exact_mut(4).zip(diff.classes.iter()) {
        match class {
            PixelClass::Unchanged => {}
            PixelClass::BackgroundViolation => px.copy_from_slice(&VIOLATION_TINT),
            PixelClass::OutlineDifference => px.copy_from_slice(&OUTLINE_TINT),
        }
    }
    overlay
}

/// Composite the overlay for `diff` onto a copy of the submission.
pub fn annotate(submission: &ImageRGBA, diff: &DiffMap) -> StencilResult<ImageRGBA> {
    if submission.dimensions() != diff.dimensions() {
        return Err(StencilError::validation(
            "annotate expects a diff map matching the submission dimensions",
        ));
    }
    let overlay = build_overlay(diff);
    let mut annotated = submission.clone();
    over_in_place(&mut annotated.data, &overlay.data)?;
    Ok(annotated)
}

/// Run the full engine: classify, annotate, and reduce to a verdict.
///
/// Always completes the whole scan so the annotated image is produced even in
/// the violating case. Deterministic for identical inputs.
#[tracing::instrument(skip(template, submission, colors))]
pub fn check_outline_conformance(
    template: &ImageRGBA,
    submission: &ImageRGBA,
    colors: TemplateColors,
) -> StencilResult<Conformance> {
    let diff = classify(template, submission, colors)?;
    let annotated = annotate(submission, &diff)?;
    tracing::debug!(
        violations = diff.violations,
        outline_differences = diff.outline_differences,
        "classified submission against template"
    );
    Ok(Conformance {
        conforms: diff.violations == 0,
        annotated,
        diff,
    })
}
